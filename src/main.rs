//! G-Code generator for a grid of circles, for pen plotters and laser engravers
//!
use anyhow::{Context, Result};
use gcode::config::PatternConfig;
use gcode::grid::Grid;
use gcode::patterns::{generate_pattern, CircleParams, PatternSet, Placement};
use gcode::preview::{Canvas, PreviewOptions};
use gcode::{export_gcode, write_program, ToolpathConfig};
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "circle_grid",
    about = "Generates a grid of circles at cell centers or cell corners"
)]
struct Opt {
    /// Field width, in mm
    #[structopt(long, default_value = "180")]
    field_width: f64,

    /// Field height, in mm
    #[structopt(long, default_value = "180")]
    field_height: f64,

    /// Number of cells across
    #[structopt(long, default_value = "50")]
    cells_x: u32,

    /// Number of cells down
    #[structopt(long, default_value = "50")]
    cells_y: u32,

    /// Preview resolution. Does not change the G code
    #[structopt(long, default_value = "96")]
    dpi: f64,

    /// Put circles on grid intersections instead of cell centers
    #[structopt(long)]
    vertices: bool,

    /// Circle diameter, as a fraction of the smaller cell side
    #[structopt(long, default_value = "0.5")]
    circle_diameter: f64,

    /// Shrink each side of every circle by this much, in mm
    #[structopt(long, default_value = "0")]
    padding: f64,

    /// Line segments per circle
    #[structopt(long, default_value = "32")]
    segments: usize,

    /// Travel height
    #[structopt(long, default_value = "5")]
    safe_z: f64,

    /// Drawing height
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    work_z: f64,

    /// Name for the job
    #[structopt(short, long)]
    name: Option<String>,

    /// Output file for the resulting G code. Written to stdout if not set
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Also write an SVG preview of the pattern
    #[structopt(long, parse(from_os_str))]
    preview: Option<PathBuf>,

    /// Leave the cell grid out of the preview
    #[structopt(long)]
    no_grid: bool,
}

impl Opt {
    fn config(&self) -> PatternConfig {
        PatternConfig {
            field_width: self.field_width,
            field_height: self.field_height,
            cells_x: self.cells_x,
            cells_y: self.cells_y,
            dpi: self.dpi,
            circle: CircleParams {
                placement: if self.vertices {
                    Placement::Vertices
                } else {
                    Placement::Faces
                },
                diameter_fraction: self.circle_diameter,
                padding: self.padding,
                segments: self.segments,
            },
            toolpath: ToolpathConfig {
                safe_z: self.safe_z,
                work_z: self.work_z,
                name: self.name.clone(),
            },
        }
    }
}

/// Filter from `RUST_LOG` when it parses, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(io::stderr)
        .init();
}

fn help_text(config: &PatternConfig, grid: &Grid, patterns: &PatternSet) {
    info!(
        "Before plotting:
        - Field is {}x{}mm, {} circles
        - Set home to the field origin (X0 Y0)
        - Preview canvas is {:.0}x{:.0}px",
        config.field_width,
        config.field_height,
        patterns.len(),
        grid.canvas_width,
        grid.canvas_height
    )
}

fn create(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_preview(path: &Path, grid: &Grid, patterns: &PatternSet, show_grid: bool) -> Result<()> {
    let mut file = create(path)?;
    Canvas::new(grid).write_svg(&mut file, patterns, &PreviewOptions { show_grid })?;
    file.flush()?;
    info!("Wrote preview to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let opt = Opt::from_args();
    let config = opt.config();

    let grid = Grid::from_config(&config)?;
    let patterns = generate_pattern(&grid, &config.circle)?;
    help_text(&config, &grid, &patterns);

    let program = export_gcode(&patterns, &config.toolpath);
    match &opt.output {
        Some(path) => {
            let mut file = create(path)?;
            write_program(&mut file, &program)?;
            file.flush()?;
            info!("Wrote {} lines to {}", program.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_program(&mut out, &program)?;
            out.flush()?;
        }
    }

    if let Some(path) = &opt.preview {
        write_preview(path, &grid, &patterns, !opt.no_grid)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("trace")).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }
}

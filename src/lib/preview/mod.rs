//! On-screen rendering of a pattern, for checking it before plotting.
//!
//! Paths live in field space (mm); the preview lives in pixel space, sized by the grid's DPI.
//! [`Canvas`] is the only place the two meet.
use std::io::{Result, Write};

use nalgebra::geometry::Point2;

use crate::geometry::Path;
use crate::grid::Grid;
use crate::patterns::PatternSet;

const GRID_STROKE: &str = "rgb(200,200,200)";
const PATH_STROKE: &str = "black";

#[derive(Clone, Debug)]
pub struct PreviewOptions {
    /// Overlay the cell boundaries
    pub show_grid: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        PreviewOptions { show_grid: true }
    }
}

#[derive(Clone, Debug)]
pub struct Canvas<'a> {
    grid: &'a Grid,
}

impl<'a> Canvas<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Canvas { grid }
    }

    pub fn width(&self) -> f64 {
        self.grid.canvas_width
    }

    pub fn height(&self) -> f64 {
        self.grid.canvas_height
    }

    /// Field space (mm) to pixels
    pub fn to_pixel(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            p.x / self.grid.field_width * self.grid.canvas_width,
            p.y / self.grid.field_height * self.grid.canvas_height,
        )
    }

    /// Pixels back to field space (mm)
    pub fn to_field(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            p.x * self.grid.field_width / self.grid.canvas_width,
            p.y * self.grid.field_height / self.grid.canvas_height,
        )
    }

    /// Debug overlay: every vertical cell boundary, then every horizontal one, in pixels.
    pub fn grid_lines(&self) -> Vec<(Point2<f64>, Point2<f64>)> {
        let (w, h) = (self.width(), self.height());
        let nx = self.grid.cells_x;
        let ny = self.grid.cells_y;
        let mut lines = Vec::with_capacity(nx as usize + ny as usize + 2);
        for i in 0..=nx {
            let x = i as f64 / nx as f64 * w;
            lines.push((Point2::new(x, 0.0), Point2::new(x, h)));
        }
        for j in 0..=ny {
            let y = j as f64 / ny as f64 * h;
            lines.push((Point2::new(0.0, y), Point2::new(w, y)));
        }
        lines
    }

    fn path_element(&self, path: &Path) -> String {
        let points: Vec<String> = path
            .points
            .iter()
            .map(|p| {
                let px = self.to_pixel(p);
                format!("{:.3},{:.3}", px.x, px.y)
            })
            .collect();
        let tag = if path.closed { "polygon" } else { "polyline" };
        format!("<{tag} points=\"{}\"/>", points.join(" "))
    }

    /// Write the pattern as a standalone SVG document, one outlined shape per path.
    pub fn write_svg(
        &self,
        file: &mut dyn Write,
        patterns: &PatternSet,
        options: &PreviewOptions,
    ) -> Result<()> {
        let (w, h) = (self.width(), self.height());
        writeln!(
            file,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.3}\" height=\"{h:.3}\" viewBox=\"0 0 {w:.3} {h:.3}\">"
        )?;
        writeln!(file, "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;

        if options.show_grid {
            writeln!(file, "<g id=\"grid\" stroke=\"{GRID_STROKE}\" fill=\"none\">")?;
            for (a, b) in self.grid_lines() {
                writeln!(
                    file,
                    "<line x1=\"{:.3}\" y1=\"{:.3}\" x2=\"{:.3}\" y2=\"{:.3}\"/>",
                    a.x, a.y, b.x, b.y
                )?;
            }
            writeln!(file, "</g>")?;
        }

        writeln!(file, "<g id=\"pattern\" stroke=\"{PATH_STROKE}\" fill=\"none\">")?;
        for path in patterns.iter().filter(|p| !p.is_empty()) {
            writeln!(file, "{}", self.path_element(path))?;
        }
        writeln!(file, "</g>")?;
        writeln!(file, "</svg>")
    }
}

use tracing::debug;

use crate::config::PatternConfig;
use crate::error::{PatternError, Result};

pub const MM_PER_INCH: f64 = 25.4;
/// Upper bound on cells along either axis
pub const MAX_CELLS: u32 = 100_000;

/// A field of `field_width` x `field_height` mm, split into equal cells.
///
/// Also carries the pixel size of the preview canvas, derived from `dpi`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub field_width: f64,
    pub field_height: f64,
    pub cells_x: u32,
    pub cells_y: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub dpi: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

fn check_positive(name: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(PatternError::invalid(format!(
            "{name} must be positive, got {v}"
        )))
    }
}

impl Grid {
    pub fn new(
        field_width: f64,
        field_height: f64,
        cells_x: u32,
        cells_y: u32,
        dpi: f64,
    ) -> Result<Self> {
        check_positive("field width", field_width)?;
        check_positive("field height", field_height)?;
        if cells_x == 0 || cells_y == 0 || cells_x > MAX_CELLS || cells_y > MAX_CELLS {
            return Err(PatternError::invalid(format!(
                "cell counts must be between 1 and {MAX_CELLS}, got {cells_x}x{cells_y}"
            )));
        }
        check_positive("DPI", dpi)?;

        let grid = Grid {
            field_width,
            field_height,
            cells_x,
            cells_y,
            cell_width: field_width / cells_x as f64,
            cell_height: field_height / cells_y as f64,
            dpi,
            canvas_width: field_width / MM_PER_INCH * dpi,
            canvas_height: field_height / MM_PER_INCH * dpi,
        };
        debug!(
            cell_width = grid.cell_width,
            cell_height = grid.cell_height,
            canvas_width = grid.canvas_width,
            canvas_height = grid.canvas_height,
            "configured grid"
        );
        Ok(grid)
    }

    /// Checks the whole configuration, including tool heights, before building the grid.
    pub fn from_config(config: &PatternConfig) -> Result<Self> {
        config.toolpath.validate()?;
        Grid::new(
            config.field_width,
            config.field_height,
            config.cells_x,
            config.cells_y,
            config.dpi,
        )
    }

    /// The smaller of the two cell dimensions, which bounds the circle size
    pub fn min_cell_size(&self) -> f64 {
        self.cell_width.min(self.cell_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_cell_and_canvas_sizes() {
        let grid = Grid::new(180.0, 90.0, 2, 3, 96.0).unwrap();
        assert!((grid.cell_width - 90.0).abs() < EPSILON);
        assert!((grid.cell_height - 30.0).abs() < EPSILON);
        assert!((grid.canvas_width - 180.0 / 25.4 * 96.0).abs() < EPSILON);
        assert!((grid.canvas_height - 90.0 / 25.4 * 96.0).abs() < EPSILON);
        assert!((grid.min_cell_size() - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_one_inch_at_100_dpi() {
        let grid = Grid::new(25.4, 50.8, 1, 1, 100.0).unwrap();
        assert!((grid.canvas_width - 100.0).abs() < EPSILON);
        assert!((grid.canvas_height - 200.0).abs() < EPSILON);
    }

    #[test]
    fn test_default_config() {
        let grid = Grid::from_config(&PatternConfig::default()).unwrap();
        assert_eq!(grid.cells_x, 50);
        assert!((grid.cell_width - 3.6).abs() < EPSILON);
    }

    #[test]
    fn test_zero_cells_rejected() {
        let err = Grid::new(180.0, 180.0, 0, 5, 96.0).unwrap_err();
        assert!(matches!(err, PatternError::InvalidConfiguration { .. }));
        let err = Grid::new(180.0, 180.0, 5, 0, 96.0).unwrap_err();
        assert!(matches!(err, PatternError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_too_many_cells_rejected() {
        let err = Grid::new(180.0, 180.0, u32::MAX, 1, 96.0).unwrap_err();
        assert!(matches!(err, PatternError::InvalidConfiguration { .. }));
        assert!(Grid::new(180.0, 180.0, 1, MAX_CELLS + 1, 96.0).is_err());
        assert!(Grid::new(180.0, 180.0, MAX_CELLS, 1, 96.0).is_ok());
    }

    #[test]
    fn test_non_finite_heights_rejected() {
        let mut config = PatternConfig::default();
        config.toolpath.safe_z = f64::NAN;
        let err = Grid::from_config(&config).unwrap_err();
        assert!(matches!(err, PatternError::InvalidConfiguration { .. }));
        config.toolpath.safe_z = 5.0;
        config.toolpath.work_z = f64::NEG_INFINITY;
        assert!(Grid::from_config(&config).is_err());
    }

    #[test]
    fn test_bad_field_rejected() {
        for (w, h) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (f64::INFINITY, 1.0)] {
            let err = Grid::new(w, h, 1, 1, 96.0).unwrap_err();
            assert!(matches!(err, PatternError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_bad_dpi_rejected() {
        assert!(Grid::new(10.0, 10.0, 1, 1, 0.0).is_err());
        assert!(Grid::new(10.0, 10.0, 1, 1, -96.0).is_err());
    }
}

use nalgebra::geometry::Point2;
use tracing::debug;

use crate::error::{PatternError, Result};
use crate::geometry::{circle_path, Path};
use crate::grid::Grid;

/// Vertices in each circle polygon. 32 is visually indistinguishable from a
/// true circle at typical cell sizes.
pub const CIRCLE_SEGMENTS: usize = 32;

/// Where circle centers go
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The middle of each cell
    Faces,
    /// Every grid line intersection, including the field border
    Vertices,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleParams {
    pub placement: Placement,
    /// Diameter as a fraction of the smaller cell dimension, at most 1. Zero or less leaves no circle
    pub diameter_fraction: f64,
    /// Shrink applied to each side of the circle, in mm
    pub padding: f64,
    pub segments: usize,
}

/// The paths generated for one configuration, in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternSet {
    pub paths: Vec<Path>,
}

impl PatternSet {
    pub fn new(paths: Vec<Path>) -> Self {
        PatternSet { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }
}

/// Diameter left once `padding` is taken off both sides. Fails rather than
/// returning a zero or negative value, including when the fraction itself is not positive.
pub fn effective_diameter(grid: &Grid, params: &CircleParams) -> Result<f64> {
    let fraction = params.diameter_fraction;
    if !(fraction.is_finite() && fraction <= 1.0) {
        return Err(PatternError::invalid(format!(
            "circle diameter must be at most 1, got {fraction}"
        )));
    }
    if !(params.padding.is_finite() && params.padding >= 0.0) {
        return Err(PatternError::invalid(format!(
            "padding must not be negative, got {}",
            params.padding
        )));
    }
    if params.segments < 3 {
        return Err(PatternError::invalid(format!(
            "a circle needs at least 3 segments, got {}",
            params.segments
        )));
    }

    let diameter = grid.min_cell_size() * fraction - 2.0 * params.padding;
    if diameter <= 0.0 {
        return Err(PatternError::DegenerateGeometry { diameter });
    }
    Ok(diameter)
}

/// Circle centers, row-major by column index `i` then row index `j`.
pub fn circle_centers(grid: &Grid, placement: Placement) -> Vec<Point2<f64>> {
    let (nx, ny, offset) = match placement {
        Placement::Faces => (grid.cells_x as usize, grid.cells_y as usize, 0.5),
        Placement::Vertices => (grid.cells_x as usize + 1, grid.cells_y as usize + 1, 0.0),
    };
    let mut centers = Vec::with_capacity(nx * ny);
    for i in 0..nx {
        for j in 0..ny {
            centers.push(Point2::new(
                (i as f64 + offset) * grid.cell_width,
                (j as f64 + offset) * grid.cell_height,
            ));
        }
    }
    centers
}

/// Generate one circle per center. Nothing is produced unless the whole
/// configuration is valid.
pub fn generate_pattern(grid: &Grid, params: &CircleParams) -> Result<PatternSet> {
    let diameter = effective_diameter(grid, params)?;
    let radius = diameter / 2.0;

    let paths: Vec<Path> = circle_centers(grid, params.placement)
        .into_iter()
        .map(|c| circle_path(c, radius, params.segments))
        .collect();

    debug!(
        placement = ?params.placement,
        diameter,
        circles = paths.len(),
        "generated pattern"
    );
    Ok(PatternSet::new(paths))
}

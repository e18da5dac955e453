//! The full configuration surface, gathered into one immutable struct.
//!
//! Defaults are the stock plotter setup: a 180mm square field cut
//! into 50x50 cells, half-cell circles at each cell center, previewed at 96 DPI.
use crate::patterns::{CircleParams, Placement, CIRCLE_SEGMENTS};
use crate::ToolpathConfig;

pub const DEFAULT_FIELD_SIZE: f64 = 180.0;
pub const DEFAULT_CELLS: u32 = 50;
pub const DEFAULT_DPI: f64 = 96.0;
pub const DEFAULT_DIAMETER_FRACTION: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct PatternConfig {
    /// Field width, in mm
    pub field_width: f64,
    /// Field height, in mm
    pub field_height: f64,
    pub cells_x: u32,
    pub cells_y: u32,
    /// Display resolution. Only affects the preview, never exported coordinates
    pub dpi: f64,
    pub circle: CircleParams,
    pub toolpath: ToolpathConfig,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            field_width: DEFAULT_FIELD_SIZE,
            field_height: DEFAULT_FIELD_SIZE,
            cells_x: DEFAULT_CELLS,
            cells_y: DEFAULT_CELLS,
            dpi: DEFAULT_DPI,
            circle: CircleParams {
                placement: Placement::Faces,
                diameter_fraction: DEFAULT_DIAMETER_FRACTION,
                padding: 0.0,
                segments: CIRCLE_SEGMENTS,
            },
            toolpath: ToolpathConfig::default(),
        }
    }
}

use thiserror::Error;

/// Errors raised while configuring the grid or generating a pattern.
///
/// Both variants are caller mistakes detected before any path exists, so a
/// failed run never produces partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the value
        reason: String,
    },

    /// Padding ate the whole circle
    #[error("Degenerate geometry: effective circle diameter {diameter} is not positive")]
    DegenerateGeometry {
        /// The computed diameter, in mm
        diameter: f64,
    },
}

impl PatternError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        PatternError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;

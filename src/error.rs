use thiserror::Error;

/// Errors raised by the pricing engine and the grid sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A scalar input violates its domain constraint.
    #[error("invalid parameter '{field}' = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// A sweep or heatmap request is structurally invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PricingError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        PricingError::Configuration(msg.into())
    }

    /// Name of the offending field for `InvalidParameter`, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PricingError::InvalidParameter { field, .. } => Some(field),
            PricingError::Configuration(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;

// Domain errors for profile conversion
use super::unit::EnergyUnit;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    /// The static conversion table has no usable rule for this pair.
    #[error("invalid conversion rule: no rule converts {from} to {to}")]
    InvalidConversionRule { from: EnergyUnit, to: EnergyUnit },

    #[error("insufficient data: {len} samples, window size is {window_size}")]
    InsufficientData { len: usize, window_size: usize },

    #[error("malformed profile: {0}")]
    MalformedProfile(String),

    #[error("unsupported interval: {0} minutes (allowed: 1, 5, 15, 30, 60, 1440)")]
    UnsupportedInterval(u32),

    #[error("unknown unit: {0} (allowed: kWh, Wh, KJ, J)")]
    UnknownUnit(String),
}

impl ConversionError {
    /// Errors caused by the input rather than by a defect in the converter
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ConversionError::InvalidConversionRule { .. })
    }
}

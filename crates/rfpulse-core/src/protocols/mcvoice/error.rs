use thiserror::Error;

use crate::CodecError;

/// Errors returned by McVoice RM1011B validation, decoding and encoding.
///
/// # Examples
/// ```
/// use rfpulse_core::protocols::mcvoice::error::McVoiceError;
///
/// let err = McVoiceError::InvalidLength { expected: 51, actual: 50 };
/// assert!(err.to_string().contains("invalid frame length"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum McVoiceError {
    #[error("invalid frame length: need {expected} pulses, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("footer pulse {value} outside {min}..={max}")]
    FooterOutOfRange { value: u32, min: u32, max: u32 },
    #[error("pulse index {index} out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },
    #[error("missing {field}")]
    MissingField { field: &'static str },
    #[error("unit code {value} does not fit in {bits} bits")]
    UnitcodeOutOfRange { value: u32, bits: usize },
}

impl From<McVoiceError> for CodecError {
    fn from(value: McVoiceError) -> Self {
        match value {
            McVoiceError::MissingField { field } => CodecError::MissingField { field },
            McVoiceError::UnitcodeOutOfRange { value, .. } => CodecError::UnitcodeOutOfRange {
                value,
                max: super::layout::MAX_UNITCODE,
            },
            other => CodecError::InvalidFrame {
                reason: other.to_string(),
            },
        }
    }
}

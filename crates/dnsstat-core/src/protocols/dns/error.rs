use thiserror::Error;

/// Errors returned by DNS message decoding.
///
/// # Examples
/// ```
/// use dnsstat_core::DecodeError;
///
/// let err = DecodeError::TooShort { needed: 12, actual: 4 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unsupported label type {value:#04x} at question offset {offset}")]
    UnsupportedLabel { offset: usize, value: u8 },
}

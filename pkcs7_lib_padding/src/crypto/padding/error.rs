pub type Result<T> = std::result::Result<T, PaddingError>;

/// `InvalidPadding` is deliberately opaque: every malformed-padding case
/// maps to it with the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaddingError {
    #[error("pkcs7: block size must be between 1 and 255 inclusive, got {0}")]
    InvalidBlockSize(usize),
    #[error("pkcs7: source must not be empty")]
    EmptyInput,
    #[error("pkcs7: invalid padding")]
    InvalidPadding,
}

//! Error types for struct construction, decoding and encoding

/// Errors raised while building a struct layout or running a decode/encode pass
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructError {
    /// Type name not present in the registry
    #[error("no such type: \"{0}\"")]
    NoSuchType(String),

    /// `../` path used where no enclosing struct exists
    #[error("cannot access nonexistent parent")]
    NoParent,

    /// Array value does not have the resolved element count
    #[error("cannot write incorrect array length, expected {expected}, got {actual}")]
    ArrayLengthMismatch { expected: usize, actual: usize },

    /// Encoded text does not have the resolved byte length
    #[error("cannot write incorrect string size, expected {expected}, got {actual}")]
    StringLengthMismatch { expected: usize, actual: usize },

    /// Raw byte value does not have the resolved length
    #[error("cannot write incorrect buffer size, expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    /// Access past the end of the underlying buffer
    #[error("out of bounds: {needed} bytes at offset {offset} exceed buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// Path names a field that has not been decoded (or does not exist)
    #[error("cannot resolve path \"{0}\"")]
    UnresolvedPath(String),

    /// Value has the wrong shape for the type it was handed to
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Integer does not fit the primitive it is written as
    #[error("value {value} out of range for {ty}")]
    ValueOutOfRange { ty: &'static str, value: String },

    /// Resolved length is negative or not a whole number
    #[error("invalid length {0}")]
    InvalidLength(String),

    /// Resolved length is larger than the configured maximum
    #[error("length {len} exceeds the configured maximum of {max}")]
    LengthLimitExceeded { len: usize, max: usize },

    /// Decoded array of zero-width elements is longer than the input left
    #[error("array of {len} zero-width elements exceeds the {remaining} bytes left")]
    UnboundedArray { len: usize, remaining: usize },

    /// Text could not be decoded from or encoded to bytes
    #[error("invalid {encoding} text: {reason}")]
    InvalidText {
        encoding: &'static str,
        reason: String,
    },

    /// Struct already has a field with this name
    #[error("duplicate field \"{0}\"")]
    DuplicateField(String),

    /// Encode wrote a different number of bytes than `size` reported
    #[error("size mismatch: expected {expected} bytes, wrote {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Raised by user transforms and custom types
    #[error("{0}")]
    Custom(String),

    /// Configuration could not be parsed
    #[error("invalid config: {0}")]
    Config(String),
}

impl StructError {
    /// Build a [`StructError::Custom`] from any displayable message.
    pub fn custom(msg: impl std::fmt::Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = StructError> = std::result::Result<T, E>;

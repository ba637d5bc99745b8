use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Unsupported stretch function: {0}")]
    UnsupportedStretchFunction(String),

    #[error("Unsupported profile version {0} (only version 2 is supported)")]
    UnsupportedVersion(u32),

    #[error("At least one character class must be selected")]
    NoCharacterClass,

    #[error("Unknown character class bits: {0:#04x}")]
    UnknownClassFlags(u8),

    #[error("Password length {length} must exceed the number of selected classes ({classes})")]
    LengthTooShort { length: usize, classes: usize },

    #[error("Password length {length} exceeds the maximum of {max}")]
    LengthTooLong { length: usize, max: usize },

    #[error("Key length {length} bytes exceeds the maximum of {max}")]
    KeyLengthTooLong { length: usize, max: usize },

    #[error("Iteration count must be positive")]
    ZeroIterations,

    #[error("Key length must be positive")]
    ZeroKeyLength,

    #[error("Counter must be positive")]
    ZeroCounter,
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

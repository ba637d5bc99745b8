use crate::charset::ClassFlags;
use crate::error::{ConfigurationError, Result};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_VERSION: u32 = 2;
pub const DEFAULT_COUNTER: u32 = 1;

pub const MAX_PASSWORD_LENGTH: usize = 4096;
pub const MAX_KEY_LENGTH_BYTES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StretchFunction {
    Pbkdf2HmacSha1,
    Pbkdf2HmacSha224,
    Pbkdf2HmacSha256,
    Pbkdf2HmacSha384,
    Pbkdf2HmacSha512,
}

impl StretchFunction {
    pub fn name(self) -> &'static str {
        match self {
            StretchFunction::Pbkdf2HmacSha1 => "PBKDF2-HMAC-SHA1",
            StretchFunction::Pbkdf2HmacSha224 => "PBKDF2-HMAC-SHA224",
            StretchFunction::Pbkdf2HmacSha256 => "PBKDF2-HMAC-SHA256",
            StretchFunction::Pbkdf2HmacSha384 => "PBKDF2-HMAC-SHA384",
            StretchFunction::Pbkdf2HmacSha512 => "PBKDF2-HMAC-SHA512",
        }
    }
}

impl fmt::Display for StretchFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StretchFunction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        match key.as_str() {
            "PBKDF2HMACSHA1" | "PBKDF2WITHHMACSHA1" => Ok(StretchFunction::Pbkdf2HmacSha1),
            "PBKDF2HMACSHA224" | "PBKDF2WITHHMACSHA224" => Ok(StretchFunction::Pbkdf2HmacSha224),
            "PBKDF2HMACSHA256" | "PBKDF2WITHHMACSHA256" => Ok(StretchFunction::Pbkdf2HmacSha256),
            "PBKDF2HMACSHA384" | "PBKDF2WITHHMACSHA384" => Ok(StretchFunction::Pbkdf2HmacSha384),
            "PBKDF2HMACSHA512" | "PBKDF2WITHHMACSHA512" => Ok(StretchFunction::Pbkdf2HmacSha512),
            _ => Err(ConfigurationError::UnsupportedStretchFunction(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchConfig {
    pub function: StretchFunction,
    pub iterations: u32,
    pub key_length_bytes: usize,
}

impl StretchConfig {
    pub const V2: Self = Self {
        function: StretchFunction::Pbkdf2HmacSha256,
        iterations: 100_000,
        key_length_bytes: 32,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub version: u32,
    pub stretch: StretchFunction,
    pub iterations: u32,
    pub key_length_bytes: usize,
    pub counter: u32,
    pub length: usize,
    pub class_flags: ClassFlags,
}

impl Profile {
    pub fn new(length: usize, class_flags: ClassFlags) -> Self {
        let defaults = StretchConfig::V2;
        Self {
            version: DEFAULT_VERSION,
            stretch: defaults.function,
            iterations: defaults.iterations,
            key_length_bytes: defaults.key_length_bytes,
            counter: DEFAULT_COUNTER,
            length,
            class_flags,
        }
    }

    pub fn default_stretch(version: u32) -> Result<StretchConfig> {
        match version {
            2 => Ok(StretchConfig::V2),
            other => Err(ConfigurationError::UnsupportedVersion(other)),
        }
    }

    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = counter;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_key_length(mut self, key_length_bytes: usize) -> Self {
        self.key_length_bytes = key_length_bytes;
        self
    }

    pub fn with_stretch(mut self, stretch: StretchFunction) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn class_count(&self) -> usize {
        self.class_flags.len()
    }

    pub fn validate(&self) -> Result<()> {
        Self::default_stretch(self.version)?;

        if self.class_flags.is_empty() {
            return Err(ConfigurationError::NoCharacterClass);
        }

        if self.length <= self.class_count() {
            return Err(ConfigurationError::LengthTooShort {
                length: self.length,
                classes: self.class_count(),
            });
        }
        if self.length > MAX_PASSWORD_LENGTH {
            return Err(ConfigurationError::LengthTooLong {
                length: self.length,
                max: MAX_PASSWORD_LENGTH,
            });
        }
        if self.iterations == 0 {
            return Err(ConfigurationError::ZeroIterations);
        }
        if self.key_length_bytes == 0 {
            return Err(ConfigurationError::ZeroKeyLength);
        }
        if self.key_length_bytes > MAX_KEY_LENGTH_BYTES {
            return Err(ConfigurationError::KeyLengthTooLong {
                length: self.key_length_bytes,
                max: MAX_KEY_LENGTH_BYTES,
            });
        }
        if self.counter == 0 {
            return Err(ConfigurationError::ZeroCounter);
        }

        Ok(())
    }
}

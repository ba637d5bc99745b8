use crate::error::{ConfigurationError, Result};
use std::fmt;
use std::ops::BitOr;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMERIC: &str = "0123456789";
const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Numeric,
    Symbols,
}

impl CharacterClass {
    pub fn flag(self) -> ClassFlags {
        match self {
            CharacterClass::Lowercase => ClassFlags::LOWERCASE,
            CharacterClass::Uppercase => ClassFlags::UPPERCASE,
            CharacterClass::Numeric => ClassFlags::NUMERIC,
            CharacterClass::Symbols => ClassFlags::SYMBOLS,
        }
    }

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Numeric => NUMERIC,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Numeric => "numbers",
            CharacterClass::Symbols => "symbols",
        }
    }
}

// Canonical class order. Reordering this table changes every derived password.
pub const CATALOG: [CharacterClass; 4] = [
    CharacterClass::Lowercase,
    CharacterClass::Uppercase,
    CharacterClass::Numeric,
    CharacterClass::Symbols,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassFlags(u8);

impl ClassFlags {
    pub const NONE: Self = Self(0x00);
    pub const LOWERCASE: Self = Self(0x01);
    pub const UPPERCASE: Self = Self(0x02);
    pub const NUMERIC: Self = Self(0x04);
    pub const SYMBOLS: Self = Self(0x08);

    pub const LETTERS: Self = Self(Self::LOWERCASE.0 | Self::UPPERCASE.0);
    pub const ALPHANUMERIC: Self = Self(Self::LETTERS.0 | Self::NUMERIC.0);
    pub const ALL: Self = Self(Self::ALPHANUMERIC.0 | Self::SYMBOLS.0);

    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits & !Self::ALL.0 != 0 {
            return Err(ConfigurationError::UnknownClassFlags(bits));
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl BitOr for ClassFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<CharacterClass> for ClassFlags {
    fn from(class: CharacterClass) -> Self {
        class.flag()
    }
}

impl fmt::Display for ClassFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = selected(*self).map(CharacterClass::name).collect();
        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join(", "))
        }
    }
}

pub fn selected(flags: ClassFlags) -> impl Iterator<Item = CharacterClass> {
    CATALOG
        .into_iter()
        .filter(move |class| flags.contains(class.flag()))
}

pub fn combined_alphabet(flags: ClassFlags) -> String {
    selected(flags).map(CharacterClass::alphabet).collect()
}

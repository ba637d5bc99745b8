pub mod charset;
pub mod derive;
pub mod error;
pub mod generator;
pub mod kdf;
pub mod profile;

pub use charset::{CharacterClass, ClassFlags};
pub use derive::derive;
pub use error::ConfigurationError;
pub use generator::render_password;
pub use kdf::derive_entropy;
pub use profile::{Profile, StretchConfig, StretchFunction};

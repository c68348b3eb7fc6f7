//! Sources for the bank encryption public key.

mod file_public_key;
mod static_public_key;

pub use file_public_key::{FilePublicKeyProvider, DEFAULT_RELATIVE_KEY_PATH};
pub use static_public_key::StaticPublicKeyProvider;

//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client to external systems:
//! - `http` - Provider transports (reqwest, mock)
//! - `keys` - Public key providers (file, in-memory)

pub mod http;
pub mod keys;

pub use http::{ClientIdentity, MockTransport, ReqwestTransport, TransportConfig};
pub use keys::{FilePublicKeyProvider, StaticPublicKeyProvider};

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the client and the outside world. Adapters implement these ports.
//!
//! - `PayTransport` - Sends signed XML bodies to provider endpoints
//! - `PublicKeyProvider` - Supplies the RSA key used for bank payouts

mod pay_transport;
mod public_key_provider;

pub use pay_transport::{OutgoingRequest, PayTransport};
pub use public_key_provider::PublicKeyProvider;

//! HTTP transports for the provider API.
//!
//! - `ReqwestTransport` - mutual-TLS HTTPS client used in production
//! - `MockTransport` - records requests and replays canned bodies

mod mock_transport;
mod reqwest_transport;

pub use mock_transport::MockTransport;
pub use reqwest_transport::{ClientIdentity, ReqwestTransport, TransportConfig};

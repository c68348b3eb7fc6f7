//! Domain layer containing the merchant pay types and pure logic.
//!
//! # Module Organization
//!
//! - `merchant` - Credentials, request parameters, endpoints, signing,
//!   the XML codec, bank field encryption and parsed responses
pub mod merchant;

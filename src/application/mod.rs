//! Application layer - the merchant pay client.
//!
//! Composes the domain (signing, XML) with the ports (transport, public
//! key source) into the five provider operations.

mod merchant_pay_client;

pub use merchant_pay_client::{MerchantPayClient, ENCRYPTED_BANK_FIELDS};

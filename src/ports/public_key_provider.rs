//! Public Key Provider Port - supplies the bank encryption key.

use async_trait::async_trait;

use crate::domain::merchant::{MerchantPayError, PublicKeyPem};

/// Port for obtaining the provider's RSA public key (PEM).
///
/// Implementations return `MerchantPayError::KeyLoad` when the key cannot
/// be read. Parsing happens in the caller.
#[async_trait]
pub trait PublicKeyProvider: Send + Sync {
    async fn public_key_pem(&self) -> Result<PublicKeyPem, MerchantPayError>;
}

use async_trait::async_trait;
use rand::RngCore;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenGenerator;

/// Token generator backed by the OS CSPRNG. Tokens are 32 random bytes,
/// hex-encoded for safe use in URLs.
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

impl Default for SecureTokenGenerator {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl TokenGenerator for SecureTokenGenerator {
  async fn generate(&self) -> Result<String, AuthError> {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Ok(hex::encode(bytes))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_tokens_are_unique() {
    let generator = SecureTokenGenerator::new();
    let token1 = generator.generate().await.unwrap();
    let token2 = generator.generate().await.unwrap();
    assert_ne!(token1, token2);
  }

  #[tokio::test]
  async fn test_token_shape() {
    let generator = SecureTokenGenerator::new();
    let token = generator.generate().await.unwrap();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
  }
}

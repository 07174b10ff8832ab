use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{LoginAttempt, Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash};

#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: User) -> Result<User, AuthError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
  async fn find_by_identification_code(&self, code: &str) -> Result<Option<User>, AuthError>;
  async fn update(&self, user: User) -> Result<User, AuthError>;
  /// Hard delete; payers, invoices and sessions cascade at the store level
  async fn delete(&self, id: Uuid) -> Result<(), AuthError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
  async fn create(&self, session: Session) -> Result<Session, AuthError>;
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;
  async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Session>, AuthError>;
  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;
  async fn delete_all_for_user(&self, user_id: Uuid) -> Result<usize, AuthError>;
}

#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
  async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError>;

  /// Number of failed attempts for an email within the trailing window
  async fn count_recent_failures(
    &self,
    email: &str,
    window_seconds: i64,
  ) -> Result<i64, AuthError>;
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

#[async_trait]
pub trait TokenGenerator: Send + Sync {
  /// Generates a cryptographically secure random token
  async fn generate(&self) -> Result<String, AuthError>;
}

/// Outbound account mail: verification and password-reset links
#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send_email_verification(&self, to: &str, url: &str) -> Result<(), AuthError>;
  async fn send_password_reset(&self, to: &str, url: &str) -> Result<(), AuthError>;
}

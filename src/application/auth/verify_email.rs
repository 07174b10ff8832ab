use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

#[derive(Debug, Clone)]
pub struct VerifyEmailCommand {
  pub uid: Uuid,
  pub token: String,
}

pub struct VerifyEmailUseCase {
  auth_service: Arc<AuthService>,
}

impl VerifyEmailUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: VerifyEmailCommand) -> Result<(), AuthError> {
    self
      .auth_service
      .verify_email(command.uid, &command.token)
      .await?;
    Ok(())
  }
}

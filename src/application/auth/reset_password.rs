use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Password;

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
  pub uid: Uuid,
  pub token: String,
  pub new_password: String,
}

pub struct ResetPasswordUseCase {
  auth_service: Arc<AuthService>,
}

impl ResetPasswordUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: ResetPasswordCommand) -> Result<(), AuthError> {
    let new_password = Password::new(command.new_password)?;
    self
      .auth_service
      .reset_password(command.uid, &command.token, new_password)
      .await
  }
}

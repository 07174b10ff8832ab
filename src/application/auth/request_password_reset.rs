use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::Email;

#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
  pub email: String,
}

pub struct RequestPasswordResetUseCase {
  auth_service: Arc<AuthService>,
}

impl RequestPasswordResetUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, command: RequestPasswordResetCommand) -> Result<(), AuthError> {
    let email = Email::new(command.email)?;
    self.auth_service.request_password_reset(email).await
  }
}

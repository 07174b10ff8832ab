use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub email: String,
  pub password: String,
  pub receiver_name_ka: String,
  pub receiver_name_en: Option<String>,
  pub identification_code: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub bank_account_number: String,
  pub bank_name_ka: String,
  pub bank_name_en: Option<String>,
  pub bank_code: String,
}

/// Response after successful registration. No session is issued; the account
/// stays inactive until the emailed verification link is followed.
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  pub user_id: Uuid,
  pub email: String,
}

pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let profile = UserProfile {
      receiver_name_ka: command.receiver_name_ka,
      receiver_name_en: command.receiver_name_en,
      identification_code: command.identification_code,
      address: command.address,
      phone_number: command.phone_number,
      bank_account_number: command.bank_account_number,
      bank_name_ka: command.bank_name_ka,
      bank_name_en: command.bank_name_en,
      bank_code: command.bank_code,
    };

    let user = self.auth_service.register(email, password, profile).await?;

    Ok(RegisterUserResponse {
      user_id: user.id,
      email: user.email,
    })
  }
}

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::{AuthService, ProfileUpdate};
use crate::domain::auth::value_objects::{Email, Password};

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
  pub user_id: Uuid,
  pub email: Option<String>,
  pub receiver_name_ka: String,
  pub receiver_name_en: Option<String>,
  pub identification_code: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub bank_account_number: String,
  pub bank_name_ka: String,
  pub bank_name_en: Option<String>,
  pub bank_code: String,
  pub current_password: Option<String>,
  pub new_password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileResponse {
  pub user_id: Uuid,
  pub email: String,
  /// False when an email change put the account back into verification
  pub is_active: bool,
}

pub struct UpdateProfileUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdateProfileUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: UpdateProfileCommand,
  ) -> Result<UpdateProfileResponse, AuthError> {
    let email = command.email.map(Email::new).transpose()?;
    let current_password = command.current_password.map(Password::new).transpose()?;
    let new_password = command.new_password.map(Password::new).transpose()?;

    let update = ProfileUpdate {
      profile: UserProfile {
        receiver_name_ka: command.receiver_name_ka,
        receiver_name_en: command.receiver_name_en,
        identification_code: command.identification_code,
        address: command.address,
        phone_number: command.phone_number,
        bank_account_number: command.bank_account_number,
        bank_name_ka: command.bank_name_ka,
        bank_name_en: command.bank_name_en,
        bank_code: command.bank_code,
      },
      email,
      current_password,
      new_password,
    };

    let user = self.auth_service.update_profile(command.user_id, update).await?;

    Ok(UpdateProfileResponse {
      user_id: user.id,
      email: user.email,
      is_active: user.is_active,
    })
  }
}

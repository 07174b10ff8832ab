use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Current-user snapshot returned for /me and attached to authenticated
/// requests by the middleware
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub receiver_name_ka: String,
  pub receiver_name_en: Option<String>,
  pub identification_code: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub bank_account_number: String,
  pub bank_name_ka: String,
  pub bank_name_en: Option<String>,
  pub bank_code: String,
  pub created_at: DateTime<Utc>,
}

pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, session_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let token = SessionToken::from_string(session_token)?;
    let user = self.auth_service.validate_session(token).await?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      email: user.email,
      receiver_name_ka: user.receiver_name_ka,
      receiver_name_en: user.receiver_name_en,
      identification_code: user.identification_code,
      address: user.address,
      phone_number: user.phone_number,
      bank_account_number: user.bank_account_number,
      bank_name_ka: user.bank_name_ka,
      bank_name_en: user.bank_name_en,
      bank_code: user.bank_code,
      created_at: user.created_at,
    })
  }
}

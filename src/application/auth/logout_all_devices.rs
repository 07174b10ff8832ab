use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

#[derive(Debug, Clone)]
pub struct LogoutAllDevicesResponse {
  pub sessions_terminated: usize,
}

pub struct LogoutAllDevicesUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutAllDevicesUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<LogoutAllDevicesResponse, AuthError> {
    let sessions_terminated = self.auth_service.logout_all(user_id).await?;
    Ok(LogoutAllDevicesResponse {
      sessions_terminated,
    })
  }
}

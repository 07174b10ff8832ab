use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

pub struct DeleteAccountUseCase {
  auth_service: Arc<AuthService>,
}

impl DeleteAccountUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Deletes the account; payers, invoices and sessions cascade
  pub async fn execute(&self, user_id: Uuid) -> Result<(), AuthError> {
    self.auth_service.delete_account(user_id).await
  }
}

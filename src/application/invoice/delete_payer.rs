use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

pub struct DeletePayerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl DeletePayerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, owner_id: Uuid, payer_id: Uuid) -> Result<(), InvoiceError> {
    self.invoice_service.delete_payer(owner_id, payer_id).await
  }
}

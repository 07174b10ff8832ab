use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

use super::create_payer::PayerDto;

pub struct ListPayersUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListPayersUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, owner_id: Uuid) -> Result<Vec<PayerDto>, InvoiceError> {
    let payers = self.invoice_service.list_payers(owner_id).await?;
    Ok(payers.into_iter().map(PayerDto::from).collect())
  }
}

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

use super::create_payer::PayerDto;

pub struct GetPayerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetPayerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, owner_id: Uuid, payer_id: Uuid) -> Result<PayerDto, InvoiceError> {
    let payer = self.invoice_service.get_payer(owner_id, payer_id).await?;
    Ok(payer.into())
  }
}

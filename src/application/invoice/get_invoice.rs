use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

use super::save_invoice::InvoiceDto;

pub struct GetInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    receiver_id: Uuid,
    invoice_id: Uuid,
  ) -> Result<InvoiceDto, InvoiceError> {
    let (invoice, purposes) = self
      .invoice_service
      .get_invoice_with_purposes(receiver_id, invoice_id)
      .await?;

    Ok(InvoiceDto::from_parts(invoice, purposes))
  }
}

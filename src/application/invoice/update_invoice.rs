use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

use super::save_invoice::{InvoiceDto, SaveInvoiceCommand};

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  /// Updates a saved invoice; purposes are replaced wholesale and a fresh
  /// invoice number is minted.
  pub async fn execute(
    &self,
    invoice_id: Uuid,
    command: SaveInvoiceCommand,
  ) -> Result<InvoiceDto, InvoiceError> {
    let (receiver_id, data) = command.into_data()?;

    let (invoice, purposes) = self
      .invoice_service
      .update_invoice(receiver_id, invoice_id, data)
      .await?;

    Ok(InvoiceDto::from_parts(invoice, purposes))
  }
}

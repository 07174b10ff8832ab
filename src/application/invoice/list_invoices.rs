use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::InvoiceService;

use super::save_invoice::InvoiceDto;

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, receiver_id: Uuid) -> Result<Vec<InvoiceDto>, InvoiceError> {
    let invoices = self.invoice_service.list_invoices(receiver_id).await?;

    let mut result = Vec::with_capacity(invoices.len());
    for invoice in invoices {
      let purposes = self.invoice_service.list_purposes(invoice.id).await?;
      result.push(InvoiceDto::from_parts(invoice, purposes));
    }

    Ok(result)
  }
}

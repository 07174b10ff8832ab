use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::{InvoiceService, PayerData};

use super::create_payer::PayerDto;

#[derive(Debug, Clone)]
pub struct UpdatePayerCommand {
  pub owner_id: Uuid,
  pub payer_id: Uuid,
  pub identification_code: String,
  pub name_ka: String,
  pub name_en: Option<String>,
  pub phone_number: Option<String>,
}

pub struct UpdatePayerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl UpdatePayerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: UpdatePayerCommand) -> Result<PayerDto, InvoiceError> {
    let payer = self
      .invoice_service
      .update_payer(
        command.owner_id,
        command.payer_id,
        PayerData {
          identification_code: command.identification_code,
          name_ka: command.name_ka,
          name_en: command.name_en,
          phone_number: command.phone_number,
        },
      )
      .await?;

    Ok(payer.into())
  }
}

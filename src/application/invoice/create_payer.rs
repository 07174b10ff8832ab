use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::entities::Payer;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::{InvoiceService, PayerData};

#[derive(Debug, Clone)]
pub struct CreatePayerCommand {
  pub owner_id: Uuid,
  pub identification_code: String,
  pub name_ka: String,
  pub name_en: Option<String>,
  pub phone_number: Option<String>,
}

/// Payer representation shared by the payer use cases
#[derive(Debug, Clone)]
pub struct PayerDto {
  pub id: Uuid,
  pub identification_code: String,
  pub name_ka: String,
  pub name_en: Option<String>,
  pub phone_number: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Payer> for PayerDto {
  fn from(payer: Payer) -> Self {
    Self {
      id: payer.id,
      identification_code: payer.identification_code,
      name_ka: payer.name_ka,
      name_en: payer.name_en,
      phone_number: payer.phone_number,
      created_at: payer.created_at,
      updated_at: payer.updated_at,
    }
  }
}

pub struct CreatePayerUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreatePayerUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: CreatePayerCommand) -> Result<PayerDto, InvoiceError> {
    let payer = self
      .invoice_service
      .create_payer(
        command.owner_id,
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

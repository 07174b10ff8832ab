use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::entities::{Invoice, Purpose};
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::services::{InvoiceService, SavedInvoiceData};
use crate::domain::invoice::totals::PurposeLine;
use crate::domain::invoice::value_objects::{Currency, Language, TemplateKind};

/// A line item as submitted by the caller
#[derive(Debug, Clone)]
pub struct PurposeInputDto {
  pub description: String,
  pub amount: Decimal,
  pub has_vat: bool,
}

impl From<PurposeInputDto> for PurposeLine {
  fn from(dto: PurposeInputDto) -> Self {
    Self {
      description: dto.description,
      amount: dto.amount,
      has_vat: dto.has_vat,
    }
  }
}

/// A stored line item with its computed VAT amount
#[derive(Debug, Clone)]
pub struct PurposeDto {
  pub id: Uuid,
  pub description: String,
  pub amount: Decimal,
  pub has_vat: bool,
  pub vat_amount: Decimal,
}

impl From<Purpose> for PurposeDto {
  fn from(purpose: Purpose) -> Self {
    Self {
      id: purpose.id,
      description: purpose.description,
      amount: purpose.amount,
      has_vat: purpose.has_vat,
      vat_amount: purpose.vat_amount,
    }
  }
}

/// Saved-invoice representation shared by the invoice use cases
#[derive(Debug, Clone)]
pub struct InvoiceDto {
  pub id: Uuid,
  pub payer_id: Uuid,
  pub invoice_number: String,
  pub total_amount: Decimal,
  pub currency: String,
  pub language: String,
  pub template: String,
  pub use_invoice_date_currency_rate: bool,
  pub purposes: Vec<PurposeDto>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl InvoiceDto {
  pub fn from_parts(invoice: Invoice, purposes: Vec<Purpose>) -> Self {
    Self {
      id: invoice.id,
      payer_id: invoice.payer_id,
      invoice_number: invoice.invoice_number.into_inner(),
      total_amount: invoice.total_amount,
      currency: invoice.currency.as_str().to_string(),
      language: invoice.language.as_str().to_string(),
      template: invoice.template.as_str().to_string(),
      use_invoice_date_currency_rate: invoice.use_invoice_date_currency_rate,
      purposes: purposes.into_iter().map(PurposeDto::from).collect(),
      created_at: invoice.created_at,
      updated_at: invoice.updated_at,
    }
  }
}

#[derive(Debug, Clone)]
pub struct SaveInvoiceCommand {
  pub receiver_id: Uuid,
  pub payer_id: Uuid,
  pub purposes: Vec<PurposeInputDto>,
  pub currency: String,
  pub language: String,
  pub template: String,
  pub use_invoice_date_currency_rate: bool,
}

impl SaveInvoiceCommand {
  /// Parses the enumerated fields through the shared domain validators
  pub(super) fn into_data(self) -> Result<(Uuid, SavedInvoiceData), InvoiceError> {
    let currency = Currency::from_str(&self.currency)?;
    let language = Language::from_str(&self.language)?;
    let template = TemplateKind::from_str(&self.template)?;

    Ok((
      self.receiver_id,
      SavedInvoiceData {
        payer_id: self.payer_id,
        purposes: self.purposes.into_iter().map(PurposeLine::from).collect(),
        currency,
        language,
        template,
        use_invoice_date_currency_rate: self.use_invoice_date_currency_rate,
      },
    ))
  }
}

pub struct SaveInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl SaveInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(&self, command: SaveInvoiceCommand) -> Result<InvoiceDto, InvoiceError> {
    let (receiver_id, data) = command.into_data()?;

    let (invoice, purposes) = self.invoice_service.save_invoice(receiver_id, data).await?;

    Ok(InvoiceDto::from_parts(invoice, purposes))
  }
}

use chrono::Local;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::ports::UserRepository;
use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::generator::{GenerationInput, InvoiceGenerator};
use crate::domain::invoice::services::InvoiceService;
use crate::domain::invoice::totals::PurposeLine;
use crate::domain::invoice::value_objects::Currency;

use super::save_invoice::PurposeInputDto;

#[derive(Debug, Clone)]
pub struct GenerateInvoiceCommand {
  pub receiver_id: Uuid,
  pub payer_id: Uuid,
  pub purposes: Vec<PurposeInputDto>,
  pub currency: String,
  pub language: String,
  pub template: String,
}

/// PDF bytes plus the download filename
pub struct GenerateInvoiceResponse {
  pub pdf: Vec<u8>,
  pub filename: String,
}

pub struct GenerateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  user_repo: Arc<dyn UserRepository>,
  generator: Arc<InvoiceGenerator>,
}

impl GenerateInvoiceUseCase {
  pub fn new(
    invoice_service: Arc<InvoiceService>,
    user_repo: Arc<dyn UserRepository>,
    generator: Arc<InvoiceGenerator>,
  ) -> Self {
    Self {
      invoice_service,
      user_repo,
      generator,
    }
  }

  /// Generates a PDF invoice without persisting anything.
  ///
  /// # Errors
  /// `InvoiceError::LanguageNotSupported` for a language outside {en, ka},
  /// `InvoiceError::PayerNotFound` when the payer is missing or foreign,
  /// `InvoiceError::Generation` for template or PDF-conversion failures.
  pub async fn execute(
    &self,
    command: GenerateInvoiceCommand,
  ) -> Result<GenerateInvoiceResponse, InvoiceError> {
    let currency = Currency::from_str(&command.currency)?;

    let payer = self
      .invoice_service
      .get_payer(command.receiver_id, command.payer_id)
      .await?;

    let receiver = self
      .user_repo
      .find_by_id(command.receiver_id)
      .await
      .map_err(|e| InvoiceError::Database(e.to_string()))?
      .ok_or_else(|| InvoiceError::Database("receiver account missing".to_string()))?;

    let input = GenerationInput {
      payer,
      purposes: command
        .purposes
        .into_iter()
        .map(PurposeLine::from)
        .collect(),
      language: command.language,
      template: command.template,
      currency,
    };

    let pdf = self.generator.generate(&input, &receiver).await?;

    let filename = format!("invoice_{}.pdf", Local::now().format("%Y%m%d"));

    Ok(GenerateInvoiceResponse { pdf, filename })
  }
}

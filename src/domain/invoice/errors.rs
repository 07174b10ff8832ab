use super::value_objects::ValueObjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Language '{0}' is not supported")]
  LanguageNotSupported(String),

  #[error("Payer not found: {0}")]
  PayerNotFound(Uuid),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(Uuid),

  #[error("Invoice number '{0}' already exists")]
  InvoiceNumberAlreadyExists(String),

  #[error("Invoice generation failed: {0}")]
  Generation(String),

  #[error("Database error: {0}")]
  Database(String),
}

impl From<sqlx::Error> for InvoiceError {
  fn from(error: sqlx::Error) -> Self {
    InvoiceError::Database(error.to_string())
  }
}

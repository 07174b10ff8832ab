use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Invoice, Payer, Purpose};
use super::errors::InvoiceError;

#[async_trait]
pub trait PayerRepository: Send + Sync {
  async fn create(&self, payer: Payer) -> Result<Payer, InvoiceError>;
  async fn update(&self, payer: Payer) -> Result<Payer, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Payer>, InvoiceError>;
  async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Payer>, InvoiceError>;
}

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;
  async fn update(&self, invoice: Invoice) -> Result<Invoice, InvoiceError>;
  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError>;
  async fn find_by_receiver_id(&self, receiver_id: Uuid) -> Result<Vec<Invoice>, InvoiceError>;
}

#[async_trait]
pub trait PurposeRepository: Send + Sync {
  async fn create_many(&self, purposes: Vec<Purpose>) -> Result<Vec<Purpose>, InvoiceError>;
  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<Purpose>, InvoiceError>;
  async fn delete_by_invoice_id(&self, invoice_id: Uuid) -> Result<(), InvoiceError>;
}

/// Renders a named invoice template against a flat context into markup
pub trait TemplateRenderer: Send + Sync {
  fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, InvoiceError>;
}

/// Converts rendered markup into a PDF byte stream
#[async_trait]
pub trait PdfConverter: Send + Sync {
  async fn convert(&self, html: &str) -> Result<Vec<u8>, InvoiceError>;
}

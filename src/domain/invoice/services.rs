use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Invoice, Payer, Purpose};
use super::errors::InvoiceError;
use super::numbering::InvoiceNumberGenerator;
use super::ports::{InvoiceRepository, PayerRepository, PurposeRepository};
use super::totals::{PurposeLine, calculate_totals};
use super::value_objects::{Currency, InvoiceNumber, Language, TemplateKind};

/// Payer fields as supplied by the caller
pub struct PayerData {
  pub identification_code: String,
  pub name_ka: String,
  pub name_en: Option<String>,
  pub phone_number: Option<String>,
}

/// Saved-invoice fields as supplied by the caller. The invoice number and
/// totals are always derived, never accepted from outside.
pub struct SavedInvoiceData {
  pub payer_id: Uuid,
  pub purposes: Vec<PurposeLine>,
  pub currency: Currency,
  pub language: Language,
  pub template: TemplateKind,
  pub use_invoice_date_currency_rate: bool,
}

pub struct InvoiceService {
  payer_repo: Arc<dyn PayerRepository>,
  invoice_repo: Arc<dyn InvoiceRepository>,
  purpose_repo: Arc<dyn PurposeRepository>,
}

impl InvoiceService {
  pub fn new(
    payer_repo: Arc<dyn PayerRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,
    purpose_repo: Arc<dyn PurposeRepository>,
  ) -> Self {
    Self {
      payer_repo,
      invoice_repo,
      purpose_repo,
    }
  }

  // Payer operations. All lookups are scoped to the owner; a payer belonging
  // to someone else is indistinguishable from a missing one.

  pub async fn create_payer(&self, owner_id: Uuid, data: PayerData) -> Result<Payer, InvoiceError> {
    let payer = Payer::new(
      owner_id,
      data.identification_code,
      data.name_ka,
      data.name_en,
      data.phone_number,
    );
    self.payer_repo.create(payer).await
  }

  pub async fn update_payer(
    &self,
    owner_id: Uuid,
    payer_id: Uuid,
    data: PayerData,
  ) -> Result<Payer, InvoiceError> {
    let mut payer = self.get_payer(owner_id, payer_id).await?;
    payer.update(
      data.identification_code,
      data.name_ka,
      data.name_en,
      data.phone_number,
    );
    self.payer_repo.update(payer).await
  }

  pub async fn delete_payer(&self, owner_id: Uuid, payer_id: Uuid) -> Result<(), InvoiceError> {
    let payer = self.get_payer(owner_id, payer_id).await?;
    self.payer_repo.delete(payer.id).await
  }

  pub async fn get_payer(&self, owner_id: Uuid, payer_id: Uuid) -> Result<Payer, InvoiceError> {
    let payer = self
      .payer_repo
      .find_by_id(payer_id)
      .await?
      .ok_or(InvoiceError::PayerNotFound(payer_id))?;

    if payer.owner_id != owner_id {
      return Err(InvoiceError::PayerNotFound(payer_id));
    }

    Ok(payer)
  }

  pub async fn list_payers(&self, owner_id: Uuid) -> Result<Vec<Payer>, InvoiceError> {
    self.payer_repo.find_by_owner_id(owner_id).await
  }

  // Saved-invoice operations

  pub async fn save_invoice(
    &self,
    receiver_id: Uuid,
    data: SavedInvoiceData,
  ) -> Result<(Invoice, Vec<Purpose>), InvoiceError> {
    // Payer must belong to the receiver
    self.get_payer(receiver_id, data.payer_id).await?;

    let (computed, totals) = calculate_totals(&data.purposes);
    let invoice_number = InvoiceNumber::new(InvoiceNumberGenerator::generate())?;

    let invoice = Invoice::new(
      receiver_id,
      data.payer_id,
      invoice_number,
      totals.total_amount,
      data.currency,
      data.language,
      data.template,
      data.use_invoice_date_currency_rate,
    );

    let created = self.invoice_repo.create(invoice).await?;

    let purposes: Vec<Purpose> = computed
      .into_iter()
      .map(|line| {
        Purpose::new(
          created.id,
          line.description,
          line.amount,
          line.has_vat,
          line.vat_amount,
        )
      })
      .collect();

    let created_purposes = self.purpose_repo.create_many(purposes).await?;

    Ok((created, created_purposes))
  }

  /// Updates a saved invoice. Purposes are replaced wholesale and a fresh
  /// invoice number is minted, matching create-time behavior.
  pub async fn update_invoice(
    &self,
    receiver_id: Uuid,
    invoice_id: Uuid,
    data: SavedInvoiceData,
  ) -> Result<(Invoice, Vec<Purpose>), InvoiceError> {
    let mut invoice = self.get_invoice(receiver_id, invoice_id).await?;

    self.get_payer(receiver_id, data.payer_id).await?;

    let (computed, totals) = calculate_totals(&data.purposes);
    let invoice_number = InvoiceNumber::new(InvoiceNumberGenerator::generate())?;

    invoice.update(
      data.payer_id,
      invoice_number,
      totals.total_amount,
      data.currency,
      data.language,
      data.template,
      data.use_invoice_date_currency_rate,
    );

    let updated = self.invoice_repo.update(invoice).await?;

    self.purpose_repo.delete_by_invoice_id(invoice_id).await?;

    let purposes: Vec<Purpose> = computed
      .into_iter()
      .map(|line| {
        Purpose::new(
          updated.id,
          line.description,
          line.amount,
          line.has_vat,
          line.vat_amount,
        )
      })
      .collect();

    let created_purposes = self.purpose_repo.create_many(purposes).await?;

    Ok((updated, created_purposes))
  }

  pub async fn get_invoice(
    &self,
    receiver_id: Uuid,
    invoice_id: Uuid,
  ) -> Result<Invoice, InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(invoice_id))?;

    if invoice.receiver_id != receiver_id {
      return Err(InvoiceError::InvoiceNotFound(invoice_id));
    }

    Ok(invoice)
  }

  pub async fn get_invoice_with_purposes(
    &self,
    receiver_id: Uuid,
    invoice_id: Uuid,
  ) -> Result<(Invoice, Vec<Purpose>), InvoiceError> {
    let invoice = self.get_invoice(receiver_id, invoice_id).await?;
    let purposes = self.purpose_repo.find_by_invoice_id(invoice.id).await?;
    Ok((invoice, purposes))
  }

  pub async fn list_invoices(&self, receiver_id: Uuid) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_repo.find_by_receiver_id(receiver_id).await
  }

  pub async fn list_purposes(&self, invoice_id: Uuid) -> Result<Vec<Purpose>, InvoiceError> {
    self.purpose_repo.find_by_invoice_id(invoice_id).await
  }

  pub async fn delete_invoice(
    &self,
    receiver_id: Uuid,
    invoice_id: Uuid,
  ) -> Result<(), InvoiceError> {
    let invoice = self.get_invoice(receiver_id, invoice_id).await?;
    self.invoice_repo.delete(invoice.id).await
  }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::invoice::{
  entities::Invoice,
  errors::InvoiceError,
  ports::InvoiceRepository,
  value_objects::{Currency, InvoiceNumber, Language, TemplateKind},
};

pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
  id: Uuid,
  receiver_id: Uuid,
  payer_id: Uuid,
  invoice_number: String,
  total_amount: Decimal,
  currency: String,
  language: String,
  template: String,
  use_invoice_date_currency_rate: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    Ok(Invoice {
      id: row.id,
      receiver_id: row.receiver_id,
      payer_id: row.payer_id,
      invoice_number: InvoiceNumber::new(row.invoice_number)?,
      total_amount: row.total_amount,
      currency: Currency::from_str(&row.currency)?,
      language: Language::from_str(&row.language)?,
      // Rows predating a template's removal fall back to the first template
      template: TemplateKind::parse_or_first(&row.template),
      use_invoice_date_currency_rate: row.use_invoice_date_currency_rate,
      created_at: row.created_at,
      updated_at: row.updated_at,
    })
  }
}

/// Maps a unique violation on the invoice-number constraint; the store
/// rejects a collision, nothing retries generation.
fn map_insert_error(error: sqlx::Error, invoice_number: &str) -> InvoiceError {
  if let sqlx::Error::Database(db_err) = &error {
    if db_err.is_unique_violation() {
      return InvoiceError::InvoiceNumberAlreadyExists(invoice_number.to_string());
    }
  }
  error.into()
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let result = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (id, receiver_id, payer_id, invoice_number, total_amount,
                                  currency, language, template, use_invoice_date_currency_rate,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, receiver_id, payer_id, invoice_number, total_amount,
                      currency, language, template, use_invoice_date_currency_rate,
                      created_at, updated_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.receiver_id)
    .bind(invoice.payer_id)
    .bind(invoice.invoice_number.value())
    .bind(invoice.total_amount)
    .bind(invoice.currency.as_str())
    .bind(invoice.language.as_str())
    .bind(invoice.template.as_str())
    .bind(invoice.use_invoice_date_currency_rate)
    .bind(invoice.created_at)
    .bind(invoice.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| map_insert_error(e, invoice.invoice_number.value()))?;

    result.try_into()
  }

  async fn update(&self, invoice: Invoice) -> Result<Invoice, InvoiceError> {
    let result = sqlx::query_as::<_, InvoiceRow>(
      r#"
            UPDATE invoices SET
                payer_id = $2,
                invoice_number = $3,
                total_amount = $4,
                currency = $5,
                language = $6,
                template = $7,
                use_invoice_date_currency_rate = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING id, receiver_id, payer_id, invoice_number, total_amount,
                      currency, language, template, use_invoice_date_currency_rate,
                      created_at, updated_at
            "#,
    )
    .bind(invoice.id)
    .bind(invoice.payer_id)
    .bind(invoice.invoice_number.value())
    .bind(invoice.total_amount)
    .bind(invoice.currency.as_str())
    .bind(invoice.language.as_str())
    .bind(invoice.template.as_str())
    .bind(invoice.use_invoice_date_currency_rate)
    .bind(invoice.updated_at)
    .fetch_one(&self.pool)
    .await
    .map_err(|e| map_insert_error(e, invoice.invoice_number.value()))?;

    result.try_into()
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    sqlx::query("DELETE FROM invoices WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
    let result = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, receiver_id, payer_id, invoice_number, total_amount,
                   currency, language, template, use_invoice_date_currency_rate,
                   created_at, updated_at
            FROM invoices
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    result.map(Invoice::try_from).transpose()
  }

  async fn find_by_receiver_id(&self, receiver_id: Uuid) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, receiver_id, payer_id, invoice_number, total_amount,
                   currency, language, template, use_invoice_date_currency_rate,
                   created_at, updated_at
            FROM invoices
            WHERE receiver_id = $1
            ORDER BY created_at DESC
            "#,
    )
    .bind(receiver_id)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Invoice::try_from).collect()
  }
}

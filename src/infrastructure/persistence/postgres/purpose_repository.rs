use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::invoice::{entities::Purpose, errors::InvoiceError, ports::PurposeRepository};

pub struct PostgresPurposeRepository {
  pool: PgPool,
}

impl PostgresPurposeRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct PurposeRow {
  id: Uuid,
  invoice_id: Uuid,
  description: String,
  amount: Decimal,
  has_vat: bool,
  vat_amount: Decimal,
}

impl From<PurposeRow> for Purpose {
  fn from(row: PurposeRow) -> Self {
    Purpose {
      id: row.id,
      invoice_id: row.invoice_id,
      description: row.description,
      amount: row.amount,
      has_vat: row.has_vat,
      vat_amount: row.vat_amount,
    }
  }
}

#[async_trait]
impl PurposeRepository for PostgresPurposeRepository {
  async fn create_many(&self, purposes: Vec<Purpose>) -> Result<Vec<Purpose>, InvoiceError> {
    let mut tx = self.pool.begin().await?;

    for purpose in &purposes {
      sqlx::query(
        r#"
                INSERT INTO purposes (id, invoice_id, description, amount, has_vat, vat_amount)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
      )
      .bind(purpose.id)
      .bind(purpose.invoice_id)
      .bind(&purpose.description)
      .bind(purpose.amount)
      .bind(purpose.has_vat)
      .bind(purpose.vat_amount)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;

    Ok(purposes)
  }

  async fn find_by_invoice_id(&self, invoice_id: Uuid) -> Result<Vec<Purpose>, InvoiceError> {
    let rows = sqlx::query_as::<_, PurposeRow>(
      r#"
            SELECT id, invoice_id, description, amount, has_vat, vat_amount
            FROM purposes
            WHERE invoice_id = $1
            "#,
    )
    .bind(invoice_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
  }

  async fn delete_by_invoice_id(&self, invoice_id: Uuid) -> Result<(), InvoiceError> {
    sqlx::query("DELETE FROM purposes WHERE invoice_id = $1")
      .bind(invoice_id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::invoice::{entities::Payer, errors::InvoiceError, ports::PayerRepository};

pub struct PostgresPayerRepository {
  pool: PgPool,
}

impl PostgresPayerRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct PayerRow {
  id: Uuid,
  owner_id: Uuid,
  identification_code: String,
  name_ka: String,
  name_en: Option<String>,
  phone_number: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<PayerRow> for Payer {
  fn from(row: PayerRow) -> Self {
    Payer {
      id: row.id,
      owner_id: row.owner_id,
      identification_code: row.identification_code,
      name_ka: row.name_ka,
      name_en: row.name_en,
      phone_number: row.phone_number,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

#[async_trait]
impl PayerRepository for PostgresPayerRepository {
  async fn create(&self, payer: Payer) -> Result<Payer, InvoiceError> {
    let result = sqlx::query_as::<_, PayerRow>(
      r#"
            INSERT INTO payers (id, owner_id, identification_code, name_ka, name_en,
                                phone_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, owner_id, identification_code, name_ka, name_en,
                      phone_number, created_at, updated_at
            "#,
    )
    .bind(payer.id)
    .bind(payer.owner_id)
    .bind(&payer.identification_code)
    .bind(&payer.name_ka)
    .bind(&payer.name_en)
    .bind(&payer.phone_number)
    .bind(payer.created_at)
    .bind(payer.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn update(&self, payer: Payer) -> Result<Payer, InvoiceError> {
    let result = sqlx::query_as::<_, PayerRow>(
      r#"
            UPDATE payers SET
                identification_code = $2,
                name_ka = $3,
                name_en = $4,
                phone_number = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING id, owner_id, identification_code, name_ka, name_en,
                      phone_number, created_at, updated_at
            "#,
    )
    .bind(payer.id)
    .bind(&payer.identification_code)
    .bind(&payer.name_ka)
    .bind(&payer.name_en)
    .bind(&payer.phone_number)
    .bind(payer.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), InvoiceError> {
    sqlx::query("DELETE FROM payers WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Payer>, InvoiceError> {
    let result = sqlx::query_as::<_, PayerRow>(
      r#"
            SELECT id, owner_id, identification_code, name_ka, name_en,
                   phone_number, created_at, updated_at
            FROM payers
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<Payer>, InvoiceError> {
    let result = sqlx::query_as::<_, PayerRow>(
      r#"
            SELECT id, owner_id, identification_code, name_ka, name_en,
                   phone_number, created_at, updated_at
            FROM payers
            WHERE owner_id = $1
            ORDER BY created_at
            "#,
    )
    .bind(owner_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(result.into_iter().map(Into::into).collect())
  }
}

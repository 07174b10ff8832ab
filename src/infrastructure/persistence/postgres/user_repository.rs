use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::AuthError,
  ports::UserRepository,
  value_objects::Email,
};

pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  receiver_name_ka: String,
  receiver_name_en: Option<String>,
  identification_code: String,
  address: Option<String>,
  phone_number: Option<String>,
  bank_account_number: String,
  bank_name_ka: String,
  bank_name_en: Option<String>,
  bank_code: String,
  is_active: bool,
  is_staff: bool,
  is_superuser: bool,
  email_verification_token: Option<String>,
  email_verification_token_expires_at: Option<DateTime<Utc>>,
  password_reset_token: Option<String>,
  password_reset_token_expires_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User {
      id: row.id,
      email: row.email,
      password_hash: row.password_hash,
      receiver_name_ka: row.receiver_name_ka,
      receiver_name_en: row.receiver_name_en,
      identification_code: row.identification_code,
      address: row.address,
      phone_number: row.phone_number,
      bank_account_number: row.bank_account_number,
      bank_name_ka: row.bank_name_ka,
      bank_name_en: row.bank_name_en,
      bank_code: row.bank_code,
      is_active: row.is_active,
      is_staff: row.is_staff,
      is_superuser: row.is_superuser,
      email_verification_token: row.email_verification_token,
      email_verification_token_expires_at: row.email_verification_token_expires_at,
      password_reset_token: row.password_reset_token,
      password_reset_token_expires_at: row.password_reset_token_expires_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

const USER_COLUMNS: &str = r#"
    id,
    email,
    password_hash,
    receiver_name_ka,
    receiver_name_en,
    identification_code,
    address,
    phone_number,
    bank_account_number,
    bank_name_ka,
    bank_name_en,
    bank_code,
    is_active,
    is_staff,
    is_superuser,
    email_verification_token,
    email_verification_token_expires_at,
    password_reset_token,
    password_reset_token_expires_at,
    created_at,
    updated_at
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let query = format!(
      r#"
            INSERT INTO users ({USER_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21)
            RETURNING {USER_COLUMNS}
            "#
    );

    let result = sqlx::query_as::<_, UserRow>(&query)
      .bind(user.id)
      .bind(&user.email)
      .bind(&user.password_hash)
      .bind(&user.receiver_name_ka)
      .bind(&user.receiver_name_en)
      .bind(&user.identification_code)
      .bind(&user.address)
      .bind(&user.phone_number)
      .bind(&user.bank_account_number)
      .bind(&user.bank_name_ka)
      .bind(&user.bank_name_en)
      .bind(&user.bank_code)
      .bind(user.is_active)
      .bind(user.is_staff)
      .bind(user.is_superuser)
      .bind(&user.email_verification_token)
      .bind(user.email_verification_token_expires_at)
      .bind(&user.password_reset_token)
      .bind(user.password_reset_token_expires_at)
      .bind(user.created_at)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

    let result = sqlx::query_as::<_, UserRow>(&query)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

    let result = sqlx::query_as::<_, UserRow>(&query)
      .bind(email.as_str())
      .fetch_optional(&self.pool)
      .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_identification_code(&self, code: &str) -> Result<Option<User>, AuthError> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE identification_code = $1");

    let result = sqlx::query_as::<_, UserRow>(&query)
      .bind(code)
      .fetch_optional(&self.pool)
      .await?;

    Ok(result.map(Into::into))
  }

  async fn update(&self, user: User) -> Result<User, AuthError> {
    let query = format!(
      r#"
            UPDATE users SET
                email = $2,
                password_hash = $3,
                receiver_name_ka = $4,
                receiver_name_en = $5,
                identification_code = $6,
                address = $7,
                phone_number = $8,
                bank_account_number = $9,
                bank_name_ka = $10,
                bank_name_en = $11,
                bank_code = $12,
                is_active = $13,
                is_staff = $14,
                is_superuser = $15,
                email_verification_token = $16,
                email_verification_token_expires_at = $17,
                password_reset_token = $18,
                password_reset_token_expires_at = $19,
                updated_at = $20
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
    );

    let result = sqlx::query_as::<_, UserRow>(&query)
      .bind(user.id)
      .bind(&user.email)
      .bind(&user.password_hash)
      .bind(&user.receiver_name_ka)
      .bind(&user.receiver_name_en)
      .bind(&user.identification_code)
      .bind(&user.address)
      .bind(&user.phone_number)
      .bind(&user.bank_account_number)
      .bind(&user.bank_name_ka)
      .bind(&user.bank_name_en)
      .bind(&user.bank_code)
      .bind(user.is_active)
      .bind(user.is_staff)
      .bind(user.is_superuser)
      .bind(&user.email_verification_token)
      .bind(user.email_verification_token_expires_at)
      .bind(&user.password_reset_token)
      .bind(user.password_reset_token_expires_at)
      .bind(user.updated_at)
      .fetch_one(&self.pool)
      .await?;

    Ok(result.into())
  }

  async fn delete(&self, id: Uuid) -> Result<(), AuthError> {
    sqlx::query("DELETE FROM users WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }
}

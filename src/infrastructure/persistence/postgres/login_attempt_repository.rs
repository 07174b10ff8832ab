use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::auth::{
  entities::LoginAttempt, errors::AuthError, ports::LoginAttemptRepository,
};

pub struct PostgresLoginAttemptRepository {
  pool: PgPool,
}

impl PostgresLoginAttemptRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl LoginAttemptRepository for PostgresLoginAttemptRepository {
  async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError> {
    sqlx::query(
      r#"
            INSERT INTO login_attempts (id, email, ip_address, success, attempted_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
    )
    .bind(attempt.id)
    .bind(&attempt.email)
    .bind(attempt.ip_address.map(|ip| ip.to_string()))
    .bind(attempt.success)
    .bind(attempt.attempted_at)
    .execute(&self.pool)
    .await?;

    Ok(attempt)
  }

  async fn count_recent_failures(
    &self,
    email: &str,
    window_seconds: i64,
  ) -> Result<i64, AuthError> {
    let count: (i64,) = sqlx::query_as(
      r#"
            SELECT COUNT(*)
            FROM login_attempts
            WHERE email = $1
              AND success = FALSE
              AND attempted_at > NOW() - ($2 * INTERVAL '1 second')
            "#,
    )
    .bind(email)
    .bind(window_seconds)
    .fetch_one(&self.pool)
    .await?;

    Ok(count.0)
  }
}

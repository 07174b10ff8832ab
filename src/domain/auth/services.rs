use chrono::Duration;
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{LoginAttempt, Session, User, UserProfile};
use super::errors::{AuthError, RepositoryError};
use super::ports::{
  LoginAttemptRepository, Mailer, PasswordHasher, SessionRepository, TokenGenerator,
  UserRepository,
};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Runtime configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
  pub rate_limit_window_seconds: i64,
  pub max_failed_attempts: i64,
  pub verification_token_ttl_hours: i64,
  pub reset_token_ttl_hours: i64,
  /// Base URL of the frontend, used to build verification/reset links
  pub frontend_url: String,
}

/// Profile changes applied through the account-update endpoint
pub struct ProfileUpdate {
  pub profile: UserProfile,
  pub email: Option<Email>,
  pub current_password: Option<Password>,
  pub new_password: Option<Password>,
}

pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  attempt_repo: Arc<dyn LoginAttemptRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  mailer: Arc<dyn Mailer>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    attempt_repo: Arc<dyn LoginAttemptRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    mailer: Arc<dyn Mailer>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      attempt_repo,
      password_hasher,
      token_generator,
      mailer,
      config,
    }
  }

  /// Registers a new account. The account starts inactive; a verification
  /// link is emailed and login is refused until the email is confirmed.
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    profile: UserProfile,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    if self
      .user_repo
      .find_by_identification_code(&profile.identification_code)
      .await?
      .is_some()
    {
      return Err(AuthError::IdentificationCodeAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let mut user = User::new(email.into_inner(), password_hash.into_inner(), profile);

    let token = self.token_generator.generate().await?;
    user.set_email_verification_token(
      token.clone(),
      Duration::hours(self.config.verification_token_ttl_hours),
    );

    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    let url = self.verification_url(created_user.id, &token);
    self
      .mailer
      .send_email_verification(&created_user.email, &url)
      .await?;

    Ok(created_user)
  }

  /// Confirms an email address with the token from the verification link
  pub async fn verify_email(&self, user_id: Uuid, token: &str) -> Result<User, AuthError> {
    let mut user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::InvalidToken)?;

    if !user.is_email_verification_token_valid(token) {
      return Err(AuthError::InvalidToken);
    }

    user.verify_email();
    self.user_repo.update(user).await
  }

  /// Authenticates a user and creates a session.
  ///
  /// Failed attempts are recorded; once the configured threshold is reached
  /// within the window, further attempts are rejected outright.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    remember_me: bool,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let failed_attempts = self
      .attempt_repo
      .count_recent_failures(email.as_str(), self.config.rate_limit_window_seconds)
      .await?;

    if failed_attempts >= self.config.max_failed_attempts {
      self
        .attempt_repo
        .create(LoginAttempt::failure(
          email.as_str().to_string(),
          ip_address,
        ))
        .await?;
      return Err(AuthError::RateLimitExceeded);
    }

    let user = match self.user_repo.find_by_email(&email).await? {
      Some(user) => user,
      None => {
        self
          .attempt_repo
          .create(LoginAttempt::failure(
            email.as_str().to_string(),
            ip_address,
          ))
          .await?;
        return Err(AuthError::InvalidCredentials);
      }
    };

    let password_hash = PasswordHash::from_hash(&user.password_hash)?;
    let is_valid = password_hash.verify(&password)?;

    if !is_valid {
      self
        .attempt_repo
        .create(LoginAttempt::failure(
          email.as_str().to_string(),
          ip_address,
        ))
        .await?;
      return Err(AuthError::InvalidCredentials);
    }

    if !user.is_active {
      return Err(AuthError::EmailNotVerified);
    }

    self
      .attempt_repo
      .create(LoginAttempt::success(
        email.as_str().to_string(),
        ip_address,
      ))
      .await?;

    let session_token = SessionToken::generate();
    let token_hash = session_token.hash();

    let duration = if remember_me {
      Duration::seconds(self.config.remember_me_ttl_seconds)
    } else {
      Duration::seconds(self.config.session_ttl_seconds)
    };

    let session = Session::with_duration(
      user.id,
      token_hash.into_inner(),
      duration,
      ip_address,
      user_agent,
    );

    let created_session = self.session_repo.create(session).await?;

    Ok((user, created_session, session_token))
  }

  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await
  }

  pub async fn logout_all(&self, user_id: Uuid) -> Result<usize, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    self.session_repo.delete_all_for_user(user_id).await
  }

  /// Resolves a session token to its user, dropping expired sessions
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    let user = self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    // An email change puts the account back into verification; existing
    // sessions stop working until the new address is confirmed
    if !user.is_active {
      return Err(AuthError::EmailNotVerified);
    }

    Ok(user)
  }

  /// Emails a password-reset link to the given address
  pub async fn request_password_reset(&self, email: Email) -> Result<(), AuthError> {
    let mut user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    let token = self.token_generator.generate().await?;
    user.set_password_reset_token(
      token.clone(),
      Duration::hours(self.config.reset_token_ttl_hours),
    );

    let user = self.user_repo.update(user).await?;

    let url = self.password_reset_url(user.id, &token);
    self.mailer.send_password_reset(&user.email, &url).await?;

    Ok(())
  }

  /// Sets a new password from a reset link and revokes every session
  pub async fn reset_password(
    &self,
    user_id: Uuid,
    token: &str,
    new_password: Password,
  ) -> Result<(), AuthError> {
    let mut user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::InvalidToken)?;

    if !user.is_password_reset_token_valid(token) {
      return Err(AuthError::InvalidToken);
    }

    let password_hash = self.password_hasher.hash(&new_password).await?;
    user.update_password(password_hash.into_inner());
    user.clear_password_reset_token();

    self.user_repo.update(user).await?;
    self.session_repo.delete_all_for_user(user_id).await?;

    Ok(())
  }

  /// Applies profile changes. A password change requires the current
  /// password; an email change deactivates the account and triggers
  /// re-verification.
  pub async fn update_profile(
    &self,
    user_id: Uuid,
    update: ProfileUpdate,
  ) -> Result<User, AuthError> {
    let mut user = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    if let Some(new_password) = &update.new_password {
      let current = update
        .current_password
        .as_ref()
        .ok_or(AuthError::InvalidCredentials)?;

      let password_hash = PasswordHash::from_hash(&user.password_hash)?;
      if !password_hash.verify(current)? {
        return Err(AuthError::InvalidCredentials);
      }

      let new_hash = self.password_hasher.hash(new_password).await?;
      user.update_password(new_hash.into_inner());
    }

    user.update_profile(update.profile);

    if let Some(email) = update.email {
      if email.as_str() != user.email {
        if self.user_repo.find_by_email(&email).await?.is_some() {
          return Err(AuthError::EmailAlreadyExists);
        }

        user.update_email(email.into_inner());

        let token = self.token_generator.generate().await?;
        user.set_email_verification_token(
          token.clone(),
          Duration::hours(self.config.verification_token_ttl_hours),
        );

        let updated = self.user_repo.update(user).await?;
        let url = self.verification_url(updated.id, &token);
        self
          .mailer
          .send_email_verification(&updated.email, &url)
          .await?;

        return Ok(updated);
      }
    }

    self.user_repo.update(user).await
  }

  pub async fn delete_account(&self, user_id: Uuid) -> Result<(), AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    self.user_repo.delete(user_id).await
  }

  fn verification_url(&self, user_id: Uuid, token: &str) -> String {
    format!(
      "{}/verify-email?uid={}&token={}",
      self.config.frontend_url, user_id, token
    )
  }

  fn password_reset_url(&self, user_id: Uuid, token: &str) -> String {
    format!(
      "{}/reset-password?uid={}&token={}",
      self.config.frontend_url, user_id, token
    )
  }
}

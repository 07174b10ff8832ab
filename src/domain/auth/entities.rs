use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

/// Identity and banking fields printed on generated invoices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  /// Receiver name in Georgian, as printed on invoices
  pub receiver_name_ka: String,
  /// Receiver name in English (optional)
  pub receiver_name_en: Option<String>,
  /// State identification code (unique)
  pub identification_code: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub bank_account_number: String,
  pub bank_name_ka: String,
  pub bank_name_en: Option<String>,
  pub bank_code: String,
}

/// User account. Created inactive; activated by email verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  /// Email address (unique), used for login and account mail
  pub email: String,
  /// Argon2id hash of the password
  pub password_hash: String,
  pub receiver_name_ka: String,
  pub receiver_name_en: Option<String>,
  pub identification_code: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub bank_account_number: String,
  pub bank_name_ka: String,
  pub bank_name_en: Option<String>,
  pub bank_code: String,
  /// False until the email is verified; inactive accounts cannot log in
  pub is_active: bool,
  pub is_staff: bool,
  pub is_superuser: bool,
  pub email_verification_token: Option<String>,
  pub email_verification_token_expires_at: Option<DateTime<Utc>>,
  pub password_reset_token: Option<String>,
  pub password_reset_token_expires_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  pub fn new(email: String, password_hash: String, profile: UserProfile) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      receiver_name_ka: profile.receiver_name_ka,
      receiver_name_en: profile.receiver_name_en,
      identification_code: profile.identification_code,
      address: profile.address,
      phone_number: profile.phone_number,
      bank_account_number: profile.bank_account_number,
      bank_name_ka: profile.bank_name_ka,
      bank_name_en: profile.bank_name_en,
      bank_code: profile.bank_code,
      is_active: false,
      is_staff: false,
      is_superuser: false,
      email_verification_token: None,
      email_verification_token_expires_at: None,
      password_reset_token: None,
      password_reset_token_expires_at: None,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update_password(&mut self, new_password_hash: String) {
    self.password_hash = new_password_hash;
    self.updated_at = Utc::now();
  }

  /// Activates the account and clears the verification token
  pub fn verify_email(&mut self) {
    self.is_active = true;
    self.email_verification_token = None;
    self.email_verification_token_expires_at = None;
    self.updated_at = Utc::now();
  }

  pub fn set_email_verification_token(&mut self, token: String, expires_in: Duration) {
    self.email_verification_token = Some(token);
    self.email_verification_token_expires_at = Some(Utc::now() + expires_in);
    self.updated_at = Utc::now();
  }

  pub fn is_email_verification_token_valid(&self, token: &str) -> bool {
    match (
      &self.email_verification_token,
      &self.email_verification_token_expires_at,
    ) {
      (Some(stored_token), Some(expires_at)) => stored_token == token && expires_at > &Utc::now(),
      _ => false,
    }
  }

  pub fn set_password_reset_token(&mut self, token: String, expires_in: Duration) {
    self.password_reset_token = Some(token);
    self.password_reset_token_expires_at = Some(Utc::now() + expires_in);
    self.updated_at = Utc::now();
  }

  pub fn is_password_reset_token_valid(&self, token: &str) -> bool {
    match (
      &self.password_reset_token,
      &self.password_reset_token_expires_at,
    ) {
      (Some(stored_token), Some(expires_at)) => stored_token == token && expires_at > &Utc::now(),
      _ => false,
    }
  }

  pub fn clear_password_reset_token(&mut self) {
    self.password_reset_token = None;
    self.password_reset_token_expires_at = None;
    self.updated_at = Utc::now();
  }

  /// Changing the email deactivates the account until re-verified
  pub fn update_email(&mut self, new_email: String) {
    self.email = new_email;
    self.is_active = false;
    self.updated_at = Utc::now();
  }

  pub fn update_profile(&mut self, profile: UserProfile) {
    self.receiver_name_ka = profile.receiver_name_ka;
    self.receiver_name_en = profile.receiver_name_en;
    self.identification_code = profile.identification_code;
    self.address = profile.address;
    self.phone_number = profile.phone_number;
    self.bank_account_number = profile.bank_account_number;
    self.bank_name_ka = profile.bank_name_ka;
    self.bank_name_en = profile.bank_name_en;
    self.bank_code = profile.bank_code;
    self.updated_at = Utc::now();
  }
}

/// Active user session, stored as a hash of the opaque token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  /// SHA-256 hash of the session token
  pub token_hash: String,
  pub ip_address: Option<IpAddr>,
  pub user_agent: Option<String>,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  pub fn with_duration(
    user_id: Uuid,
    token_hash: String,
    duration: Duration,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      ip_address,
      user_agent,
      expires_at: Utc::now() + duration,
      created_at: Utc::now(),
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

/// Login attempt record used for rate limiting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
  pub id: Uuid,
  pub email: String,
  pub ip_address: Option<IpAddr>,
  pub success: bool,
  pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
  pub fn success(email: String, ip_address: Option<IpAddr>) -> Self {
    Self::new(email, ip_address, true)
  }

  pub fn failure(email: String, ip_address: Option<IpAddr>) -> Self {
    Self::new(email, ip_address, false)
  }

  fn new(email: String, ip_address: Option<IpAddr>, success: bool) -> Self {
    Self {
      id: Uuid::new_v4(),
      email,
      ip_address,
      success,
      attempted_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn profile() -> UserProfile {
    UserProfile {
      receiver_name_ka: "ნინო ბერიძე".to_string(),
      receiver_name_en: Some("Nino Beridze".to_string()),
      identification_code: "01005045678".to_string(),
      address: None,
      phone_number: None,
      bank_account_number: "GE12TB0000000123456789".to_string(),
      bank_name_ka: "თიბისი ბანკი".to_string(),
      bank_name_en: Some("TBC Bank".to_string()),
      bank_code: "TBCBGE22".to_string(),
    }
  }

  #[test]
  fn test_new_user_is_inactive() {
    let user = User::new("nino@example.com".to_string(), "hash".to_string(), profile());
    assert!(!user.is_active);
    assert!(!user.is_staff);
    assert!(!user.is_superuser);
  }

  #[test]
  fn test_email_verification_flow() {
    let mut user = User::new("nino@example.com".to_string(), "hash".to_string(), profile());

    user.set_email_verification_token("token123".to_string(), Duration::hours(24));
    assert!(user.is_email_verification_token_valid("token123"));
    assert!(!user.is_email_verification_token_valid("other"));

    user.verify_email();
    assert!(user.is_active);
    assert!(user.email_verification_token.is_none());
  }

  #[test]
  fn test_expired_verification_token_is_invalid() {
    let mut user = User::new("nino@example.com".to_string(), "hash".to_string(), profile());
    user.set_email_verification_token("token123".to_string(), Duration::seconds(-1));
    assert!(!user.is_email_verification_token_valid("token123"));
  }

  #[test]
  fn test_email_change_deactivates_account() {
    let mut user = User::new("nino@example.com".to_string(), "hash".to_string(), profile());
    user.verify_email();
    assert!(user.is_active);

    user.update_email("new@example.com".to_string());
    assert_eq!(user.email, "new@example.com");
    assert!(!user.is_active);
  }

  #[test]
  fn test_password_reset_token_flow() {
    let mut user = User::new("nino@example.com".to_string(), "hash".to_string(), profile());

    user.set_password_reset_token("reset123".to_string(), Duration::hours(1));
    assert!(user.is_password_reset_token_valid("reset123"));

    user.clear_password_reset_token();
    assert!(user.password_reset_token.is_none());
    assert!(!user.is_password_reset_token_valid("reset123"));
  }

  #[test]
  fn test_session_expiration() {
    let session = Session::with_duration(
      Uuid::new_v4(),
      "hash".to_string(),
      Duration::seconds(-10),
      None,
      None,
    );
    assert!(session.is_expired());

    let session = Session::with_duration(
      Uuid::new_v4(),
      "hash".to_string(),
      Duration::hours(1),
      None,
      None,
    );
    assert!(!session.is_expired());
  }

  #[test]
  fn test_login_attempt_constructors() {
    let ok = LoginAttempt::success("nino@example.com".to_string(), None);
    let bad = LoginAttempt::failure("nino@example.com".to_string(), None);
    assert!(ok.success);
    assert!(!bad.success);
  }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::application::auth::GetCurrentUserResponse;
use crate::application::invoice::{InvoiceDto, PayerDto, PurposeDto};
use crate::domain::invoice::value_objects::{Currency, Language, TemplateKind};

/// Shared enumeration checks. These delegate to the domain value objects so
/// the {en, ka} and template1..template4 sets are spelled out in one place.
fn validate_language(value: &str) -> Result<(), ValidationError> {
  Language::from_str(value).map(|_| ()).map_err(|_| {
    let mut error = ValidationError::new("unsupported_language");
    error.message = Some("Language should be one of ['en', 'ka']".into());
    error
  })
}

fn validate_template(value: &str) -> Result<(), ValidationError> {
  TemplateKind::from_str(value).map(|_| ()).map_err(|_| {
    let mut error = ValidationError::new("unknown_template");
    error.message = Some(
      "Template should be one of ['template1', 'template2', 'template3', 'template4']".into(),
    );
    error
  })
}

fn validate_currency(value: &str) -> Result<(), ValidationError> {
  Currency::from_str(value).map(|_| ()).map_err(|_| {
    let mut error = ValidationError::new("invalid_currency");
    error.message = Some("Currency should be one of ['GEL', 'USD', 'EUR']".into());
    error
  })
}

fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
  if value.is_sign_negative() {
    let mut error = ValidationError::new("negative_amount");
    error.message = Some("Amount cannot be negative".into());
    return Err(error);
  }
  Ok(())
}

// Auth requests

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  #[validate(must_match(other = "password", message = "Passwords do not match"))]
  pub confirm_password: String,

  #[validate(length(min = 1, max = 100))]
  pub receiver_name_ka: String,

  #[validate(length(max = 100))]
  pub receiver_name_en: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub identification_code: String,

  #[validate(length(max = 100))]
  pub address: Option<String>,

  #[validate(length(max = 100))]
  pub phone_number: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub bank_account_number: String,

  #[validate(length(min = 1, max = 100))]
  pub bank_name_ka: String,

  #[validate(length(max = 100))]
  pub bank_name_en: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub bank_code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,

  #[serde(default)]
  pub remember_me: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyEmailRequest {
  pub uid: Uuid,

  #[validate(length(min = 1, message = "Token is required"))]
  pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
  pub uid: Uuid,

  #[validate(length(min = 1, message = "Token is required"))]
  pub token: String,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub new_password: String,

  #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
  pub confirm_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub receiver_name_ka: String,

  #[validate(length(max = 100))]
  pub receiver_name_en: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub identification_code: String,

  #[validate(length(max = 100))]
  pub address: Option<String>,

  #[validate(length(max = 100))]
  pub phone_number: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub bank_account_number: String,

  #[validate(length(min = 1, max = 100))]
  pub bank_name_ka: String,

  #[validate(length(max = 100))]
  pub bank_name_en: Option<String>,

  #[validate(length(min = 1, max = 100))]
  pub bank_code: String,

  pub current_password: Option<String>,

  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub new_password: Option<String>,

  pub confirm_password: Option<String>,
}

impl UpdateProfileRequest {
  /// Password-change fields travel together; validator's must_match does not
  /// cover optional pairs, so the check lives here.
  pub fn validate_password_change(&self) -> Result<(), String> {
    if let Some(new_password) = &self.new_password {
      if self.current_password.is_none() {
        return Err("Current password is required".to_string());
      }
      match &self.confirm_password {
        Some(confirm) if confirm == new_password => {}
        _ => return Err("Passwords do not match".to_string()),
      }
    }
    Ok(())
  }
}

// Payer requests

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PayerRequest {
  #[validate(length(min = 1, max = 100))]
  pub identification_code: String,

  #[validate(length(min = 1, max = 100))]
  pub name_ka: String,

  #[validate(length(max = 100))]
  pub name_en: Option<String>,

  #[validate(length(max = 100))]
  pub phone_number: Option<String>,
}

// Invoice requests

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurposeRequest {
  #[validate(length(min = 1, message = "Description is required"))]
  pub description: String,

  #[validate(custom(function = "validate_amount"))]
  pub amount: Decimal,

  #[serde(default)]
  pub has_vat: bool,
}

/// Payload for saving and for generating an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvoiceRequest {
  pub payer: Uuid,

  #[validate(nested)]
  pub purposes: Vec<PurposeRequest>,

  #[validate(custom(function = "validate_currency"))]
  pub currency: String,

  #[validate(custom(function = "validate_language"))]
  #[serde(default = "default_language")]
  pub language: String,

  #[validate(custom(function = "validate_template"))]
  #[serde(default = "default_template")]
  pub template: String,

  #[serde(default)]
  pub should_use_invoice_date_currency_rate: bool,
}

fn default_language() -> String {
  "ka".to_string()
}

fn default_template() -> String {
  "template1".to_string()
}

// Responses

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  pub user_id: Uuid,
  pub email: String,
  pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub user_id: Uuid,
  pub email: String,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutAllResponse {
  pub sessions_terminated: usize,
  pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub receiver_name_ka: String,
  pub receiver_name_en: Option<String>,
  pub identification_code: String,
  pub address: Option<String>,
  pub phone_number: Option<String>,
  pub bank_account_number: String,
  pub bank_name_ka: String,
  pub bank_name_en: Option<String>,
  pub bank_code: String,
  pub created_at: DateTime<Utc>,
}

impl From<GetCurrentUserResponse> for CurrentUserResponse {
  fn from(user: GetCurrentUserResponse) -> Self {
    Self {
      user_id: user.user_id,
      email: user.email,
      receiver_name_ka: user.receiver_name_ka,
      receiver_name_en: user.receiver_name_en,
      identification_code: user.identification_code,
      address: user.address,
      phone_number: user.phone_number,
      bank_account_number: user.bank_account_number,
      bank_name_ka: user.bank_name_ka,
      bank_name_en: user.bank_name_en,
      bank_code: user.bank_code,
      created_at: user.created_at,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct PayerResponse {
  pub id: Uuid,
  pub identification_code: String,
  pub name_ka: String,
  pub name_en: Option<String>,
  pub phone_number: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<PayerDto> for PayerResponse {
  fn from(payer: PayerDto) -> Self {
    Self {
      id: payer.id,
      identification_code: payer.identification_code,
      name_ka: payer.name_ka,
      name_en: payer.name_en,
      phone_number: payer.phone_number,
      created_at: payer.created_at,
      updated_at: payer.updated_at,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct PurposeResponse {
  pub id: Uuid,
  pub description: String,
  pub amount: Decimal,
  pub has_vat: bool,
  pub vat_amount: Decimal,
}

impl From<PurposeDto> for PurposeResponse {
  fn from(purpose: PurposeDto) -> Self {
    Self {
      id: purpose.id,
      description: purpose.description,
      amount: purpose.amount,
      has_vat: purpose.has_vat,
      vat_amount: purpose.vat_amount,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
  pub id: Uuid,
  pub payer: Uuid,
  pub invoice_number: String,
  pub total_amount: Decimal,
  pub currency: String,
  pub language: String,
  pub template: String,
  pub should_use_invoice_date_currency_rate: bool,
  pub purposes: Vec<PurposeResponse>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<InvoiceDto> for InvoiceResponse {
  fn from(invoice: InvoiceDto) -> Self {
    Self {
      id: invoice.id,
      payer: invoice.payer_id,
      invoice_number: invoice.invoice_number,
      total_amount: invoice.total_amount,
      currency: invoice.currency,
      language: invoice.language,
      template: invoice.template,
      should_use_invoice_date_currency_rate: invoice.use_invoice_date_currency_rate,
      purposes: invoice
        .purposes
        .into_iter()
        .map(PurposeResponse::from)
        .collect(),
      created_at: invoice.created_at,
      updated_at: invoice.updated_at,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn invoice_request(language: &str, template: &str) -> InvoiceRequest {
    InvoiceRequest {
      payer: Uuid::new_v4(),
      purposes: vec![PurposeRequest {
        description: "Consulting".to_string(),
        amount: dec!(100),
        has_vat: true,
      }],
      currency: "GEL".to_string(),
      language: language.to_string(),
      template: template.to_string(),
      should_use_invoice_date_currency_rate: false,
    }
  }

  #[test]
  fn test_invoice_request_valid() {
    assert!(invoice_request("ka", "template1").validate().is_ok());
    assert!(invoice_request("en", "template4").validate().is_ok());
  }

  #[test]
  fn test_invoice_request_rejects_unknown_language() {
    assert!(invoice_request("fr", "template1").validate().is_err());
  }

  #[test]
  fn test_invoice_request_rejects_unknown_template() {
    assert!(invoice_request("en", "template9").validate().is_err());
  }

  #[test]
  fn test_invoice_request_rejects_negative_amount() {
    let mut request = invoice_request("en", "template1");
    request.purposes[0].amount = dec!(-5);
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_invoice_request_defaults() {
    let json = r#"{"payer": "1f4df5a1-9d9b-4e26-b9a1-111111111111", "purposes": [], "currency": "GEL"}"#;
    let request: InvoiceRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.language, "ka");
    assert_eq!(request.template, "template1");
    assert!(!request.should_use_invoice_date_currency_rate);
  }

  #[test]
  fn test_register_request_password_mismatch() {
    let request = RegisterRequest {
      email: "nino@example.com".to_string(),
      password: "longenoughpassword".to_string(),
      confirm_password: "differentpassword".to_string(),
      receiver_name_ka: "ნინო ბერიძე".to_string(),
      receiver_name_en: None,
      identification_code: "01005045678".to_string(),
      address: None,
      phone_number: None,
      bank_account_number: "GE12TB0000000123456789".to_string(),
      bank_name_ka: "თიბისი ბანკი".to_string(),
      bank_name_en: None,
      bank_code: "TBCBGE22".to_string(),
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_login_request_remember_me_default() {
    let json = r#"{"email": "nino@example.com", "password": "secret"}"#;
    let request: LoginRequest = serde_json::from_str(json).unwrap();
    assert!(!request.remember_me);
  }

  #[test]
  fn test_profile_password_change_requires_current() {
    let request = UpdateProfileRequest {
      email: None,
      receiver_name_ka: "ნინო ბერიძე".to_string(),
      receiver_name_en: None,
      identification_code: "01005045678".to_string(),
      address: None,
      phone_number: None,
      bank_account_number: "GE12TB0000000123456789".to_string(),
      bank_name_ka: "თიბისი ბანკი".to_string(),
      bank_name_en: None,
      bank_code: "TBCBGE22".to_string(),
      current_password: None,
      new_password: Some("newpassword123".to_string()),
      confirm_password: Some("newpassword123".to_string()),
    };
    assert!(request.validate_password_change().is_err());
  }
}

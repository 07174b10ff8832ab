use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::invoice::errors::InvoiceError;

use super::dtos::ErrorResponse;

/// API error type mapping domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Caller-supplied data failed schema or enumeration checks (400)
  Validation(String),

  /// Authentication/account error (401/403/404/409/429)
  Auth(AuthErrorKind),

  /// Resource missing or not owned by the caller (404)
  NotFound(String),

  /// Uniqueness conflict (409)
  Conflict(String),

  /// Invoice generation failed; the cause is surfaced in the message (500)
  Generation(String),

  /// Internal server error, details logged but not exposed (500)
  Internal(String),
}

#[derive(Debug, Serialize)]
pub enum AuthErrorKind {
  InvalidCredentials,
  InvalidSession,
  InvalidToken,
  EmailNotVerified,
  RateLimitExceeded,
  EmailAlreadyExists,
  IdentificationCodeAlreadyExists,
  UserNotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
      ApiError::Generation(msg) => write!(f, "Generation error: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidSession => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::BAD_REQUEST,
        AuthErrorKind::EmailNotVerified => StatusCode::FORBIDDEN,
        AuthErrorKind::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::IdentificationCodeAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UserNotFound => StatusCode::NOT_FOUND,
      },
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        AuthErrorKind::InvalidSession => {
          ("invalid_session", "Invalid or expired session".to_string())
        }
        AuthErrorKind::InvalidToken => ("invalid_token", "Invalid or expired token".to_string()),
        AuthErrorKind::EmailNotVerified => (
          "email_not_verified",
          "Email address has not been verified".to_string(),
        ),
        AuthErrorKind::RateLimitExceeded => (
          "rate_limit_exceeded",
          "Too many login attempts. Please try again later".to_string(),
        ),
        AuthErrorKind::EmailAlreadyExists => (
          "email_already_exists",
          "An account with this email already exists".to_string(),
        ),
        AuthErrorKind::IdentificationCodeAlreadyExists => (
          "identification_code_already_exists",
          "An account with this identification code already exists".to_string(),
        ),
        AuthErrorKind::UserNotFound => ("user_not_found", "User not found".to_string()),
      },
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Conflict(msg) => ("conflict", msg.clone()),
      ApiError::Generation(msg) => ("generation_error", msg.clone()),
      ApiError::Internal(msg) => {
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      AuthError::EmailAlreadyExists => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      AuthError::IdentificationCodeAlreadyExists => {
        ApiError::Auth(AuthErrorKind::IdentificationCodeAlreadyExists)
      }
      AuthError::UserNotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
      AuthError::InvalidSession => ApiError::Auth(AuthErrorKind::InvalidSession),
      AuthError::EmailNotVerified => ApiError::Auth(AuthErrorKind::EmailNotVerified),
      AuthError::InvalidToken => ApiError::Auth(AuthErrorKind::InvalidToken),
      AuthError::RateLimitExceeded => ApiError::Auth(AuthErrorKind::RateLimitExceeded),
      AuthError::Mail(err) => ApiError::Internal(err),
      AuthError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::Auth(AuthErrorKind::UserNotFound),
        RepositoryError::DuplicateKey(_) => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::ValueObject(err) => ApiError::Validation(err.to_string()),
    }
  }
}

impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::Validation(err) => ApiError::Validation(err.to_string()),
      InvoiceError::LanguageNotSupported(language) => {
        ApiError::Validation(format!("Language '{}' is not supported", language))
      }
      InvoiceError::PayerNotFound(id) => ApiError::NotFound(format!("Payer not found: {}", id)),
      InvoiceError::InvoiceNotFound(id) => {
        ApiError::NotFound(format!("Invoice not found: {}", id))
      }
      InvoiceError::InvoiceNumberAlreadyExists(number) => {
        ApiError::Conflict(format!("Invoice number '{}' already exists", number))
      }
      InvoiceError::Generation(msg) => ApiError::Generation(msg),
      InvoiceError::Database(err) => ApiError::Internal(err),
    }
  }
}

impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_codes() {
    assert_eq!(
      ApiError::Validation("bad".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Auth(AuthErrorKind::InvalidSession).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::NotFound("payer".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Generation("pdf".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_language_not_supported_is_client_error() {
    let api_error: ApiError = InvoiceError::LanguageNotSupported("fr".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_generation_failure_is_server_error() {
    let api_error: ApiError =
      InvoiceError::Generation("Failed to generate PDF: boom".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_unverified_email_is_forbidden() {
    let api_error: ApiError = AuthError::EmailNotVerified.into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn test_duplicate_invoice_number_is_conflict() {
    let api_error: ApiError =
      InvoiceError::InvoiceNumberAlreadyExists("20240503040506".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);
  }
}

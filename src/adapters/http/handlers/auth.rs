use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::dtos::{
  CurrentUserResponse, ForgotPasswordRequest, LoginRequest, LoginResponse, LogoutAllResponse,
  RegisterRequest, RegisterResponse, ResetPasswordRequest, SuccessResponse, UpdateProfileRequest,
  VerifyEmailRequest,
};
use crate::adapters::http::errors::ApiError;
use crate::application::auth::{
  DeleteAccountUseCase, GetCurrentUserUseCase, LoginUserCommand, LoginUserUseCase,
  LogoutAllDevicesUseCase, LogoutUserUseCase, RegisterUserCommand, RegisterUserUseCase,
  RequestPasswordResetCommand, RequestPasswordResetUseCase, ResetPasswordCommand,
  ResetPasswordUseCase, UpdateProfileCommand, UpdateProfileUseCase, VerifyEmailCommand,
  VerifyEmailUseCase,
};

/// Extract session token from the Authorization header
fn extract_session_token(req: &HttpRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or_else(|| ApiError::Validation("Missing or invalid Authorization header".to_string()))
}

fn extract_ip_address(req: &HttpRequest) -> Option<std::net::IpAddr> {
  req.connection_info().realip_remote_addr().and_then(|addr| {
    if let Some(ip) = addr.split(':').next() {
      ip.parse().ok()
    } else {
      addr.parse().ok()
    }
  })
}

fn extract_user_agent(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get("User-Agent")
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}

/// POST /register - create an inactive account and email a verification link
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    email: request.email,
    password: request.password,
    receiver_name_ka: request.receiver_name_ka,
    receiver_name_en: request.receiver_name_en,
    identification_code: request.identification_code,
    address: request.address,
    phone_number: request.phone_number,
    bank_account_number: request.bank_account_number,
    bank_name_ka: request.bank_name_ka,
    bank_name_en: request.bank_name_en,
    bank_code: request.bank_code,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(RegisterResponse {
    user_id: response.user_id,
    email: response.email,
    message: "Verification email sent".to_string(),
  }))
}

/// POST /login
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let ip_address = extract_ip_address(&http_req);
  let user_agent = extract_user_agent(&http_req);

  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
    remember_me: request.remember_me,
  };

  let response = use_case.execute(command, ip_address, user_agent).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    user_id: response.user_id,
    email: response.email,
    session_token: response.session_token,
    expires_at: response.expires_at,
  }))
}

/// POST /logout
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;

  use_case.execute(session_token).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Successfully logged out".to_string(),
  }))
}

/// POST /logout-all
pub async fn logout_all_handler(
  use_case: web::Data<Arc<LogoutAllDevicesUseCase>>,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;
  let current_user = get_user_use_case.execute(session_token).await?;

  let response = use_case.execute(current_user.user_id).await?;

  Ok(HttpResponse::Ok().json(LogoutAllResponse {
    sessions_terminated: response.sessions_terminated,
    message: format!(
      "Successfully logged out from {} device(s)",
      response.sessions_terminated
    ),
  }))
}

/// GET /me
pub async fn get_current_user_handler(
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;
  let response = use_case.execute(session_token).await?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse::from(response)))
}

/// POST /verify-email - activate an account with the emailed uid/token pair
pub async fn verify_email_handler(
  request: web::Json<VerifyEmailRequest>,
  use_case: web::Data<Arc<VerifyEmailUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  use_case
    .execute(VerifyEmailCommand {
      uid: request.uid,
      token: request.token.clone(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Email verified successfully.".to_string(),
  }))
}

/// POST /forgot-password - email a reset link
pub async fn forgot_password_handler(
  request: web::Json<ForgotPasswordRequest>,
  use_case: web::Data<Arc<RequestPasswordResetUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  use_case
    .execute(RequestPasswordResetCommand {
      email: request.email.clone(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Password reset instructions sent to your email.".to_string(),
  }))
}

/// POST /reset-password
pub async fn reset_password_handler(
  request: web::Json<ResetPasswordRequest>,
  use_case: web::Data<Arc<ResetPasswordUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  use_case
    .execute(ResetPasswordCommand {
      uid: request.uid,
      token: request.token.clone(),
      new_password: request.new_password.clone(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Password reset successfully.".to_string(),
  }))
}

/// PUT /profile - update account fields; an email change triggers
/// re-verification
pub async fn update_profile_handler(
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateProfileUseCase>>,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  request
    .validate_password_change()
    .map_err(ApiError::Validation)?;

  let session_token = extract_session_token(&http_req)?;
  let current_user = get_user_use_case.execute(session_token).await?;

  let request = request.into_inner();
  let command = UpdateProfileCommand {
    user_id: current_user.user_id,
    email: request.email,
    receiver_name_ka: request.receiver_name_ka,
    receiver_name_en: request.receiver_name_en,
    identification_code: request.identification_code,
    address: request.address,
    phone_number: request.phone_number,
    bank_account_number: request.bank_account_number,
    bank_name_ka: request.bank_name_ka,
    bank_name_en: request.bank_name_en,
    bank_code: request.bank_code,
    current_password: request.current_password,
    new_password: request.new_password,
  };

  let response = use_case.execute(command).await?;

  let message = if response.is_active {
    "Profile updated successfully.".to_string()
  } else {
    "Profile updated. Verification email sent to the new address.".to_string()
  };

  Ok(HttpResponse::Ok().json(SuccessResponse { message }))
}

/// DELETE /account
pub async fn delete_account_handler(
  use_case: web::Data<Arc<DeleteAccountUseCase>>,
  get_user_use_case: web::Data<Arc<GetCurrentUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let session_token = extract_session_token(&http_req)?;
  let current_user = get_user_use_case.execute(session_token).await?;

  use_case.execute(current_user.user_id).await?;

  Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_session_token_valid() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_http_request();

    assert_eq!(extract_session_token(&req).unwrap(), "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    use actix_web::test::TestRequest;

    let req = TestRequest::default().to_http_request();
    assert!(extract_session_token(&req).is_err());
  }
}

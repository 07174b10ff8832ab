use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  DeleteAccountUseCase, GetCurrentUserUseCase, LoginUserUseCase, LogoutAllDevicesUseCase,
  LogoutUserUseCase, RegisterUserUseCase, RequestPasswordResetUseCase, ResetPasswordUseCase,
  UpdateProfileUseCase, VerifyEmailUseCase,
};
use crate::application::invoice::{
  CreatePayerUseCase, DeleteInvoiceUseCase, DeletePayerUseCase, GenerateInvoiceUseCase,
  GetInvoiceUseCase, GetPayerUseCase, ListInvoicesUseCase, ListPayersUseCase, SaveInvoiceUseCase,
  UpdatePayerUseCase, UpdateInvoiceUseCase,
};

use super::handlers::auth::{
  delete_account_handler, forgot_password_handler, get_current_user_handler, login_handler,
  logout_all_handler, logout_handler, register_handler, reset_password_handler,
  update_profile_handler, verify_email_handler,
};
use super::handlers::invoices::{
  delete_invoice_handler, generate_invoice_handler, get_invoice_handler, list_invoices_handler,
  save_invoice_handler, update_invoice_handler,
};
use super::handlers::payers::{
  create_payer_handler, delete_payer_handler, get_payer_handler, list_payers_handler,
  update_payer_handler,
};

/// Use cases required by the auth scope
pub struct AuthRouteDependencies {
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub logout_all_use_case: Arc<LogoutAllDevicesUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
  pub verify_email_use_case: Arc<VerifyEmailUseCase>,
  pub request_password_reset_use_case: Arc<RequestPasswordResetUseCase>,
  pub reset_password_use_case: Arc<ResetPasswordUseCase>,
  pub update_profile_use_case: Arc<UpdateProfileUseCase>,
  pub delete_account_use_case: Arc<DeleteAccountUseCase>,
}

/// Configure authentication and account routes
///
/// - POST /register - create an inactive account, email a verification link
/// - POST /login - authenticate and create a session
/// - POST /logout - invalidate the current session
/// - POST /logout-all - invalidate every session of the user
/// - GET /me - current user profile
/// - POST /verify-email - confirm an email address
/// - POST /forgot-password - email a password-reset link
/// - POST /reset-password - set a new password from a reset link
/// - PUT /profile - update profile/banking fields
/// - DELETE /account - delete the account and everything it owns
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: AuthRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.register_use_case))
    .app_data(web::Data::new(deps.login_use_case))
    .app_data(web::Data::new(deps.logout_use_case))
    .app_data(web::Data::new(deps.logout_all_use_case))
    .app_data(web::Data::new(deps.get_user_use_case))
    .app_data(web::Data::new(deps.verify_email_use_case))
    .app_data(web::Data::new(deps.request_password_reset_use_case))
    .app_data(web::Data::new(deps.reset_password_use_case))
    .app_data(web::Data::new(deps.update_profile_use_case))
    .app_data(web::Data::new(deps.delete_account_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/logout", web::post().to(logout_handler))
    .route("/logout-all", web::post().to(logout_all_handler))
    .route("/me", web::get().to(get_current_user_handler))
    .route("/verify-email", web::post().to(verify_email_handler))
    .route("/forgot-password", web::post().to(forgot_password_handler))
    .route("/reset-password", web::post().to(reset_password_handler))
    .route("/profile", web::put().to(update_profile_handler))
    .route("/account", web::delete().to(delete_account_handler));
}

/// Configure payer CRUD routes (mounted behind AuthMiddleware)
pub fn configure_payer_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreatePayerUseCase>,
  list_use_case: Arc<ListPayersUseCase>,
  get_use_case: Arc<GetPayerUseCase>,
  update_use_case: Arc<UpdatePayerUseCase>,
  delete_use_case: Arc<DeletePayerUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .route("", web::get().to(list_payers_handler))
    .route("", web::post().to(create_payer_handler))
    .route("/{id}", web::get().to(get_payer_handler))
    .route("/{id}", web::put().to(update_payer_handler))
    .route("/{id}", web::delete().to(delete_payer_handler));
}

/// Configure saved-invoice and generation routes (mounted behind AuthMiddleware)
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  save_use_case: Arc<SaveInvoiceUseCase>,
  list_use_case: Arc<ListInvoicesUseCase>,
  get_use_case: Arc<GetInvoiceUseCase>,
  update_use_case: Arc<UpdateInvoiceUseCase>,
  delete_use_case: Arc<DeleteInvoiceUseCase>,
  generate_use_case: Arc<GenerateInvoiceUseCase>,
) {
  cfg
    .app_data(web::Data::new(save_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(update_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(generate_use_case))
    .route("", web::get().to(list_invoices_handler))
    .route("", web::post().to(save_invoice_handler))
    .route("/generate", web::post().to(generate_invoice_handler))
    .route("/{id}", web::get().to(get_invoice_handler))
    .route("/{id}", web::put().to(update_invoice_handler))
    .route("/{id}", web::delete().to(delete_invoice_handler));
}

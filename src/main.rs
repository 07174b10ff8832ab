use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faktoora::{
  adapters::http::{
    AuthMiddleware, AuthRouteDependencies, RequestIdMiddleware, configure_auth_routes,
    configure_invoice_routes, configure_payer_routes,
  },
  application::auth::{
    DeleteAccountUseCase, GetCurrentUserUseCase, LoginUserUseCase, LogoutAllDevicesUseCase,
    LogoutUserUseCase, RegisterUserUseCase, RequestPasswordResetUseCase, ResetPasswordUseCase,
    UpdateProfileUseCase, VerifyEmailUseCase,
  },
  application::invoice::{
    CreatePayerUseCase, DeleteInvoiceUseCase, DeletePayerUseCase, GenerateInvoiceUseCase,
    GetInvoiceUseCase, GetPayerUseCase, ListInvoicesUseCase, ListPayersUseCase,
    SaveInvoiceUseCase, UpdateInvoiceUseCase, UpdatePayerUseCase,
  },
  domain::auth::services::{AuthService, AuthServiceConfig},
  domain::invoice::generator::InvoiceGenerator,
  domain::invoice::ports::{PdfConverter, TemplateRenderer},
  domain::invoice::services::InvoiceService,
  infrastructure::{
    config::Config,
    email::SmtpMailer,
    pdf::WkHtmlToPdfConverter,
    persistence::postgres::{
      PostgresInvoiceRepository, PostgresLoginAttemptRepository, PostgresPayerRepository,
      PostgresPurposeRepository, PostgresSessionRepository, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, SecureTokenGenerator},
    templates::TeraInvoiceRenderer,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "faktoora=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Faktoora application");

  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Database pool with a startup timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    std::io::Error::other(format!("Database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));
  let login_attempt_repo = Arc::new(PostgresLoginAttemptRepository::new(db_pool.clone()));
  let payer_repo = Arc::new(PostgresPayerRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let purpose_repo = Arc::new(PostgresPurposeRepository::new(db_pool.clone()));

  // Security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));
  let token_generator = Arc::new(SecureTokenGenerator::new());

  // Outbound mail
  let mailer = Arc::new(SmtpMailer::new(&config.smtp).expect("Failed to create SMTP mailer"));
  tracing::info!("SMTP mailer initialized");

  // Domain services
  let auth_config = AuthServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds as i64,
    remember_me_ttl_seconds: config.security.remember_me_ttl_seconds as i64,
    rate_limit_window_seconds: config.rate_limit.login_window_seconds as i64,
    max_failed_attempts: config.rate_limit.login_max_attempts as i64,
    verification_token_ttl_hours: config.security.verification_token_ttl_hours,
    reset_token_ttl_hours: config.security.reset_token_ttl_hours,
    frontend_url: config.server.frontend_url.clone(),
  };

  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    session_repo.clone(),
    login_attempt_repo.clone(),
    password_hasher,
    token_generator,
    mailer,
    auth_config,
  ));

  let invoice_service = Arc::new(InvoiceService::new(
    payer_repo.clone(),
    invoice_repo.clone(),
    purpose_repo.clone(),
  ));

  // Invoice generation pipeline
  let renderer =
    Arc::new(TeraInvoiceRenderer::new().expect("Failed to load invoice templates"))
      as Arc<dyn TemplateRenderer>;
  tracing::info!("Invoice templates loaded");

  let pdf_converter = WkHtmlToPdfConverter::new(config.pdf.wkhtmltopdf_path.clone());
  if let Err(e) = pdf_converter.verify_installed().await {
    tracing::warn!("wkhtmltopdf check failed: {}", e);
  }
  let pdf_converter = Arc::new(pdf_converter) as Arc<dyn PdfConverter>;

  let generator = Arc::new(InvoiceGenerator::new(renderer, pdf_converter));
  tracing::info!("Invoice generator initialized");

  // Auth use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let logout_use_case = Arc::new(LogoutUserUseCase::new(auth_service.clone()));
  let logout_all_use_case = Arc::new(LogoutAllDevicesUseCase::new(auth_service.clone()));
  let get_user_use_case = Arc::new(GetCurrentUserUseCase::new(auth_service.clone()));
  let verify_email_use_case = Arc::new(VerifyEmailUseCase::new(auth_service.clone()));
  let request_password_reset_use_case =
    Arc::new(RequestPasswordResetUseCase::new(auth_service.clone()));
  let reset_password_use_case = Arc::new(ResetPasswordUseCase::new(auth_service.clone()));
  let update_profile_use_case = Arc::new(UpdateProfileUseCase::new(auth_service.clone()));
  let delete_account_use_case = Arc::new(DeleteAccountUseCase::new(auth_service.clone()));

  // Payer use cases
  let create_payer_use_case = Arc::new(CreatePayerUseCase::new(invoice_service.clone()));
  let list_payers_use_case = Arc::new(ListPayersUseCase::new(invoice_service.clone()));
  let get_payer_use_case = Arc::new(GetPayerUseCase::new(invoice_service.clone()));
  let update_payer_use_case = Arc::new(UpdatePayerUseCase::new(invoice_service.clone()));
  let delete_payer_use_case = Arc::new(DeletePayerUseCase::new(invoice_service.clone()));

  // Invoice use cases
  let save_invoice_use_case = Arc::new(SaveInvoiceUseCase::new(invoice_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(invoice_service.clone()));
  let get_invoice_use_case = Arc::new(GetInvoiceUseCase::new(invoice_service.clone()));
  let update_invoice_use_case = Arc::new(UpdateInvoiceUseCase::new(invoice_service.clone()));
  let delete_invoice_use_case = Arc::new(DeleteInvoiceUseCase::new(invoice_service.clone()));
  let generate_invoice_use_case = Arc::new(GenerateInvoiceUseCase::new(
    invoice_service.clone(),
    user_repo.clone(),
    generator.clone(),
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .service(web::scope("/api/v1/auth").configure(|cfg| {
        configure_auth_routes(
          cfg,
          AuthRouteDependencies {
            register_use_case: register_use_case.clone(),
            login_use_case: login_use_case.clone(),
            logout_use_case: logout_use_case.clone(),
            logout_all_use_case: logout_all_use_case.clone(),
            get_user_use_case: get_user_use_case.clone(),
            verify_email_use_case: verify_email_use_case.clone(),
            request_password_reset_use_case: request_password_reset_use_case.clone(),
            reset_password_use_case: reset_password_use_case.clone(),
            update_profile_use_case: update_profile_use_case.clone(),
            delete_account_use_case: delete_account_use_case.clone(),
          },
        )
      }))
      .service(
        web::scope("/api/v1/payers")
          .wrap(AuthMiddleware::new(get_user_use_case.clone()))
          .configure(|cfg| {
            configure_payer_routes(
              cfg,
              create_payer_use_case.clone(),
              list_payers_use_case.clone(),
              get_payer_use_case.clone(),
              update_payer_use_case.clone(),
              delete_payer_use_case.clone(),
            )
          }),
      )
      .service(
        web::scope("/api/v1/invoices")
          .wrap(AuthMiddleware::new(get_user_use_case.clone()))
          .configure(|cfg| {
            configure_invoice_routes(
              cfg,
              save_invoice_use_case.clone(),
              list_invoices_use_case.clone(),
              get_invoice_use_case.clone(),
              update_invoice_use_case.clone(),
              delete_invoice_use_case.clone(),
              generate_invoice_use_case.clone(),
            )
          }),
      )
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}

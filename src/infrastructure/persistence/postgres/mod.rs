pub mod invoice_repository;
pub mod login_attempt_repository;
pub mod payer_repository;
pub mod purpose_repository;
pub mod session_repository;
pub mod user_repository;

pub use invoice_repository::PostgresInvoiceRepository;
pub use login_attempt_repository::PostgresLoginAttemptRepository;
pub use payer_repository::PostgresPayerRepository;
pub use purpose_repository::PostgresPurposeRepository;
pub use session_repository::PostgresSessionRepository;
pub use user_repository::PostgresUserRepository;

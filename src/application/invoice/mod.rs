pub mod create_payer;
pub mod delete_invoice;
pub mod delete_payer;
pub mod generate_invoice;
pub mod get_invoice;
pub mod get_payer;
pub mod list_invoices;
pub mod list_payers;
pub mod save_invoice;
pub mod update_invoice;
pub mod update_payer;

pub use create_payer::{CreatePayerCommand, CreatePayerUseCase, PayerDto};
pub use delete_invoice::DeleteInvoiceUseCase;
pub use delete_payer::DeletePayerUseCase;
pub use generate_invoice::{
  GenerateInvoiceCommand, GenerateInvoiceResponse, GenerateInvoiceUseCase,
};
pub use get_invoice::GetInvoiceUseCase;
pub use get_payer::GetPayerUseCase;
pub use list_invoices::ListInvoicesUseCase;
pub use list_payers::ListPayersUseCase;
pub use save_invoice::{
  InvoiceDto, PurposeDto, PurposeInputDto, SaveInvoiceCommand, SaveInvoiceUseCase,
};
pub use update_invoice::UpdateInvoiceUseCase;
pub use update_payer::{UpdatePayerCommand, UpdatePayerUseCase};

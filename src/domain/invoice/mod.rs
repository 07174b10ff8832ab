pub mod calendar;
pub mod entities;
pub mod errors;
pub mod generator;
pub mod numbering;
pub mod ports;
pub mod services;
pub mod totals;
pub mod value_objects;

pub use entities::{Invoice, Payer, Purpose};
pub use errors::InvoiceError;
pub use generator::{GenerationInput, InvoiceGenerator, TemplateSelector};
pub use numbering::InvoiceNumberGenerator;
pub use ports::{
  InvoiceRepository, PayerRepository, PdfConverter, PurposeRepository, TemplateRenderer,
};
pub use services::{InvoiceService, PayerData, SavedInvoiceData};
pub use totals::{ComputedLine, InvoiceTotals, PurposeLine, calculate_totals, vat_amount};
pub use value_objects::{
  Currency, InvoiceNumber, Language, TemplateKind, ValueObjectError,
};

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::dtos::{InvoiceRequest, InvoiceResponse};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::AuthUser;
use crate::application::invoice::{
  DeleteInvoiceUseCase, GenerateInvoiceCommand, GenerateInvoiceUseCase, GetInvoiceUseCase,
  ListInvoicesUseCase, PurposeInputDto, SaveInvoiceCommand, SaveInvoiceUseCase,
  UpdateInvoiceUseCase,
};

fn to_save_command(receiver_id: Uuid, request: InvoiceRequest) -> SaveInvoiceCommand {
  SaveInvoiceCommand {
    receiver_id,
    payer_id: request.payer,
    purposes: request
      .purposes
      .into_iter()
      .map(|p| PurposeInputDto {
        description: p.description,
        amount: p.amount,
        has_vat: p.has_vat,
      })
      .collect(),
    currency: request.currency,
    language: request.language,
    template: request.template,
    use_invoice_date_currency_rate: request.should_use_invoice_date_currency_rate,
  }
}

/// GET / - list the caller's saved invoices with their purposes
pub async fn list_invoices_handler(
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let invoices = use_case.execute(user.id).await?;
  let response: Vec<InvoiceResponse> = invoices.into_iter().map(InvoiceResponse::from).collect();

  Ok(HttpResponse::Ok().json(response))
}

/// POST / - save an invoice; totals and the invoice number are derived
pub async fn save_invoice_handler(
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<SaveInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let invoice = use_case
    .execute(to_save_command(user.id, request.into_inner()))
    .await?;

  Ok(HttpResponse::Created().json(InvoiceResponse::from(invoice)))
}

/// GET /{id}
pub async fn get_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let invoice = use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// PUT /{id} - purposes are replaced wholesale, a fresh number is minted
pub async fn update_invoice_handler(
  path: web::Path<Uuid>,
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let invoice = use_case
    .execute(
      path.into_inner(),
      to_save_command(user.id, request.into_inner()),
    )
    .await?;

  Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// DELETE /{id}
pub async fn delete_invoice_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}

/// POST /generate - render the payload into a PDF without persisting it
pub async fn generate_invoice_handler(
  request: web::Json<InvoiceRequest>,
  use_case: web::Data<Arc<GenerateInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let request = request.into_inner();
  let command = GenerateInvoiceCommand {
    receiver_id: user.id,
    payer_id: request.payer,
    purposes: request
      .purposes
      .into_iter()
      .map(|p| PurposeInputDto {
        description: p.description,
        amount: p.amount,
        has_vat: p.has_vat,
      })
      .collect(),
    currency: request.currency,
    language: request.language,
    template: request.template,
  };

  let response = use_case.execute(command).await?;

  Ok(
    HttpResponse::Ok()
      .content_type("application/pdf")
      .insert_header((
        "Content-Disposition",
        format!("inline; filename=\"{}\"", response.filename),
      ))
      .body(response.pdf),
  )
}

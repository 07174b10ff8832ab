use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::dtos::{PayerRequest, PayerResponse};
use crate::adapters::http::errors::ApiError;
use crate::adapters::http::middleware::AuthUser;
use crate::application::invoice::{
  CreatePayerCommand, CreatePayerUseCase, DeletePayerUseCase, GetPayerUseCase, ListPayersUseCase,
  UpdatePayerCommand, UpdatePayerUseCase,
};

/// GET / - list the caller's payers
pub async fn list_payers_handler(
  use_case: web::Data<Arc<ListPayersUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let payers = use_case.execute(user.id).await?;
  let response: Vec<PayerResponse> = payers.into_iter().map(PayerResponse::from).collect();

  Ok(HttpResponse::Ok().json(response))
}

/// POST / - create a payer owned by the caller
pub async fn create_payer_handler(
  request: web::Json<PayerRequest>,
  use_case: web::Data<Arc<CreatePayerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let request = request.into_inner();
  let payer = use_case
    .execute(CreatePayerCommand {
      owner_id: user.id,
      identification_code: request.identification_code,
      name_ka: request.name_ka,
      name_en: request.name_en,
      phone_number: request.phone_number,
    })
    .await?;

  Ok(HttpResponse::Created().json(PayerResponse::from(payer)))
}

/// GET /{id}
pub async fn get_payer_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetPayerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let payer = use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(PayerResponse::from(payer)))
}

/// PUT /{id}
pub async fn update_payer_handler(
  path: web::Path<Uuid>,
  request: web::Json<PayerRequest>,
  use_case: web::Data<Arc<UpdatePayerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let request = request.into_inner();
  let payer = use_case
    .execute(UpdatePayerCommand {
      owner_id: user.id,
      payer_id: path.into_inner(),
      identification_code: request.identification_code,
      name_ka: request.name_ka,
      name_en: request.name_en,
      phone_number: request.phone_number,
    })
    .await?;

  Ok(HttpResponse::Ok().json(PayerResponse::from(payer)))
}

/// DELETE /{id}
pub async fn delete_payer_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeletePayerUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}

// src/handlers/service.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::catalog::Service,
};

const SERVICE_NOT_FOUND: &str = "Serviço não encontrado";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    #[schema(example = "Troca de tela")]
    pub description: String,
    #[schema(example = "150.00")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServicePayload {
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

// POST /manager/services
#[utoipa::path(
    post,
    path = "/manager/services",
    tag = "Manager - Services",
    request_body = CreateServicePayload,
    responses((status = 201, description = "Serviço criado", body = Service)),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let company_id = app_state.tenants.resolve(user.id).await?;

    let service = app_state
        .catalog
        .create_service(company_id, &payload.description, payload.price)
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /manager/services
#[utoipa::path(
    get,
    path = "/manager/services",
    tag = "Manager - Services",
    responses((status = 200, description = "Serviços da empresa", body = Vec<Service>)),
    security(("api_jwt" = []))
)]
pub async fn list_services(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    let services = app_state.catalog.list_services(company_id).await?;
    Ok((StatusCode::OK, Json(services)))
}

// GET /manager/services/{id}
#[utoipa::path(
    get,
    path = "/manager/services/{id}",
    tag = "Manager - Services",
    params(("id" = i64, Path, description = "ID do serviço")),
    responses(
        (status = 200, description = "Serviço", body = Service),
        (status = 400, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    let service = app_state
        .catalog
        .find_service(company_id, id)
        .await?
        .ok_or(AppError::NotFound(SERVICE_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(service)))
}

// PUT /manager/services/{id}
#[utoipa::path(
    put,
    path = "/manager/services/{id}",
    tag = "Manager - Services",
    params(("id" = i64, Path, description = "ID do serviço")),
    request_body = UpdateServicePayload,
    responses((status = 200, description = "Serviço atualizado", body = Service)),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let company_id = app_state.tenants.resolve(user.id).await?;

    let service = app_state
        .catalog
        .update_service(company_id, id, payload.description.as_deref(), payload.price)
        .await?
        .ok_or(AppError::NotFound(SERVICE_NOT_FOUND))?;

    Ok((StatusCode::OK, Json(service)))
}

// DELETE /manager/services/{id}
#[utoipa::path(
    delete,
    path = "/manager/services/{id}",
    tag = "Manager - Services",
    params(("id" = i64, Path, description = "ID do serviço")),
    responses((status = 204, description = "Serviço removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    if !app_state.catalog.delete_service(company_id, id).await? {
        return Err(AppError::NotFound(SERVICE_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

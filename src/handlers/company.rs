// src/handlers/company.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::company::Company};

const COMPANY_NOT_FOUND: &str = "Empresa não encontrada";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Assistência TechFix")]
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

// POST /admin/companies
#[utoipa::path(
    post,
    path = "/admin/companies",
    tag = "Admin - Companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .companies
        .create(
            &payload.name,
            payload.tax_id.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /admin/companies
#[utoipa::path(
    get,
    path = "/admin/companies",
    tag = "Admin - Companies",
    responses(
        (status = 200, description = "Lista de empresas", body = Vec<Company>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.companies.list().await?;
    Ok((StatusCode::OK, Json(companies)))
}

// GET /admin/companies/{id}
#[utoipa::path(
    get,
    path = "/admin/companies/{id}",
    tag = "Admin - Companies",
    params(("id" = i64, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa", body = Company),
        (status = 400, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .companies
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound(COMPANY_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(company)))
}

// PUT /admin/companies/{id}
#[utoipa::path(
    put,
    path = "/admin/companies/{id}",
    tag = "Admin - Companies",
    params(("id" = i64, Path, description = "ID da empresa")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state
        .companies
        .update(
            id,
            payload.name.as_deref(),
            payload.tax_id.as_deref(),
            payload.address.as_deref(),
            payload.phone.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound(COMPANY_NOT_FOUND))?;

    Ok((StatusCode::OK, Json(company)))
}

// DELETE /admin/companies/{id}
#[utoipa::path(
    delete,
    path = "/admin/companies/{id}",
    tag = "Admin - Companies",
    params(("id" = i64, Path, description = "ID da empresa")),
    responses(
        (status = 204, description = "Empresa removida"),
        (status = 400, description = "Empresa inexistente ou com registros vinculados")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !app_state.companies.delete(id).await? {
        return Err(AppError::NotFound(COMPANY_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

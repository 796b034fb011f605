// src/handlers/customer.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::customer::Customer,
};

const CUSTOMER_NOT_FOUND: &str = "Cliente não encontrado";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "João Pereira")]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    pub name: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// POST /manager/customers
#[utoipa::path(
    post,
    path = "/manager/customers",
    tag = "Manager - Customers",
    request_body = CreateCustomerPayload,
    responses((status = 201, description = "Cliente criado", body = Customer)),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let company_id = app_state.tenants.resolve(user.id).await?;

    let customer = app_state
        .customers
        .create(
            company_id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /manager/customers
#[utoipa::path(
    get,
    path = "/manager/customers",
    tag = "Manager - Customers",
    responses((status = 200, description = "Clientes da empresa", body = Vec<Customer>)),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    let customers = app_state.customers.list(company_id).await?;
    Ok((StatusCode::OK, Json(customers)))
}

// GET /manager/customers/{id}
#[utoipa::path(
    get,
    path = "/manager/customers/{id}",
    tag = "Manager - Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 400, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    let customer = app_state
        .customers
        .find_by_id(company_id, id)
        .await?
        .ok_or(AppError::NotFound(CUSTOMER_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(customer)))
}

// PUT /manager/customers/{id}
#[utoipa::path(
    put,
    path = "/manager/customers/{id}",
    tag = "Manager - Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses((status = 200, description = "Cliente atualizado", body = Customer)),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let company_id = app_state.tenants.resolve(user.id).await?;

    let customer = app_state
        .customers
        .update(
            company_id,
            id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?
        .ok_or(AppError::NotFound(CUSTOMER_NOT_FOUND))?;

    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /manager/customers/{id}
#[utoipa::path(
    delete,
    path = "/manager/customers/{id}",
    tag = "Manager - Customers",
    params(("id" = i64, Path, description = "ID do cliente")),
    responses((status = 204, description = "Cliente removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    if !app_state.customers.delete(company_id, id).await? {
        return Err(AppError::NotFound(CUSTOMER_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_opcional_mas_validado_quando_presente() {
        let payload = CreateCustomerPayload {
            name: "João".to_string(),
            email: Some("nao-e-email".to_string()),
            phone: None,
            address: None,
        };
        assert!(payload.validate().is_err());

        let payload = CreateCustomerPayload {
            name: "João".to_string(),
            email: None,
            phone: None,
            address: None,
        };
        assert!(payload.validate().is_ok());
    }
}

// src/handlers/product.rs

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
    models::catalog::Product,
};

const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    #[schema(example = "Película de vidro temperado")]
    pub description: String,
    #[schema(example = "29.90")]
    pub price: Decimal,
    pub stock: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

// POST /manager/products
#[utoipa::path(
    post,
    path = "/manager/products",
    tag = "Manager - Products",
    request_body = CreateProductPayload,
    responses((status = 201, description = "Produto criado", body = Product)),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let company_id = app_state.tenants.resolve(user.id).await?;

    let product = app_state
        .catalog
        .create_product(
            company_id,
            &payload.description,
            payload.price,
            payload.stock.unwrap_or(0),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /manager/products
#[utoipa::path(
    get,
    path = "/manager/products",
    tag = "Manager - Products",
    responses((status = 200, description = "Produtos da empresa", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    let products = app_state.catalog.list_products(company_id).await?;
    Ok((StatusCode::OK, Json(products)))
}

// GET /manager/products/{id}
#[utoipa::path(
    get,
    path = "/manager/products/{id}",
    tag = "Manager - Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 400, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    let product = app_state
        .catalog
        .find_product(company_id, id)
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(product)))
}

// PUT /manager/products/{id}
#[utoipa::path(
    put,
    path = "/manager/products/{id}",
    tag = "Manager - Products",
    params(("id" = i64, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses((status = 200, description = "Produto atualizado", body = Product)),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    let company_id = app_state.tenants.resolve(user.id).await?;

    let product = app_state
        .catalog
        .update_product(
            company_id,
            id,
            payload.description.as_deref(),
            payload.price,
            payload.stock,
        )
        .await?
        .ok_or(AppError::NotFound(PRODUCT_NOT_FOUND))?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /manager/products/{id}
#[utoipa::path(
    delete,
    path = "/manager/products/{id}",
    tag = "Manager - Products",
    params(("id" = i64, Path, description = "ID do produto")),
    responses((status = 204, description = "Produto removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let company_id = app_state.tenants.resolve(user.id).await?;
    if !app_state.catalog.delete_product(company_id, id).await? {
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/service_order.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::service_order::{
        CreateServiceOrderPayload, ServiceOrder, ServiceOrderDetail, UpdateServiceOrderPayload,
    },
};

// =============================================================================
//  ROTAS DO GESTOR (escopo de empresa)
// =============================================================================

// POST /manager/service-orders
#[utoipa::path(
    post,
    path = "/manager/service-orders",
    tag = "Manager - Service Orders",
    request_body = CreateServiceOrderPayload,
    responses(
        (status = 201, description = "Ordem criada com seus itens", body = ServiceOrderDetail),
        (status = 400, description = "Cliente ou item de catálogo não encontrado para esta empresa")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateServiceOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detail = app_state.service_orders.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

// GET /manager/service-orders
#[utoipa::path(
    get,
    path = "/manager/service-orders",
    tag = "Manager - Service Orders",
    responses(
        // Sem itens: eles só vêm na consulta individual.
        (status = 200, description = "Ordens da empresa", body = Vec<ServiceOrder>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_service_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.service_orders.list(user.id).await?;
    Ok((StatusCode::OK, Json(orders)))
}

// GET /manager/service-orders/{id}
#[utoipa::path(
    get,
    path = "/manager/service-orders/{id}",
    tag = "Manager - Service Orders",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, description = "Ordem com seus itens", body = ServiceOrderDetail),
        (status = 400, description = "Ordem de serviço não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_service_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.service_orders.get(user.id, id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// PUT /manager/service-orders/{id}
#[utoipa::path(
    put,
    path = "/manager/service-orders/{id}",
    tag = "Manager - Service Orders",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    request_body = UpdateServiceOrderPayload,
    responses(
        (status = 200, description = "Ordem atualizada com seus itens", body = ServiceOrderDetail),
        (status = 400, description = "Ordem de serviço não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateServiceOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detail = app_state.service_orders.update(user.id, id, payload).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// DELETE /manager/service-orders/{id}
#[utoipa::path(
    delete,
    path = "/manager/service-orders/{id}",
    tag = "Manager - Service Orders",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 204, description = "Ordem e itens removidos"),
        (status = 400, description = "Ordem de serviço não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.service_orders.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ROTAS ADMINISTRATIVAS (todas as empresas)
// =============================================================================

// GET /admin/service-orders
#[utoipa::path(
    get,
    path = "/admin/service-orders",
    tag = "Admin - Service Orders",
    responses((status = 200, description = "Ordens de todas as empresas", body = Vec<ServiceOrder>)),
    security(("api_jwt" = []))
)]
pub async fn admin_list_service_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.service_orders.admin_list().await?;
    Ok((StatusCode::OK, Json(orders)))
}

// GET /admin/service-orders/{id}
#[utoipa::path(
    get,
    path = "/admin/service-orders/{id}",
    tag = "Admin - Service Orders",
    params(("id" = i64, Path, description = "ID da ordem de serviço")),
    responses(
        (status = 200, description = "Ordem de serviço", body = ServiceOrder),
        (status = 400, description = "Ordem de serviço não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn admin_get_service_order(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.service_orders.admin_get(id).await?;
    Ok((StatusCode::OK, Json(order)))
}

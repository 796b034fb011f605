// src/handlers/reports.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::reports::CompanyStatistics,
};

// GET /manager/statistics
#[utoipa::path(
    get,
    path = "/manager/statistics",
    tag = "Manager - Statistics",
    responses((status = 200, description = "Indicadores da empresa", body = CompanyStatistics)),
    security(("api_jwt" = []))
)]
pub async fn get_statistics(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let statistics = app_state.service_orders.statistics(user.id).await?;
    Ok((StatusCode::OK, Json(statistics)))
}

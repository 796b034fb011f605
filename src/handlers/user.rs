// src/handlers/user.rs

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
    models::auth::{User, UserRole},
    services::email_queue::EmailJob,
    services::mail_templates,
};

const USER_NOT_FOUND: &str = "Usuário não encontrado";

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub role: UserRole,
    pub company_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub company_id: Option<i64>,
}

// POST /admin/users
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "Admin - Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    if app_state.users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::EmailAlreadyExists);
    }

    let hashed_password = app_state.auth_service.hash_password(&payload.password).await?;

    let user = app_state
        .users
        .create(
            &payload.name,
            &payload.email,
            Some(&hashed_password),
            payload.role,
            payload.company_id,
        )
        .await?;

    // Boas-vindas com a senha inicial; a entrega fica por conta do worker.
    let job = EmailJob::new(
        user.email.clone(),
        mail_templates::WELCOME_SUBJECT.to_string(),
        mail_templates::welcome_user(&user.name, &payload.password),
    );
    if let Err(e) = app_state.email_queue.enqueue(&job).await {
        tracing::warn!("Falha ao enfileirar e-mail de boas-vindas: {}", e);
    }

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /admin/users
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin - Users",
    responses((status = 200, description = "Lista de usuários", body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.users.list().await?;
    Ok((StatusCode::OK, Json(users)))
}

// GET /admin/users/{id}
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "Admin - Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "Usuário", body = User),
        (status = 400, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .users
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(user)))
}

// PUT /admin/users/{id}
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "Admin - Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses((status = 200, description = "Usuário atualizado", body = User)),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .users
        .update(
            id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.role,
            payload.company_id,
        )
        .await?
        .ok_or(AppError::NotFound(USER_NOT_FOUND))?;

    Ok((StatusCode::OK, Json(user)))
}

// DELETE /admin/users/{id}
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "Admin - Users",
    params(("id" = i64, Path, description = "ID do usuário")),
    responses((status = 204, description = "Usuário removido")),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !app_state.users.delete(id).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

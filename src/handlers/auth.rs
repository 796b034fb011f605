// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{AuthResponse, CreateAccountPayload, LoginPayload, ResetPasswordPayload},
    services::email_queue::EmailJob,
    services::mail_templates,
};

// POST /auth/users
#[utoipa::path(
    post,
    path = "/auth/users",
    tag = "Auth",
    request_body = CreateAccountPayload,
    responses(
        (status = 201, description = "Conta criada", body = crate::models::auth::User),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado")
    )
)]
pub async fn create_account(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let user = app_state
        .auth_service
        .register_account(&payload.name, &payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// POST /auth/sessions/password
#[utoipa::path(
    post,
    path = "/auth/sessions/password",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Autenticado", body = AuthResponse),
        (status = 400, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (token, user) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token, user }))
}

// POST /auth/password/reset
#[utoipa::path(
    post,
    path = "/auth/password/reset",
    tag = "Auth",
    request_body = ResetPasswordPayload,
    responses(
        // Mesma resposta com ou sem conta: nada de enumeração de e-mails.
        (status = 204, description = "Se a conta existir, a nova senha foi enviada por e-mail")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    if let Some((user, new_password)) = app_state.auth_service.reset_password(&payload.email).await? {
        let job = EmailJob::new(
            user.email.clone(),
            mail_templates::RESET_PASSWORD_SUBJECT.to_string(),
            mail_templates::reset_password(&user.name, &new_password),
        );
        // Fire-and-forget: falha na fila não derruba a resposta.
        if let Err(e) = app_state.email_queue.enqueue(&job).await {
            tracing::warn!("Falha ao enfileirar e-mail de redefinição: {}", e);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

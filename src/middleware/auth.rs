// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{User, UserRole},
};

// O middleware de autenticação: valida o Bearer token e carrega o usuário
// nos extensions da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    if let Some(auth_header) = auth_header {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let user = app_state.auth_service.validate_token(token).await?;

            // Insere o usuário nos "extensions" da requisição
            request.extensions_mut().insert(user);
            return Ok(next.run(request).await);
        }
    }

    Err(AppError::InvalidToken)
}

// Perfil implica grupo de rotas: general_admin -> /admin, manager -> /manager.
// Rodam sempre depois do auth_guard.

pub async fn admin_guard(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, UserRole::GeneralAdmin)?;
    Ok(next.run(request).await)
}

pub async fn manager_guard(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(&request, UserRole::Manager)?;
    Ok(next.run(request).await)
}

fn require_role(request: &Request, role: UserRole) -> Result<(), AppError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or(AppError::InvalidToken)?;
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

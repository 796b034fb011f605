use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A linha divisória: erro que o chamador consegue corrigir (4xx)
// versus falha de infraestrutura (5xx genérico).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Já existe um usuário com este e-mail")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente")]
    InvalidToken,

    #[error("Acesso negado para este perfil")]
    Forbidden,

    // Também cobre registro pertencente a outra empresa: a mensagem é a
    // mesma, para não vazar a existência entre tenants.
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Empresa do gestor não encontrada")]
    CompanyNotAssigned,

    #[error("{0}")]
    Conflict(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro no broker da fila")]
    QueueError(#[from] redis::RedisError),

    #[error("Erro no envio de e-mail")]
    MailError(#[from] lettre::transport::smtp::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmailAlreadyExists
            | AppError::InvalidCredentials
            | AppError::NotFound(_)
            | AppError::CompanyNotAssigned => {
                let body = Json(json!({ "error": self.to_string() }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Conflict(message) => {
                let body = Json(json!({ "error": message }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Acesso negado para este perfil."),

            // Todos os outros erros (banco, fila, SMTP) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu;
            // o chamador recebe só o genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl AppError {
    /// Converte violação de chave única do Postgres no erro de negócio dado.
    pub fn map_unique_violation(err: sqlx::Error, business: AppError) -> AppError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return business;
            }
        }
        err.into()
    }

    /// Converte violação de chave estrangeira em erro de negócio (ex.: apagar
    /// empresa que ainda possui registros vinculados).
    pub fn map_foreign_key_violation(err: sqlx::Error, message: &str) -> AppError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return AppError::Conflict(message.to_string());
            }
        }
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erros_de_negocio_viram_400() {
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::EmailAlreadyExists.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Ordem de serviço não encontrada")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CompanyNotAssigned.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn token_invalido_vira_401_e_perfil_errado_403() {
        assert_eq!(
            AppError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn erro_de_infraestrutura_vira_500() {
        let err = AppError::InternalServerError(anyhow::anyhow!("boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// src/services/auth_service.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User, UserRole},
};

const TOKEN_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    /// Criação de conta pública: o perfil é sempre `client`.
    pub async fn register_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let hashed_password = self.hash_password(password).await?;

        self.user_repo
            .create(name, email, Some(&hashed_password), UserRole::Client, None)
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // Conta sem senha (só login social) responde o mesmo erro genérico:
        // as três causas são indistinguíveis para quem tenta enumerar contas.
        let password_hash = user
            .password_hash
            .clone()
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        Ok((token, user))
    }

    /// Gera uma senha provisória, grava o hash e devolve o usuário e a senha
    /// em claro para o e-mail. `None` quando o e-mail não está cadastrado —
    /// o handler responde igual nos dois casos.
    pub async fn reset_password(&self, email: &str) -> Result<Option<(User, String)>, AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            return Ok(None);
        };

        let new_password = generate_password(10);
        let hashed_password = self.hash_password(&new_password).await?;
        self.user_repo.update_password(user.id, &hashed_password).await?;

        Ok(Some((user, new_password)))
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        let principal_id: i64 = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(principal_id)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub fn create_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_DAYS);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // O hashing é pesado; sai do executor async.
    pub async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }
}

const PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Senha provisória alfanumérica para o fluxo de redefinição.
pub fn generate_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..PASSWORD_CHARSET.len());
            PASSWORD_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn test_service() -> AuthService {
        // connect_lazy não abre conexão; os testes abaixo só usam o segredo.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/teste")
            .unwrap();
        AuthService::new(UserRepository::new(pool), "segredo-de-teste".to_string())
    }

    #[tokio::test]
    async fn token_carrega_o_id_como_subject_e_expira_em_sete_dias() {
        let service = test_service();
        let token = service.create_token(42).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"segredo-de-teste"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, "42");
        let lifetime = data.claims.exp - data.claims.iat;
        assert_eq!(lifetime, (TOKEN_DAYS * 24 * 60 * 60) as usize);
    }

    #[tokio::test]
    async fn token_assinado_com_outro_segredo_e_rejeitado() {
        let service = test_service();
        let token = service.create_token(1).unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"outro-segredo"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn senha_gerada_tem_tamanho_e_alfabeto_esperados() {
        let password = generate_password(10);
        assert_eq!(password.len(), 10);
        assert!(password.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
    }
}

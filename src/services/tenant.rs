// src/services/tenant.rs

use crate::{common::error::AppError, db::UserRepository};

// Único mecanismo de isolamento entre tenants: o banco não tem RLS, então
// toda operação de gestor resolve a empresa aqui e carrega o id como filtro
// obrigatório em cada consulta seguinte.
#[derive(Clone)]
pub struct TenantResolver {
    user_repo: UserRepository,
}

impl TenantResolver {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Resolve a empresa administrada pelo principal autenticado.
    /// Falha se o usuário não existe ou não tem empresa atribuída.
    pub async fn resolve(&self, principal_id: i64) -> Result<i64, AppError> {
        let user = self.user_repo.find_by_id(principal_id).await?;
        user.and_then(|u| u.company_id)
            .ok_or(AppError::CompanyNotAssigned)
    }
}

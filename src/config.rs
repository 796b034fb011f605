// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CatalogRepository, CompanyRepository, CustomerRepository, ServiceOrderRepository,
        UserRepository,
    },
    services::{AuthService, EmailQueue, Mailer, ServiceOrderService, TenantResolver},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub tenants: TenantResolver,
    pub service_orders: ServiceOrderService,
    pub email_queue: EmailQueue,
    pub companies: CompanyRepository,
    pub users: UserRepository,
    pub customers: CustomerRepository,
    pub catalog: CatalogRepository,
}

impl AppState {
    // Carrega as configurações e monta o estado. Retorna também o Mailer,
    // que vai para o worker da fila e não para os handlers.
    pub async fn new() -> anyhow::Result<(Self, Mailer)> {
        dotenvy::dotenv().ok();

        // Toda configuração é obrigatória: faltar qualquer uma derruba o boot.
        let database_url = required_var("DATABASE_URL")?;
        let jwt_secret = required_var("JWT_SECRET")?;
        let smtp_host = required_var("SMTP_HOST")?;
        let smtp_port: u16 = required_var("SMTP_PORT")?
            .parse()
            .map_err(|_| anyhow::anyhow!("SMTP_PORT deve ser um número de porta"))?;
        let smtp_user = required_var("SMTP_USER")?;
        let smtp_pass = required_var("SMTP_PASS")?;
        let from_email = required_var("FROM_EMAIL")?;
        let redis_host = required_var("REDIS_HOST")?;
        let redis_port: u16 = required_var("REDIS_PORT")?
            .parse()
            .map_err(|_| anyhow::anyhow!("REDIS_PORT deve ser um número de porta"))?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let mailer = Mailer::new(&smtp_host, smtp_port, &smtp_user, &smtp_pass, &from_email)?;
        let email_queue = EmailQueue::connect(&redis_host, redis_port).await?;

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let service_order_repo = ServiceOrderRepository::new(db_pool.clone());

        let tenants = TenantResolver::new(user_repo.clone());
        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let service_orders = ServiceOrderService::new(
            db_pool.clone(),
            service_order_repo,
            customer_repo.clone(),
            catalog_repo.clone(),
            tenants.clone(),
        );

        let state = Self {
            db_pool,
            auth_service,
            tenants,
            service_orders,
            email_queue,
            companies: company_repo,
            users: user_repo,
            customers: customer_repo,
            catalog: catalog_repo,
        };

        Ok((state, mailer))
    }
}

fn required_var(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("Variável de ambiente obrigatória ausente: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variavel_ausente_e_erro_fatal_de_boot() {
        let err = required_var("SAP_BACKEND_VAR_QUE_NAO_EXISTE").unwrap_err();
        assert!(err.to_string().contains("SAP_BACKEND_VAR_QUE_NAO_EXISTE"));
    }
}

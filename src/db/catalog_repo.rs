// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::catalog::{CatalogRef, Product, Service},
};

// Catálogo da empresa: produtos e serviços, sempre com escopo de tenant.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  PRODUTOS
    // =========================================================================

    pub async fn create_product(
        &self,
        company_id: i64,
        description: &str,
        price: Decimal,
        stock: i32,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (company_id, description, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(description)
        .bind(price)
        .bind(stock)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn list_products(&self, company_id: i64) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE company_id = $1 ORDER BY id")
                .bind(company_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    pub async fn find_product(&self, company_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1 AND company_id = $2")
                .bind(id)
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        company_id: i64,
        id: i64,
        description: Option<&str>,
        price: Option<Decimal>,
        stock: Option<i32>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock = COALESCE($5, stock)
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(description)
        .bind(price)
        .bind(stock)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete_product(&self, company_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  SERVIÇOS
    // =========================================================================

    pub async fn create_service(
        &self,
        company_id: i64,
        description: &str,
        price: Decimal,
    ) -> Result<Service, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (company_id, description, price)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(description)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;
        Ok(service)
    }

    pub async fn list_services(&self, company_id: i64) -> Result<Vec<Service>, AppError> {
        let services =
            sqlx::query_as::<_, Service>("SELECT * FROM services WHERE company_id = $1 ORDER BY id")
                .bind(company_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(services)
    }

    pub async fn find_service(&self, company_id: i64, id: i64) -> Result<Option<Service>, AppError> {
        let service =
            sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1 AND company_id = $2")
                .bind(id)
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(service)
    }

    pub async fn update_service(
        &self,
        company_id: i64,
        id: i64,
        description: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Option<Service>, AppError> {
        let service = sqlx::query_as::<_, Service>(
            r#"
            UPDATE services SET
                description = COALESCE($3, description),
                price = COALESCE($4, price)
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(description)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?;
        Ok(service)
    }

    pub async fn delete_service(&self, company_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  RESOLUÇÃO DE REFERÊNCIAS
    // =========================================================================

    /// Resolve uma referência de catálogo contra a tabela certa, dentro do
    /// tenant. Usada pelo agregado de ordens antes de aceitar um item.
    pub async fn resolve_ref<'e, E>(
        &self,
        executor: E,
        company_id: i64,
        catalog_ref: CatalogRef,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = match catalog_ref {
            CatalogRef::Service(_) => {
                "SELECT EXISTS(SELECT 1 FROM services WHERE id = $1 AND company_id = $2)"
            }
            CatalogRef::Product(_) => {
                "SELECT EXISTS(SELECT 1 FROM products WHERE id = $1 AND company_id = $2)"
            }
        };
        let exists = sqlx::query_scalar::<_, bool>(query)
            .bind(catalog_ref.item_id())
            .bind(company_id)
            .fetch_one(executor)
            .await?;
        Ok(exists)
    }
}

// src/db/company_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::company::Company};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        tax_id: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Company, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, tax_id, address, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(tax_id)
        .bind(address)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    pub async fn list(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        tax_id: Option<&str>,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Company>, AppError> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                tax_id = COALESCE($3, tax_id),
                address = COALESCE($4, address),
                phone = COALESCE($5, phone)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(tax_id)
        .bind(address)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    // As FKs são RESTRICT: apagar empresa com registros vinculados é
    // rejeitado, nunca cascateado em silêncio.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::map_foreign_key_violation(
                    e,
                    "A empresa ainda possui usuários, clientes ou ordens vinculadas.",
                )
            })?;
        Ok(result.rows_affected() > 0)
    }
}

// src/db/service_order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::catalog::ItemType,
    models::service_order::{
        CreateServiceOrderPayload, OrderStatus, ServiceOrder, ServiceOrderItem,
        UpdateServiceOrderPayload,
    },
};

// Repositório do agregado ordem de serviço + itens. Os métodos recebem um
// executor genérico para rodar tanto no pool quanto dentro de uma transação
// aberta pelo service.
#[derive(Clone)]
pub struct ServiceOrderRepository {
    pool: PgPool,
}

impl ServiceOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  ORDENS
    // =========================================================================

    pub async fn insert_order<'e, E>(
        &self,
        executor: E,
        company_id: i64,
        responsible_user_id: i64,
        payload: &CreateServiceOrderPayload,
    ) -> Result<ServiceOrder, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Status nasce sempre `open`; opened_at é o NOW() do banco.
        let order = sqlx::query_as::<_, ServiceOrder>(
            r#"
            INSERT INTO service_orders (
                company_id, customer_id, responsible_user_id,
                device_brand, device_model, device_color, device_imei,
                device_password, device_condition, device_accessories,
                has_warranty, has_invoice,
                estimated_budget_date, estimated_pickup_date,
                notes, responsibility_term, client_signature, technician_signature,
                status
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, 'open'
            )
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(payload.customer_id)
        .bind(responsible_user_id)
        .bind(&payload.device_brand)
        .bind(&payload.device_model)
        .bind(&payload.device_color)
        .bind(&payload.device_imei)
        .bind(&payload.device_password)
        .bind(&payload.device_condition)
        .bind(&payload.device_accessories)
        .bind(payload.has_warranty.unwrap_or(false))
        .bind(payload.has_invoice.unwrap_or(false))
        .bind(payload.estimated_budget_date)
        .bind(payload.estimated_pickup_date)
        .bind(&payload.notes)
        .bind(&payload.responsibility_term)
        .bind(&payload.client_signature)
        .bind(&payload.technician_signature)
        .fetch_one(executor)
        .await?;

        Ok(order)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        company_id: i64,
        id: i64,
    ) -> Result<Option<ServiceOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(
            "SELECT * FROM service_orders WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    pub async fn list(&self, company_id: i64) -> Result<Vec<ServiceOrder>, AppError> {
        let orders = sqlx::query_as::<_, ServiceOrder>(
            "SELECT * FROM service_orders WHERE company_id = $1 ORDER BY id",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    // Visão administrativa: sem escopo de tenant, de propósito e só aqui.
    pub async fn list_all_companies(&self) -> Result<Vec<ServiceOrder>, AppError> {
        let orders = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    pub async fn find_any_company(&self, id: i64) -> Result<Option<ServiceOrder>, AppError> {
        let order = sqlx::query_as::<_, ServiceOrder>("SELECT * FROM service_orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(order)
    }

    pub async fn update_order<'e, E>(
        &self,
        executor: E,
        company_id: i64,
        id: i64,
        payload: &UpdateServiceOrderPayload,
        closed_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Option<ServiceOrder>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, ServiceOrder>(
            r#"
            UPDATE service_orders SET
                device_brand = COALESCE($3, device_brand),
                device_model = COALESCE($4, device_model),
                device_color = COALESCE($5, device_color),
                device_imei = COALESCE($6, device_imei),
                device_password = COALESCE($7, device_password),
                device_condition = COALESCE($8, device_condition),
                device_accessories = COALESCE($9, device_accessories),
                has_warranty = COALESCE($10, has_warranty),
                has_invoice = COALESCE($11, has_invoice),
                estimated_budget_date = COALESCE($12, estimated_budget_date),
                estimated_pickup_date = COALESCE($13, estimated_pickup_date),
                notes = COALESCE($14, notes),
                responsibility_term = COALESCE($15, responsibility_term),
                client_signature = COALESCE($16, client_signature),
                technician_signature = COALESCE($17, technician_signature),
                status = COALESCE($18, status),
                closed_at = COALESCE($19, closed_at)
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(company_id)
        .bind(&payload.device_brand)
        .bind(&payload.device_model)
        .bind(&payload.device_color)
        .bind(&payload.device_imei)
        .bind(&payload.device_password)
        .bind(&payload.device_condition)
        .bind(&payload.device_accessories)
        .bind(payload.has_warranty)
        .bind(payload.has_invoice)
        .bind(payload.estimated_budget_date)
        .bind(payload.estimated_pickup_date)
        .bind(&payload.notes)
        .bind(&payload.responsibility_term)
        .bind(&payload.client_signature)
        .bind(&payload.technician_signature)
        .bind(payload.status)
        .bind(closed_at)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn delete_order<'e, E>(
        &self,
        executor: E,
        company_id: i64,
        id: i64,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM service_orders WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    //  ITENS
    // =========================================================================

    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        service_order_id: i64,
        item_type: ItemType,
        item_id: i64,
        quantity: Decimal,
        unit_price: Decimal,
        total: Decimal,
    ) -> Result<ServiceOrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, ServiceOrderItem>(
            r#"
            INSERT INTO service_order_items (
                service_order_id, item_type, item_id, quantity, unit_price, total
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(service_order_id)
        .bind(item_type)
        .bind(item_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    // O filtro por service_order_id impede mutação de item de outra ordem.
    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        service_order_id: i64,
        item_row_id: i64,
        quantity: Decimal,
        unit_price: Decimal,
        total: Decimal,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE service_order_items
            SET quantity = $3, unit_price = $4, total = $5
            WHERE id = $2 AND service_order_id = $1
            "#,
        )
        .bind(service_order_id)
        .bind(item_row_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        service_order_id: i64,
    ) -> Result<Vec<ServiceOrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, ServiceOrderItem>(
            "SELECT * FROM service_order_items WHERE service_order_id = $1 ORDER BY id",
        )
        .bind(service_order_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn delete_items<'e, E>(
        &self,
        executor: E,
        service_order_id: i64,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM service_order_items WHERE service_order_id = $1")
            .bind(service_order_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // =========================================================================
    //  AGREGADOS PARA RELATÓRIOS
    // =========================================================================

    pub async fn count_by_status(&self, company_id: i64) -> Result<Vec<(OrderStatus, i64)>, AppError> {
        let rows = sqlx::query_as::<_, (OrderStatus, i64)>(
            "SELECT status, COUNT(*) FROM service_orders WHERE company_id = $1 GROUP BY status",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn completed_revenue(&self, company_id: i64) -> Result<Decimal, AppError> {
        let revenue = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(i.total), 0)
            FROM service_order_items i
            JOIN service_orders o ON o.id = i.service_order_id
            WHERE o.company_id = $1 AND o.status = 'completed'
            "#,
        )
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(revenue)
    }
}

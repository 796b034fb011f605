// src/services/service_order_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CustomerRepository, ServiceOrderRepository},
    models::reports::{CompanyStatistics, OrdersByStatus},
    models::service_order::{
        CreateServiceOrderPayload, OrderStatus, ServiceOrder, ServiceOrderDetail,
        UpdateServiceOrderPayload,
    },
    services::tenant::TenantResolver,
};

const ORDER_NOT_FOUND: &str = "Ordem de serviço não encontrada";
const CUSTOMER_NOT_FOUND: &str = "Cliente não encontrado para esta empresa";
const CATALOG_ITEM_NOT_FOUND: &str = "Item de catálogo não encontrado para esta empresa";
const ORDER_ITEM_NOT_FOUND: &str = "Item da ordem de serviço não encontrado";

// O agregado: ordem + itens, mutados numa única transação, sempre dentro
// da empresa resolvida para o principal. Sair com `?` antes do commit
// derruba a transação inteira no drop.
#[derive(Clone)]
pub struct ServiceOrderService {
    pool: PgPool,
    repo: ServiceOrderRepository,
    customer_repo: CustomerRepository,
    catalog_repo: CatalogRepository,
    tenants: TenantResolver,
}

impl ServiceOrderService {
    pub fn new(
        pool: PgPool,
        repo: ServiceOrderRepository,
        customer_repo: CustomerRepository,
        catalog_repo: CatalogRepository,
        tenants: TenantResolver,
    ) -> Self {
        Self {
            pool,
            repo,
            customer_repo,
            catalog_repo,
            tenants,
        }
    }

    pub async fn create(
        &self,
        principal_id: i64,
        payload: CreateServiceOrderPayload,
    ) -> Result<ServiceOrderDetail, AppError> {
        let company_id = self.tenants.resolve(principal_id).await?;

        let mut tx = self.pool.begin().await?;

        // O cliente precisa ser do mesmo tenant que a ordem.
        if !self
            .customer_repo
            .exists(&mut *tx, company_id, payload.customer_id)
            .await?
        {
            return Err(AppError::NotFound(CUSTOMER_NOT_FOUND));
        }

        let order = self
            .repo
            .insert_order(&mut *tx, company_id, principal_id, &payload)
            .await?;

        if let Some(items) = &payload.service_order_items {
            for item in items {
                if !self
                    .catalog_repo
                    .resolve_ref(&mut *tx, company_id, item.catalog_ref())
                    .await?
                {
                    return Err(AppError::NotFound(CATALOG_ITEM_NOT_FOUND));
                }
                // O total nunca vem do chamador.
                let total = line_total(item.quantity, item.unit_price);
                self.repo
                    .insert_item(
                        &mut *tx,
                        order.id,
                        item.item_type,
                        item.item_id,
                        item.quantity,
                        item.unit_price,
                        total,
                    )
                    .await?;
            }
        }

        let items = self.repo.list_items(&mut *tx, order.id).await?;
        tx.commit().await?;

        Ok(ServiceOrderDetail {
            order,
            service_order_items: items,
        })
    }

    // Ausência e posse por outra empresa respondem o mesmo erro.
    pub async fn get(&self, principal_id: i64, id: i64) -> Result<ServiceOrderDetail, AppError> {
        let company_id = self.tenants.resolve(principal_id).await?;

        let order = self
            .repo
            .find_by_id(&self.pool, company_id, id)
            .await?
            .ok_or(AppError::NotFound(ORDER_NOT_FOUND))?;
        let items = self.repo.list_items(&self.pool, id).await?;

        Ok(ServiceOrderDetail {
            order,
            service_order_items: items,
        })
    }

    // A listagem não carrega itens; eles só vêm na consulta individual.
    pub async fn list(&self, principal_id: i64) -> Result<Vec<ServiceOrder>, AppError> {
        let company_id = self.tenants.resolve(principal_id).await?;
        self.repo.list(company_id).await
    }

    pub async fn update(
        &self,
        principal_id: i64,
        id: i64,
        payload: UpdateServiceOrderPayload,
    ) -> Result<ServiceOrderDetail, AppError> {
        let company_id = self.tenants.resolve(principal_id).await?;

        let mut tx = self.pool.begin().await?;

        // Verifica a posse antes de qualquer mutação.
        let existing = self
            .repo
            .find_by_id(&mut *tx, company_id, id)
            .await?
            .ok_or(AppError::NotFound(ORDER_NOT_FOUND))?;

        // Concluir ou cancelar fecha a ordem, se ainda estiver aberta.
        let closed_at = match payload.status {
            Some(OrderStatus::Completed | OrderStatus::Cancelled)
                if existing.closed_at.is_none() =>
            {
                Some(Utc::now())
            }
            _ => None,
        };

        let order = self
            .repo
            .update_order(&mut *tx, company_id, id, &payload, closed_at)
            .await?
            .ok_or(AppError::NotFound(ORDER_NOT_FOUND))?;

        // Item com id atualiza; sem id insere. Itens fora do patch ficam
        // intocados: a omissão não apaga nada.
        if let Some(items) = &payload.service_order_items {
            for item in items {
                let total = line_total(item.quantity, item.unit_price);
                match item.id {
                    Some(item_row_id) => {
                        let updated = self
                            .repo
                            .update_item(
                                &mut *tx,
                                id,
                                item_row_id,
                                item.quantity,
                                item.unit_price,
                                total,
                            )
                            .await?;
                        if !updated {
                            return Err(AppError::NotFound(ORDER_ITEM_NOT_FOUND));
                        }
                    }
                    None => {
                        if !self
                            .catalog_repo
                            .resolve_ref(&mut *tx, company_id, item.catalog_ref())
                            .await?
                        {
                            return Err(AppError::NotFound(CATALOG_ITEM_NOT_FOUND));
                        }
                        self.repo
                            .insert_item(
                                &mut *tx,
                                id,
                                item.item_type,
                                item.item_id,
                                item.quantity,
                                item.unit_price,
                                total,
                            )
                            .await?;
                    }
                }
            }
        }

        let items = self.repo.list_items(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(ServiceOrderDetail {
            order,
            service_order_items: items,
        })
    }

    pub async fn delete(&self, principal_id: i64, id: i64) -> Result<(), AppError> {
        let company_id = self.tenants.resolve(principal_id).await?;

        let mut tx = self.pool.begin().await?;

        if self
            .repo
            .find_by_id(&mut *tx, company_id, id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(ORDER_NOT_FOUND));
        }

        // Cascata explícita: o banco não apaga os itens sozinho.
        self.repo.delete_items(&mut *tx, id).await?;
        if !self.repo.delete_order(&mut *tx, company_id, id).await? {
            return Err(AppError::NotFound(ORDER_NOT_FOUND));
        }

        tx.commit().await?;
        Ok(())
    }

    // --- Visão administrativa (sem escopo de tenant, de propósito) ---

    pub async fn admin_list(&self) -> Result<Vec<ServiceOrder>, AppError> {
        self.repo.list_all_companies().await
    }

    pub async fn admin_get(&self, id: i64) -> Result<ServiceOrder, AppError> {
        self.repo
            .find_any_company(id)
            .await?
            .ok_or(AppError::NotFound(ORDER_NOT_FOUND))
    }

    // --- Relatórios ---

    pub async fn statistics(&self, principal_id: i64) -> Result<CompanyStatistics, AppError> {
        let company_id = self.tenants.resolve(principal_id).await?;

        let mut by_status = OrdersByStatus::default();
        let mut total_orders = 0;
        for (status, count) in self.repo.count_by_status(company_id).await? {
            total_orders += count;
            match status {
                OrderStatus::Open => by_status.open = count,
                OrderStatus::InProgress => by_status.in_progress = count,
                OrderStatus::Completed => by_status.completed = count,
                OrderStatus::Cancelled => by_status.cancelled = count,
            }
        }

        let total_customers = self.customer_repo.count(company_id).await?;
        let total_revenue = self.repo.completed_revenue(company_id).await?;

        Ok(CompanyStatistics {
            total_orders,
            orders_by_status: by_status,
            total_customers,
            total_revenue,
        })
    }
}

fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
    unit_price * quantity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_do_item_e_preco_vezes_quantidade() {
        // 2 x 50.00 = 100.00
        let total = line_total(Decimal::from(2), Decimal::new(5000, 2));
        assert_eq!(total, Decimal::from(100));
    }

    #[test]
    fn total_mantem_precisao_decimal() {
        // 3 x 19.99 = 59.97, sem deriva de ponto flutuante
        let total = line_total(Decimal::from(3), Decimal::new(1999, 2));
        assert_eq!(total, Decimal::new(5997, 2));

        // 0.5 x 0.10 = 0.05
        let total = line_total(Decimal::new(5, 1), Decimal::new(10, 2));
        assert_eq!(total, Decimal::new(5, 2));
    }
}

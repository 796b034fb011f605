// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Os quatro status aparecem sempre, zerados quando não há ordens.
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct OrdersByStatus {
    pub open: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub cancelled: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStatistics {
    pub total_orders: i64,
    pub orders_by_status: OrdersByStatus,
    pub total_customers: i64,
    // Soma dos totais dos itens das ordens concluídas.
    #[schema(example = "1250.00")]
    pub total_revenue: Decimal,
}

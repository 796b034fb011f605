// src/models/service_order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::catalog::{CatalogRef, ItemType};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "service_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

// --- Structs de Operação ---

// O agregado: uma ordem de serviço e seus itens, sempre mutados juntos
// numa única transação.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: i64,
    pub company_id: i64,
    pub customer_id: i64,
    pub responsible_user_id: i64,
    #[schema(example = "Apple")]
    pub device_brand: String,
    #[schema(example = "iPhone 12")]
    pub device_model: String,
    pub device_color: Option<String>,
    pub device_imei: Option<String>,
    pub device_password: Option<String>,
    pub device_condition: Option<String>,
    pub device_accessories: Option<String>,
    pub has_warranty: bool,
    pub has_invoice: bool,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub estimated_budget_date: Option<DateTime<Utc>>,
    pub estimated_pickup_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub responsibility_term: Option<String>,
    pub client_signature: Option<String>,
    pub technician_signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderItem {
    pub id: i64,
    #[schema(ignore)]
    pub service_order_id: i64,
    pub item_type: ItemType,
    pub item_id: i64,
    #[schema(example = "2.0")]
    pub quantity: Decimal,
    #[schema(example = "50.00")]
    pub unit_price: Decimal,
    // Derivado (unit_price * quantity), recalculado a cada escrita.
    #[schema(example = "100.00")]
    pub total: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderDetail {
    #[serde(flatten)]
    pub order: ServiceOrder,
    pub service_order_items: Vec<ServiceOrderItem>,
}

// --- Payloads ---

// Um item na criação da ordem. O `total` nunca vem do chamador.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub item_type: ItemType,
    pub item_id: i64,
    #[schema(example = "2.0")]
    pub quantity: Decimal,
    #[schema(example = "50.00")]
    pub unit_price: Decimal,
}

impl OrderItemInput {
    pub fn catalog_ref(&self) -> CatalogRef {
        CatalogRef::new(self.item_type, self.item_id)
    }
}

// Um item no patch de atualização: com `id` atualiza o item existente,
// sem `id` insere um novo. Itens ausentes do patch ficam como estão.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPatch {
    pub id: Option<i64>,
    pub item_type: ItemType,
    pub item_id: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl OrderItemPatch {
    pub fn catalog_ref(&self) -> CatalogRef {
        CatalogRef::new(self.item_type, self.item_id)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceOrderPayload {
    pub customer_id: i64,
    #[validate(length(min = 1, message = "A marca do aparelho é obrigatória."))]
    #[schema(example = "Apple")]
    pub device_brand: String,
    #[validate(length(min = 1, message = "O modelo do aparelho é obrigatório."))]
    #[schema(example = "iPhone 12")]
    pub device_model: String,
    pub device_color: Option<String>,
    pub device_imei: Option<String>,
    pub device_password: Option<String>,
    pub device_condition: Option<String>,
    pub device_accessories: Option<String>,
    pub has_warranty: Option<bool>,
    pub has_invoice: Option<bool>,
    pub estimated_budget_date: Option<DateTime<Utc>>,
    pub estimated_pickup_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub responsibility_term: Option<String>,
    pub client_signature: Option<String>,
    pub technician_signature: Option<String>,
    pub service_order_items: Option<Vec<OrderItemInput>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceOrderPayload {
    pub device_brand: Option<String>,
    pub device_model: Option<String>,
    pub device_color: Option<String>,
    pub device_imei: Option<String>,
    pub device_password: Option<String>,
    pub device_condition: Option<String>,
    pub device_accessories: Option<String>,
    pub has_warranty: Option<bool>,
    pub has_invoice: Option<bool>,
    pub estimated_budget_date: Option<DateTime<Utc>>,
    pub estimated_pickup_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub responsibility_term: Option<String>,
    pub client_signature: Option<String>,
    pub technician_signature: Option<String>,
    pub status: Option<OrderStatus>,
    pub service_order_items: Option<Vec<OrderItemPatch>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_de_ordem_desserializa_o_par_de_catalogo() {
        let input: OrderItemInput = serde_json::from_value(serde_json::json!({
            "itemType": "service",
            "itemId": 1,
            "quantity": 2,
            "unitPrice": 50
        }))
        .unwrap();
        assert_eq!(input.catalog_ref(), CatalogRef::Service(1));
        assert_eq!(input.quantity, Decimal::from(2));
        assert_eq!(input.unit_price, Decimal::from(50));
    }

    #[test]
    fn status_serializa_em_snake_case() {
        assert_eq!(
            serde_json::to_value(OrderStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
        let status: OrderStatus = serde_json::from_value(serde_json::json!("cancelled")).unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }
}

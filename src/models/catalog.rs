// src/models/catalog.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Service,
    Product,
}

/// Referência de catálogo de um item de ordem de serviço.
///
/// No fio e no banco o par é (item_type, item_id); aqui ele vira uma união
/// etiquetada, resolvida sempre contra a tabela certa e dentro do tenant —
/// não existe caminho que consulte a tabela errada para o tipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogRef {
    Service(i64),
    Product(i64),
}

impl CatalogRef {
    pub fn new(item_type: ItemType, item_id: i64) -> Self {
        match item_type {
            ItemType::Service => CatalogRef::Service(item_id),
            ItemType::Product => CatalogRef::Product(item_id),
        }
    }

    pub fn item_id(&self) -> i64 {
        match self {
            CatalogRef::Service(id) | CatalogRef::Product(id) => *id,
        }
    }
}

// --- Itens de catálogo ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    #[schema(ignore)]
    pub company_id: i64,
    #[schema(example = "Película de vidro temperado")]
    pub description: String,
    #[schema(example = "29.90")]
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    #[schema(ignore)]
    pub company_id: i64,
    #[schema(example = "Troca de tela")]
    pub description: String,
    #[schema(example = "150.00")]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ref_preserva_tipo_e_id() {
        assert_eq!(CatalogRef::new(ItemType::Service, 7), CatalogRef::Service(7));
        assert_eq!(CatalogRef::new(ItemType::Product, 3), CatalogRef::Product(3));
        assert_eq!(CatalogRef::new(ItemType::Product, 3).item_id(), 3);
    }

    #[test]
    fn item_type_serializa_em_minusculas() {
        assert_eq!(
            serde_json::to_value(ItemType::Service).unwrap(),
            serde_json::json!("service")
        );
        let back: ItemType = serde_json::from_value(serde_json::json!("product")).unwrap();
        assert_eq!(back, ItemType::Product);
    }
}

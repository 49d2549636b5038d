use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub regular_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub stock_quantity: Option<i32>,
    pub sku: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub subcategories: Option<String>, // JSON array
    pub tags: Option<String>,          // JSON array
    pub tank_types: Option<String>,    // JSON array
    pub image_url: Option<String>,
    pub amazon_url: Option<String>,
    pub weight: Option<f64>,
    pub dimensions: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::affiliate_link::Entity")]
    AffiliateLink,
}

impl Related<super::affiliate_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AffiliateLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for API responses and import output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<i32>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub regular_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub stock_quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub tank_types: Vec<String>,
    pub image_url: Option<String>,
    pub amazon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i32>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            regular_price: None,
            sale_price: None,
            stock_quantity: None,
            sku: None,
            brand: None,
            category: None,
            subcategories: Vec::new(),
            tags: Vec::new(),
            tank_types: Vec::new(),
            image_url: None,
            amazon_url: None,
            weight: None,
            dimensions: None,
            rating: None,
            review_count: None,
            is_featured: false,
            is_active: true,
        }
    }
}

fn decode_list(raw: Option<String>) -> Vec<String> {
    raw.map(|s| serde_json::from_str(&s).unwrap_or_default())
        .unwrap_or_default()
}

fn encode_list(list: &[String]) -> Option<String> {
    if list.is_empty() {
        None
    } else {
        Some(serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string()))
    }
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            description: model.description,
            regular_price: model.regular_price,
            sale_price: model.sale_price,
            stock_quantity: model.stock_quantity,
            sku: model.sku,
            brand: model.brand,
            category: model.category,
            subcategories: decode_list(model.subcategories),
            tags: decode_list(model.tags),
            tank_types: decode_list(model.tank_types),
            image_url: model.image_url,
            amazon_url: model.amazon_url,
            weight: model.weight,
            dimensions: model.dimensions,
            rating: model.rating,
            review_count: model.review_count,
            is_featured: model.is_featured,
            is_active: model.is_active,
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map_or(NotSet, Set),
            subcategories: Set(encode_list(&product.subcategories)),
            tags: Set(encode_list(&product.tags)),
            tank_types: Set(encode_list(&product.tank_types)),
            name: Set(product.name),
            description: Set(product.description),
            regular_price: Set(product.regular_price),
            sale_price: Set(product.sale_price),
            stock_quantity: Set(product.stock_quantity),
            sku: Set(product.sku),
            brand: Set(product.brand),
            category: Set(product.category),
            image_url: Set(product.image_url),
            amazon_url: Set(product.amazon_url),
            weight: Set(product.weight),
            dimensions: Set(product.dimensions),
            rating: Set(product.rating),
            review_count: Set(product.review_count),
            is_featured: Set(product.is_featured),
            is_active: Set(product.is_active),
            created_at: NotSet,
            updated_at: NotSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_columns_round_trip_through_json_text() {
        let product = Product {
            name: "Canister Filter".to_string(),
            tags: vec!["filtration".to_string(), "freshwater".to_string()],
            ..Default::default()
        };

        let active: ActiveModel = product.into();
        let tags = active.tags.clone().unwrap();
        assert_eq!(tags.as_deref(), Some(r#"["filtration","freshwater"]"#));
        assert_eq!(active.subcategories.clone().unwrap(), None);
    }

    #[test]
    fn test_missing_is_active_defaults_to_visible() {
        let product: Product = serde_json::from_str(r#"{"name":"Heater"}"#).unwrap();
        assert!(product.is_active);
        assert!(!product.is_featured);
        assert!(product.tags.is_empty());
    }
}

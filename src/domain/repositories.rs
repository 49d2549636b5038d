//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::product::Product;

/// Filter criteria for product queries
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub query: Option<String>,
    pub is_active: Option<bool>,
}

/// Visibility flags applied by bulk updates. `None` leaves the flag unchanged.
#[derive(Debug, Default, Clone, Copy, serde::Deserialize)]
pub struct VisibilityUpdate {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Affiliate link data for API responses
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AffiliateLink {
    pub id: i32,
    pub product_id: i32,
    pub retailer: String,
    pub url: String,
    pub asin: Option<String>,
    pub created_at: String,
}

/// Input for creating an affiliate link
#[derive(Debug, Clone)]
pub struct CreateAffiliateLinkInput {
    pub product_id: i32,
    pub retailer: String,
    pub url: String,
    pub asin: Option<String>,
}

/// Repository trait for Product entity
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find all products matching the filter criteria
    async fn find_all(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError>;

    /// Find a single product by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;

    /// Create a new product
    async fn create(&self, product: Product) -> Result<Product, DomainError>;

    /// Apply visibility flags to one product
    async fn update_visibility(
        &self,
        id: i32,
        update: VisibilityUpdate,
    ) -> Result<Product, DomainError>;

    /// Delete a product by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}

/// Repository trait for AffiliateLink entity
#[async_trait]
pub trait AffiliateLinkRepository: Send + Sync {
    /// Create the affiliate link of a product (at most one per product)
    async fn create(&self, input: CreateAffiliateLinkInput) -> Result<AffiliateLink, DomainError>;

    /// Find the affiliate link of a product
    async fn find_by_product_id(&self, product_id: i32)
    -> Result<Option<AffiliateLink>, DomainError>;
}

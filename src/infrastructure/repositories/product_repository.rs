//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{DomainError, ProductFilter, ProductRepository, VisibilityUpdate};
use crate::models::product::{ActiveModel, Column, Entity as ProductEntity, Product};

/// SeaORM-based implementation of ProductRepository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut query = ProductEntity::find();

        if let Some(category) = &filter.category
            && !category.is_empty()
        {
            query = query.filter(Column::Category.eq(category.as_str()));
        }

        if let Some(active) = filter.is_active {
            query = query.filter(Column::IsActive.eq(active));
        }

        if let Some(q) = &filter.query
            && !q.is_empty()
        {
            let cond = Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::Brand.contains(q))
                .add(Column::Sku.contains(q))
                .add(Column::Tags.contains(q));
            query = query.filter(cond);
        }

        let products = query.order_by_asc(Column::Name).all(&self.db).await?;

        Ok(products.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        let product = ProductEntity::find_by_id(id).one(&self.db).await?;
        Ok(product.map(Product::from))
    }

    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let mut new_product: ActiveModel = Product { id: None, ..product }.into();
        new_product.created_at = Set(now.clone());
        new_product.updated_at = Set(now);

        let result = new_product.insert(&self.db).await?;
        Ok(Product::from(result))
    }

    async fn update_visibility(
        &self,
        id: i32,
        update: VisibilityUpdate,
    ) -> Result<Product, DomainError> {
        let existing = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        if let Some(is_active) = update.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_featured) = update.is_featured {
            active.is_featured = Set(is_featured);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(Product::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = ProductEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}

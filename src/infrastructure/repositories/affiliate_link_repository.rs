//! SeaORM implementation of AffiliateLinkRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{
    AffiliateLink, AffiliateLinkRepository, CreateAffiliateLinkInput, DomainError,
};
use crate::models::affiliate_link::{self, ActiveModel, Entity as AffiliateLinkEntity};

/// SeaORM-based implementation of AffiliateLinkRepository
pub struct SeaOrmAffiliateLinkRepository {
    db: DatabaseConnection,
}

impl SeaOrmAffiliateLinkRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<affiliate_link::Model> for AffiliateLink {
    fn from(model: affiliate_link::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            retailer: model.retailer,
            url: model.url,
            asin: model.asin,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl AffiliateLinkRepository for SeaOrmAffiliateLinkRepository {
    async fn create(&self, input: CreateAffiliateLinkInput) -> Result<AffiliateLink, DomainError> {
        let link = ActiveModel {
            product_id: Set(input.product_id),
            retailer: Set(input.retailer),
            url: Set(input.url),
            asin: Set(input.asin),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = link.insert(&self.db).await?;
        Ok(AffiliateLink::from(result))
    }

    async fn find_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Option<AffiliateLink>, DomainError> {
        let link = AffiliateLinkEntity::find()
            .filter(affiliate_link::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?;
        Ok(link.map(AffiliateLink::from))
    }
}

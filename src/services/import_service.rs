//! Import Service - inserts validated product batches
//!
//! Products are created one at a time. Each product with an Amazon URL then
//! gets its affiliate link; a failed link insert is logged and skipped, the
//! product stays.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{AffiliateLinkRepository, CreateAffiliateLinkInput, ProductRepository};
use crate::models::product::Product;
use crate::modules::import::{ImportError, extract_asin};

pub const AMAZON_RETAILER: &str = "amazon";

/// Outcome of a committed import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub affiliate_links: usize,
    pub affiliate_link_failures: usize,
    pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct ImportService {
    products: Arc<dyn ProductRepository>,
    affiliate_links: Arc<dyn AffiliateLinkRepository>,
}

impl ImportService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        affiliate_links: Arc<dyn AffiliateLinkRepository>,
    ) -> Self {
        Self {
            products,
            affiliate_links,
        }
    }

    /// Insert an already-gated batch. Stops at the first product insert
    /// failure; products created before it remain.
    pub async fn import(&self, batch: Vec<Product>) -> Result<ImportReport, ImportError> {
        let mut report = ImportReport::default();

        for product in batch {
            let created = self
                .products
                .create(product)
                .await
                .map_err(|source| ImportError::Insert {
                    inserted: report.imported,
                    source,
                })?;
            report.imported += 1;

            if let (Some(product_id), Some(url)) = (created.id, created.amazon_url.clone()) {
                let input = CreateAffiliateLinkInput {
                    product_id,
                    retailer: AMAZON_RETAILER.to_string(),
                    asin: extract_asin(&url),
                    url,
                };
                match self.affiliate_links.create(input).await {
                    Ok(_) => report.affiliate_links += 1,
                    Err(e) => {
                        tracing::warn!(
                            "Affiliate link for product {} ('{}') not created: {}",
                            product_id,
                            created.name,
                            e
                        );
                        report.affiliate_link_failures += 1;
                    }
                }
            }

            report.products.push(created);
        }

        tracing::info!(
            "Imported {} product(s), {} affiliate link(s), {} link failure(s)",
            report.imported,
            report.affiliate_links,
            report.affiliate_link_failures
        );

        Ok(report)
    }
}

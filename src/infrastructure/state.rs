//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AffiliateLinkRepository, ProductRepository};
use crate::infrastructure::config::Config;
use crate::infrastructure::{SeaOrmAffiliateLinkRepository, SeaOrmProductRepository};
use crate::modules::import::ImportOptions;
use crate::services::ImportService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Tag appended to canonical Amazon links
    pub affiliate_tag: String,
    /// Product repository
    pub product_repo: Arc<dyn ProductRepository>,
    /// Affiliate link repository
    pub affiliate_link_repo: Arc<dyn AffiliateLinkRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection, config: &Config) -> Self {
        let product_repo = Arc::new(SeaOrmProductRepository::new(db.clone()));
        let affiliate_link_repo = Arc::new(SeaOrmAffiliateLinkRepository::new(db.clone()));

        Self {
            db,
            affiliate_tag: config.affiliate_tag.clone(),
            product_repo,
            affiliate_link_repo,
        }
    }

    pub fn import_service(&self) -> ImportService {
        ImportService::new(self.product_repo.clone(), self.affiliate_link_repo.clone())
    }

    pub fn import_options(&self, sanitize_urls: bool) -> ImportOptions {
        ImportOptions {
            sanitize_urls,
            affiliate_tag: self.affiliate_tag.clone(),
        }
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use tankwiki::db;
use tankwiki::domain::{
    AffiliateLink, AffiliateLinkRepository, CreateAffiliateLinkInput, DomainError, ProductFilter,
    ProductRepository, VisibilityUpdate,
};
use tankwiki::import::{ImportError, ImportFormat, ImportOptions, prepare_import};
use tankwiki::infrastructure::{SeaOrmAffiliateLinkRepository, SeaOrmProductRepository};
use tankwiki::models::{Product, affiliate_link, product};
use tankwiki::services::ImportService;

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn sea_orm_service(db: &DatabaseConnection) -> ImportService {
    ImportService::new(
        Arc::new(SeaOrmProductRepository::new(db.clone())),
        Arc::new(SeaOrmAffiliateLinkRepository::new(db.clone())),
    )
}

/// Affiliate link repository that records calls and optionally fails
#[derive(Default)]
struct RecordingLinkRepository {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl AffiliateLinkRepository for RecordingLinkRepository {
    async fn create(&self, input: CreateAffiliateLinkInput) -> Result<AffiliateLink, DomainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::Database("affiliate_links is read-only".to_string()));
        }
        Ok(AffiliateLink {
            id: n as i32 + 1,
            product_id: input.product_id,
            retailer: input.retailer,
            url: input.url,
            asin: input.asin,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn find_by_product_id(
        &self,
        _product_id: i32,
    ) -> Result<Option<AffiliateLink>, DomainError> {
        Ok(None)
    }
}

/// Product repository that fails on the n-th insert
struct FlakyProductRepository {
    inner: SeaOrmProductRepository,
    fail_on: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl ProductRepository for FlakyProductRepository {
    async fn find_all(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        self.inner.find_all(filter).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, product: Product) -> Result<Product, DomainError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on {
            return Err(DomainError::Database("disk I/O error".to_string()));
        }
        self.inner.create(product).await
    }

    async fn update_visibility(
        &self,
        id: i32,
        update: VisibilityUpdate,
    ) -> Result<Product, DomainError> {
        self.inner.update_visibility(id, update).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn test_rejected_batch_inserts_nothing() {
    let db = setup_test_db().await;

    let result = prepare_import(
        ImportFormat::Csv,
        "name,price\nTetra Filter,19.99\n,5.00",
        None,
        &ImportOptions::default(),
    )
    .expect("CSV should parse")
    .into_ready();

    let errors = match result {
        Err(ImportError::Rejected(errors)) => errors,
        Err(e) => panic!("unexpected error: {}", e),
        Ok(_) => panic!("batch with a blank name must be rejected"),
    };

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, 2);
    assert_eq!(errors[0].field, "name");

    let count = product::Entity::find().count(&db).await.expect("DB error");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_json_without_url_attempts_no_affiliate_link() {
    let db = setup_test_db().await;
    let links = Arc::new(RecordingLinkRepository::default());
    let service = ImportService::new(
        Arc::new(SeaOrmProductRepository::new(db.clone())),
        links.clone(),
    );

    let products = prepare_import(
        ImportFormat::Json,
        r#"[{"name":"Heater","price":"29.99","quantity":"3"}]"#,
        None,
        &ImportOptions::default(),
    )
    .expect("JSON should parse")
    .into_ready()
    .expect("batch should be valid");

    let report = service.import(products).await.expect("import failed");

    assert_eq!(report.imported, 1);
    assert_eq!(report.affiliate_links, 0);
    assert_eq!(links.calls.load(Ordering::SeqCst), 0);

    let stored = product::Entity::find()
        .one(&db)
        .await
        .expect("DB error")
        .expect("product should exist");
    assert_eq!(stored.name, "Heater");
    assert_eq!(stored.regular_price, Some(29.99));
    assert_eq!(stored.stock_quantity, Some(3));
    assert_eq!(stored.sale_price, None);
}

#[tokio::test]
async fn test_amazon_product_gets_canonical_affiliate_link() {
    let db = setup_test_db().await;
    let service = sea_orm_service(&db);

    let csv = "Title,Price,Product Link,Tags\n\
               Fluval 407,$249.99,https://www.amazon.com/Fluval-407/dp/B07XJ8C8F5/ref=sr_1_1,\"canister, freshwater\"\n\
               Sponge Filter,8.50,,\n";
    let products = prepare_import(ImportFormat::Csv, csv, None, &ImportOptions::default())
        .expect("CSV should parse")
        .into_ready()
        .expect("batch should be valid");

    let report = service.import(products).await.expect("import failed");
    assert_eq!(report.imported, 2);
    assert_eq!(report.affiliate_links, 1);

    let links = affiliate_link::Entity::find().all(&db).await.expect("DB error");
    assert_eq!(links.len(), 1);
    assert_eq!(
        links[0].url,
        "https://www.amazon.com/dp/B07XJ8C8F5?tag=travisdraga07-20"
    );
    assert_eq!(links[0].asin.as_deref(), Some("B07XJ8C8F5"));
    assert_eq!(links[0].retailer, "amazon");

    let fluval = report
        .products
        .iter()
        .find(|p| p.name == "Fluval 407")
        .expect("Fluval should be imported");
    assert_eq!(Some(links[0].product_id), fluval.id);
    assert_eq!(fluval.regular_price, Some(249.99));
    assert_eq!(fluval.tags, vec!["canister", "freshwater"]);
}

#[tokio::test]
async fn test_affiliate_link_failure_keeps_the_product() {
    let db = setup_test_db().await;
    let links = Arc::new(RecordingLinkRepository {
        fail: true,
        ..Default::default()
    });
    let service = ImportService::new(
        Arc::new(SeaOrmProductRepository::new(db.clone())),
        links.clone(),
    );

    let products = prepare_import(
        ImportFormat::Json,
        r#"[{"name":"Powerhead","amazon_url":"https://www.amazon.com/gp/product/B00ABCDEFG"}]"#,
        None,
        &ImportOptions::default(),
    )
    .expect("JSON should parse")
    .into_ready()
    .expect("batch should be valid");

    let report = service.import(products).await.expect("link failure must not fail the import");

    assert_eq!(report.imported, 1);
    assert_eq!(report.affiliate_links, 0);
    assert_eq!(report.affiliate_link_failures, 1);
    assert_eq!(links.calls.load(Ordering::SeqCst), 1);

    let count = product::Entity::find().count(&db).await.expect("DB error");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_insert_failure_reports_rows_already_created() {
    let db = setup_test_db().await;
    let service = ImportService::new(
        Arc::new(FlakyProductRepository {
            inner: SeaOrmProductRepository::new(db.clone()),
            fail_on: 2,
            calls: AtomicUsize::new(0),
        }),
        Arc::new(SeaOrmAffiliateLinkRepository::new(db.clone())),
    );

    let products = prepare_import(
        ImportFormat::Csv,
        "name\nAir Stone\nCheck Valve\nGravel Vac\n",
        None,
        &ImportOptions::default(),
    )
    .expect("CSV should parse")
    .into_ready()
    .expect("batch should be valid");

    match service.import(products).await {
        Err(ImportError::Insert { inserted, .. }) => assert_eq!(inserted, 1),
        other => panic!("expected insert failure, got {:?}", other),
    }

    let count = product::Entity::find().count(&db).await.expect("DB error");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_second_affiliate_link_for_a_product_is_refused() {
    let db = setup_test_db().await;
    let products = SeaOrmProductRepository::new(db.clone());
    let links = SeaOrmAffiliateLinkRepository::new(db.clone());

    let created = products
        .create(Product {
            name: "Test Kit".to_string(),
            ..Default::default()
        })
        .await
        .expect("create failed");
    let product_id = created.id.expect("id should be set");

    let input = CreateAffiliateLinkInput {
        product_id,
        retailer: "amazon".to_string(),
        url: "https://www.amazon.com/dp/B000TESTKT?tag=travisdraga07-20".to_string(),
        asin: Some("B000TESTKT".to_string()),
    };
    links.create(input.clone()).await.expect("first link failed");
    assert!(links.create(input).await.is_err());

    let found = links
        .find_by_product_id(product_id)
        .await
        .expect("DB error")
        .expect("link should exist");
    assert_eq!(found.asin.as_deref(), Some("B000TESTKT"));
}

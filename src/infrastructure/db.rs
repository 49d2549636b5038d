use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(db, "PRAGMA foreign_keys = ON").await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            regular_price REAL,
            sale_price REAL,
            stock_quantity INTEGER,
            sku TEXT,
            brand TEXT,
            category TEXT,
            subcategories TEXT,
            tags TEXT,
            tank_types TEXT,
            image_url TEXT,
            amazon_url TEXT,
            weight REAL,
            dimensions TEXT,
            rating REAL,
            review_count INTEGER,
            is_featured BOOLEAN NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // One affiliate link per product
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS affiliate_links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL UNIQUE,
            retailer TEXT NOT NULL DEFAULT 'amazon',
            url TEXT NOT NULL,
            asin TEXT,
            created_at TEXT NOT NULL,
            FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS equipment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            aquarium_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            equipment_type TEXT NOT NULL,
            brand TEXT,
            installed_at TEXT,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS maintenance_templates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            equipment_type TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            frequency_days INTEGER NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS maintenance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            aquarium_id INTEGER NOT NULL,
            equipment_id INTEGER,
            template_id INTEGER,
            title TEXT NOT NULL,
            due_date TEXT,
            status TEXT NOT NULL DEFAULT 'pending',
            completed_at TEXT,
            cost REAL,
            notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (equipment_id) REFERENCES equipment(id) ON DELETE SET NULL,
            FOREIGN KEY (template_id) REFERENCES maintenance_templates(id) ON DELETE SET NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_maintenance_equipment ON maintenance(equipment_id)",
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_equipment_aquarium ON equipment(aquarium_id)",
    )
    .await?;

    Ok(())
}

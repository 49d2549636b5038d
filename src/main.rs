use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tankwiki::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tankwiki=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };

    if config.seed_demo {
        tracing::info!("Seeding default maintenance templates...");
        match seed::seed_demo_data(&db).await {
            Ok(count) => tracing::info!("Seeded {} maintenance template(s)", count),
            Err(e) => tracing::error!("Failed to seed data: {}", e),
        }
    }

    let app = server::build_router(db, &config);

    // Find available port
    let Some(port) = server::find_available_port(config.port) else {
        tracing::error!("No available port near {}", config.port);
        std::process::exit(1);
    };

    if port != config.port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            config.port,
            port
        );
    }

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("TankWiki server listening on {} (profile: {})", addr, config.profile);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("HTTP server error: {}", e);
    }
}

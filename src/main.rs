use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ecommerce_pro::{
    app::AppState,
    create_routes,
    infrastructure::{config::load_config, logger::Logger, memory::MemoryStore},
};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// E-commerce Pro API 服务
#[derive(Debug, Parser)]
#[command(name = "ecommerce-pro", version, about)]
struct Args {
    /// 配置文件路径，默认查找 config.toml 和 ./config/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 使用内存存储代替 PostgreSQL
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref()).context("failed to load configuration")?;
    Logger::init(&config.logging.level);

    info!("Starting E-commerce Pro API...");

    let state = if args.memory || !cfg!(feature = "database") {
        warn!("Using in-memory store, data is lost on shutdown");
        MemoryStore::new().app_state(&config.openapi)
    } else {
        database_state(&config).await?
    };

    let app = create_routes(state, config.server.timeout());

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 E-commerce Pro API running on http://{}", listener.local_addr()?);
    info!("📖 Endpoints:");
    info!("   /api/products, /api/orders, /api/order-items");
    info!("   GET /api/order-items/search/order-id/:id");
    info!("   GET /api-docs/openapi.json");
    info!("   GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(feature = "database")]
async fn database_state(
    config: &ecommerce_pro::infrastructure::config::Config,
) -> anyhow::Result<AppState> {
    use ecommerce_pro::app::{
        order::model::Order, order_item::model::OrderItem, product::model::Product,
    };
    use ecommerce_pro::infrastructure::database::{create_tables, DatabaseManager, PgRepository};
    use std::sync::Arc;

    let db = DatabaseManager::new(&config.database)
        .await
        .context("failed to connect to database")?;
    if config.database.create_schema {
        create_tables(db.get_pool()).await?;
    }

    let pool = db.get_pool().clone();
    Ok(AppState::new(
        Arc::new(PgRepository::<Product>::new(pool.clone())),
        Arc::new(PgRepository::<Order>::new(pool.clone())),
        Arc::new(PgRepository::<OrderItem>::new(pool)),
        ecommerce_pro::app::openapi::document(&config.openapi),
    ))
}

#[cfg(not(feature = "database"))]
async fn database_state(
    config: &ecommerce_pro::infrastructure::config::Config,
) -> anyhow::Result<AppState> {
    Ok(MemoryStore::new().app_state(&config.openapi))
}

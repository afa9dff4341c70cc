//! Provisioning entry point: opens the configured database and brings it up
//! to date, migrations plus demo seed data. Run it once to prepare a local
//! store for whatever frontend sits on top of the library.

use anyhow::Context as _;
use enquete::config::AppConfig;
use enquete::db::{self, seed};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("reading configuration")?;

    tracing::info!("Connecting to database...");
    let pool = db::connect(&config.database).await?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    seed::seed_all(&pool).await.context("seeding demo data")?;

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    let forms: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forms")
        .fetch_one(&pool)
        .await?;
    tracing::info!(users, forms, "database ready");

    pool.close().await;
    Ok(())
}

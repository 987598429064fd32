// Cinedex catalog seeder
//
// Usage: seed [FILE|URL]. Defaults to the public top-250 dataset.

use anyhow::Context;
use tracing::{error, info};

use cinedex_app::seed::{fetch_source, prepare_items, replace_catalog, DEFAULT_SOURCE};
use cinedex_app::Stores;
use cinedex_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("Seeding failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL is required for seeding");
    }

    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    let document = fetch_source(&source).await?;
    let items = prepare_items(document).context("Invalid seed data")?;

    let stores = Stores::from_config(&config).await?;
    let (removed, inserted) = replace_catalog(stores.catalog.as_ref(), items).await?;

    info!(removed, inserted, "Catalog seeded successfully");
    Ok(())
}

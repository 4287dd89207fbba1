//! Reset the configured database to the demo data set

use anyhow::Context;
use juicebox::{init_logging, Config};
use juicebox_core::init_db;
use juicebox_core::seed::Seeder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging();

    let db = init_db(&config.database)
        .with_context(|| format!("opening database {}", config.database.display()))?;
    let seeder = Seeder::new(db);

    seeder.rebuild().await.context("rebuilding demo data")?;
    seeder.exercise().await.context("exercising demo data")?;
    tracing::info!("Finished seeding {}", config.database.display());
    Ok(())
}

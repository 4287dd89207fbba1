use anyhow::Context;
use juicebox::{app, init_logging, AppState, Config};
use juicebox_core::init_db;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging();

    let db = init_db(&config.database)
        .with_context(|| format!("opening database {}", config.database.display()))?;
    let app = app(AppState::new(&db));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

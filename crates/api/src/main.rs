use std::sync::Arc;

use anyhow::Context;

use mes_api::app::{self, services::AppServices};
use mes_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    mes_observability::init_with(&config.log_filter, config.log_format);

    let services = Arc::new(AppServices::in_memory());
    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

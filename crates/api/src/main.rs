use std::net::SocketAddr;

use anyhow::Context;

use partsfront_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    partsfront_observability::init();

    let config = AppConfig::from_env();
    let app = partsfront_api::app::build_app(&config).context("failed to wire services")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        content_dir = %config.content_dir.display(),
        "listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    beltline_observability::init();

    let config = beltline_api::config::AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    let app = beltline_api::app::build_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

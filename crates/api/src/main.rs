#[tokio::main]
async fn main() {
    assetdesk_observability::init();

    let config = assetdesk_api::config::ApiConfig::from_env().expect("invalid configuration");

    let app = assetdesk_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

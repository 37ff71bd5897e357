use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bizpulse_common::Config;
use bizpulse_core::RecordFetcher;
use bizpulse_web::{load, router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bizpulse=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let state = AppState::new(config.zip_codes.clone());

    // The one fetch of the session runs in the background; the API answers
    // with `loading` until it completes.
    let fetcher = RecordFetcher::from_config(&config);
    tokio::spawn(load(state.clone(), fetcher, config.row_limit));

    let app = router(state).layer(
        tower_http::trace::TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            },
        ),
    );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("BizPulse web server starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

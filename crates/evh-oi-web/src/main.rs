//! EVH Operational Intelligence web server
//!
//! Run with: cargo run -p evh-oi-web --bin evh-oi

use tracing::info;
use tracing_subscriber::EnvFilter;

use evh_oi_web::config::Config;
use evh_oi_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("evh_oi=debug,info")),
        )
        .init();

    info!("Starting EVH Operational Intelligence server...");

    let config = Config::load()?;
    let addr = config.bind_addr();
    let state = AppState::from_config(config)?;
    info!(
        backend = state.llm.backend_name(),
        model = state.llm.model_id(),
        "LLM backend ready"
    );

    let app = evh_oi_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

mod config;
mod models;
mod openai;
mod page;
mod persona;
mod prompt;
mod service;
mod web;

use crate::config::Config;
use crate::openai::OpenAiClient;
use crate::page::Page;
use crate::service::ConsultationService;
use crate::web::AppState;
use dotenv::dotenv;
use std::error::Error as StdError;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn StdError>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    if config.openai_api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; consultations will fail until it is");
    }

    let client = OpenAiClient::new(&config)?;
    info!("Using model {} at {}", client.model(), config.openai_base_url);

    let state = AppState {
        service: Arc::new(ConsultationService::new(Arc::new(client))),
        page: Arc::new(Page::new()?),
    };

    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Consultation app listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

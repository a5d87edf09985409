use std::sync::Arc;

use qalam_model::{Generator, HfTextGenerator};
use qalam_rag::{HfEmbeddingProvider, Retriever};
use qalam_server::server::{AppState, run_server};
use qalam_server::{AppConfig, ChatService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    info!(
        embedding_model = %config.embedding_model,
        generation_model = %config.generation_model,
        top_k = config.top_k,
        "starting qalam"
    );

    let embedder = Arc::new(
        HfEmbeddingProvider::new(config.hf_token.clone())
            .with_model(config.embedding_model.clone())
            .with_dimensions(config.embedding_dimensions),
    );

    // Index load/build happens here, once; requests only read afterwards.
    let retriever =
        Retriever::initialize(embedder, config.english.clone(), config.arabic.clone()).await;

    let generator = Generator::new(Arc::new(
        HfTextGenerator::new(config.hf_token.clone()).with_model(config.generation_model.clone()),
    ));
    info!("retriever and generator initialized");

    let chat = ChatService::new(
        Arc::new(retriever),
        Arc::new(generator),
        config.top_k,
        config.language_policy,
    );

    run_server(&config.host, config.port, AppState { chat: Arc::new(chat) }).await
}

use anyhow::Context;
use citylens_core::AppConfig;
use database::Store;
use ingestion::{IngestionPipeline, PlaceLinker};
use reddit_client::RedditApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citylens=info,ingestion=info,reddit_client=info".into()),
        )
        .init();

    tracing::info!("Starting CityLens batch run");

    // Missing required configuration is fatal: no partial run is attempted.
    let config = AppConfig::from_env().context("invalid configuration")?;

    let store = Store::connect(&config.database_url)
        .await
        .context("connecting to the persistence layer")?;
    store.run_migrations().await.context("running migrations")?;

    let mode = std::env::args().nth(1).unwrap_or_else(|| "all".to_string());

    if mode == "ingest" || mode == "all" {
        let api = RedditApi::new(config.user_agent.clone());
        let pipeline = IngestionPipeline::new(&api, &store);
        let summary = pipeline.run(&config.subreddit, config.page_limit).await;
        tracing::info!(
            "Ingest summary: processed={} succeeded={} failed={}",
            summary.processed,
            summary.succeeded,
            summary.failed
        );
    }

    if mode == "link" || mode == "all" {
        let linker = PlaceLinker::new(&store);
        let summary = linker.run().await.context("place-linking run")?;
        tracing::info!(
            "Link summary: posts={} links={} hidden_gems={}",
            summary.posts_processed,
            summary.links_created,
            summary.hidden_gems
        );
    }

    Ok(())
}

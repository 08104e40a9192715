// Main entry point for the ingestion API server

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ingestion::{
    IngestScheduler, JobSpec, Pipeline, SummaryModel, Trigger, DAILY_FETCH_JOB_ID,
};
use server_core::{server::build_app, server::AppState, Config};

#[cfg(feature = "local-model")]
fn build_summary_model() -> Result<Arc<dyn SummaryModel>> {
    let model = ingestion::T5Summarizer::new().context("Failed to load summarization model")?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "local-model"))]
fn build_summary_model() -> Result<Arc<dyn SummaryModel>> {
    Ok(Arc::new(ingestion::LeadSummarizer::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,ingestion=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Research-Paper Ingestion API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Load the summarization backend once; it is shared read-only
    let model = build_summary_model()?;
    tracing::info!(model = model.name(), "Summarization backend ready");

    // Build scheduler and application state
    let scheduler = Arc::new(
        IngestScheduler::new()
            .await
            .context("Failed to create scheduler")?,
    );
    let state = AppState::new(&config, model, scheduler.clone());

    // Register the recurring fetch job
    let search = state.search.clone();
    let insight = state.insight.clone();
    let store = state.store.clone();
    let max_results = config.max_results;
    scheduler
        .register(
            JobSpec::new(
                DAILY_FETCH_JOB_ID,
                config.fetch_keyword.clone(),
                Trigger::Interval(config.fetch_interval),
            ),
            move |keyword| {
                let search = search.clone();
                let insight = insight.clone();
                let store = store.clone();
                async move {
                    Pipeline::new(search, insight, store, max_results)
                        .run(&keyword)
                        .await
                        .map(|_| ())
                }
            },
        )
        .await
        .context("Failed to register fetch job")?;

    scheduler.start().await.context("Failed to start scheduler")?;

    // Build application
    let app = build_app(state, config.allowed_origin.as_deref());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop recurring fires before exit; in-flight runs finish on their own
    scheduler
        .shutdown()
        .await
        .context("Failed to stop scheduler")?;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

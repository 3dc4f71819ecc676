use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use transcribe_relay::application::ports::{MediaStore, ResultFetcher, TranscriptionJobService};
use transcribe_relay::application::services::TranscriptionOrchestrator;
use transcribe_relay::infrastructure::observability::{TracingConfig, init_tracing};
use transcribe_relay::infrastructure::results::{HttpResultFetcher, MockResultFetcher};
use transcribe_relay::infrastructure::storage::{MediaStoreFactory, ObjectMediaStore};
use transcribe_relay::infrastructure::time::TokioSleeper;
use transcribe_relay::infrastructure::transcription::{HttpJobService, MockJobService};
use transcribe_relay::presentation::{
    AppState, Environment, ScaffoldConfig, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    let tracing_config = TracingConfig::from_settings(environment.as_str(), &settings.logging);
    init_tracing(&tracing_config, settings.server.port);

    let scaffold = ScaffoldConfig::default();

    let (media_store, job_service, result_fetcher): (
        Arc<dyn MediaStore>,
        Arc<dyn TranscriptionJobService>,
        Arc<dyn ResultFetcher>,
    ) = if scaffold.enabled {
        tracing::warn!("Scaffold mode enabled, remote collaborators are mocked");
        (
            Arc::new(ObjectMediaStore::in_memory()),
            Arc::new(MockJobService::new(Duration::from_millis(
                scaffold.mock_response_delay_ms,
            ))),
            Arc::new(MockResultFetcher::new(scaffold.mock_transcript.clone())),
        )
    } else {
        (
            MediaStoreFactory::create(&settings.storage)?,
            Arc::new(HttpJobService::new(
                &settings.transcription.base_url,
                settings.transcription.api_key.clone(),
            )),
            Arc::new(HttpResultFetcher::new()),
        )
    };

    let orchestrator = TranscriptionOrchestrator::new(
        media_store,
        job_service,
        result_fetcher,
        Arc::new(TokioSleeper),
        settings.transcription.poll_policy(),
    )
    .with_job_prefix(settings.transcription.job_prefix.clone())
    .with_key_prefix(settings.storage.key_prefix.clone());

    tracing::info!(
        storage = ?settings.storage.provider,
        job_service = %settings.transcription.base_url,
        max_attempts = settings.transcription.poll_max_attempts,
        interval_secs = settings.transcription.poll_interval_secs,
        "Orchestrator configured"
    );

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        default_language: settings.transcription.default_language.clone(),
        max_upload_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

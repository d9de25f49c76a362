//! Mention Flow server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mention_flow::adapters::ai::{OpenAIEmbeddingProvider, OpenAIProvider};
use mention_flow::adapters::document::{DocumentTextExtractor, LocalDocumentStore};
use mention_flow::adapters::http::{
    create_router, AppState, ChatHandlers, DocumentHandlers, SessionHandlers,
};
use mention_flow::adapters::knowledge::DirectoryKnowledgeBase;
use mention_flow::adapters::probe::FsResourceProbe;
use mention_flow::adapters::speech::{AudioPublisher, OpenAISpeechSynthesizer};
use mention_flow::application::{
    spawn_idle_sweeper, ClearSessionHistoryHandler, Classifier, GetSessionHistoryHandler,
    GetSessionSummaryHandler, MentionEventDispatcher, ProcessTurnHandler, SessionRegistry,
    SpecialistDispatcher, Specialists, Supervisor,
};
use mention_flow::config::AppConfig;
use mention_flow::domain::orchestration::SpecialistRole;
use mention_flow::ports::TextExtractor;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    // Model-facing adapters
    let chat_provider = Arc::new(OpenAIProvider::new(config.ai.chat_settings()?)?);
    let embedder = Arc::new(OpenAIEmbeddingProvider::new(config.ai.embedding_settings()?)?);
    let extractor: Arc<dyn TextExtractor> = Arc::new(DocumentTextExtractor::new());

    // Specialist roles, built once and shared
    let mut specialists = Specialists::new(chat_provider.clone(), config.ai.timeout());
    for role in SpecialistRole::ALL {
        specialists = specialists.with_profile(role, config.specialists.profile(role));
    }
    if let Some(prompt) = config.specialists.load_principal_prompt()? {
        tracing::info!("Using principal prompt override");
        specialists = specialists.with_prompt(SpecialistRole::Principal, prompt);
    }
    let specialists = Arc::new(specialists);

    // Sessions and the idle sweep
    let registry = Arc::new(SessionRegistry::new(config.session.max_turns));
    let sweeper = spawn_idle_sweeper(registry.clone(), config.session.sweep_policy());

    let knowledge_base = Arc::new(DirectoryKnowledgeBase::new(
        extractor.clone(),
        embedder,
        chat_provider,
        config.knowledge.settings(),
    ));

    let process_turn = Arc::new(ProcessTurnHandler::new(
        registry.clone(),
        Classifier::new(Arc::new(FsResourceProbe::new()), specialists.clone()),
        SpecialistDispatcher::new(specialists),
        Supervisor::new(),
        MentionEventDispatcher::new(
            knowledge_base,
            config.knowledge.documents_dir.clone(),
            config.knowledge.lookup_timeout(),
        ),
    )
    .with_turn_timeout(config.turn_timeout()));

    let audio = if config.speech.enabled {
        let synthesizer = OpenAISpeechSynthesizer::new(
            config.ai.settings_for_model(&config.speech.model)?,
            config.speech.voice_settings(),
        )?;
        Some(AudioPublisher::new(
            Arc::new(synthesizer),
            config.speech.audio_dir.clone(),
            config.speech.public_path.clone(),
        ))
    } else {
        None
    };

    let document_store = Arc::new(LocalDocumentStore::new(
        config.knowledge.documents_dir.clone(),
        config.knowledge.extensions_list(),
        config.uploads.max_upload_bytes,
        extractor,
    ));

    let state = AppState {
        chat: ChatHandlers::new(process_turn, audio.clone()),
        sessions: SessionHandlers::new(
            Arc::new(GetSessionSummaryHandler::new(registry.clone())),
            Arc::new(GetSessionHistoryHandler::new(registry.clone())),
            Arc::new(ClearSessionHistoryHandler::new(registry)),
        ),
        documents: DocumentHandlers::new(document_store, config.uploads.max_upload_bytes),
        audio: audio.map(|publisher| {
            (
                publisher.audio_dir().to_path_buf(),
                publisher.public_path().to_string(),
            )
        }),
        request_timeout: std::time::Duration::from_secs(config.server.request_timeout_secs),
        cors_origins: config.server.cors_origins_list(),
    };

    let app = create_router(state);
    let addr = config.server.socket_addr()?;
    tracing::info!(
        addr = %addr,
        model = %config.ai.model,
        documents_dir = %config.knowledge.documents_dir.display(),
        "Mention Flow server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    Ok(())
}

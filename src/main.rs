use std::sync::Arc;

use panacea::api::{self, app_state::AppState};
use panacea::config::loader::ConfigLoader;
use panacea::engine::dispatcher::Dispatcher;
use panacea::engine::matcher::Matcher;
use panacea::engine::resolver::ResponseResolver;
use panacea::integrations::{ExerciseClient, NutritionClient, WellnessProvider};
use panacea::knowledge::store::KnowledgeStore;
use panacea::observability::{ObservabilityState, create_observability_router, init_logging};
use panacea::security::auth::JwtAuth;
use panacea::security::rate_limit::RateLimiter;
use panacea::services::{create_account_service, create_chat_service};
use panacea::storage::repository::{MessageRepository, UserRepository};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_logging("panacea", &config.logging);

    info!("Starting Panacea...");
    info!("Configuration loaded successfully");

    let db_pool = panacea::storage::sqlite::connect(&config.database).await?;
    info!("Database connection pool initialized");

    let user_repository = UserRepository::new(db_pool.clone());
    let message_repository = MessageRepository::new(db_pool.clone());
    info!("Repositories initialized");

    let knowledge = Arc::new(KnowledgeStore::load(&config.knowledge.data_dir));
    if knowledge.is_empty() {
        warn!(
            "Knowledge store is empty; only calculators and external lookups will answer ({})",
            config.knowledge.data_dir.display()
        );
    }

    let matcher = Matcher::with_threshold(config.chatbot.fuzzy_match_threshold);
    let resolver = Arc::new(ResponseResolver::new(knowledge, matcher));
    info!("Response resolver initialized");

    let dispatcher = Arc::new(Dispatcher::new(
        resolver,
        NutritionClient::new(&config.external),
        ExerciseClient::new(&config.external),
        WellnessProvider::new(&config.external),
    ));
    info!("Dispatcher initialized");

    if config.external.usda_api_key.is_none() {
        warn!("USDA_API_KEY not configured; nutrition lookups will use built-in fallbacks");
    }
    if config.external.rapid_api_key.is_none() {
        warn!("RAPID_API_KEY not configured; exercise suggestions are unavailable");
    }

    let authenticator = Arc::new(JwtAuth::from_settings(&config.security));

    let account_service = create_account_service(user_repository, authenticator.clone());
    info!("Account service initialized");

    let chat_service = create_chat_service(
        message_repository.clone(),
        dispatcher,
        config.chatbot.clone(),
    );
    info!("Chat service initialized");

    // 可选的保留期清理：配置了保留天数才启动
    if let Some(retention_days) = config.chatbot.history_retention_days {
        let messages = message_repository.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 3600));
            loop {
                interval.tick().await;
                match messages.prune_older_than(retention_days).await {
                    Ok(removed) if removed > 0 => {
                        info!(removed, retention_days, "Expired chat history removed")
                    }
                    Ok(_) => {}
                    Err(e) => warn!("History cleanup failed: {}", e),
                }
            }
        });
        info!(retention_days, "History retention cleanup scheduled");
    }

    let app_state = AppState::new(
        db_pool,
        account_service,
        chat_service,
        authenticator,
        RateLimiter::from_settings(&config.security),
    );
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
    ));
    let api_router = api::create_router(app_state);
    let router = create_observability_router(observability_state).merge(api_router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

//! EcoQuest - climate education backend

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecoquest::{
    config::Args,
    db::{DocumentStore, MemoryStore, MongoClient, MongoStore},
    llm::{GeminiBackend, GroqBackend, LlmBackend},
    server,
    services::{ContentGenerator, EcoService},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("ecoquest={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  EcoQuest - climate education API");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("MongoDB: {} (db: {})", args.mongo_url, args.db_name);

    let store = connect_store(&args).await;
    let generator = build_generator(&args);

    info!("Backend URL for frontend: {}", args.backend_url);
    info!("CORS origins: {}", args.cors_origins.join(", "));
    info!("======================================");

    let service = EcoService::new(store, Arc::new(generator));
    let state = Arc::new(server::AppState::new(args, service));

    server::run(state).await?;
    Ok(())
}

/// MongoDB, or the in-memory store in dev mode when MongoDB is unreachable
async fn connect_store(args: &Args) -> Arc<dyn DocumentStore> {
    let mongo = match MongoClient::new(&args.mongo_url, &args.db_name).await {
        Ok(client) => MongoStore::new(client).await,
        Err(e) => Err(e),
    };

    match mongo {
        Ok(store) => {
            info!("MongoDB connected successfully");
            Arc::new(store)
        }
        Err(e) => {
            if args.dev_mode {
                warn!("MongoDB connection failed (dev mode, continuing with in-memory store): {}", e);
                Arc::new(MemoryStore::new())
            } else {
                error!("MongoDB connection failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn build_generator(args: &Args) -> ContentGenerator {
    let primary: Option<Arc<dyn LlmBackend>> = match args.groq_key() {
        Some(key) => match GroqBackend::new(&args.groq_base_url, &args.groq_text_model, key) {
            Ok(backend) => {
                info!("Groq configured (json: {}, text: {})", args.groq_json_model, args.groq_text_model);
                Some(Arc::new(backend))
            }
            Err(e) => {
                error!("Groq backend could not be created: {}", e);
                None
            }
        },
        None => {
            error!("GROQ_API_KEY missing or placeholder; primary AI provider disabled");
            None
        }
    };

    let secondary: Option<Arc<dyn LlmBackend>> = match args.gemini_key() {
        Some(key) => {
            if args.gemini_key_suspicious() {
                warn!("GEMINI_API_KEY looks too short, fallback calls may be rejected");
            }
            match GeminiBackend::new(&args.gemini_base_url, &args.gemini_model, key) {
                Ok(backend) => {
                    info!("Gemini fallback configured ({})", args.gemini_model);
                    Some(Arc::new(backend))
                }
                Err(e) => {
                    warn!("Gemini backend could not be created: {}", e);
                    None
                }
            }
        }
        None => {
            warn!("GEMINI_API_KEY missing or placeholder; no fallback AI provider");
            None
        }
    };

    ContentGenerator::new(primary, secondary)
        .with_models(args.groq_json_model.clone(), args.groq_text_model.clone())
}

//! Suvidhaa server binary
//!
//! Run with: cargo run -p suvidhaa --bin suvidhaa-server

use suvidhaa::{config::AppConfig, server::SuvidhaaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real deployments set the environment directly
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "suvidhaa=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::info!("Loaded environment from {}", path.display());
    }

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                     Suvidhaa Backend                      ║
║         Your Bridge to Transparent Governance             ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    // Load configuration
    let config = AppConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Database: {}", config.database.path.display());
    tracing::info!("  - LLM endpoint: {}", config.llm.base_url);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Analysis input budget: {} chars", config.analysis.max_input_chars);
    match &config.object_store {
        Some(store) => tracing::info!("  - Object store: cloud '{}'", store.cloud_name),
        None => tracing::info!("  - Object store: disabled (inline copies only)"),
    }

    // Create and start server
    let server = SuvidhaaServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}/api/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/documents/upload - Upload a government document");
    println!("  GET  /api/documents        - List processed documents");
    println!("  POST /api/questions        - Ask a government office");
    println!("  POST /api/suggestions      - Make a public suggestion");
    println!("  POST /api/grievances       - File a grievance");
    println!("  GET  /api/dashboard/stats  - Dashboard counters");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}

use std::sync::Arc;
use tokio::signal;
use tracing::info;

use hangman_core::WordBank;
use hangman_persistence::connection::connect_and_migrate;
use hangman_server::{config::Config, create_routes, game_service::GameService};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = Config::new();

    // Word pool: an explicit file wins, otherwise the builtin list
    let bank = match &config.words_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(data) => match WordBank::from_json(&data) {
                Ok(bank) => bank,
                Err(e) => {
                    tracing::error!("Failed to parse word list '{}': {}", path, e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                tracing::error!("Failed to read word list '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => WordBank::builtin(),
    };

    if bank.is_empty() {
        tracing::error!("The word pool is empty; the server cannot deal out levels.");
        tracing::error!("Provide a words.json via WORDS_FILE or use the builtin pool.");
        std::process::exit(1);
    }

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let service = Arc::new(GameService::new(db, config.default_attempts_allowed));

    match service.seed_words(&bank).await {
        Ok(0) => info!("Word bank already seeded"),
        Ok(count) => info!("Seeded {} words into the word bank", count),
        Err(e) => {
            tracing::error!("Failed to seed the word bank: {}", e);
            std::process::exit(1);
        }
    }

    let routes = create_routes(service);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config.host.parse::<std::net::IpAddr>().unwrap(),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

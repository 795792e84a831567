//! Etana Interiors
//!
//! Backend and contact form client for the Etana Interiors marketing site.
//!
//! ## Features
//!
//! - **Lead API**: Receive contact form inquiries and store them for follow-up
//! - **Lead Management**: List inquiries and track them through the sales pipeline
//! - **Marketing Page**: Serve the static site alongside the API
//! - **Contact Form Client**: Submit an inquiry from the terminal

mod catalog;
mod config;
mod db;
mod form;
mod handlers;
mod inquire;
mod models;
mod validation;

use axum::{middleware::from_fn_with_state, Router};
use clap::{Parser, Subcommand};
use form::{FormStateManager, HttpTransport, Outcome};
use handlers::AppState;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Largest request body accepted; inquiries are a few kilobytes at most
const MAX_BODY_SIZE: usize = 64 * 1024;

#[derive(Debug, Parser)]
#[command(name = "etana-interiors", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the API server and serve the marketing page (default)
    Serve,
    /// Fill in and send the contact form from the terminal
    Inquire(inquire::InquireArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "etana_interiors=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Inquire(args) => {
            let outcome = run_inquiry(args).await?;
            if outcome == Outcome::Failure {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_inquiry(args: inquire::InquireArgs) -> Result<Outcome, Box<dyn std::error::Error>> {
    let backend_url = args
        .backend_url
        .clone()
        .unwrap_or_else(config::backend_url_from_env);

    let manager = FormStateManager::new(HttpTransport::new(&backend_url)?);
    tracing::debug!("Contact endpoint: {}", manager.transport().endpoint());

    let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let outcome = inquire::run_session(&manager, &args, &mut stdin, &mut stdout).await?;
    Ok(outcome)
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Starting Etana Interiors API");
    tracing::info!("Environment: {:?}", config.environment);

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // Prune the rate limit log hourly
    let prune_pool = pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            if let Err(e) = db::prune_rate_limits(&prune_pool).await {
                tracing::warn!("Failed to prune rate limit attempts: {}", e);
            }
        }
    });

    if config.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN not set; lead management endpoints are disabled");
    }

    // Create application state
    let state = AppState {
        pool,
        is_production: config.is_production(),
        trusted_proxies: config.trusted_proxies.clone(),
        admin_token_hash: config
            .admin_api_token
            .as_deref()
            .map(handlers::auth::hash_token),
        max_contact_attempts: config.max_contact_attempts,
    };

    // Build CORS layer
    let cors = if config.is_production() {
        CorsLayer::new()
            .allow_origin(
                config
                    .cors_origins
                    .iter()
                    .filter_map(|o| o.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::permissive()
    };

    // Build main router
    let app = Router::new()
        .nest("/api", handlers::api_router(state.clone()))
        .fallback_service(ServeDir::new(&config.frontend_dir))
        .layer(from_fn_with_state(
            state,
            handlers::middleware::security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(cors);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Frontend served from: {}", config.frontend_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

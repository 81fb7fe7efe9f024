//! Repo Visualizer - browse a public repository's files in the browser
//!
//! # Usage
//! ```bash
//! repo-visualizer                          # Start server on :3000
//! repo-visualizer --open                   # Start and open browser
//! GITHUB_TOKEN=... repo-visualizer         # Higher remote API rate limit
//! repo-visualizer --api-base http://ghe.local/api/v3
//! ```

mod error;
mod github;
mod models;
mod render;
mod routes;
#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::routing::get;
use clap::Parser;
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use github::cache::{CacheConfig, DEFAULT_CAPACITY};
use github::client::{ClientConfig, DEFAULT_API_BASE};
use github::RepoBrowser;

/// Embedded frontend static files
#[derive(Embed)]
#[folder = "assets"]
struct Assets;

/// Repo Visualizer - Browse a remote repository's files in your browser
#[derive(Parser)]
#[command(name = "repo-visualizer")]
#[command(about = "Browse and preview files of a public repository", long_about = None)]
struct Cli {
    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Access token sent as a bearer credential to the remote API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Root of the remote contents API
    #[arg(long, env = "REPO_VISUALIZER_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request deadline for remote calls, in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Maximum number of cached folder listings (0 disables the cache)
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    cache_capacity: usize,

    /// Lifetime of a cached folder listing in seconds (0 keeps it for the session)
    #[arg(long, default_value_t = 600)]
    cache_ttl_secs: u64,

    /// Disable the side-by-side split view
    #[arg(long)]
    no_split: bool,
}

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().trim_start_matches('/');

    let path = if path.is_empty() { "index.html" } else { path };

    let response = match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime.as_ref())
                .body(Body::from(content.data.into_owned()))
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("Not Found")),
    };

    response.unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (quieter for production)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client_config = ClientConfig::new(&cli.api_base)?
        .with_token(cli.token)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let cache_config = CacheConfig {
        capacity: cli.cache_capacity,
        ttl: (cli.cache_ttl_secs > 0).then(|| Duration::from_secs(cli.cache_ttl_secs)),
    };
    let has_token = client_config.token.is_some();

    let browser = Arc::new(RepoBrowser::new(client_config, cache_config, !cli.no_split)?);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router with fragment/API routes and static file serving
    let app = Router::new()
        .merge(routes::create_router(browser))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │              Repo Visualizer                │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Remote API: {}", cli.api_base);
    println!(
        "  Token:      {}",
        if has_token { "configured" } else { "none (low rate limit)" }
    );
    println!("  Server:     {}", url);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();
    tracing::info!(
        api_base = %cli.api_base,
        cache_capacity = cli.cache_capacity,
        "Server starting"
    );

    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

//! Succession compliance API server
//!
//! Serves statute-compliance reports for families over JSON:
//!
//! - Ad-hoc evaluation of a family aggregate posted by the caller
//! - Reports for families loaded from a fixture file
//! - Batch reports over many family ids
//!
//! ## Architecture
//!
//! The server is a thin caller of `compliance-engine`. Families are held in
//! an in-memory `FamilySource`; a storage-backed source can replace it
//! without touching the handlers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use clap::Parser;
use compliance_engine::{
    ComplianceService, InMemoryFamilySource, ReportOptions, ReviewCalendar,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{
    handle_batch_compliance, handle_check_compliance, handle_family_compliance, handle_health,
    handle_list_statutes,
};

/// Command-line arguments for the succession API server
#[derive(Parser, Debug)]
#[command(name = "succession-api")]
#[command(about = "Succession statute-compliance report server")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// JSON file with the families to serve ({"families": [...]})
    #[arg(short, long)]
    families: Option<PathBuf>,

    /// Days until a family's next compliance check
    #[arg(long, default_value_t = ReviewCalendar::DEFAULT_REVIEW_INTERVAL_DAYS)]
    review_interval_days: u32,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ComplianceService<InMemoryFamilySource>>,
    /// Days until the next check, stamped on every report
    pub review_interval_days: u32,
}

impl AppState {
    pub fn new(source: InMemoryFamilySource, review_interval_days: u32) -> Self {
        Self {
            service: Arc::new(ComplianceService::new(source)),
            review_interval_days,
        }
    }

    /// Options for a report evaluated now
    pub fn report_options(&self, include_recommendations: bool) -> ReportOptions {
        ReportOptions {
            include_recommendations,
            evaluated_at: Utc::now(),
            review_interval_days: self.review_interval_days,
        }
    }
}

/// API routes without transport middleware
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/statutes", get(handle_list_statutes))
        .route("/api/compliance", post(handle_check_compliance))
        .route("/api/compliance/batch", post(handle_batch_compliance))
        .route("/api/families/:id/compliance", get(handle_family_compliance))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting succession API on {}:{}", args.host, args.port);

    let source = match &args.families {
        Some(path) => {
            let source = InMemoryFamilySource::from_path(path)?;
            info!("Loaded {} families from {}", source.len(), path.display());
            source
        }
        None => {
            warn!("No --families file given; only POST /api/compliance will find data");
            InMemoryFamilySource::new()
        }
    };

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit: {}", args.rate_limit))?,
    );

    let state = AppState::new(source, args.review_interval_days);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes(state)
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Review interval: {} days", args.review_interval_days);

    // The rate limiter keys on the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for employees and attendance entries
//! - Bearer authentication middleware
//! - Error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, http::header::AUTHORIZATION};
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use rollcall_core::attendance::{EntryService, LedgerStore, RosterService};
use rollcall_shared::IdentityGate;

/// Application state shared across handlers.
pub struct AppState<S: LedgerStore> {
    /// Employee listing.
    pub roster: Arc<RosterService<S>>,
    /// Entry creation and listing.
    pub entries: Arc<EntryService<S>>,
    /// Bearer credential verification.
    pub gate: Arc<IdentityGate>,
}

impl<S: LedgerStore> AppState<S> {
    /// Builds both services over one shared store.
    #[must_use]
    pub fn new(store: Arc<S>, gate: IdentityGate) -> Self {
        Self {
            roster: Arc::new(RosterService::new(Arc::clone(&store))),
            entries: Arc::new(EntryService::new(store)),
            gate: Arc::new(gate),
        }
    }
}

impl<S: LedgerStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            roster: Arc::clone(&self.roster),
            entries: Arc::clone(&self.entries),
            gate: Arc::clone(&self.gate),
        }
    }
}

/// Router-level policy.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Apply the identity gate to the `/api` routes.
    pub require_token: bool,
    /// Upper bound on handling a single request.
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            require_token: false,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Creates the main application router.
pub fn create_router<S: LedgerStore + 'static>(state: AppState<S>, options: &RouterOptions) -> Router {
    Router::new()
        .merge(routes::ping::routes())
        .nest("/api", routes::api_routes(&state, options.require_token))
        .layer(TimeoutLayer::new(options.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

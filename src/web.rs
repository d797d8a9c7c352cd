// Web Server - axum router over the LookupService
// One page: GET /?sku=<id>

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::lookup::LookupService;
use crate::page;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    lookup: Arc<LookupService>,
}

/// First `sku` value in the query string; a blank value means no search
fn requested_sku(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "sku")
        .map(|(_, value)| value.as_str())
        .filter(|s| !s.is_empty())
}

/// GET / - Search form, comparison table or not-found message
async fn home(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    let sku = requested_sku(&params);
    let record = sku.and_then(|s| state.lookup.find(s));

    if let Some(sku) = sku {
        info!("Lookup SKU {}: {}", sku, if record.is_some() { "found" } else { "not found" });
    }

    Html(page::render(sku, record, state.lookup.snapshot().loaded_at()))
}

/// Build the router
pub fn create_app(lookup: LookupService) -> Router {
    let state = AppState {
        lookup: Arc::new(lookup),
    };

    Router::new()
        .route("/", get(home))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

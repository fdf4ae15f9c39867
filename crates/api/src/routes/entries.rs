//! Entry creation route.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;
use tracing::debug;

use rollcall_core::attendance::{EntryWithStats, LedgerStore, NewEntry};

use crate::{AppState, error::ApiError, middleware::MaybePrincipal};

/// Creates the entry routes.
pub fn routes<S: LedgerStore + 'static>() -> Router<AppState<S>> {
    Router::new().route("/entries", post(create_entry::<S>))
}

/// Request body for creating an entry.
///
/// Fields stay raw strings so that every validation failure is reported
/// the same way.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    /// Employee identifier.
    pub employee_id: String,
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// `WORKED` or `LEAVE`.
    #[serde(rename = "type")]
    pub entry_type: String,
}

/// POST `/entries` - Record a worked or leave day.
async fn create_entry<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    principal: MaybePrincipal,
    body: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryWithStats>), ApiError> {
    let Json(request) = body?;
    let entry = NewEntry::parse(&request.employee_id, &request.date, &request.entry_type)?;
    debug!(
        subject = principal.subject(),
        employee_id = %entry.employee_id,
        entry_type = %entry.entry_type,
        "Creating entry"
    );

    let created = state.entries.create_entry(entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

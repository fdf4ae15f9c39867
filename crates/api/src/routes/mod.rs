//! API route definitions.

use axum::{Router, middleware};

use rollcall_core::attendance::LedgerStore;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod employees;
pub mod entries;
pub mod ping;

#[cfg(test)]
mod tests;

/// Creates the router nested under `/api`.
///
/// With `require_token` every route goes through [`auth_middleware`].
pub fn api_routes<S: LedgerStore + 'static>(
    state: &AppState<S>,
    require_token: bool,
) -> Router<AppState<S>> {
    let routes = Router::new()
        .merge(employees::routes())
        .merge(entries::routes());

    if require_token {
        routes.layer(middleware::from_fn_with_state(
            state.gate.clone(),
            auth_middleware,
        ))
    } else {
        routes
    }
}

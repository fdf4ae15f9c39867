//! Employee routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::debug;

use rollcall_core::attendance::{Employee, EntryByYearMonthDayType, LedgerStore};
use rollcall_shared::EmployeeId;

use crate::{AppState, error::ApiError, middleware::MaybePrincipal};

/// Creates the employee routes.
pub fn routes<S: LedgerStore + 'static>() -> Router<AppState<S>> {
    Router::new()
        .route("/employees", get(list_employees::<S>))
        .route("/employees/{employee_id}/entries", get(list_entries::<S>))
}

/// GET `/employees` - List all employees.
async fn list_employees<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    principal: MaybePrincipal,
) -> Result<Json<Vec<Employee>>, ApiError> {
    debug!(subject = principal.subject(), "Listing employees");
    let employees = state.roster.list_employees().await?;
    Ok(Json(employees))
}

/// GET `/employees/{employee_id}/entries` - Entries of one employee by day.
async fn list_entries<S: LedgerStore + 'static>(
    State(state): State<AppState<S>>,
    principal: MaybePrincipal,
    Path(employee_id): Path<String>,
) -> Result<Json<Vec<EntryByYearMonthDayType>>, ApiError> {
    let employee_id = EmployeeId::parse(&employee_id)?;
    debug!(
        subject = principal.subject(),
        employee_id = %employee_id,
        "Listing entries"
    );

    let entries = state
        .entries
        .list_entries_for_employee(&employee_id)
        .await?;
    Ok(Json(entries))
}

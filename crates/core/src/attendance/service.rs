//! Entry and roster services.
//!
//! Services own no state: they validate, delegate to a [`LedgerStore`], and
//! map store outcomes onto API-level results.

use std::sync::Arc;

use rollcall_shared::types::EmployeeId;
use tracing::{debug, error, info};

use super::error::{CreateError, LedgerError};
use super::shaper;
use super::store::LedgerStore;
use super::types::{Employee, EntryByYearMonthDayType, EntryWithStats, NewEntry, PendingEntry};

/// Lists known employees.
pub struct RosterService<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> RosterService<S> {
    /// Creates a roster service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists all employees.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Unavailable` if the store fails.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, LedgerError> {
        self.store.list_employees().await.inspect_err(|e| {
            error!(error = %e, "Failed to list employees");
        })
    }
}

/// Records and lists attendance entries.
pub struct EntryService<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> EntryService<S> {
    /// Creates an entry service over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records a validated entry if the employee's balance allows it.
    ///
    /// The returned snapshot is the one computed by the store inside the
    /// write, never re-read afterwards.
    ///
    /// # Errors
    ///
    /// - `CreateError::InsufficientBalance` if the entry would make the
    ///   balance negative; nothing was persisted.
    /// - `CreateError::ValidationFailed` if the employee is unknown.
    /// - `CreateError::StoreFailure` for any other store failure.
    pub async fn create_entry(&self, entry: NewEntry) -> Result<EntryWithStats, CreateError> {
        let pending = PendingEntry::assign(entry);

        match self.store.insert_guarded(&pending).await {
            Ok(Some(stats)) => {
                debug!(
                    entry_id = %stats.id,
                    employee_id = %stats.employee_id,
                    entry_type = %stats.entry_type,
                    balance = stats.balance,
                    "Recorded attendance entry"
                );
                Ok(stats)
            }
            Ok(None) => {
                info!(
                    employee_id = %pending.employee_id,
                    date = %pending.date,
                    "Rejected leave entry: insufficient balance"
                );
                Err(CreateError::InsufficientBalance)
            }
            Err(LedgerError::NotFound(what)) => {
                info!(employee_id = %pending.employee_id, "Rejected entry for unknown employee");
                Err(LedgerError::NotFound(what).into())
            }
            Err(e) => {
                error!(error = %e, employee_id = %pending.employee_id, "Failed to record entry");
                Err(e.into())
            }
        }
    }

    /// Lists an employee's entries with their dates decomposed.
    ///
    /// An unknown employee yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Unavailable` if the store fails.
    pub async fn list_entries_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<EntryByYearMonthDayType>, LedgerError> {
        let records = self
            .store
            .entries_for_employee(employee_id)
            .await
            .inspect_err(|e| {
                error!(error = %e, employee_id = %employee_id, "Failed to list entries");
            })?;

        Ok(shaper::shape(records))
    }
}

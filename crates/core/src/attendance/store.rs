//! The persistence contract of the attendance ledger.

use rollcall_shared::types::EmployeeId;

use super::error::LedgerError;
use super::types::{Employee, EntryRecord, EntryWithStats, PendingEntry};

/// Storage for employees and their attendance entries.
///
/// This trait is implemented by the db crate on PostgreSQL and by
/// [`super::memory::MemoryLedgerStore`].
pub trait LedgerStore: Send + Sync {
    /// List all known employees.
    fn list_employees(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Employee>, LedgerError>> + Send;

    /// Atomically record `entry` if the employee's balance stays non-negative.
    ///
    /// Implementations must, as one atomic unit: recompute the employee's
    /// worked and leave counts including the candidate entry, persist the
    /// entry only if `worked - leave >= 0`, and return the resulting snapshot.
    /// Concurrent calls for the same employee must be linearizable with
    /// respect to the balance.
    ///
    /// Returns `Ok(None)` when the balance guard rejected the entry, in which
    /// case nothing was persisted. Returns `LedgerError::NotFound` when the
    /// employee does not exist.
    fn insert_guarded(
        &self,
        entry: &PendingEntry,
    ) -> impl std::future::Future<Output = Result<Option<EntryWithStats>, LedgerError>> + Send;

    /// All entries of one employee, in no particular order.
    ///
    /// An unknown employee yields an empty list.
    fn entries_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> impl std::future::Future<Output = Result<Vec<EntryRecord>, LedgerError>> + Send;
}

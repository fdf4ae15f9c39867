//! In-memory ledger store.
//!
//! Used by tests and local experiments. A single mutex guards the whole
//! ledger, so the balance check and the insert happen atomically.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use rollcall_shared::types::EmployeeId;

use super::balance::Tally;
use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::{Employee, EntryRecord, EntryWithStats, PendingEntry};

#[derive(Debug, Default)]
struct Ledger {
    employees: BTreeMap<EmployeeId, String>,
    entries: Vec<EntryRecord>,
}

/// A [`LedgerStore`] kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    ledger: Mutex<Ledger>,
}

impl MemoryLedgerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or renames an employee.
    pub fn add_employee(&self, id: EmployeeId, name: &str) {
        self.lock().employees.insert(id, name.to_string());
    }

    /// Number of persisted entries for `employee_id`.
    #[must_use]
    pub fn entry_count(&self, employee_id: &EmployeeId) -> usize {
        self.lock()
            .entries
            .iter()
            .filter(|e| &e.employee_id == employee_id)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        // A poisoned lock only means another thread panicked mid-test; the
        // ledger itself is never left half-written.
        self.ledger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl LedgerStore for MemoryLedgerStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, LedgerError> {
        Ok(self
            .lock()
            .employees
            .iter()
            .map(|(id, name)| Employee {
                name: name.clone(),
                id: id.clone(),
            })
            .collect())
    }

    async fn insert_guarded(
        &self,
        entry: &PendingEntry,
    ) -> Result<Option<EntryWithStats>, LedgerError> {
        let mut ledger = self.lock();

        if !ledger.employees.contains_key(&entry.employee_id) {
            return Err(LedgerError::NotFound(format!(
                "employee {}",
                entry.employee_id
            )));
        }

        let current = Tally::from_entries(
            ledger
                .entries
                .iter()
                .filter(|e| e.employee_id == entry.employee_id)
                .map(|e| e.entry_type),
        );

        let Some(next) = current.admit(entry.entry_type) else {
            return Ok(None);
        };

        ledger.entries.push(EntryRecord {
            entry_id: entry.id,
            employee_id: entry.employee_id.clone(),
            date: entry.date,
            entry_type: entry.entry_type,
        });

        Ok(Some(EntryWithStats {
            id: entry.id,
            employee_id: entry.employee_id.clone(),
            entry_type: entry.entry_type,
            date: entry.date,
            worked: next.worked,
            leave: next.leave,
            balance: next.balance(),
        }))
    }

    async fn entries_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<EntryRecord>, LedgerError> {
        Ok(self
            .lock()
            .entries
            .iter()
            .filter(|e| &e.employee_id == employee_id)
            .cloned()
            .collect())
    }
}

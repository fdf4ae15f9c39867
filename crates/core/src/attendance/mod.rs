//! Attendance ledger.
//!
//! This module implements the core attendance functionality:
//! - Domain types for employees, entries and response projections
//! - Leave balance accounting
//! - The ledger store contract and an in-memory implementation
//! - Entry and roster services
//! - The query shaper for per-day listings

pub mod balance;
pub mod error;
pub mod memory;
pub mod service;
pub mod shaper;
pub mod store;
pub mod types;


pub use balance::Tally;
pub use error::{CreateError, LedgerError};
pub use memory::MemoryLedgerStore;
pub use service::{EntryService, RosterService};
pub use store::LedgerStore;
pub use types::{
    Employee, EntryByYearMonthDayType, EntryRecord, EntryType, EntryWithStats, NewEntry,
    PendingEntry,
};

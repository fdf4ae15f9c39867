//! Attendance domain types.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use rollcall_shared::types::{EmployeeId, EntryId};

use super::error::CreateError;

/// Wire format of entry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Kind of attendance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// A worked day; accrues one day of balance.
    Worked,
    /// A leave day; consumes one day of balance.
    Leave,
}

impl EntryType {
    /// Returns the persisted and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worked => "WORKED",
            Self::Leave => "LEAVE",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = CreateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORKED" => Ok(Self::Worked),
            "LEAVE" => Ok(Self::Leave),
            other => Err(CreateError::ValidationFailed(format!(
                "type must be WORKED or LEAVE, got {other:?}"
            ))),
        }
    }
}

/// An employee known to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    /// Display name.
    pub name: String,
    /// Employee identifier.
    pub id: EmployeeId,
}

/// A validated request to record an attendance entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Employee the entry belongs to.
    pub employee_id: EmployeeId,
    /// Calendar day of the entry.
    pub date: NaiveDate,
    /// Worked or leave.
    pub entry_type: EntryType,
}

impl NewEntry {
    /// Validates raw request fields.
    ///
    /// # Errors
    ///
    /// Returns `CreateError::ValidationFailed` if the employee id is
    /// malformed, the date is not a valid `YYYY-MM-DD` calendar date, or the
    /// type is not `WORKED`/`LEAVE`.
    pub fn parse(employee_id: &str, date: &str, entry_type: &str) -> Result<Self, CreateError> {
        let employee_id = EmployeeId::parse(employee_id)
            .map_err(|e| CreateError::ValidationFailed(e.to_string()))?;
        let date = parse_date(date).ok_or_else(|| {
            CreateError::ValidationFailed(format!("date must be a YYYY-MM-DD calendar date, got {date:?}"))
        })?;
        let entry_type = entry_type.parse()?;

        Ok(Self {
            employee_id,
            date,
            entry_type,
        })
    }
}

/// Parses a strict `YYYY-MM-DD` date with a year in `1..=9999`.
///
/// `%Y` alone also accepts signed, unpadded and five-digit years.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|d| d.year() >= 1)
}

/// An entry with its server-generated identifier, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    /// Fresh identifier.
    pub id: EntryId,
    /// Employee the entry belongs to.
    pub employee_id: EmployeeId,
    /// Calendar day of the entry.
    pub date: NaiveDate,
    /// Worked or leave.
    pub entry_type: EntryType,
}

impl PendingEntry {
    /// Assigns a fresh identifier to a validated entry.
    #[must_use]
    pub fn assign(entry: NewEntry) -> Self {
        Self {
            id: EntryId::new(),
            employee_id: entry.employee_id,
            date: entry.date,
            entry_type: entry.entry_type,
        }
    }
}

/// A persisted entry as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Entry identifier.
    pub entry_id: EntryId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Calendar day.
    pub date: NaiveDate,
    /// Worked or leave.
    pub entry_type: EntryType,
}

/// Snapshot returned atomically with a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryWithStats {
    /// Entry identifier.
    pub id: EntryId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Worked or leave.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Calendar day.
    pub date: NaiveDate,
    /// Worked entries including this one.
    pub worked: i64,
    /// Leave entries including this one.
    pub leave: i64,
    /// `worked - leave` after this entry.
    pub balance: i64,
}

/// One listed entry, with its date decomposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryByYearMonthDayType {
    /// Year, e.g. `"2030"`.
    pub year: String,
    /// Month without zero padding, e.g. `"1"`.
    pub month: String,
    /// Day of month without zero padding, e.g. `"5"`.
    pub day: String,
    /// Worked or leave.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Entry identifier.
    pub entry_id: EntryId,
}

//! Shapes raw ledger rows into the listing response.

use chrono::Datelike;

use super::types::{EntryByYearMonthDayType, EntryRecord};

/// Decomposes each record's date into year, month and day strings.
///
/// The output is ordered by date, then by entry id, whatever order the
/// records arrive in.
#[must_use]
pub fn shape(mut records: Vec<EntryRecord>) -> Vec<EntryByYearMonthDayType> {
    records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.entry_id.cmp(&b.entry_id)));
    records.into_iter().map(shape_one).collect()
}

fn shape_one(record: EntryRecord) -> EntryByYearMonthDayType {
    EntryByYearMonthDayType {
        year: record.date.year().to_string(),
        month: record.date.month().to_string(),
        day: record.date.day().to_string(),
        entry_type: record.entry_type,
        entry_id: record.entry_id,
    }
}

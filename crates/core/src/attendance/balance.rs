//! Leave balance accounting.
//!
//! Every worked day accrues one day of balance and every leave day consumes
//! one. The balance of an employee is never allowed to go negative.

use super::types::EntryType;

/// Aggregate counts of an employee's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    /// Number of worked entries.
    pub worked: i64,
    /// Number of leave entries.
    pub leave: i64,
}

impl Tally {
    /// Creates a tally from raw counts.
    #[must_use]
    pub const fn new(worked: i64, leave: i64) -> Self {
        Self { worked, leave }
    }

    /// Returns `worked - leave`.
    #[must_use]
    pub const fn balance(self) -> i64 {
        self.worked - self.leave
    }

    /// Returns the tally after recording one more entry, without any check.
    #[must_use]
    pub const fn with(self, entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Worked => Self::new(self.worked + 1, self.leave),
            EntryType::Leave => Self::new(self.worked, self.leave + 1),
        }
    }

    /// Returns the tally after recording `entry_type`, or `None` if the
    /// resulting balance would be negative.
    #[must_use]
    pub const fn admit(self, entry_type: EntryType) -> Option<Self> {
        let next = self.with(entry_type);
        if next.balance() < 0 { None } else { Some(next) }
    }

    /// Counts a sequence of entry types.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = EntryType>,
    {
        entries.into_iter().fold(Self::default(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_leave_at_zero_balance_is_rejected() {
        assert_eq!(Tally::default().admit(EntryType::Leave), None);
        assert_eq!(Tally::new(2, 2).admit(EntryType::Leave), None);
    }

    #[test]
    fn test_leave_with_positive_balance_is_admitted() {
        let next = Tally::new(1, 0).admit(EntryType::Leave).unwrap();
        assert_eq!(next, Tally::new(1, 1));
        assert_eq!(next.balance(), 0);
    }

    #[test]
    fn test_worked_is_always_admitted() {
        assert_eq!(
            Tally::default().admit(EntryType::Worked),
            Some(Tally::new(1, 0))
        );
    }

    #[test]
    fn test_from_entries_counts() {
        let tally = Tally::from_entries([
            EntryType::Worked,
            EntryType::Worked,
            EntryType::Leave,
            EntryType::Worked,
        ]);
        assert_eq!(tally, Tally::new(3, 1));
        assert_eq!(tally.balance(), 2);
    }

    fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
        prop_oneof![Just(EntryType::Worked), Just(EntryType::Leave)]
    }

    proptest! {
        /// Applying any sequence through the guard never yields a negative balance,
        /// and rejected entries leave the tally unchanged.
        #[test]
        fn prop_balance_floor(types in prop::collection::vec(entry_type_strategy(), 0..200)) {
            let mut tally = Tally::default();
            for entry_type in types {
                match tally.admit(entry_type) {
                    Some(next) => {
                        prop_assert!(next.balance() >= 0);
                        prop_assert_eq!(next.worked + next.leave, tally.worked + tally.leave + 1);
                        tally = next;
                    }
                    None => {
                        prop_assert_eq!(entry_type, EntryType::Leave);
                        prop_assert_eq!(tally.balance(), 0);
                    }
                }
            }
            prop_assert!(tally.balance() >= 0);
        }

        /// Admitted leave never exceeds admitted work.
        #[test]
        fn prop_admitted_leave_bounded_by_work(types in prop::collection::vec(entry_type_strategy(), 0..200)) {
            let admitted: Vec<EntryType> = types
                .into_iter()
                .scan(Tally::default(), |tally, t| {
                    Some(tally.admit(t).map(|next| {
                        *tally = next;
                        t
                    }))
                })
                .flatten()
                .collect();
            let tally = Tally::from_entries(admitted);
            prop_assert!(tally.leave <= tally.worked);
        }
    }
}

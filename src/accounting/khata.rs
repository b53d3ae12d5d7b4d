use chrono::{DateTime, Utc};
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::entry::Entry;
use super::EntryError;

/// Net balance of `entries`: credits minus debits, in order.
/// `None` when the balance leaves `Decimal`'s range at any step.
pub fn calculate_total(entries: &[Entry]) -> Option<Decimal> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |acc, entry| acc.checked_add(entry.entry_type().signed(entry.price())))
}

/// One customer's running account.
///
/// `total` has no setter; it is recomputed from `entries` on every push, and a
/// push that would take it out of range is refused.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Khata {
    #[getset(get_copy = "pub")]
    id: Uuid,
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    entries: Vec<Entry>,
    #[getset(get_copy = "pub")]
    total: Decimal,
    #[getset(get_copy = "pub")]
    updated_at: DateTime<Utc>,
}

impl Khata {
    pub fn new(name: impl Into<String>) -> Khata {
        Khata {
            id: Uuid::new_v4(),
            name: name.into(),
            entries: Vec::new(),
            total: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    pub fn with_entries(
        name: impl Into<String>,
        entries: Vec<Entry>,
        updated_at: DateTime<Utc>,
    ) -> Result<Khata, EntryError> {
        let total = calculate_total(&entries).ok_or(EntryError::BalanceOverflow)?;

        Ok(Khata {
            id: Uuid::new_v4(),
            name: name.into(),
            entries,
            total,
            updated_at,
        })
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Leaves the khata untouched when the new balance would overflow.
    pub(crate) fn push_entry(&mut self, entry: Entry) -> Result<(), EntryError> {
        self.entries.push(entry);

        match calculate_total(&self.entries) {
            Some(total) => {
                self.total = total;
                self.updated_at = Utc::now();
                Ok(())
            },
            None => {
                self.entries.pop();
                Err(EntryError::BalanceOverflow)
            },
        }
    }
}

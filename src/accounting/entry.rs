use chrono::{DateTime, Utc};
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryType {
    /// Udhaar given, the customer owes more.
    #[default]
    Credit,
    /// Payment received.
    Debit,
}

impl EntryType {
    /// Contribution of `price` to a running balance.
    pub fn signed(&self, price: Decimal) -> Decimal {
        match self {
            EntryType::Credit => price,
            EntryType::Debit => -price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Entry {
    #[getset(get_copy = "pub")]
    id: Uuid,
    #[getset(get_copy = "pub")]
    date: DateTime<Utc>,
    #[getset(get = "pub")]
    item: String,
    #[getset(get_copy = "pub")]
    price: Decimal,
    #[getset(get_copy = "pub")]
    entry_type: EntryType,
}

impl Entry {
    pub fn new(item: impl Into<String>, price: Decimal, entry_type: EntryType) -> Entry {
        Entry::dated(Utc::now(), item, price, entry_type)
    }

    /// Builds an entry with a caller-supplied date, as seed data does.
    pub fn dated(date: DateTime<Utc>, item: impl Into<String>, price: Decimal, entry_type: EntryType) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            date,
            item: item.into(),
            price,
            entry_type,
        }
    }
}

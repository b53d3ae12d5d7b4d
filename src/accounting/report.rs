use rust_decimal::Decimal;
use uuid::Uuid;

use super::entry::Entry;
use super::khata::Khata;
use super::ledger::Ledger;

pub const RECENT_ACTIVITY_LIMIT: usize = 5;
pub const TOP_DEBTORS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub khata_id: Uuid,
    pub customer_name: String,
    pub entry: Entry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Debtor {
    pub name: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// `None` when the khatas together owe more than `Decimal` can hold.
    pub total_receivable: Option<Decimal>,
    pub customers: usize,
    pub recent_activity: Vec<Activity>,
    pub top_debtors: Vec<Debtor>,
}

pub fn summary(ledger: &Ledger) -> Summary {
    let total_receivable = ledger
        .khatas_iter()
        .try_fold(Decimal::ZERO, |acc, khata| acc.checked_add(khata.total()));

    let mut recent_activity: Vec<Activity> = ledger
        .khatas_iter()
        .flat_map(|khata| {
            khata.entries().iter().map(move |entry| Activity {
                khata_id: khata.id(),
                customer_name: khata.name().clone(),
                entry: entry.clone(),
            })
        })
        .collect();
    recent_activity.sort_by(|a, b| b.entry.date().cmp(&a.entry.date()));
    recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

    let mut top_debtors: Vec<Debtor> = ledger
        .khatas_iter()
        .map(|khata| Debtor {
            name: khata.name().clone(),
            amount: khata.total(),
        })
        .collect();
    top_debtors.sort_by(|a, b| b.amount.cmp(&a.amount));
    top_debtors.truncate(TOP_DEBTORS_LIMIT);

    Summary {
        total_receivable,
        customers: ledger.khatas().len(),
        recent_activity,
        top_debtors,
    }
}

/// Khatas whose name contains `query`, ignoring case. An empty query matches all.
pub fn search<'a>(ledger: &'a Ledger, query: &str) -> Vec<&'a Khata> {
    let query = query.to_lowercase();

    ledger
        .khatas_iter()
        .filter(|khata| khata.name().to_lowercase().contains(&query))
        .collect()
}

use std::fs;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::accounting::entry::{Entry, EntryType};
use crate::accounting::khata::Khata;
use crate::accounting::ledger::Ledger;
use crate::accounting::sources::{SourceKind, TextProducer};

const INVOICE_DATE_FORMAT: &str = "%Y-%m-%d";
const INVOICE_HEADER: [&str; 4] = ["date", "item", "type", "amount"];

#[derive(Debug, Serialize)]
pub struct InvoiceRow {
    pub date: String,
    pub item: String,
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub amount: String,
}

impl From<&Entry> for InvoiceRow {
    fn from(entry: &Entry) -> Self {
        let type_ = match entry.entry_type() {
            EntryType::Credit => "Udhaar",
            EntryType::Debit => "Payment",
        };

        InvoiceRow {
            date: entry.date().format(INVOICE_DATE_FORMAT).to_string(),
            item: entry.item().clone(),
            type_,
            amount: format_amount(entry.entry_type().signed(entry.price())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KhataRecord {
    pub id: Uuid,
    pub name: String,
    pub entries: usize,
    pub total: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<&Khata> for KhataRecord {
    fn from(khata: &Khata) -> Self {
        KhataRecord {
            id: khata.id(),
            name: khata.name().clone(),
            entries: khata.entries().len(),
            total: khata.total(),
            updated_at: khata.updated_at(),
        }
    }
}

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Writes the khata's entries in insertion order, followed by a `Total Due` row.
pub fn export_invoice<W: Write>(khata: &Khata, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(INVOICE_HEADER)?;
    for entry in khata.entries() {
        let row: InvoiceRow = entry.into();
        csv_writer.serialize(row)?;
    }
    let total = format_amount(khata.total());
    csv_writer.write_record(["", "", "Total Due", total.as_str()])?;

    csv_writer.flush()?;

    Ok(())
}

pub fn export_summary<W: Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for khata in ledger.khatas_iter() {
        let record: KhataRecord = khata.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

pub fn read_source(file_path: &str, kind: SourceKind) -> Result<TextProducer> {
    let raw = fs::read_to_string(file_path)?;
    debug!("read import source, path={}, kind={:?}, bytes={}", file_path, kind, raw.len());

    Ok(TextProducer::from_kind(kind, raw))
}

fn seed_entry(date: &str, item: &str, price: Decimal, entry_type: EntryType) -> Result<Entry> {
    Ok(Entry::dated(date.parse()?, item, price, entry_type))
}

/// The demo shop's starting khatas.
pub fn seed_ledger() -> Result<Ledger> {
    let ali = Khata::with_entries(
        "Ali",
        vec![
            seed_entry("2025-01-15T00:00:00Z", "Chini", Decimal::from(200), EntryType::Credit)?,
            seed_entry("2025-01-16T00:00:00Z", "Aata", Decimal::from(300), EntryType::Credit)?,
            seed_entry("2025-01-20T00:00:00Z", "Payment", Decimal::from(100), EntryType::Debit)?,
        ],
        "2025-01-20T10:00:00Z".parse()?,
    )?;

    let fahad = Khata::with_entries(
        "Fahad",
        vec![seed_entry("2025-01-18T00:00:00Z", "Oil", Decimal::from(500), EntryType::Credit)?],
        "2025-01-18T14:30:00Z".parse()?,
    )?;

    Ok(Ledger::with_khatas(vec![ali, fahad]))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_seed_ledger() -> Result<()> {
        let ledger = seed_ledger()?;

        let totals: Vec<(&str, Decimal)> = ledger
            .khatas_iter()
            .map(|khata| (khata.name().as_str(), khata.total()))
            .collect();
        assert_eq!(totals, vec![("Ali", dec!(400)), ("Fahad", dec!(500))]);

        Ok(())
    }

    #[test]
    fn test_seed_then_bulk_import() -> Result<()> {
        let mut ledger = seed_ledger()?;
        let report = ledger.add_bulk_entries("Ali abc 200");

        assert_eq!(report.success, 1);
        assert_eq!(ledger.get_khata("Ali").map(|khata| khata.total()), Some(dec!(600)));

        Ok(())
    }

    #[test]
    fn test_export_invoice() -> Result<()> {
        let ledger = seed_ledger()?;
        let ali = ledger.get_khata("Ali").unwrap();

        let mut output = Vec::new();
        export_invoice(ali, &mut output)?;

        assert_eq!(
            String::from_utf8(output)?,
            "date,item,type,amount\n\
             2025-01-15,Chini,Udhaar,200.00\n\
             2025-01-16,Aata,Udhaar,300.00\n\
             2025-01-20,Payment,Payment,-100.00\n\
             ,,Total Due,400.00\n"
        );

        Ok(())
    }

    #[test]
    fn test_export_invoice_empty_khata() -> Result<()> {
        let mut output = Vec::new();
        export_invoice(&Khata::new("Ahmed"), &mut output)?;

        assert_eq!(String::from_utf8(output)?, "date,item,type,amount\n,,Total Due,0.00\n");

        Ok(())
    }

    #[test]
    fn test_export_summary() -> Result<()> {
        let ledger = seed_ledger()?;

        let mut output = Vec::new();
        export_summary(&ledger, &mut output)?;
        let output = String::from_utf8(output)?;

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,name,entries,total,updated_at");
        assert!(lines[1].contains(",Ali,3,400,2025-01-20T10:00:00Z"));
        assert!(lines[2].contains(",Fahad,1,500,2025-01-18T14:30:00Z"));

        Ok(())
    }
}

use std::slice::Iter;

use log::{debug, info};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::entry::{Entry, EntryType};
use super::khata::Khata;
use super::parser::{parse_line, ParsedLine};
use super::{EntryError, ImportError, LineError, TextSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Uuid),
    /// A khata with the same name (ignoring case) already exists; carries its id.
    DuplicateSkipped(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Applied(Uuid),
    NotFound,
    /// The khata exists but the entry was refused; the khata is unchanged.
    Rejected(EntryError),
}

#[derive(Debug, Default, PartialEq)]
pub struct BulkImportReport {
    pub success: usize,
    pub errors: Vec<LineError>,
    pub added: Vec<ParsedLine>,
}

impl BulkImportReport {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|err| err.to_string()).collect()
    }
}

/// Owns every khata. Listing order is newest-first for explicitly created
/// khatas; khatas created by a bulk import are appended in line order.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    khatas: Vec<Khata>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger { khatas: Vec::new() }
    }

    pub fn with_khatas(khatas: Vec<Khata>) -> Ledger {
        Ledger { khatas }
    }

    pub fn khatas(&self) -> &[Khata] {
        &self.khatas
    }

    pub fn khatas_iter(&self) -> Iter<Khata> {
        self.khatas.iter()
    }

    pub fn create_khata(&mut self, name: &str) -> CreateOutcome {
        if let Some(existing) = find_by_name(&self.khatas, name) {
            debug!("khata already exists, name={}", name);
            return CreateOutcome::DuplicateSkipped(self.khatas[existing].id());
        }

        let khata = Khata::new(name);
        let id = khata.id();
        info!("created khata, name={}, id={}", name, id);
        self.khatas.insert(0, khata);

        CreateOutcome::Created(id)
    }

    pub fn add_entry(&mut self, khata_id: Uuid, item: &str, price: Decimal, entry_type: EntryType) -> EntryOutcome {
        let Some(khata) = self.khatas.iter_mut().find(|khata| khata.id() == khata_id) else {
            debug!("entry target not found, khata_id={}", khata_id);
            return EntryOutcome::NotFound;
        };

        let entry = Entry::new(item, price, entry_type);
        let id = entry.id();
        match khata.push_entry(entry) {
            Ok(()) => EntryOutcome::Applied(id),
            Err(error) => {
                debug!("entry rejected, khata_id={}, err={}", khata_id, error);
                EntryOutcome::Rejected(error)
            },
        }
    }

    /// Imports one credit entry per non-blank line of `text`.
    ///
    /// Lines are applied to a working copy of the khatas, so a name created on
    /// an earlier line is found by later ones. The copy replaces the visible
    /// khatas only once every line has been processed.
    pub fn add_bulk_entries(&mut self, text: &str) -> BulkImportReport {
        let mut working = self.khatas.clone();
        let mut report = BulkImportReport::default();

        let lines = text.lines().filter(|line| !line.trim().is_empty());
        for (index, line) in lines.enumerate() {
            if let Err(error) = apply_line(&mut working, line, &mut report) {
                debug!("rejected bulk line, line={}, err={}", index + 1, error);
                report.errors.push(LineError { line: index + 1, error });
            }
        }

        self.khatas = working;

        report
    }

    pub fn import_from<S: TextSource>(&mut self, source: &S) -> BulkImportReport {
        self.add_bulk_entries(&source.text())
    }

    /// Looks up by exact id first, then by name ignoring case.
    pub fn get_khata(&self, id_or_name: &str) -> Option<&Khata> {
        if let Ok(id) = Uuid::parse_str(id_or_name) {
            if let Some(khata) = self.khatas.iter().find(|khata| khata.id() == id) {
                return Some(khata);
            }
        }

        find_by_name(&self.khatas, id_or_name).map(|position| &self.khatas[position])
    }

    /// Returns whether a khata was removed.
    pub fn delete_khata(&mut self, id: Uuid) -> bool {
        let before = self.khatas.len();
        self.khatas.retain(|khata| khata.id() != id);

        let removed = self.khatas.len() != before;
        if removed {
            info!("deleted khata, id={}", id);
        }

        removed
    }
}

/// Applies one bulk line to `working`. On error `working` is left as it was.
fn apply_line(working: &mut Vec<Khata>, line: &str, report: &mut BulkImportReport) -> Result<(), ImportError> {
    let parsed = parse_line(line)?;
    let entry = Entry::new(parsed.item.as_str(), parsed.price, EntryType::Credit);

    match find_by_name(working, &parsed.name) {
        Some(position) => working[position].push_entry(entry)?,
        None => {
            let mut khata = Khata::new(parsed.name.as_str());
            khata.push_entry(entry)?;
            info!("created khata from import, name={}, id={}", parsed.name, khata.id());
            working.push(khata);
        },
    }

    report.success += 1;
    report.added.push(parsed);

    Ok(())
}

fn find_by_name(khatas: &[Khata], name: &str) -> Option<usize> {
    khatas.iter().position(|khata| khata.matches_name(name))
}

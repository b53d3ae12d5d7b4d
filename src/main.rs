use anyhow::{anyhow, Result};
use log::info;
use std::env;

use khata::accounting::sources::SourceKind;
use khata::data;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: cargo run -- <text|ocr|voice> <input_file> [customer]");
        std::process::exit(1);
    }

    let kind: SourceKind = args[1].parse()?;
    let source = data::read_source(&args[2], kind)?;

    let mut ledger = data::seed_ledger()?;
    let report = ledger.import_from(&source);
    info!("imported {} entries, {} errors", report.success, report.errors.len());
    for error in &report.errors {
        eprintln!("{}", error);
    }

    match args.get(3) {
        Some(customer) => {
            let khata = ledger
                .get_khata(customer)
                .ok_or_else(|| anyhow!("khata not found: {}", customer))?;
            data::export_invoice(khata, std::io::stdout())?;
        },
        None => data::export_summary(&ledger, std::io::stdout())?,
    }

    Ok(())
}

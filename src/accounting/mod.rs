use enum_dispatch::enum_dispatch;
use thiserror::Error;

pub mod entry;
pub mod khata;
pub mod ledger;
pub mod parser;
pub mod report;
pub mod sources;


use sources::{OcrText, TextProducer, TypedText, VoiceTranscript};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Invalid format (needs Name Item Price)")]
    TooFewTokens,
    #[error("Invalid price '{0}'")]
    InvalidPrice(String),
    #[error("Missing item")]
    EmptyItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("Balance out of range")]
    BalanceOverflow,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// A rejected bulk-import line. `line` counts non-blank lines only, starting at 1.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Line {line}: {error}")]
pub struct LineError {
    pub line: usize,
    pub error: ImportError,
}

#[derive(Debug, PartialEq, Error)]
pub enum SourceError {
    #[error("unknown text source '{0}', expected one of: text, ocr, voice")]
    UnknownSourceKind(String),
}

/// Anything that hands raw `Name Item... Price` lines to the bulk importer.
#[enum_dispatch]
pub trait TextSource {
    fn text(&self) -> String;
}

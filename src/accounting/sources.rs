use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use super::parser::parse_price;
use super::{SourceError, TextSource};

const MOCK_TRANSCRIPT: &str = "Ali ko 200 ki chini\nAhmed ko 500 ka aata";
const VOICE_PARTICLES: [&str; 3] = [" ko ", " ki ", " ka "];

#[enum_dispatch(TextSource)]
#[derive(Debug, Clone, PartialEq)]
pub enum TextProducer {
    TypedText,
    OcrText,
    VoiceTranscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Ocr,
    Voice,
}

impl FromStr for SourceKind {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SourceKind::Text),
            "ocr" => Ok(SourceKind::Ocr),
            "voice" => Ok(SourceKind::Voice),
            _ => Err(SourceError::UnknownSourceKind(s.to_string())),
        }
    }
}

impl TextProducer {
    pub fn from_kind(kind: SourceKind, raw: impl Into<String>) -> TextProducer {
        match kind {
            SourceKind::Text => TypedText::new(raw).into(),
            SourceKind::Ocr => OcrText::new(raw).into(),
            SourceKind::Voice => VoiceTranscript::new(raw).into(),
        }
    }
}

/// Text typed by the user, handed over as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedText {
    text: String,
}

impl TypedText {
    pub fn new(text: impl Into<String>) -> TypedText {
        TypedText { text: text.into() }
    }
}

impl TextSource for TypedText {
    fn text(&self) -> String {
        self.text.clone()
    }
}

/// Output of a text recognizer. Lines that don't look like an entry are dropped.
/// The amount keeps only digits and dots, and then only its leading number, so
/// `Rs200/-` becomes `200` and `1.2.3` becomes `1.2`.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrText {
    recognized: String,
}

impl OcrText {
    pub fn new(recognized: impl Into<String>) -> OcrText {
        OcrText {
            recognized: recognized.into(),
        }
    }

    fn normalize_line(line: &str) -> Option<String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [name, item @ .., amount] = tokens.as_slice() else {
            return None;
        };
        if item.is_empty() {
            return None;
        }

        let amount = OcrText::leading_number(amount)?;
        if parse_price(&amount).is_err() {
            return None;
        }

        Some(format!("{} {} {}", name, item.join(" "), amount))
    }

    fn leading_number(raw: &str) -> Option<String> {
        let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        let mut parts = cleaned.splitn(3, '.');
        let whole = parts.next().unwrap_or("");
        let fraction = parts.next().unwrap_or("");

        match (whole, fraction) {
            ("", "") => None,
            (whole, "") => Some(whole.to_string()),
            ("", fraction) => Some(format!("0.{}", fraction)),
            (whole, fraction) => Some(format!("{}.{}", whole, fraction)),
        }
    }
}

impl TextSource for OcrText {
    fn text(&self) -> String {
        self.recognized
            .lines()
            .filter_map(OcrText::normalize_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A spoken entry such as `Ali ko 200 ki chini`, rewritten to `Ali chini 200`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceTranscript {
    transcript: String,
}

impl VoiceTranscript {
    pub fn new(transcript: impl Into<String>) -> VoiceTranscript {
        VoiceTranscript {
            transcript: transcript.into(),
        }
    }

    /// Stand-in for a speech recognizer; always hears the same two entries.
    pub fn mock() -> VoiceTranscript {
        VoiceTranscript::new(MOCK_TRANSCRIPT)
    }

    fn reorder_line(line: &str) -> String {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [name, amount, item @ ..] if !item.is_empty() => format!("{} {} {}", name, item.join(" "), amount),
            _ => line.to_string(),
        }
    }
}

impl TextSource for VoiceTranscript {
    fn text(&self) -> String {
        let stripped = VOICE_PARTICLES
            .iter()
            .fold(self.transcript.clone(), |text, particle| text.replace(particle, " "));

        stripped
            .lines()
            .map(VoiceTranscript::reorder_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_typed_text_is_unchanged() {
        let source = TypedText::new("Ali Chini 200\n\nFahad Oil 500");

        assert_eq!(source.text(), "Ali Chini 200\n\nFahad Oil 500");
    }

    #[test]
    fn test_ocr_strips_amount_noise_and_drops_junk() {
        let source = OcrText::new("AlHamd Super Store\nAli Chini Rs200/-\n\nFahad Oil 500\nnoise\nAhmed Daal abc");

        assert_eq!(source.text(), "Ali Chini 200\nFahad Oil 500");
    }

    #[test]
    fn test_ocr_keeps_multi_word_items() {
        let source = OcrText::new("  Ahmed   Basmati Rice  120.5 ");

        assert_eq!(source.text(), "Ahmed Basmati Rice 120.5");
    }

    #[test]
    fn test_ocr_takes_leading_number_of_amount() {
        let source = OcrText::new("Ali Chini 1.2.3\nFahad Oil .5\nAhmed Daal 120.\nBilal Ghee ...");

        assert_eq!(source.text(), "Ali Chini 1.2\nFahad Oil 0.5\nAhmed Daal 120");
    }

    #[test]
    fn test_voice_mock_transcript() {
        assert_eq!(VoiceTranscript::mock().text(), "Ali chini 200\nAhmed aata 500");
    }

    #[test]
    fn test_voice_short_lines_pass_through() {
        let source = VoiceTranscript::new("Ali 200");

        assert_eq!(source.text(), "Ali 200");
    }

    #[test]
    fn test_producer_dispatch() {
        let producer = TextProducer::from_kind(SourceKind::Voice, "Ahmed ko 500 ka aata");

        assert_eq!(producer.text(), "Ahmed aata 500");
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("OCR".parse::<SourceKind>(), Ok(SourceKind::Ocr));
        assert_eq!("text".parse::<SourceKind>(), Ok(SourceKind::Text));
        assert_eq!(
            "fax".parse::<SourceKind>(),
            Err(SourceError::UnknownSourceKind("fax".to_string()))
        );
    }
}

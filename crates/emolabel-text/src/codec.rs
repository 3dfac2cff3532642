//! Text-entry CSV import and export.
//!
//! Import takes any CSV with a header row and treats the first column as
//! the text, whatever its name. Export writes a BOM, the fixed header, and
//! one row per entry in `original_index` order, with the text quoted and
//! formula-like text neutralized with a leading `'`.

use chrono::{NaiveDate, Utc};
use emolabel_core::{EmoLabelError, EmotionKey, Result};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

use crate::entry::TextEntry;

/// Export header, text column first and then [`EmotionKey::ALL`] order.
pub const EXPORT_HEADER: [&str; 9] = [
    "Text",
    "Joy",
    "Sadness",
    "Anticipation",
    "Surprise",
    "Anger",
    "Fear",
    "Disgust",
    "Trust",
];

const BOM: char = '\u{feff}';

/// Leading characters a spreadsheet may evaluate as a formula.
const FORMULA_TRIGGERS: [char; 6] = ['=', '+', '-', '@', '\t', '\r'];

fn csv_error(e: impl std::fmt::Display) -> EmoLabelError {
    EmoLabelError::Csv(e.to_string())
}

/// Parse an imported CSV into unscored entries.
///
/// Any parse error, a missing header, or a file with no data rows fails
/// the whole import.
pub fn parse_entries(data: &str) -> Result<Vec<TextEntry>> {
    let data = data.strip_prefix(BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(data.as_bytes());

    let columns = reader.headers().map_err(csv_error)?.len();
    if columns == 0 {
        return Err(EmoLabelError::EmptyInput("No columns found in CSV file".into()));
    }

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let text = record.get(0).unwrap_or_default();
        entries.push(TextEntry::new(text, index));
    }
    if entries.is_empty() {
        return Err(EmoLabelError::EmptyInput("No data found in CSV file".into()));
    }

    info!(entries = entries.len(), columns, "Imported text entries");
    Ok(entries)
}

/// Read and parse a `.csv` file.
pub fn load_entries_from_file(path: &Path) -> Result<Vec<TextEntry>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(EmoLabelError::Csv(format!(
            "Not a CSV file: {}",
            path.display()
        )));
    }
    let data = std::fs::read_to_string(path)?;
    parse_entries(&data)
}

/// Serialize entries for download. The input order does not matter; rows
/// come out sorted by `original_index`.
pub fn export_entries(entries: &[TextEntry]) -> Result<String> {
    let mut sorted: Vec<&TextEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.original_index);

    let mut buffer = format!("{}{}\n", BOM, EXPORT_HEADER.join(",")).into_bytes();
    {
        // Only the text column is quoted. The header and score digits stay
        // bare, which is the row shape downstream sheets expect, even though
        // the general CSV rule here would quote every field. Text that reads
        // as a number is left bare as well; it decodes the same either way.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(&mut buffer);
        for entry in &sorted {
            let mut record = vec![escape_formula(&entry.text).into_owned()];
            record.extend(entry.emotions.iter().map(|(_, score)| score.to_string()));
            writer.write_record(&record).map_err(csv_error)?;
        }
        writer.flush()?;
    }
    let text = String::from_utf8(buffer).map_err(csv_error)?;
    debug!(entries = sorted.len(), "Encoded text entries as CSV");
    Ok(text)
}

/// Decode an export back into scored entries, undoing formula escaping.
pub fn decode_export(data: &str) -> Result<Vec<TextEntry>> {
    let data = data.strip_prefix(BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());

    let headers = reader.headers().map_err(csv_error)?;
    if headers.iter().ne(EXPORT_HEADER) {
        return Err(EmoLabelError::Csv(format!(
            "Expected header '{}'",
            EXPORT_HEADER.join(",")
        )));
    }

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let mut entry = TextEntry::new(unescape_formula(record.get(0).unwrap_or_default()), index);
        for (column, key) in EmotionKey::ALL.into_iter().enumerate() {
            let field = record.get(column + 1).unwrap_or_default().trim();
            let score = field.parse::<u8>().map_err(|_| {
                EmoLabelError::Csv(format!("Row {}: invalid {} score '{}'", index + 1, key, field))
            })?;
            entry.emotions.set(key, score)?;
        }
        entries.push(entry);
    }
    Ok(entries)
}

/// `emotion-labels-YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("emotion-labels-{}.csv", date.format("%Y-%m-%d"))
}

/// [`export_file_name`] for the current UTC date.
pub fn export_file_name_today() -> String {
    export_file_name(Utc::now().date_naive())
}

/// Prefix `'` to text a spreadsheet could evaluate. Text already starting
/// with `'` is prefixed as well so decoding is unambiguous.
fn escape_formula(text: &str) -> Cow<'_, str> {
    match text.chars().next() {
        Some(c) if FORMULA_TRIGGERS.contains(&c) || c == '\'' => Cow::Owned(format!("'{}", text)),
        _ => Cow::Borrowed(text),
    }
}

fn unescape_formula(text: &str) -> &str {
    text.strip_prefix('\'').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_column_is_text() {
        let entries = parse_entries("Sentence,Score\n\"Hello, world\",3\nBye,4\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Hello, world");
        assert_eq!(entries[1].original_index, 1);
        assert!(entries.iter().all(|e| !e.is_completed()));
    }

    #[test]
    fn test_import_failures_are_total() {
        assert!(matches!(
            parse_entries("Text\n"),
            Err(EmoLabelError::EmptyInput(_))
        ));
        assert!(matches!(parse_entries(""), Err(EmoLabelError::EmptyInput(_))));
        assert!(matches!(
            parse_entries("Text,Joy\nfine,0\nbroken\n"),
            Err(EmoLabelError::Csv(_))
        ));
    }

    #[test]
    fn test_export_escapes_formulas() {
        let entries = vec![
            TextEntry::new("=SUM(A1:A9)", 0),
            TextEntry::new("say \"hi\"", 1),
            TextEntry::new("'quoted", 2),
        ];
        let out = export_entries(&entries).unwrap();
        assert!(out.starts_with('\u{feff}'));
        let lines: Vec<&str> = out.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines[0], "Text,Joy,Sadness,Anticipation,Surprise,Anger,Fear,Disgust,Trust");
        assert_eq!(lines[1], "\"'=SUM(A1:A9)\",0,0,0,0,0,0,0,0");
        assert_eq!(lines[2], "\"say \"\"hi\"\"\",0,0,0,0,0,0,0,0");
        assert_eq!(lines[3], "\"''quoted\",0,0,0,0,0,0,0,0");
    }

    #[test]
    fn test_export_decode_round_trip() {
        let mut entries = vec![
            TextEntry::new("-minus", 0),
            TextEntry::new("line\nbreak", 1),
            TextEntry::new("'apostrophe", 2),
        ];
        entries[1].emotions.toggle(EmotionKey::Anger);
        entries.reverse();

        let decoded = decode_export(&export_entries(&entries).unwrap()).unwrap();
        let texts: Vec<&str> = decoded.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["-minus", "line\nbreak", "'apostrophe"]);
        assert_eq!(decoded[1].emotions.get(EmotionKey::Anger), 1);
        assert_eq!(decoded[0].emotions, Default::default());
    }

    #[test]
    fn test_export_quotes_only_text() {
        let mut entries = vec![
            TextEntry::new("plain", 0),
            TextEntry::new("a,b\nc", 1),
            TextEntry::new("42", 2),
        ];
        entries[0].emotions.toggle(EmotionKey::Trust);

        let out = export_entries(&entries).unwrap();
        let body = out.trim_start_matches('\u{feff}');
        assert!(body.starts_with("Text,Joy,"));
        assert!(body.contains("\"plain\",0,0,0,0,0,0,0,1\n"));
        assert!(body.contains("\"a,b\nc\",0,0,0,0,0,0,0,0\n"));

        let decoded = decode_export(&out).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[1].text, "a,b\nc");
        assert_eq!(decoded[2].text, "42");
    }

    #[test]
    fn test_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "emotion-labels-2024-03-09.csv");
        assert!(export_file_name_today().starts_with("emotion-labels-"));
    }

    #[test]
    fn test_non_csv_file_is_rejected() {
        let err = load_entries_from_file(Path::new("notes.txt")).unwrap_err();
        assert!(err.is_input_error());
    }
}

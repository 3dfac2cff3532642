//! Integration tests for text-entry labeling.
//!
//! Drives emolabel-text imports and exports through the emolabel-session
//! annotator and the shared keyboard hub.

use emolabel_core::{EmotionKey, KeyInput};
use emolabel_session::{KeyboardHub, TextAction, TextAnnotator};
use emolabel_text::{decode_export, export_entries, parse_entries, Navigation, TextEntry};

const SCENARIO: &str = "Text,Joy\n\"I'm happy\",0\n\"I'm sad\",0";

fn data_rows(csv: &str) -> Vec<&str> {
    csv.trim_start_matches('\u{feff}').lines().skip(1).collect()
}

#[test]
fn toggle_joy_then_export() {
    let mut annotator = TextAnnotator::new();
    assert_eq!(annotator.import(SCENARIO).unwrap(), 2);

    let entries = annotator.session().entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.emotions.get(EmotionKey::Joy) == 0));

    let hub = KeyboardHub::new();
    annotator.attach(&hub);
    hub.dispatch(KeyInput::Digit(1));
    assert_eq!(
        annotator.process_input(),
        vec![TextAction::Toggled {
            key: EmotionKey::Joy,
            score: 1
        }]
    );

    let csv = annotator.export_csv().unwrap();
    assert_eq!(
        data_rows(&csv),
        ["\"I'm happy\",1,0,0,0,0,0,0,0", "\"I'm sad\",0,0,0,0,0,0,0,0"]
    );
}

#[test]
fn import_indexes_rows_in_file_order() {
    let data = "Comment\nfirst\nsecond\nthird\nfourth\n";
    let entries = parse_entries(data).unwrap();
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.original_index, i);
    }
}

#[test]
fn export_restores_row_order_after_shuffle() {
    let mut entries = parse_entries("Text\na\nb\nc\nd\ne\n").unwrap();
    entries[3].emotions.toggle(EmotionKey::Fear);
    entries.reverse();
    entries.swap(0, 2);

    let csv = export_entries(&entries).unwrap();
    let texts: Vec<_> = data_rows(&csv)
        .into_iter()
        .map(|row| row.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(texts, ["\"a\"", "\"b\"", "\"c\"", "\"d\"", "\"e\""]);

    let decoded = decode_export(&csv).unwrap();
    assert_eq!(decoded[3].emotions.get(EmotionKey::Fear), 1);
    assert_eq!(decoded[3].text, "d");
}

#[test]
fn export_then_decode_keeps_text_and_scores() {
    let mut entries = vec![
        TextEntry::new("=1+1", 0),
        TextEntry::new("comma, \"quote\"", 1),
        TextEntry::new("-minus", 2),
    ];
    entries[1].emotions.toggle(EmotionKey::Trust);
    entries[2].emotions.toggle(EmotionKey::Joy);
    entries[2].emotions.toggle(EmotionKey::Anger);

    let decoded = decode_export(&export_entries(&entries).unwrap()).unwrap();
    let texts: Vec<_> = decoded.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["=1+1", "comma, \"quote\"", "-minus"]);
    for (original, restored) in entries.iter().zip(&decoded) {
        assert_eq!(original.emotions, restored.emotions);
    }
}

#[test]
fn arrows_navigate_and_report_bounds() {
    let hub = KeyboardHub::new();
    let mut annotator = TextAnnotator::new();
    annotator.import(SCENARIO).unwrap();
    annotator.attach(&hub);

    for key in [
        KeyInput::ArrowLeft,
        KeyInput::ArrowRight,
        KeyInput::ArrowRight,
    ] {
        hub.dispatch(key);
    }
    assert_eq!(
        annotator.process_input(),
        vec![
            TextAction::Navigated(Navigation::AtStart),
            TextAction::Navigated(Navigation::Moved(1)),
            TextAction::Navigated(Navigation::AtEnd),
        ]
    );
}

#[test]
fn failed_import_keeps_loaded_entries() {
    let mut annotator = TextAnnotator::new();
    annotator.import(SCENARIO).unwrap();

    assert!(annotator.import("Text\n").is_err());
    assert_eq!(annotator.session().len(), 2);
}

#[test]
fn empty_session_refuses_export() {
    let annotator = TextAnnotator::new();
    assert!(annotator.export_csv().is_err());
}

//! Integration tests for the event log and its codecs.
//!
//! Exercises emolabel-core catalogs flowing through emolabel-timeline
//! recording, querying, projection and both export formats.

use emolabel_core::{EmotionCatalog, EmotionDef};
use emolabel_timeline::{
    decode_events_csv, encode_events_csv, project, EmotionDataExport, EventLog, EventPatch,
    SortKey, TimelineProjector,
};
use proptest::prelude::*;
use std::sync::Arc;

// ── Helpers ────────────────────────────────────────────────────

fn standard() -> Arc<EmotionCatalog> {
    Arc::new(EmotionCatalog::standard())
}

/// A catalog whose labels need quoting in CSV.
fn awkward() -> Arc<EmotionCatalog> {
    Arc::new(
        EmotionCatalog::new(vec![
            EmotionDef::new("calm", "Calm, relaxed (平静)", 'a', "#88CCEE"),
            EmotionDef::new("tense", "Tense (\"on edge\")", 'b', "#CC6677"),
            EmotionDef::new("plain", "Plain", 'c', "#DDCC77"),
        ])
        .unwrap(),
    )
}

fn log_with(catalog: Arc<EmotionCatalog>, events: &[(&str, f64)]) -> EventLog {
    let mut log = EventLog::new(catalog);
    for (emotion, time) in events {
        log.record(emotion, *time).unwrap();
    }
    log
}

fn csv_round_trip(log: &EventLog) -> EventLog {
    let csv = encode_events_csv(log).unwrap();
    decode_events_csv(&csv, log.catalog_arc()).unwrap()
}

fn json_round_trip(log: &EventLog, duration: f64) -> EventLog {
    let json = EmotionDataExport::from_log(log, duration).to_json().unwrap();
    EmotionDataExport::from_json(&json)
        .unwrap()
        .into_log(log.catalog_arc())
        .unwrap()
}

// ── Query ──────────────────────────────────────────────────────

#[test]
fn query_window_around_two_close_events() {
    let log = log_with(standard(), &[("joy", 5.2), ("joy", 5.4)]);

    assert_eq!(log.query_near(5.3, 0.5).len(), 2);
    assert!(log.query_near(5.3, 0.05).is_empty());
}

#[test]
fn duplicate_records_are_kept() {
    let log = log_with(standard(), &[("fear", 3.0), ("fear", 3.0)]);
    assert_eq!(log.len(), 2);
    assert_eq!(log.query_near(3.0, 0.0).len(), 2);
}

proptest! {
    #[test]
    fn unbounded_query_counts_records_minus_deletes(
        times in proptest::collection::vec(0.0f64..10_000.0, 0..40),
        delete_mask in proptest::collection::vec(any::<bool>(), 40),
    ) {
        let mut log = EventLog::new(standard());
        let ids: Vec<_> = times
            .iter()
            .map(|t| log.record("joy", *t).unwrap())
            .collect();

        let mut deleted = 0;
        for (id, delete) in ids.iter().zip(&delete_mask) {
            if *delete {
                prop_assert!(log.delete(*id));
                deleted += 1;
            }
        }

        prop_assert_eq!(log.query_near(0.0, f64::INFINITY).len(), times.len() - deleted);
    }
}

// ── Idempotence ────────────────────────────────────────────────

#[test]
fn delete_twice_matches_delete_once() {
    let mut log = log_with(standard(), &[("joy", 1.0), ("anger", 2.0)]);
    let id = log.iter().next().unwrap().id();

    assert!(log.delete(id));
    let after_once: Vec<_> = log.iter().cloned().collect();
    assert!(!log.delete(id));
    let after_twice: Vec<_> = log.iter().cloned().collect();

    assert_eq!(after_once, after_twice);
}

#[test]
fn repeated_identical_update_is_stable() {
    let mut log = log_with(standard(), &[("joy", 1.0)]);
    let id = log.iter().next().unwrap().id();
    let patch = EventPatch::time(4.5).with_emotion("trust");

    assert!(log.update(id, &patch).unwrap());
    let first = log.get(id).cloned();
    assert!(log.update(id, &patch).unwrap());

    assert_eq!(log.get(id).cloned(), first);
    assert_eq!(log.get(id).unwrap().emotion_id(), "trust");
}

// ── Projection ─────────────────────────────────────────────────

#[test]
fn zero_duration_projects_every_marker_to_origin() {
    let log = log_with(standard(), &[("joy", 0.0), ("fear", 12.5), ("trust", 3600.0)]);
    let projector = TimelineProjector::new(&log, 0.0);

    assert!(projector.markers().iter().all(|m| m.percent == 0.0));
    assert_eq!(projector.playhead(30.0), 0.0);
    assert_eq!(projector.seek_target(0.5), None);
}

#[test]
fn markers_follow_updates_without_rebuilding() {
    let mut log = log_with(standard(), &[("joy", 10.0)]);
    let id = log.iter().next().unwrap().id();
    assert_eq!(TimelineProjector::new(&log, 100.0).markers()[0].percent, 10.0);

    log.update(id, &EventPatch::time(50.0)).unwrap();
    let markers = TimelineProjector::new(&log, 100.0).markers();
    assert_eq!(markers[0].percent, 50.0);
    assert_eq!(project(150.0, 100.0), 100.0);
}

// ── CSV round trips ────────────────────────────────────────────

#[test]
fn csv_round_trip_empty_log() {
    let log = EventLog::new(standard());
    let decoded = csv_round_trip(&log);
    assert!(decoded.is_empty());
}

#[test]
fn csv_round_trip_single_event() {
    let log = log_with(standard(), &[("surprise", 42.125)]);
    assert_eq!(csv_round_trip(&log).entries(), log.entries());
}

#[test]
fn csv_round_trip_many_events_keeps_insertion_order() {
    let log = log_with(
        standard(),
        &[("anger", 9.0), ("joy", 0.1), ("sadness", 3723.75), ("joy", 0.1)],
    );
    assert_eq!(csv_round_trip(&log).entries(), log.entries());
}

#[test]
fn csv_round_trip_labels_with_commas_and_parentheses() {
    let log = log_with(awkward(), &[("calm", 1.5), ("tense", 2.0), ("plain", 3.25)]);
    let csv = encode_events_csv(&log).unwrap();

    assert!(csv.contains("\"Calm, relaxed (平静)\""));
    let decoded = decode_events_csv(&csv, awkward()).unwrap();
    assert_eq!(decoded.entries(), log.entries());
    assert!(decoded.dangling_ids().is_empty());
}

#[test]
fn csv_decode_with_bom_matches_plain() {
    let log = log_with(standard(), &[("joy", 1.0)]);
    let csv = encode_events_csv(&log).unwrap();
    let with_bom = format!("\u{feff}{}", csv);

    let decoded = decode_events_csv(&with_bom, standard()).unwrap();
    assert_eq!(decoded.entries(), log.entries());
}

// ── JSON round trips ───────────────────────────────────────────

#[test]
fn json_round_trip_preserves_ids_and_order() {
    for events in [
        &[][..],
        &[("joy", 1.0)][..],
        &[("fear", 2.0), ("trust", 0.5), ("fear", 2.0)][..],
    ] {
        let log = log_with(standard(), events);
        let decoded = json_round_trip(&log, 60.0);
        let original: Vec<_> = log.iter().cloned().collect();
        let restored: Vec<_> = decoded.iter().cloned().collect();
        assert_eq!(restored, original);
    }
}

#[test]
fn json_round_trip_with_awkward_labels() {
    let log = log_with(awkward(), &[("calm", 1.0), ("tense", 7.5)]);
    assert_eq!(json_round_trip(&log, 0.0).entries(), log.entries());
}

#[test]
fn json_export_shape() {
    let log = log_with(standard(), &[("joy", 65.0)]);
    let json = EmotionDataExport::from_log(&log, 3600.0).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();

    assert_eq!(value["duration"], 3600.0);
    assert_eq!(value["duration_format6"], "01:00:00");
    let item = &value["emotionData"][0];
    assert_eq!(item["timeFormatted"], "00:01:05");
    assert_eq!(item["emotionId"], "joy");
}

// ── Editor view ────────────────────────────────────────────────

#[test]
fn label_sort_then_filter() {
    let log = log_with(
        standard(),
        &[("trust", 1.0), ("anger", 2.0), ("joy", 3.0), ("anticipation", 4.0)],
    );

    let labels: Vec<_> = log
        .view(SortKey::EmotionLabel, "")
        .into_iter()
        .map(|e| e.emotion_id())
        .collect();
    assert_eq!(labels, ["anger", "anticipation", "joy", "trust"]);

    let filtered = log.view(SortKey::Time, "an");
    assert_eq!(filtered.len(), 2);
}

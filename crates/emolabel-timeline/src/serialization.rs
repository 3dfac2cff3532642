//! Event log codecs: the `time,time_formatted,emotion` CSV and the
//! `emotionData` JSON export.
//!
//! Both decoders build the whole log before returning it, so a failure part
//! way through a file never yields a partial log.

use emolabel_core::{format_clock, EmoLabelError, EmotionCatalog, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::event::EventId;
use crate::log::EventLog;

/// Header row of the event CSV.
pub const EVENTS_CSV_HEADER: [&str; 3] = ["time", "time_formatted", "emotion"];

/// Default file name for the event CSV export.
pub const EVENTS_CSV_FILE_NAME: &str = "emotion-events.csv";

/// Default file name for the JSON export.
pub const JSON_FILE_NAME: &str = "emotion-labeling-data.json";

const BOM: char = '\u{feff}';

fn csv_error(e: impl std::fmt::Display) -> EmoLabelError {
    EmoLabelError::Csv(e.to_string())
}

/// Encode the log as CSV, one row per event in insertion order. The emotion
/// column holds the resolved display label (the raw id for dangling events).
pub fn encode_events_csv(log: &EventLog) -> Result<String> {
    let mut buffer = format!("{}\n", EVENTS_CSV_HEADER.join(",")).into_bytes();
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(&mut buffer);
        let catalog = log.catalog();
        for event in log.iter() {
            writer
                .write_record([
                    event.time().to_string().as_str(),
                    format_clock(event.time()).as_str(),
                    catalog.label_or_id(event.emotion_id()),
                ])
                .map_err(csv_error)?;
        }
        writer.flush()?;
    }
    let text = String::from_utf8(buffer).map_err(csv_error)?;
    debug!(events = log.len(), "Encoded event log as CSV");
    Ok(text)
}

/// Decode an event CSV into a fresh log over `catalog`.
///
/// The `time` column is authoritative; `time_formatted` is ignored. Labels
/// are resolved by full label, then id, then short label; anything else is
/// kept as a dangling id.
pub fn decode_events_csv(data: &str, catalog: Arc<EmotionCatalog>) -> Result<EventLog> {
    let data = data.strip_prefix(BOM).unwrap_or(data);
    if data.trim().is_empty() {
        return Err(EmoLabelError::EmptyInput("Event CSV is empty".into()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data.as_bytes());
    let headers = reader.headers().map_err(csv_error)?;
    if headers.iter().map(str::trim).ne(EVENTS_CSV_HEADER) {
        return Err(EmoLabelError::Csv(format!(
            "Expected header '{}', found '{}'",
            EVENTS_CSV_HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut log = EventLog::new(catalog);
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let time = parse_time(record.get(0).unwrap_or_default(), row)?;
        let emotion_id = resolve_label(log.catalog(), record.get(2).unwrap_or_default());
        log.restore(None, time, emotion_id);
    }

    info!(events = log.len(), "Decoded event log from CSV");
    Ok(log)
}

fn parse_time(field: &str, row: usize) -> Result<f64> {
    match field.trim().parse::<f64>() {
        Ok(time) if time.is_finite() && time >= 0.0 => Ok(time),
        _ => Err(EmoLabelError::Csv(format!(
            "Row {}: invalid time '{}'",
            row + 1,
            field
        ))),
    }
}

fn resolve_label(catalog: &EmotionCatalog, label: &str) -> String {
    if let Some(def) = catalog.by_label(label) {
        return def.id.clone();
    }
    if catalog.contains(label) {
        return label.to_string();
    }
    catalog
        .iter()
        .find(|def| def.short_label() == label)
        .map(|def| def.id.clone())
        .unwrap_or_else(|| label.to_string())
}

/// One event in the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDataItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub time: f64,
    #[serde(default)]
    pub time_formatted: String,
    pub emotion_id: String,
}

/// The JSON export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionDataExport {
    #[serde(rename = "emotionData")]
    pub emotion_data: Vec<EmotionDataItem>,
    /// Source duration in seconds at export time.
    #[serde(default)]
    pub duration: f64,
    /// `duration` as `HH:MM:SS`.
    #[serde(default)]
    pub duration_format6: String,
}

impl EmotionDataExport {
    /// Snapshot the log and the current source duration.
    pub fn from_log(log: &EventLog, duration: f64) -> Self {
        let emotion_data = log
            .iter()
            .map(|event| EmotionDataItem {
                id: Some(event.id().to_string()),
                time: event.time(),
                time_formatted: event.time_formatted(),
                emotion_id: event.emotion_id().to_string(),
            })
            .collect();
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            emotion_data,
            duration,
            duration_format6: format_clock(duration),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| {
            EmoLabelError::Serialization(format!("Failed to serialize emotion data: {}", e))
        })
    }

    /// Parse a JSON export, upgrading legacy per-item `emotions` maps.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let raw: Value = serde_json::from_slice(data)
            .map_err(|e| EmoLabelError::Serialization(format!("Invalid JSON: {}", e)))?;
        let migrated = migrate(raw)?;
        serde_json::from_value(migrated).map_err(|e| {
            EmoLabelError::Serialization(format!("Failed to parse emotion data: {}", e))
        })
    }

    /// Rebuild a log over `catalog`. Ids that are missing, malformed or
    /// repeated are replaced with fresh ones.
    pub fn into_log(self, catalog: Arc<EmotionCatalog>) -> Result<EventLog> {
        let mut log = EventLog::new(catalog);
        for (index, item) in self.emotion_data.into_iter().enumerate() {
            if !item.time.is_finite() || item.time < 0.0 {
                return Err(EmoLabelError::Serialization(format!(
                    "Item {}: invalid time {}",
                    index, item.time
                )));
            }
            let id = item.id.as_deref().and_then(|s| s.parse::<EventId>().ok());
            log.restore(id, item.time, item.emotion_id);
        }
        Ok(log)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), events = self.emotion_data.len(), "Saved emotion data");
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }
}

/// Expand legacy items `{time, timeFormatted, emotions: {id: 0|1}}` into one
/// item per set emotion.
fn migrate(mut data: Value) -> Result<Value> {
    let Some(items) = data.get_mut("emotionData") else {
        return Err(EmoLabelError::Serialization(
            "Missing 'emotionData' array".into(),
        ));
    };
    let Some(items) = items.as_array_mut() else {
        return Err(EmoLabelError::Serialization(
            "'emotionData' must be an array".into(),
        ));
    };

    let mut upgraded = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        let legacy = item.get("emotionId").is_none() && item.get("emotions").is_some();
        if !legacy {
            upgraded.push(item);
            continue;
        }
        let time = item.get("time").cloned().unwrap_or(Value::Null);
        let time_formatted = item.get("timeFormatted").cloned().unwrap_or_default();
        if let Some(emotions) = item.get("emotions").and_then(Value::as_object) {
            for (emotion_id, flag) in emotions {
                if is_set(flag) {
                    upgraded.push(serde_json::json!({
                        "time": time,
                        "timeFormatted": time_formatted,
                        "emotionId": emotion_id,
                    }));
                }
            }
        }
    }
    *items = upgraded;
    Ok(data)
}

fn is_set(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v > 0.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emolabel_core::EmotionDef;

    fn standard() -> Arc<EmotionCatalog> {
        Arc::new(EmotionCatalog::standard())
    }

    #[test]
    fn test_csv_layout() {
        let mut log = EventLog::new(standard());
        log.record("joy", 5.2).unwrap();
        let csv = encode_events_csv(&log).unwrap();
        assert_eq!(
            csv,
            "time,time_formatted,emotion\n5.2,\"00:00:05\",\"Joy（喜び）\"\n"
        );
    }

    #[test]
    fn test_csv_round_trip_with_commas() {
        let catalog = Arc::new(
            EmotionCatalog::new(vec![
                EmotionDef::new("calm", "Calm, relaxed (mostly)", '1', "#112233"),
                EmotionDef::new("tense", "Tense \"very\"", '2', "#445566"),
            ])
            .unwrap(),
        );
        let mut log = EventLog::new(Arc::clone(&catalog));
        log.record("calm", 0.0).unwrap();
        log.record("tense", 1.0 / 3.0).unwrap();
        log.record("calm", 7261.125).unwrap();

        let decoded = decode_events_csv(&encode_events_csv(&log).unwrap(), catalog).unwrap();
        assert_eq!(decoded.entries(), log.entries());
    }

    #[test]
    fn test_csv_empty_log_round_trip() {
        let log = EventLog::new(standard());
        let csv = encode_events_csv(&log).unwrap();
        assert!(decode_events_csv(&csv, standard()).unwrap().is_empty());
    }

    #[test]
    fn test_csv_keeps_dangling_ids() {
        let mut log = EventLog::new(standard());
        log.restore(None, 2.0, "boredom".into());
        let decoded = decode_events_csv(&encode_events_csv(&log).unwrap(), standard()).unwrap();
        assert_eq!(decoded.entries(), vec![(2.0, "boredom")]);
        assert_eq!(decoded.dangling_ids().len(), 1);
    }

    #[test]
    fn test_csv_decode_rejects_bad_input_atomically() {
        assert!(matches!(
            decode_events_csv("", standard()),
            Err(EmoLabelError::EmptyInput(_))
        ));
        assert!(decode_events_csv("a,b,c\n1,2,3\n", standard()).is_err());
        let bad_row = "time,time_formatted,emotion\n1,00:00:01,Joy\nsoon,00:00:02,Joy\n";
        assert!(decode_events_csv(bad_row, standard()).is_err());
    }

    #[test]
    fn test_csv_decode_accepts_bom_and_short_labels() {
        let data = "\u{feff}time,time_formatted,emotion\n3.5,00:00:03,Fear\n4,00:00:04,anger\n";
        let log = decode_events_csv(data, standard()).unwrap();
        assert_eq!(log.entries(), vec![(3.5, "fear"), (4.0, "anger")]);
    }

    #[test]
    fn test_json_round_trip_keeps_ids() {
        let mut log = EventLog::new(standard());
        let id = log.record("trust", 12.5).unwrap();
        log.record("joy", 3.0).unwrap();

        let export = EmotionDataExport::from_log(&log, 3725.0);
        assert_eq!(export.duration_format6, "01:02:05");

        let json = export.to_json().unwrap();
        let text = String::from_utf8(json.clone()).unwrap();
        assert!(text.contains("\"emotionData\""));
        assert!(text.contains("\"timeFormatted\": \"00:00:12\""));

        let restored = EmotionDataExport::from_json(&json)
            .unwrap()
            .into_log(standard())
            .unwrap();
        assert_eq!(restored.entries(), log.entries());
        assert!(restored.get(id).is_some());
    }

    #[test]
    fn test_json_legacy_items_are_expanded() {
        let legacy = br#"{
            "emotionData": [
                {"time": 4.0, "timeFormatted": "00:00:04",
                 "emotions": {"joy": 1, "fear": 0, "trust": 1}}
            ],
            "duration": 10
        }"#;
        let export = EmotionDataExport::from_json(legacy).unwrap();
        assert_eq!(export.emotion_data.len(), 2);

        let log = export.into_log(standard()).unwrap();
        let mut ids: Vec<&str> = log.iter().map(|e| e.emotion_id()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["joy", "trust"]);
    }

    #[test]
    fn test_json_rejects_missing_data_and_bad_times() {
        assert!(EmotionDataExport::from_json(b"{\"duration\": 3}").is_err());
        let negative = br#"{"emotionData": [{"time": -1, "emotionId": "joy"}]}"#;
        let export = EmotionDataExport::from_json(negative).unwrap();
        assert!(export.into_log(standard()).is_err());
    }
}

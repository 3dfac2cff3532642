//! Integration tests for annotation sessions over live time sources.
//!
//! Runs the emolabel-source tick driver under paused tokio time and checks
//! what the emolabel-session annotators record against it.

use emolabel_core::{EmotionCatalog, KeyInput};
use emolabel_session::{KeyboardHub, TextAction, TextAnnotator, VideoAction, VideoAnnotator};
use emolabel_source::{ManualTimer, TimerDriver, TimerHandle};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

fn annotator() -> VideoAnnotator {
    VideoAnnotator::new(Arc::new(EmotionCatalog::standard()))
}

fn timer(duration: f64) -> TimerHandle {
    TimerHandle::new(ManualTimer::new(duration).unwrap())
}

fn drive(clock: &TimerHandle) -> TimerDriver {
    TimerDriver::spawn(
        &Handle::current(),
        clock.clone(),
        Duration::from_millis(50),
        None,
    )
}

#[tokio::test(start_paused = true)]
async fn ten_second_timer_stops_at_boundary() {
    let mut video = annotator();
    let clock = timer(10.0);
    let _driver = drive(&clock);
    video.switch_source(Box::new(clock.clone()));
    video.source_mut().play();

    tokio::time::sleep(Duration::from_secs(12)).await;

    assert_eq!(video.source().current_time(), 10.0);
    assert!(!video.source().is_playing());
    assert_eq!(video.record("joy").unwrap(), VideoAction::NotPlaying);
    assert!(video.log().is_empty());
}

#[tokio::test(start_paused = true)]
async fn records_land_at_driven_time() {
    let hub = KeyboardHub::new();
    let mut video = annotator();
    video.attach(&hub);
    let clock = timer(60.0);
    let _driver = drive(&clock);
    video.switch_source(Box::new(clock.clone()));
    video.source_mut().play();

    tokio::time::sleep(Duration::from_millis(3010)).await;
    hub.dispatch(KeyInput::Digit(1));
    let actions = video.process_input();
    assert!(matches!(actions[..], [VideoAction::Recorded(_)]));

    let recorded = video.log().iter().next().unwrap().time();
    assert!((recorded - 3.0).abs() < 0.11, "got {recorded}");
    assert_eq!(video.active_labels(), vec!["Joy"]);
}

#[tokio::test(start_paused = true)]
async fn switching_source_keeps_events() {
    let mut video = annotator();
    let first = timer(30.0);
    let driver = drive(&first);
    video.switch_source(Box::new(first.clone()));
    video.source_mut().play();
    tokio::time::sleep(Duration::from_secs(2)).await;
    video.record("trust").unwrap();

    drop(driver);
    video.switch_source(Box::new(timer(90.0)));

    assert_eq!(video.log().len(), 1);
    assert_eq!(video.source().current_time(), 0.0);
    assert_eq!(video.projector().duration(), 90.0);
}

#[test]
fn newest_subscription_wins_shared_keys() {
    let hub = KeyboardHub::new();
    let mut video = annotator();
    let mut text = TextAnnotator::new();
    text.import("Text\nhello\n").unwrap();

    let clock = timer(60.0);
    video.switch_source(Box::new(clock.clone()));
    video.source_mut().play();
    clock.lock().advance(1.0);

    video.attach(&hub);
    text.attach(&hub);

    hub.dispatch(KeyInput::Digit(1));
    assert!(matches!(text.process_input()[..], [TextAction::Toggled { score: 1, .. }]));
    assert!(video.process_input().is_empty());

    text.detach();
    hub.dispatch(KeyInput::Digit(1));
    assert!(matches!(video.process_input()[..], [VideoAction::Recorded(_)]));
    assert_eq!(video.log().entries(), vec![(1.0, "joy")]);
}

#[test]
fn csv_import_replaces_log_atomically() {
    let mut source = annotator();
    let clock = timer(60.0);
    source.switch_source(Box::new(clock.clone()));
    source.source_mut().play();
    for (advance, key) in [(1.5, '1'), (2.0, '5'), (0.25, '8')] {
        clock.lock().advance(advance);
        source.record_trigger(key).unwrap();
    }
    let csv = source.export_csv().unwrap();

    let mut target = annotator();
    target.log_mut().record("anger", 9.0).unwrap();
    assert!(target.import_csv("time,nonsense\n1,2\n").is_err());
    assert_eq!(target.log().entries(), vec![(9.0, "anger")]);

    assert_eq!(target.import_csv(&csv).unwrap(), 3);
    assert_eq!(
        target.log().entries(),
        vec![(1.5, "joy"), (3.5, "sadness"), (3.75, "anticipation")]
    );
}

#[test]
fn json_import_keeps_ids_for_editing() {
    let mut source = annotator();
    let clock = timer(60.0);
    source.switch_source(Box::new(clock.clone()));
    source.source_mut().play();
    clock.lock().advance(12.0);
    source.record("surprise").unwrap();
    let json = source.export_json().unwrap();
    let id = source.log().iter().next().unwrap().id();

    let mut target = annotator();
    assert_eq!(target.import_json(&json).unwrap(), 1);
    assert!(target.delete_event(id).is_ok());
    assert!(target.delete_event(id).is_err());
    assert!(target.log().is_empty());
}

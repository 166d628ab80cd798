use logging::capture::Capture;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::prelude::*;

#[test]
fn records_events_in_order_until_cleared() {
    let capture = Capture::new();
    let subscriber = tracing_subscriber::registry().with(capture.layer());

    tracing::subscriber::with_default(subscriber, || {
        info!(target: "test_capture", "hello world");
        warn!(target: "test_capture", code = 7, "careful");
        debug!(target: "test_capture", answer = 42);
    });

    let records = capture.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].message, "hello world");
    assert_eq!(records[0].target, "test_capture");
    assert_eq!(capture.messages_at(Level::WARN), vec!["careful".to_string()]);
    assert_eq!(records[2].message, "answer=42");
    assert_eq!(capture.count_containing("hello"), 1);

    capture.clear();
    assert!(capture.records().is_empty());
}

#[test]
fn events_outside_the_subscriber_are_not_recorded() {
    let capture = Capture::new();
    info!(target: "test_capture", "nobody listens");
    assert!(capture.records().is_empty());
}

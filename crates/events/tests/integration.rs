//! Integration tests for the event channel

use sitebuild_events::{channel, AppEvent, BuildEvent, EventEmitter};
use std::time::Duration;

#[tokio::test]
async fn test_step_finished_picks_variant_by_exit_code() {
    let (tx, mut rx) = channel();

    tx.emit_step_finished("Checking...", 0, Duration::from_millis(5));
    tx.emit_step_finished("Building...", 2, Duration::from_millis(5));

    match rx.recv().await {
        Some(AppEvent::Build(BuildEvent::StepCompleted { exit_code, .. })) => {
            assert_eq!(exit_code, 0);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match rx.recv().await {
        Some(AppEvent::Build(BuildEvent::StepFailed {
            description,
            exit_code,
            ..
        })) => {
            assert_eq!(description, "Building...");
            assert_eq!(exit_code, 2);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_emit_after_receiver_dropped_is_silent() {
    let (tx, rx) = channel();
    drop(rx);
    tx.emit_notice("nobody is listening");
}

#[test]
fn test_event_serializes_with_domain_tag() {
    let event = AppEvent::Build(BuildEvent::StepStarted {
        description: "Building...".into(),
        command: "npm run build".into(),
    });
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["domain"], "build");
    assert_eq!(json["event"]["type"], "StepStarted");
}

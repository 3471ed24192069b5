//! Event bus behaviour observed from async receivers.

mod common;

use std::{sync::Arc, time::Duration};

use common::create_test_app;
use nightplan_core::{
    events::{PlanAction, Source},
    params::SendMessage,
    seed,
    simulation::ScriptedReplies,
    AppEvent, Participant, ProgressStage,
};

#[tokio::test]
async fn test_friend_broadcaster_sees_plan_transitions() {
    let app = create_test_app();
    let mut rx = app.bus.subscribe();

    // A region of the UI with no handle to the progress store.
    let broadcaster = tokio::spawn(async move {
        let mut stops = Vec::new();
        while let Ok(event) = rx.recv().await {
            if let AppEvent::Plan(event) = event {
                if event.action == PlanAction::CheckedIn {
                    stops.push(event.stop_index);
                }
                if event.state == ProgressStage::Completed {
                    break;
                }
            }
        }
        stops
    });

    app.progress.install(&seed::demo_plans());
    app.progress.start_night();
    app.progress.check_in(None);
    app.progress.move_to_next();
    app.progress.check_in(None);
    app.progress.complete();

    let stops = tokio::time::timeout(Duration::from_secs(5), broadcaster)
        .await
        .expect("broadcaster finished")
        .expect("broadcaster did not panic");
    assert_eq!(stops, vec![0, 1]);
}

#[tokio::test]
async fn test_events_are_delivered_after_the_mutation_returns() {
    let app = create_test_app();
    let mut rx = app.bus.subscribe();

    app.messages.receive(&SendMessage::text("f1", "Sam", "hi"));
    // The store already reflects the change before anyone reads the event.
    assert_eq!(app.messages.unread_count(), 1);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.source(), Source::Messages);
}

#[tokio::test(start_paused = true)]
async fn test_simulated_reply_flows_through_the_bus() {
    let app = create_test_app();
    let mut rx = app.bus.subscribe();
    let scheduler = app.reply_scheduler(Arc::new(ScriptedReplies::new(["be right there"])));
    let sam = Participant::new("f1", "Sam");

    app.messages.send(&SendMessage::text(&sam.id, &sam.name, "where are you?"));
    assert!(scheduler.schedule_reply(&sam, "where are you?"));

    tokio::time::sleep(Duration::from_millis(300)).await;

    let sources: Vec<Source> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|event| event.source())
        .collect();
    assert_eq!(sources, vec![Source::Messages, Source::Messages]);

    let thread = app.messages.thread("direct_f1").unwrap();
    assert!(thread.unread);
    assert_eq!(thread.last_message.unwrap().content, "be right there");
}

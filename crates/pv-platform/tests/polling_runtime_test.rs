use std::sync::{Arc, Mutex};
use std::time::Duration;

use pv_core::ports::{ViewerEvent, ViewerEventHandlerPort};
use pv_core::Namespace;
use pv_platform::runtime::{
    event_channel, PollSchedule, PollingRuntime, RuntimeError, StopReason,
};
use tokio::time::Instant;

#[derive(Clone, Default)]
struct RecordingHandler {
    seen: Arc<Mutex<Vec<(ViewerEvent, Instant)>>>,
    fail_on: Option<ViewerEvent>,
    /// Blocks the loop this long on the first turn.
    stall_first: Option<Duration>,
}

impl RecordingHandler {
    fn events(&self) -> Vec<ViewerEvent> {
        self.seen.lock().unwrap().iter().map(|(e, _)| e.clone()).collect()
    }

    fn instants(&self) -> Vec<Instant> {
        self.seen.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

impl ViewerEventHandlerPort for RecordingHandler {
    fn handle_event(&mut self, event: ViewerEvent) -> anyhow::Result<()> {
        if self.fail_on.as_ref() == Some(&event) {
            anyhow::bail!("renderer went away");
        }
        let mut seen = self.seen.lock().unwrap();
        if seen.is_empty() {
            if let Some(stall) = self.stall_first {
                std::thread::sleep(stall);
            }
        }
        seen.push((event, Instant::now()));
        Ok(())
    }
}

fn schedule(ms: u64) -> PollSchedule {
    PollSchedule::new(Duration::from_millis(ms), Duration::from_millis(ms / 2)).unwrap()
}

#[tokio::test(start_paused = true)]
async fn first_tick_is_immediate_and_later_ticks_follow_the_interval() {
    let handler = RecordingHandler::default();
    let (_tx, rx) = event_channel(8);
    let started = Instant::now();

    let mut runtime =
        PollingRuntime::new(handler.clone(), schedule(500), rx).with_max_turns(Some(3));
    let summary = runtime.run().await.unwrap();

    assert_eq!(summary.stop, StopReason::TurnLimit);
    assert_eq!(summary.turns, 3);
    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.late_ticks, 0);
    assert_eq!(handler.events(), vec![ViewerEvent::Tick; 3]);

    let offsets: Vec<_> = handler
        .instants()
        .into_iter()
        .map(|at| at.duration_since(started))
        .collect();
    assert_eq!(
        offsets,
        vec![
            Duration::ZERO,
            Duration::from_millis(500),
            Duration::from_millis(1000)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn queued_user_events_run_before_a_ready_tick() {
    let handler = RecordingHandler::default();
    let (tx, rx) = event_channel(8);
    tx.send(ViewerEvent::NamespaceSelected(Namespace::Find))
        .await
        .unwrap();
    tx.send(ViewerEvent::TypeSelectedAt(0)).await.unwrap();

    let mut runtime =
        PollingRuntime::new(handler.clone(), schedule(500), rx).with_max_turns(Some(3));
    runtime.run().await.unwrap();

    assert_eq!(
        handler.events(),
        vec![
            ViewerEvent::NamespaceSelected(Namespace::Find),
            ViewerEvent::TypeSelectedAt(0),
            ViewerEvent::Tick,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn quit_stops_the_loop_without_a_turn() {
    let handler = RecordingHandler::default();
    let (tx, rx) = event_channel(8);
    tx.send(ViewerEvent::Quit).await.unwrap();

    let mut runtime = PollingRuntime::new(handler.clone(), schedule(500), rx);
    let summary = runtime.run().await.unwrap();

    assert_eq!(summary.stop, StopReason::Quit);
    assert_eq!(summary.turns, 0);
    assert!(handler.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn quit_sent_while_running_is_honoured() {
    let handler = RecordingHandler::default();
    let (tx, rx) = event_channel(8);

    let mut runtime = PollingRuntime::new(handler.clone(), schedule(100), rx);
    let task = tokio::spawn(async move { runtime.run().await });

    tokio::time::sleep(Duration::from_millis(250)).await;
    tx.send(ViewerEvent::Quit).await.unwrap();

    let summary = task.await.unwrap().unwrap();
    assert_eq!(summary.stop, StopReason::Quit);
    // Ticks at 0, 100 and 200 ms.
    assert_eq!(summary.ticks, 3);
}

#[tokio::test(start_paused = true)]
async fn closing_the_event_source_stops_the_loop() {
    let handler = RecordingHandler::default();
    let (tx, rx) = event_channel(8);
    tx.send(ViewerEvent::Refresh).await.unwrap();
    drop(tx);

    let mut runtime = PollingRuntime::new(handler.clone(), schedule(200), rx);
    let summary = runtime.run().await.unwrap();

    // Queued events are still delivered before the close is seen.
    assert_eq!(summary.stop, StopReason::EventsClosed);
    assert_eq!(handler.events(), vec![ViewerEvent::Refresh]);
}

#[tokio::test(start_paused = true)]
async fn handler_failure_stops_with_the_turn_number() {
    let handler = RecordingHandler {
        fail_on: Some(ViewerEvent::Refresh),
        ..Default::default()
    };
    let (tx, rx) = event_channel(8);
    tx.send(ViewerEvent::Refresh).await.unwrap();

    let mut runtime = PollingRuntime::new(handler, schedule(500), rx);
    let err = runtime.run().await.unwrap_err();

    match err {
        RuntimeError::Turn { turn, reason } => {
            assert_eq!(turn, 1);
            assert!(reason.contains("renderer went away"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn a_stalled_turn_makes_the_next_tick_late() {
    let handler = RecordingHandler {
        stall_first: Some(Duration::from_millis(120)),
        ..Default::default()
    };
    let (_tx, rx) = event_channel(8);
    let schedule = PollSchedule::new(Duration::from_millis(20), Duration::from_millis(10)).unwrap();

    let mut runtime = PollingRuntime::new(handler.clone(), schedule, rx).with_max_turns(Some(2));
    let summary = runtime.run().await.unwrap();

    // The 20 ms tick is due while the first turn still blocks; with delayed
    // missed ticks it fires once, about 100 ms behind its deadline.
    assert_eq!(summary.ticks, 2);
    assert_eq!(summary.late_ticks, 1);
    assert_eq!(handler.events(), vec![ViewerEvent::Tick; 2]);
}

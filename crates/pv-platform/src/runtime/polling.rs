//! Polling runtime
//!
//! Drives the viewer's serial event loop. A tokio interval produces
//! [`ViewerEvent::Tick`]s; user input arrives over the event bus. Both are
//! funnelled into a single handler one turn at a time, so the handler never
//! observes two events concurrently.
//!
//! The loop ends on [`ViewerEvent::Quit`], when every event sender is
//! dropped, or after an optional turn limit.
//!
//! The first tick completes immediately, which gives the initial pasteboard
//! read at startup. Missed ticks are delayed rather than bursted: a slow turn
//! pushes the schedule back instead of producing a backlog of ticks.

use std::time::Duration;

use pv_core::ports::{ViewerEvent, ViewerEventHandlerPort};
use pv_core::AppConfig;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, warn, Instrument};

use super::event_bus::ViewerEventReceiver;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("turn {turn} failed: {reason}")]
    Turn { turn: u64, reason: String },
}

/// Tick cadence plus the slack allowed before a tick counts as late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Duration,
    pub tolerance: Duration,
}

impl PollSchedule {
    pub fn new(interval: Duration, tolerance: Duration) -> Result<Self, RuntimeError> {
        if interval.is_zero() {
            return Err(RuntimeError::ZeroInterval);
        }
        Ok(Self {
            interval,
            tolerance,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, RuntimeError> {
        Self::new(config.poll_interval, config.poll_tolerance)
    }

    /// A tick fired `lag` after its deadline is late once the lag exceeds
    /// the tolerance.
    pub fn is_late(&self, lag: Duration) -> bool {
        lag > self.tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A [`ViewerEvent::Quit`] was received.
    Quit,
    /// The configured turn limit was reached.
    TurnLimit,
    /// Every event sender was dropped.
    EventsClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub turns: u64,
    pub ticks: u64,
    pub late_ticks: u64,
    pub stop: StopReason,
}

pub struct PollingRuntime<H>
where
    H: ViewerEventHandlerPort,
{
    handler: H,
    schedule: PollSchedule,
    events: ViewerEventReceiver,
    max_turns: Option<u64>,
}

impl<H> PollingRuntime<H>
where
    H: ViewerEventHandlerPort,
{
    pub fn new(handler: H, schedule: PollSchedule, events: ViewerEventReceiver) -> Self {
        Self {
            handler,
            schedule,
            events,
            max_turns: None,
        }
    }

    /// Stop after `max_turns` handled events. Used for scripted runs.
    pub fn with_max_turns(mut self, max_turns: Option<u64>) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub async fn run(&mut self) -> Result<RunSummary, RuntimeError> {
        let span = info_span!(
            "platform.runtime.polling",
            interval_ms = self.schedule.interval.as_millis() as u64,
            tolerance_ms = self.schedule.tolerance.as_millis() as u64
        );
        self.run_loop().instrument(span).await
    }

    async fn run_loop(&mut self) -> Result<RunSummary, RuntimeError> {
        let mut ticker = interval(self.schedule.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut turns = 0u64;
        let mut ticks = 0u64;
        let mut late_ticks = 0u64;

        info!("Polling runtime started");

        let stop = loop {
            if self.max_turns.is_some_and(|limit| turns >= limit) {
                break StopReason::TurnLimit;
            }

            // User input wins over a tick that is ready at the same time.
            let event = tokio::select! {
                biased;
                received = self.events.recv() => match received {
                    Some(event) => event,
                    None => {
                        debug!("Event channel closed");
                        break StopReason::EventsClosed;
                    }
                },
                deadline = ticker.tick() => {
                    ticks += 1;
                    let lag = Instant::now().saturating_duration_since(deadline);
                    if self.schedule.is_late(lag) {
                        late_ticks += 1;
                        debug!(lag_ms = lag.as_millis() as u64, "Tick fired late");
                    }
                    ViewerEvent::Tick
                }
            };

            if event == ViewerEvent::Quit {
                break StopReason::Quit;
            }

            turns += 1;
            if let Err(e) = self.handler.handle_event(event) {
                warn!(turn = turns, error = %e, "Turn failed, stopping");
                return Err(RuntimeError::Turn {
                    turn: turns,
                    reason: format!("{:#}", e),
                });
            }
        };

        info!(turns, ticks, late_ticks, ?stop, "Polling runtime stopped");
        Ok(RunSummary {
            turns,
            ticks,
            late_ticks,
            stop,
        })
    }
}

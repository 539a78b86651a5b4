pub mod event_bus;
pub mod polling;

pub use event_bus::{event_channel, ViewerEventReceiver, ViewerEventSender};
pub use polling::{PollSchedule, PollingRuntime, RunSummary, RuntimeError, StopReason};

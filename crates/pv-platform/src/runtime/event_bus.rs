use pv_core::ports::ViewerEvent;
use tokio::sync::mpsc;

pub type ViewerEventSender = mpsc::Sender<ViewerEvent>;
pub type ViewerEventReceiver = mpsc::Receiver<ViewerEvent>;

/// Bounded channel carrying user input into the polling runtime.
pub fn event_channel(capacity: usize) -> (ViewerEventSender, ViewerEventReceiver) {
    mpsc::channel(capacity)
}

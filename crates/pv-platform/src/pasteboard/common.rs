//! clipboard-rs backed source for platforms without NSPasteboard.
//!
//! Only the general namespace exists here; the other namespaces report an
//! empty pasteboard. These platforms expose no change counter, so one is
//! synthesized. The preferred source is a clipboard-rs watcher thread that
//! bumps the counter on every OS change notification, which costs no reads.
//! When the watcher cannot be started the counter falls back to a
//! fingerprint of the advertised format names; payload bytes are never read
//! just to detect a change.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::{
    Clipboard, ClipboardContext, ClipboardHandler, ClipboardWatcher as RSClipboardWatcher,
    ClipboardWatcherContext, WatcherShutdown,
};
use pv_core::ports::{PasteboardError, PasteboardSourcePort};
use pv_core::{ChangeCounter, Namespace, TypeIdentifier};
use tracing::{debug, info, trace, warn};

/// Counter advanced whenever a new fingerprint is observed.
#[derive(Debug, Default)]
struct FingerprintCounter {
    fingerprint: Option<blake3::Hash>,
    value: i64,
}

impl FingerprintCounter {
    fn observe(&mut self, fingerprint: blake3::Hash) -> ChangeCounter {
        if self.fingerprint != Some(fingerprint) {
            if self.fingerprint.is_some() {
                self.value += 1;
            }
            self.fingerprint = Some(fingerprint);
        }
        ChangeCounter(self.value)
    }
}

fn fingerprint_formats(formats: &[String]) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"pasteboard-formats-v1|");
    for format in formats {
        hasher.update(format.as_bytes());
        hasher.update(b"\0");
    }
    hasher.finalize()
}

/// Bumps the shared counter on every OS clipboard notification.
struct ChangeNotifier {
    counter: Arc<AtomicI64>,
}

impl ClipboardHandler for ChangeNotifier {
    fn on_clipboard_change(&mut self) {
        let value = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(counter = value, "Clipboard change notification");
    }
}

enum CounterSource {
    Watcher {
        counter: Arc<AtomicI64>,
        shutdown: Option<WatcherShutdown>,
    },
    Fingerprint(Mutex<FingerprintCounter>),
}

fn start_watcher() -> Result<(Arc<AtomicI64>, WatcherShutdown)> {
    let counter = Arc::new(AtomicI64::new(0));
    let (ready_tx, ready_rx) = mpsc::channel();
    let handler = ChangeNotifier {
        counter: counter.clone(),
    };

    std::thread::Builder::new()
        .name("clipboard-watcher".into())
        .spawn(move || {
            let mut watcher_ctx = match ClipboardWatcherContext::new() {
                Ok(ctx) => ctx,
                Err(e) => {
                    let _ = ready_tx.send(Err(anyhow!("Failed to create watcher context: {}", e)));
                    return;
                }
            };
            let shutdown = watcher_ctx.add_handler(handler).get_shutdown_channel();
            if ready_tx.send(Ok(shutdown)).is_err() {
                return;
            }
            info!("start clipboard watch");
            watcher_ctx.start_watch();
            info!("clipboard watch stopped");
        })?;

    let shutdown = ready_rx
        .recv()
        .map_err(|_| anyhow!("Clipboard watcher thread exited during startup"))??;
    Ok((counter, shutdown))
}

pub struct CommonPasteboard {
    ctx: Mutex<ClipboardContext>,
    counter: CounterSource,
}

fn map_clipboard_err(err: Box<dyn std::error::Error + Send + Sync>) -> PasteboardError {
    PasteboardError::Backend(err.to_string())
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PasteboardError> {
    mutex
        .lock()
        .map_err(|_| PasteboardError::Backend("clipboard lock poisoned".into()))
}

#[cfg(target_os = "linux")]
fn new_context() -> Result<ClipboardContext> {
    use clipboard_rs::ClipboardContextX11Options;
    ClipboardContext::new_with_options(ClipboardContextX11Options { read_timeout: None })
        .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))
}

#[cfg(not(target_os = "linux"))]
fn new_context() -> Result<ClipboardContext> {
    ClipboardContext::new().map_err(|e| anyhow!("Failed to create clipboard context: {}", e))
}

impl CommonPasteboard {
    pub fn new() -> Result<Self> {
        let ctx = new_context()?;
        let counter = match start_watcher() {
            Ok((counter, shutdown)) => CounterSource::Watcher {
                counter,
                shutdown: Some(shutdown),
            },
            Err(e) => {
                warn!(error = %e, "Clipboard watcher unavailable, detecting changes by format list");
                CounterSource::Fingerprint(Mutex::new(FingerprintCounter::default()))
            }
        };
        Ok(Self {
            ctx: Mutex::new(ctx),
            counter,
        })
    }

    fn formats(ctx: &ClipboardContext) -> Result<Vec<String>, PasteboardError> {
        ctx.available_formats().map_err(map_clipboard_err)
    }
}

impl Drop for CommonPasteboard {
    fn drop(&mut self) {
        if let CounterSource::Watcher { shutdown, .. } = &mut self.counter {
            if let Some(handle) = shutdown.take() {
                handle.stop();
                debug!("Clipboard watcher stopped");
            }
        }
    }
}

impl PasteboardSourcePort for CommonPasteboard {
    fn list_types(&self, namespace: Namespace) -> Result<Vec<TypeIdentifier>, PasteboardError> {
        if namespace != Namespace::General {
            return Ok(Vec::new());
        }
        let ctx = lock(&self.ctx)?;
        let formats = Self::formats(&ctx)?;
        trace!(count = formats.len(), "Enumerated clipboard formats");
        Ok(formats.into_iter().map(TypeIdentifier::from).collect())
    }

    fn change_counter(&self, namespace: Namespace) -> Result<ChangeCounter, PasteboardError> {
        if namespace != Namespace::General {
            return Ok(ChangeCounter(0));
        }
        match &self.counter {
            CounterSource::Watcher { counter, .. } => {
                Ok(ChangeCounter(counter.load(Ordering::Acquire)))
            }
            CounterSource::Fingerprint(state) => {
                let fingerprint = {
                    let ctx = lock(&self.ctx)?;
                    fingerprint_formats(&Self::formats(&ctx)?)
                };
                Ok(lock(state)?.observe(fingerprint))
            }
        }
    }

    fn read_data(
        &self,
        namespace: Namespace,
        type_id: &TypeIdentifier,
    ) -> Result<Vec<u8>, PasteboardError> {
        let not_available = || PasteboardError::NotAvailable {
            namespace,
            type_id: type_id.clone(),
        };
        if namespace != Namespace::General {
            return Err(not_available());
        }

        let ctx = lock(&self.ctx)?;
        if !Self::formats(&ctx)?.iter().any(|f| f == type_id.as_str()) {
            debug!(type_id = %type_id, "Format vanished before read");
            return Err(not_available());
        }
        ctx.get_buffer(type_id.as_str()).map_err(map_clipboard_err)
    }
}

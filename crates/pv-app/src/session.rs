//! Viewer session
//!
//! The session is the single owner of the viewer state. The event loop
//! feeds it one [`ViewerEvent`] per turn; every turn runs the same
//! pipeline:
//!
//! ```text
//! apply mutations deferred by the previous turn
//!      ↓
//! apply the event (namespace switch / user selection)
//!      ↓
//! Tick only: read change counter → ChangeDetector → SelectionController
//!      ↓
//! ListStabilizer → title → detail pane
//!      ↓
//! Frame → RendererPort
//! ```
//!
//! Counter and type-count bookkeeping is written to the next-turn queue and
//! applied at the start of the following turn, so a render pass never sees
//! state that changed underneath it.

use std::sync::Arc;

use pv_core::config::{AppConfig, DEFAULT_APP_NAME, DEFAULT_PREVIEW_BYTES};
use pv_core::ports::{PasteboardSourcePort, RendererPort, ViewerEvent, ViewerEventHandlerPort};
use pv_core::{
    title, ChangeCounter, ChangeDetector, Deferred, Frame, ListStabilizer, Namespace,
    NextTurnQueue, Observation, SelectionController, SelectionState, StabilizationMode,
    TypeIdentifier,
};
use tracing::{debug, debug_span, info, warn};

use crate::usecases::ReadRepresentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub app_name: String,
    pub initial_namespace: Namespace,
    pub stabilization: StabilizationMode,
    pub preview_bytes: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            initial_namespace: Namespace::default(),
            stabilization: StabilizationMode::default(),
            preview_bytes: DEFAULT_PREVIEW_BYTES,
        }
    }
}

impl From<&AppConfig> for SessionOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            initial_namespace: config.initial_namespace,
            stabilization: config.stabilization,
            preview_bytes: config.preview_bytes,
        }
    }
}

pub struct ViewerSession {
    source: Arc<dyn PasteboardSourcePort>,
    renderer: Box<dyn RendererPort>,
    controller: SelectionController,
    stabilizer: ListStabilizer,
    next_turn: NextTurnQueue,
    read_representation: ReadRepresentation,
    app_name: String,
    last_frame: Option<Frame>,
    turns: u64,
}

impl ViewerSession {
    pub fn new(
        source: Arc<dyn PasteboardSourcePort>,
        renderer: Box<dyn RendererPort>,
        options: SessionOptions,
    ) -> Self {
        Self {
            read_representation: ReadRepresentation::new(source.clone(), options.preview_bytes),
            source,
            renderer,
            controller: SelectionController::new(options.initial_namespace),
            stabilizer: ListStabilizer::new(options.stabilization),
            next_turn: NextTurnQueue::new(),
            app_name: options.app_name,
            last_frame: None,
            turns: 0,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        self.controller.state()
    }

    pub fn stabilizer(&self) -> &ListStabilizer {
        &self.stabilizer
    }

    /// Mutations waiting for the next turn.
    pub fn pending_mutations(&self) -> usize {
        self.next_turn.len()
    }

    /// Frame produced by the most recent turn.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Run one turn and return the frame handed to the renderer.
    ///
    /// Only a renderer failure is an error; pasteboard failures degrade to
    /// an empty list or an unreadable detail pane.
    pub fn run_turn(&mut self, event: ViewerEvent) -> anyhow::Result<Frame> {
        self.turns += 1;
        let span = debug_span!("session.turn", turn = self.turns, event = ?event);
        let _guard = span.enter();

        self.apply_deferred();

        let is_tick = matches!(event, ViewerEvent::Tick);
        self.apply_event(event);

        let namespace = self.controller.namespace();
        // Counter before list: a change landing between the two reads is
        // then caught again on the next tick instead of being missed.
        let counter = if is_tick {
            self.read_counter(namespace)
        } else {
            None
        };
        let raw = self.read_types(namespace);

        if let Some(current) = counter {
            self.react_to_counter(current, &raw);
        }

        let frame = self.compose_frame(namespace, raw);
        self.renderer.render(&frame)?;
        self.last_frame = Some(frame.clone());

        Ok(frame)
    }

    fn apply_deferred(&mut self) {
        for mutation in self.next_turn.drain() {
            match mutation {
                Deferred::RecordTypeCount(count) => self.stabilizer.record_count(count),
                Deferred::ObserveChangeCounter(counter) => {
                    self.controller.record_observed_counter(counter)
                }
            }
        }
    }

    fn apply_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::NamespaceSelected(namespace) => {
                self.controller.on_namespace_change(namespace);
            }
            ViewerEvent::TypeSelected(type_id) => {
                if self.is_listed(&type_id) {
                    self.controller.on_user_select(type_id);
                } else {
                    warn!(type_id = %type_id, "Type is not on the current pasteboard; ignoring selection");
                }
            }
            ViewerEvent::TypeSelectedAt(index) => {
                let shown = self
                    .last_frame
                    .as_ref()
                    .and_then(|frame| frame.types.get(index))
                    .cloned();
                match shown {
                    Some(type_id) => {
                        self.controller.on_user_select(type_id);
                    }
                    None => warn!(index, "No type at this position in the displayed list"),
                }
            }
            ViewerEvent::Tick | ViewerEvent::Refresh => {}
            ViewerEvent::Quit => debug!("Quit reached the session; ignoring"),
        }
    }

    /// Selection must stay within the type list: accept `type_id` if the last
    /// frame showed it or the pasteboard lists it right now.
    fn is_listed(&self, type_id: &TypeIdentifier) -> bool {
        let displayed = self
            .last_frame
            .as_ref()
            .is_some_and(|frame| frame.types.contains(type_id));
        displayed
            || self
                .read_types(self.controller.namespace())
                .contains(type_id)
    }

    fn read_counter(&self, namespace: Namespace) -> Option<ChangeCounter> {
        match self.source.change_counter(namespace) {
            Ok(counter) => Some(counter),
            Err(err) => {
                warn!(namespace = %namespace, error = %err, "Failed to read change counter; skipping detection");
                None
            }
        }
    }

    fn read_types(&self, namespace: Namespace) -> Vec<TypeIdentifier> {
        self.source.list_types(namespace).unwrap_or_else(|err| {
            warn!(namespace = %namespace, error = %err, "Failed to enumerate types; showing none");
            Vec::new()
        })
    }

    fn react_to_counter(&mut self, current: ChangeCounter, raw: &[TypeIdentifier]) {
        let observation =
            ChangeDetector::observe(self.controller.state().last_observed_change_counter, current);

        match observation {
            Observation::Initial(counter) => {
                debug!(counter = %counter, "First change counter observed");
                self.controller.on_initial_observation(raw);
            }
            Observation::Changed { previous, current } => {
                info!(
                    namespace = %self.controller.namespace(),
                    previous = %previous,
                    current = %current,
                    types = raw.len(),
                    "Pasteboard changed"
                );
                self.controller.on_pasteboard_changed(raw);
            }
            Observation::Unchanged => {}
        }

        if let Some(counter) = observation.counter_to_record() {
            self.next_turn
                .schedule(Deferred::ObserveChangeCounter(counter));
        }
    }

    fn compose_frame(&mut self, namespace: Namespace, raw: Vec<TypeIdentifier>) -> Frame {
        let types = self.stabilizer.stabilize(raw, &mut self.next_turn);
        let selected = self.controller.selected_type();

        Frame {
            namespace,
            types,
            selection: self.controller.state().clone(),
            title: title(selected, &self.app_name),
            detail: self.read_representation.execute(namespace, selected),
        }
    }
}

impl ViewerEventHandlerPort for ViewerSession {
    fn handle_event(&mut self, event: ViewerEvent) -> anyhow::Result<()> {
        self.run_turn(event).map(|_| ())
    }
}

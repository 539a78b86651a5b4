//! End-to-end turns through `ViewerSession` against a scripted pasteboard.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pv_app::{SessionOptions, ViewerSession};
use pv_core::ports::{PasteboardError, PasteboardSourcePort, RendererPort, ViewerEvent};
use pv_core::{
    ChangeCounter, DetailPane, Frame, Namespace, SelectionPhase, StabilizationMode, TypeIdentifier,
};

#[derive(Default)]
struct Board {
    counter: i64,
    items: Vec<(TypeIdentifier, Vec<u8>)>,
    vanished: Vec<TypeIdentifier>,
}

/// Pasteboard double with one board per namespace.
#[derive(Default)]
struct FakePasteboard {
    boards: Mutex<HashMap<Namespace, Board>>,
}

impl FakePasteboard {
    /// Replace the contents of `namespace`, bumping its counter.
    fn copy(&self, namespace: Namespace, types: &[&str]) {
        let mut boards = self.boards.lock().unwrap();
        let board = boards.entry(namespace).or_default();
        board.counter += 1;
        board.items = types
            .iter()
            .map(|id| (TypeIdentifier::from(*id), id.as_bytes().to_vec()))
            .collect();
        board.vanished.clear();
    }

    /// Keep `type_id` enumerated but make reading it fail, as when another
    /// process replaces the pasteboard mid-read.
    fn vanish(&self, namespace: Namespace, type_id: &str) {
        let mut boards = self.boards.lock().unwrap();
        boards
            .entry(namespace)
            .or_default()
            .vanished
            .push(TypeIdentifier::from(type_id));
    }
}

impl PasteboardSourcePort for FakePasteboard {
    fn list_types(&self, namespace: Namespace) -> Result<Vec<TypeIdentifier>, PasteboardError> {
        let boards = self.boards.lock().unwrap();
        Ok(boards
            .get(&namespace)
            .map(|b| b.items.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default())
    }

    fn change_counter(&self, namespace: Namespace) -> Result<ChangeCounter, PasteboardError> {
        let boards = self.boards.lock().unwrap();
        Ok(ChangeCounter(boards.get(&namespace).map_or(0, |b| b.counter)))
    }

    fn read_data(
        &self,
        namespace: Namespace,
        type_id: &TypeIdentifier,
    ) -> Result<Vec<u8>, PasteboardError> {
        let boards = self.boards.lock().unwrap();
        let not_available = || PasteboardError::NotAvailable {
            namespace,
            type_id: type_id.clone(),
        };
        let board = boards.get(&namespace).ok_or_else(not_available)?;
        if board.vanished.contains(type_id) {
            return Err(not_available());
        }
        board
            .items
            .iter()
            .find(|(id, _)| id == type_id)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(not_available)
    }
}

#[derive(Clone, Default)]
struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RendererPort for RecordingRenderer {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

fn session_with(
    pasteboard: &Arc<FakePasteboard>,
    stabilization: StabilizationMode,
) -> (ViewerSession, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let session = ViewerSession::new(
        pasteboard.clone(),
        Box::new(renderer.clone()),
        SessionOptions {
            stabilization,
            ..SessionOptions::default()
        },
    );
    (session, renderer)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ids(frame: &Frame) -> Vec<&str> {
    frame.types.iter().map(TypeIdentifier::as_str).collect()
}

fn selected(session: &ViewerSession) -> Option<&str> {
    session
        .selection()
        .selected_type
        .as_ref()
        .map(TypeIdentifier::as_str)
}

#[test]
fn new_copy_resets_user_selection_to_first_type() {
    init_tracing();
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(
        Namespace::General,
        &["public.utf8-plain-text", "public.rtf"],
    );
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    session.run_turn(ViewerEvent::Tick).unwrap();
    assert_eq!(selected(&session), Some("public.utf8-plain-text"));

    session.run_turn(ViewerEvent::Tick).unwrap();
    session
        .run_turn(ViewerEvent::TypeSelected("public.rtf".into()))
        .unwrap();
    assert_eq!(selected(&session), Some("public.rtf"));

    pasteboard.copy(Namespace::General, &["public.utf8-plain-text"]);
    let frame = session.run_turn(ViewerEvent::Tick).unwrap();

    assert_eq!(selected(&session), Some("public.utf8-plain-text"));
    assert_eq!(frame.title, "Plain Text (UTF-8)");
}

#[test]
fn namespace_switch_clears_selection_before_rendering_new_namespace() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.utf8-plain-text"]);
    pasteboard.copy(Namespace::Find, &["public.utf8-plain-text", "public.rtf"]);
    pasteboard.copy(Namespace::Find, &["public.utf8-plain-text", "public.rtf"]);
    let (mut session, renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    session.run_turn(ViewerEvent::Tick).unwrap();
    session.run_turn(ViewerEvent::Tick).unwrap();
    assert!(selected(&session).is_some());

    session
        .run_turn(ViewerEvent::NamespaceSelected(Namespace::Find))
        .unwrap();

    let frames = renderer.frames.lock().unwrap();
    let first_find_frame = frames
        .iter()
        .find(|f| f.namespace == Namespace::Find)
        .expect("a frame for the find namespace");
    assert_eq!(first_find_frame.selection.selected_type, None);
    assert_eq!(first_find_frame.detail, DetailPane::Placeholder);
    assert_eq!(first_find_frame.title, "Pasteboard Viewer");
}

#[test]
fn next_tick_after_namespace_switch_selects_from_new_namespace() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.utf8-plain-text"]);
    pasteboard.copy(Namespace::Find, &["public.rtf"]);
    pasteboard.copy(Namespace::Find, &["public.rtf"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::Passthrough);

    session.run_turn(ViewerEvent::Tick).unwrap();
    session
        .run_turn(ViewerEvent::NamespaceSelected(Namespace::Find))
        .unwrap();
    assert_eq!(selected(&session), None);

    session.run_turn(ViewerEvent::Tick).unwrap();
    assert_eq!(
        session.selection().phase(),
        SelectionPhase::Selected {
            namespace: Namespace::Find,
            type_id: "public.rtf".into()
        }
    );
}

#[test]
fn count_change_exposes_empty_list_for_one_tick() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["a", "b", "c"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    session.run_turn(ViewerEvent::Tick).unwrap();
    let steady = session.run_turn(ViewerEvent::Tick).unwrap();
    assert_eq!(ids(&steady), vec!["a", "b", "c"]);

    pasteboard.copy(Namespace::General, &["a", "b"]);
    let shrinking = session.run_turn(ViewerEvent::Tick).unwrap();
    assert!(shrinking.types.is_empty());

    let settled = session.run_turn(ViewerEvent::Tick).unwrap();
    assert_eq!(ids(&settled), vec!["a", "b"]);
}

#[test]
fn passthrough_exposes_new_list_immediately() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["a", "b", "c"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::Passthrough);

    assert_eq!(session.run_turn(ViewerEvent::Tick).unwrap().types.len(), 3);
    pasteboard.copy(Namespace::General, &["a", "b"]);
    assert_eq!(session.run_turn(ViewerEvent::Tick).unwrap().types.len(), 2);
}

#[test]
fn vanished_type_shows_placeholder_and_keeps_selection() {
    init_tracing();
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.utf8-plain-text", "public.rtf"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    session.run_turn(ViewerEvent::Tick).unwrap();
    session.run_turn(ViewerEvent::Tick).unwrap();
    let before = session.selection().clone();

    pasteboard.vanish(Namespace::General, "public.utf8-plain-text");
    let frame = session.run_turn(ViewerEvent::Refresh).unwrap();

    assert_eq!(
        frame.detail,
        DetailPane::NoLongerAvailable {
            type_id: "public.utf8-plain-text".into()
        }
    );
    assert_eq!(session.selection(), &before);
}

#[test]
fn steady_ticks_schedule_no_mutations() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.utf8-plain-text", "public.rtf"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    session.run_turn(ViewerEvent::Tick).unwrap();
    session.run_turn(ViewerEvent::Tick).unwrap();
    session
        .run_turn(ViewerEvent::TypeSelected("public.rtf".into()))
        .unwrap();

    for _ in 0..10 {
        let before = session.selection().clone();
        session.run_turn(ViewerEvent::Tick).unwrap();
        assert_eq!(session.selection(), &before);
        assert_eq!(session.pending_mutations(), 0);
    }
}

#[test]
fn counter_is_recorded_on_the_turn_after_detection() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.html"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    let frame = session.run_turn(ViewerEvent::Tick).unwrap();
    assert_eq!(frame.selection.last_observed_change_counter, None);
    assert_eq!(session.pending_mutations(), 2);

    session.run_turn(ViewerEvent::Refresh).unwrap();
    assert_eq!(
        session.selection().last_observed_change_counter,
        Some(ChangeCounter(1))
    );
    assert_eq!(session.stabilizer().last_known_count(), 1);
}

#[test]
fn selecting_by_position_uses_the_displayed_list() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.html", "public.rtf"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    // First frame is suppressed, so position 1 does not exist yet.
    session.run_turn(ViewerEvent::Tick).unwrap();
    session.run_turn(ViewerEvent::TypeSelectedAt(1)).unwrap();
    assert_eq!(selected(&session), Some("public.html"));

    // That turn displayed the full list.
    session.run_turn(ViewerEvent::TypeSelectedAt(1)).unwrap();
    assert_eq!(selected(&session), Some("public.rtf"));
}

#[test]
fn every_namespace_switch_renders_idle_first() {
    let pasteboard = Arc::new(FakePasteboard::default());
    for namespace in Namespace::ALL {
        pasteboard.copy(namespace, &["public.utf8-plain-text"]);
    }
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::Passthrough);

    for namespace in Namespace::ALL.into_iter().rev() {
        session.run_turn(ViewerEvent::Tick).unwrap();
        let frame = session
            .run_turn(ViewerEvent::NamespaceSelected(namespace))
            .unwrap();
        assert_eq!(frame.selection.selected_type, None);
        assert_eq!(frame.namespace, namespace);
    }
}

#[test]
fn selecting_an_unlisted_identifier_keeps_the_selection() {
    init_tracing();
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.utf8-plain-text"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    session.run_turn(ViewerEvent::Tick).unwrap();
    let before = session.selection().clone();

    let frame = session
        .run_turn(ViewerEvent::TypeSelected("bogus.type".into()))
        .unwrap();

    assert_eq!(frame.selection.selected_type, before.selected_type);
    assert_eq!(selected(&session), Some("public.utf8-plain-text"));
    assert_eq!(frame.title, "Plain Text (UTF-8)");
    assert!(matches!(frame.detail, DetailPane::Payload(_)));
}

#[test]
fn selecting_a_listed_identifier_before_it_is_displayed() {
    let pasteboard = Arc::new(FakePasteboard::default());
    pasteboard.copy(Namespace::General, &["public.html", "public.rtf"]);
    let (mut session, _renderer) = session_with(&pasteboard, StabilizationMode::CountDebounce);

    // The first frame hides the list; the pasteboard still lists the type.
    session.run_turn(ViewerEvent::Tick).unwrap();
    assert!(session.last_frame().unwrap().types.is_empty());

    session
        .run_turn(ViewerEvent::TypeSelected("public.rtf".into()))
        .unwrap();
    assert_eq!(selected(&session), Some("public.rtf"));
}

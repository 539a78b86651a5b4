//! Stdin command adapter.
//!
//! Commands:
//!
//! - `ns <name>`: switch namespace (general, find, font, ruler, drag)
//! - `type <n>`: select the n-th type of the displayed list (1-based)
//! - `type <identifier>`: select a type by identifier
//! - `list`: redraw without polling
//! - `quit`
//!
//! Stdin is read on a dedicated thread with blocking IO so a pending read
//! never holds up runtime shutdown.

use std::io::BufRead;

use pv_core::ports::ViewerEvent;
use pv_core::{Namespace, ParseNamespaceError, TypeIdentifier};
use pv_platform::runtime::ViewerEventSender;
use tracing::{debug, warn};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command `{0}` (try: ns, type, list, quit)")]
    UnknownCommand(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    InvalidNamespace(#[from] ParseNamespaceError),

    #[error("list positions start at 1")]
    ZeroPosition,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ViewerEvent>, InputError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let event = match command.to_ascii_lowercase().as_str() {
        "ns" | "namespace" => {
            let name = argument.ok_or(InputError::MissingArgument("ns"))?;
            ViewerEvent::NamespaceSelected(name.parse::<Namespace>()?)
        }
        "type" | "t" => {
            let target = argument.ok_or(InputError::MissingArgument("type"))?;
            match target.parse::<usize>() {
                Ok(0) => return Err(InputError::ZeroPosition),
                Ok(position) => ViewerEvent::TypeSelectedAt(position - 1),
                Err(_) => ViewerEvent::TypeSelected(TypeIdentifier::from(target)),
            }
        }
        "list" | "ls" => ViewerEvent::Refresh,
        "quit" | "q" | "exit" => ViewerEvent::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(Some(event))
}

/// Forward every line of `reader` as a viewer event until EOF, `quit`, or
/// the runtime going away. Blocking; run it on its own thread.
pub fn forward_commands<R: BufRead>(reader: R, events: &ViewerEventSender) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read input, stopping input");
                return;
            }
        };

        match parse_command(&line) {
            Ok(Some(event)) => {
                let quit = event == ViewerEvent::Quit;
                if events.blocking_send(event).is_err() {
                    debug!("Runtime stopped, dropping input");
                    return;
                }
                if quit {
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }
    debug!("Input closed");
}

/// Spawn the stdin reader thread.
pub fn spawn_stdin_reader(events: ViewerEventSender) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("stdin-commands".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            forward_commands(stdin.lock(), &events);
        })
}

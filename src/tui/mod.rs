//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the form,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Submitting**: draws every ~100ms so the outstanding count stays fresh.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or a
//!   reply arriving.
//!
//! ## Submit handling
//!
//! Enter is consumed by the topic field and never reaches any other
//! handler. Whatever the request's outcome, submitting does not quit, clear
//! the field, or touch the reply until a result lands.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use std::collections::HashMap;
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::api::{GreetBackend, RequestId, spawn_submission};
use crate::core::action::{Action, Effect, update};
use crate::core::state::FormState;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, ResponseViewState, TopicInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input: TopicInput,
    pub response: ResponseViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input: TopicInput::new(),
            response: ResponseViewState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Runs `restore` before handing back an error, so a failed setup step
/// does not leave the shell in raw mode on the alternate screen.
fn restore_on_err<T>(result: std::io::Result<T>, restore: impl FnOnce()) -> std::io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// Outstanding request tasks, keyed by the id their result will carry.
#[derive(Default)]
struct PendingTasks {
    handles: HashMap<RequestId, AbortHandle>,
}

impl PendingTasks {
    fn insert(&mut self, id: RequestId, handle: AbortHandle) {
        self.handles.insert(id, handle);
    }

    fn finished(&mut self, id: RequestId) {
        self.handles.remove(&id);
    }

    fn abort(&mut self, ids: &[RequestId]) {
        for id in ids {
            if let Some(handle) = self.handles.remove(id) {
                debug!("Aborting request {}", id);
                handle.abort();
            }
        }
    }

    fn abort_all(&mut self) {
        for (id, handle) in self.handles.drain() {
            debug!("Aborting request {} on exit", id);
            handle.abort();
        }
    }
}

pub fn run(backend: Arc<dyn GreetBackend>) -> std::io::Result<()> {
    let mut app = FormState::new(backend.endpoint().to_string());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = restore_on_err(TerminalModeGuard::new(), ratatui::restore)?;

    // Results from request tasks
    let (tx, rx) = mpsc::channel();
    let mut pending = PendingTasks::default();

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = app.is_submitting();
        }

        let timeout = if app.is_submitting() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = match poll_event_timeout(timeout) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&event, &mut app, &mut tui, &mut pending, &backend, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break Ok(());
        }

        // Results from background requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if let Action::ResponseReceived { id, .. } = &action {
                pending.finished(*id);
            }
            let previous_answer = app.answered_at;
            update(&mut app, action);
            if app.answered_at != previous_answer {
                tui.response.reset();
            }
        }
    };

    pending.abort_all();
    ratatui::restore();
    info!("topicform shutting down");
    result
}

/// Applies one event. Returns `true` when the app should quit.
fn handle_event(
    event: &TuiEvent,
    app: &mut FormState,
    tui: &mut TuiState,
    pending: &mut PendingTasks,
    backend: &Arc<dyn GreetBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => apply(update(app, Action::Quit), pending, backend, tx),
        TuiEvent::Escape => {
            let action = if app.is_submitting() {
                Action::CancelPending
            } else {
                Action::Quit
            };
            apply(update(app, action), pending, backend, tx)
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.response.handle_event(event);
            false
        }
        _ => match tui.input.handle_event(event) {
            Some(InputEvent::Submit(topic)) => {
                apply(update(app, Action::Submit(topic)), pending, backend, tx)
            }
            Some(InputEvent::Rejected) => {
                debug!("Submit refused: topic is required");
                false
            }
            Some(InputEvent::ContentChanged) | None => false,
        },
    }
}

/// Performs the I/O an `Effect` asks for. Returns `true` on quit.
fn apply(
    effect: Effect,
    pending: &mut PendingTasks,
    backend: &Arc<dyn GreetBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::SpawnRequest { id, topic } => {
            let handle = spawn_submission(backend.clone(), id, topic, tx.clone());
            pending.insert(id, handle);
            false
        }
        Effect::AbortRequests(ids) => {
            pending.abort(&ids);
            false
        }
        Effect::Quit => {
            if !pending.handles.is_empty() {
                warn!("Abandoning {} outstanding request(s)", pending.handles.len());
            }
            pending.abort_all();
            true
        }
    }
}

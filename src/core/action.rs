//! # Actions
//!
//! Everything that can happen to the form becomes an `Action`.
//! User presses Enter? That's `Action::Submit(topic)`.
//! Backend answers? That's `Action::ResponseReceived { id, result }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Submissions are never queued or serialized. Two overlapping submissions
//! race and the reply that resolves last overwrites the message, whatever
//! order they were submitted in.

use chrono::Local;
use log::{debug, info, warn};

use crate::api::{GreetError, GreetResponse, RequestId};
use crate::core::state::FormState;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The form was submitted with this topic.
    Submit(String),
    /// A background request finished.
    ResponseReceived {
        id: RequestId,
        result: Result<GreetResponse, GreetError>,
    },
    /// Abandon every outstanding request.
    CancelPending,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Start a request for `topic`; its result must come back tagged `id`.
    SpawnRequest { id: RequestId, topic: String },
    /// Abort the tasks behind these ids.
    AbortRequests(Vec<RequestId>),
    /// Leave the app. Every outstanding id has already been dropped.
    Quit,
}

pub fn update(state: &mut FormState, action: Action) -> Effect {
    match action {
        Action::Submit(topic) => {
            if topic.is_empty() {
                warn!("Ignoring submit with empty topic");
                return Effect::None;
            }
            let id = state.allocate_id();
            state.in_flight.insert(id);
            state.error = None;
            state.status_message = format!("Submitting {}", id);
            info!("Submit {} (in flight: {})", id, state.in_flight.len());
            Effect::SpawnRequest { id, topic }
        }
        Action::ResponseReceived { id, result } => {
            if !state.in_flight.remove(&id) {
                debug!("Discarding result for {}: no longer in flight", id);
                return Effect::None;
            }
            match result {
                Ok(reply) => {
                    info!("Reply for {} applied ({} bytes)", id, reply.message.len());
                    state.response_message = reply.message;
                    state.answered_at = Some(Local::now());
                    state.error = None;
                    state.status_message = format!("Answered {}", id);
                }
                Err(e) => {
                    warn!("Request {} failed: {}", id, e);
                    state.error = Some(e.to_string());
                    state.status_message = format!("Failed {}", id);
                }
            }
            Effect::None
        }
        Action::CancelPending => {
            if state.in_flight.is_empty() {
                return Effect::None;
            }
            let ids: Vec<RequestId> = std::mem::take(&mut state.in_flight).into_iter().collect();
            info!("Cancelling {} pending request(s)", ids.len());
            state.status_message = format!("Cancelled {} request(s)", ids.len());
            Effect::AbortRequests(ids)
        }
        Action::Quit => {
            if !state.in_flight.is_empty() {
                info!("Quitting with {} request(s) in flight", state.in_flight.len());
                state.in_flight.clear();
            }
            Effect::Quit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_form;

    fn reply(message: &str) -> Result<GreetResponse, GreetError> {
        Ok(GreetResponse {
            message: message.to_string(),
        })
    }

    fn submit(state: &mut FormState, topic: &str) -> RequestId {
        match update(state, Action::Submit(topic.to_string())) {
            Effect::SpawnRequest { id, topic: sent } => {
                assert_eq!(sent, topic);
                id
            }
            other => panic!("Expected SpawnRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_spawns_request_with_exact_topic() {
        let mut state = test_form();
        let effect = update(&mut state, Action::Submit("  spaced topic ".to_string()));
        assert_eq!(
            effect,
            Effect::SpawnRequest {
                id: RequestId(1),
                topic: "  spaced topic ".to_string(),
            }
        );
        assert!(state.is_submitting());
    }

    #[test]
    fn test_empty_submit_sends_nothing() {
        let mut state = test_form();
        assert_eq!(update(&mut state, Action::Submit(String::new())), Effect::None);
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_success_sets_message() {
        let mut state = test_form();
        let id = submit(&mut state, "Alice");
        update(&mut state, Action::ResponseReceived { id, result: reply("Hello, Alice") });

        assert_eq!(state.response_message, "Hello, Alice");
        assert!(state.answered_at.is_some());
        assert!(state.error.is_none());
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_failure_keeps_previous_message() {
        let mut state = test_form();
        let first = submit(&mut state, "Alice");
        update(&mut state, Action::ResponseReceived { id: first, result: reply("Hello, Alice") });

        let second = submit(&mut state, "Bob");
        update(
            &mut state,
            Action::ResponseReceived {
                id: second,
                result: Err(GreetError::Network("connection refused".to_string())),
            },
        );

        assert_eq!(state.response_message, "Hello, Alice");
        assert_eq!(
            state.error.as_deref(),
            Some("network error: connection refused")
        );
        assert!(!state.is_submitting());
    }

    #[test]
    fn test_last_resolved_wins_over_last_submitted() {
        let mut state = test_form();
        let a = submit(&mut state, "A");
        let b = submit(&mut state, "B");

        // B resolves first, A second.
        update(&mut state, Action::ResponseReceived { id: b, result: reply("reply B") });
        update(&mut state, Action::ResponseReceived { id: a, result: reply("reply A") });

        assert_eq!(state.response_message, "reply A");
    }

    #[test]
    fn test_submit_clears_error_banner() {
        let mut state = test_form();
        state.error = Some("old failure".to_string());
        submit(&mut state, "retry");
        assert!(state.error.is_none());
    }

    #[test]
    fn test_cancel_pending_aborts_all_and_discards_late_results() {
        let mut state = test_form();
        let a = submit(&mut state, "A");
        let b = submit(&mut state, "B");

        assert_eq!(update(&mut state, Action::CancelPending), Effect::AbortRequests(vec![a, b]));
        assert!(!state.is_submitting());

        update(&mut state, Action::ResponseReceived { id: a, result: reply("too late") });
        assert!(state.response_message.is_empty());
    }

    #[test]
    fn test_cancel_with_nothing_pending_is_noop() {
        let mut state = test_form();
        assert_eq!(update(&mut state, Action::CancelPending), Effect::None);
        assert!(state.status_message.is_empty());
    }

    #[test]
    fn test_quit_drops_in_flight() {
        let mut state = test_form();
        let id = submit(&mut state, "A");
        assert_eq!(update(&mut state, Action::Quit), Effect::Quit);
        assert!(!state.is_submitting());

        update(&mut state, Action::ResponseReceived { id, result: reply("after quit") });
        assert!(state.response_message.is_empty());
    }
}

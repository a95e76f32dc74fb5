//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{GreetBackend, GreetError, GreetResponse};
use crate::core::state::FormState;

/// A backend that answers every topic with the same canned result and
/// remembers which topics it was asked about.
pub struct StubBackend {
    reply: Result<GreetResponse, GreetError>,
    seen: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn replying(message: &str) -> Self {
        Self {
            reply: Ok(GreetResponse {
                message: message.to_string(),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GreetError) -> Self {
        Self {
            reply: Err(error),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn topics(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GreetBackend for StubBackend {
    fn endpoint(&self) -> &str {
        "stub://greet"
    }

    async fn greet(&self, topic: &str) -> Result<GreetResponse, GreetError> {
        self.seen.lock().unwrap().push(topic.to_string());
        self.reply.clone()
    }
}

/// Creates a form pointed at a test endpoint.
pub fn test_form() -> FormState {
    FormState::new("http://test.local/api/greet".to_string())
}

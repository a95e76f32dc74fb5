//! # Form State
//!
//! ```text
//! FormState
//! ├── endpoint: String                    // where submissions go
//! ├── response_message: String            // last successful reply
//! ├── answered_at: Option<DateTime>       // when that reply landed
//! ├── error: Option<String>               // failure banner text
//! ├── in_flight: BTreeSet<RequestId>      // outstanding submissions
//! └── status_message: String              // title bar text
//! ```
//!
//! The topic being typed is owned by the input component in the adapter;
//! it reaches the core only as the payload of `Action::Submit`.
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::BTreeSet;

use chrono::{DateTime, Local};

use crate::api::RequestId;

pub struct FormState {
    pub endpoint: String,
    /// Reply of the most recently *resolved* successful request. Never
    /// cleared once set; failures leave it as it was.
    pub response_message: String,
    pub answered_at: Option<DateTime<Local>>,
    pub error: Option<String>,
    pub in_flight: BTreeSet<RequestId>,
    pub status_message: String,
    next_id: u64,
}

impl FormState {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            response_message: String::new(),
            answered_at: None,
            error: None,
            in_flight: BTreeSet::new(),
            status_message: String::new(),
            next_id: 1,
        }
    }

    pub fn is_submitting(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn has_reply(&self) -> bool {
        !self.response_message.is_empty()
    }

    /// Hands out the id for the next submission.
    pub(crate) fn allocate_id(&mut self) -> RequestId {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        id
    }
}

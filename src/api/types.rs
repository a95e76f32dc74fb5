use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed local address the form posts to unless overridden.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/greet";

/// Body of `POST /api/greet`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GreetRequest {
    pub topic: String,
}

/// Expected reply shape. Extra fields sent by the backend are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GreetResponse {
    pub message: String,
}

/// Identifies one submission. Ids increase with submission order, which is
/// NOT the order replies are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//! Client side of the `/api/greet` contract.

pub mod backend;
pub mod client;
pub mod dispatch;
pub mod types;

pub use backend::{GreetBackend, GreetError};
pub use client::HttpGreetBackend;
pub use dispatch::spawn_submission;
pub use types::{DEFAULT_ENDPOINT, GreetRequest, GreetResponse, RequestId};

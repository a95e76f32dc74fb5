//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: endpoint and submission status
//! - `ErrorBanner`: last failure, if any
//! - `ResponseView`: the reply, borrowed from core state (scroll position
//!   lives in `ResponseViewState`)
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `TopicInput`: the required single-line topic field
//!
//! Components receive external data as props rather than reading `FormState`
//! directly, which keeps them testable with `TestBackend` alone.

mod error_banner;
mod response_view;
mod title_bar;
mod topic_input;

pub use error_banner::ErrorBanner;
pub use response_view::{ResponseView, ResponseViewState};
pub use title_bar::TitleBar;
pub use topic_input::{InputEvent, TopicInput};

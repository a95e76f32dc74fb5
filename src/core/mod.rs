//! # Core Application Logic
//!
//! The form's business logic. It knows nothing about any specific UI
//! technology and performs no I/O.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • FormState (data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  One-shot  │      │ api::      │
//!     │  Adapter   │      │    CLI     │      │ dispatch   │
//!     │ (ratatui)  │      │ (main.rs)  │      │ (tokio)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `FormState`, everything the form remembers
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`config`]: settings file and override resolution

pub mod action;
pub mod config;
pub mod state;

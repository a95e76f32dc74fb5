//! Runs submissions in the background.
//!
//! Each submission gets its own tokio task that reports back with exactly one
//! [`Action::ResponseReceived`]. Nothing orders these tasks relative to each
//! other: whichever reply lands last is the one the form ends up showing.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Instant;

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use super::backend::GreetBackend;
use super::types::RequestId;
use crate::core::action::Action;

pub fn spawn_submission(
    backend: Arc<dyn GreetBackend>,
    id: RequestId,
    topic: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning submission {} to {}", id, backend.endpoint());

    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let result = backend.greet(&topic).await;

        match &result {
            Ok(reply) => debug!(
                "Submission {} resolved in {}ms ({} bytes)",
                id,
                started.elapsed().as_millis(),
                reply.message.len()
            ),
            Err(e) => info!(
                "Submission {} failed after {}ms: {}",
                id,
                started.elapsed().as_millis(),
                e
            ),
        }

        if tx.send(Action::ResponseReceived { id, result }).is_err() {
            warn!("Failed to deliver result for {}: receiver dropped", id);
        }
    });

    handle.abort_handle()
}

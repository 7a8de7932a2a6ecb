//! Single-writer queue for cart snapshots.
//!
//! Mutations enqueue a full snapshot and return immediately. One background
//! task applies the snapshots to the durable store in enqueue order, so the
//! stored value always ends on the most recent mutation even when writes
//! complete slowly. When several snapshots are waiting, only the newest is
//! written: each snapshot replaces the whole slot anyway.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::storage::KeyValueStore;

enum Command {
    Write(String),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background snapshot writer.
///
/// Dropping the handle lets the task drain what is queued and exit.
#[derive(Debug)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<Command>,
}

impl SnapshotWriter {
    /// Spawn the writer task for `key` in `store`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn<S: KeyValueStore>(store: Arc<S>, key: &'static str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        info!(key, "Spawning snapshot writer task");
        tokio::spawn(run(store, key, rx));
        Self { tx }
    }

    /// Queue a snapshot for writing. Never blocks and never fails.
    pub fn enqueue(&self, snapshot: String) {
        if self.tx.send(Command::Write(snapshot)).is_err() {
            warn!("Snapshot writer has stopped, dropping snapshot");
        }
    }

    /// Wait until every snapshot queued before this call has been written
    /// (or has failed).
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_err() {
            return;
        }
        // The task only drops the sender when it is shutting down.
        let _ = done_rx.await;
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Write(snapshot) => f
                .debug_tuple("Write")
                .field(&format_args!("{} bytes", snapshot.len()))
                .finish(),
            Self::Flush(_) => f.write_str("Flush"),
        }
    }
}

async fn run<S: KeyValueStore>(
    store: Arc<S>,
    key: &'static str,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Write(mut snapshot) => {
                // Skip ahead to the newest snapshot, stopping at a flush
                // barrier so it is answered only after this write.
                let mut barrier = None;
                while let Ok(next) = rx.try_recv() {
                    match next {
                        Command::Write(newer) => {
                            debug!("Coalescing queued cart snapshot");
                            snapshot = newer;
                        }
                        Command::Flush(done) => {
                            barrier = Some(done);
                            break;
                        }
                    }
                }

                if let Err(e) = store.set(key, &snapshot).await {
                    warn!(key, error = %e, "Failed to persist cart snapshot");
                }

                if let Some(done) = barrier {
                    let _ = done.send(());
                }
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }

    debug!(key, "Snapshot writer task stopped");
}

//! In-flight aggregation for one load's chunk reads.
//!
//! A [`StreamState`] tracks a fixed set of chunk operations with an
//! atomic pending counter and delivers the aggregate outcome through a
//! oneshot channel exactly once, when the last operation completes. A
//! failed chunk fails the aggregate, but sibling reads still drain
//! normally; completed payloads target disjoint destination ranges, so
//! nothing is rolled back. Dropping the state without completing all
//! operations drops the sender, which is how an aborted load ends up
//! never delivering a result.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::oneshot;
use tracing::warn;

use super::LoadError;

/// One completed chunk payload, targeting a disjoint destination range.
#[derive(Debug)]
pub struct ChunkPart {
    /// Byte offset within the aggregate destination buffer.
    pub dest_offset: u64,
    /// The bytes read.
    pub data: Vec<u8>,
}

/// Aggregate outcome of a load's chunk reads.
pub type StreamOutcome = Result<Vec<ChunkPart>, LoadError>;

/// Tracks the in-flight chunk operations of one load.
pub struct StreamState {
    pending: AtomicUsize,
    parts: Mutex<Vec<ChunkPart>>,
    first_error: Mutex<Option<LoadError>>,
    completion: Mutex<Option<oneshot::Sender<StreamOutcome>>>,
}

impl StreamState {
    /// State expecting `pending` chunk completions, plus the receiver
    /// the aggregate outcome will arrive on.
    ///
    /// `pending` must be at least 1; a load with no chunk reads has no
    /// business constructing a stream state.
    pub fn new(pending: usize) -> (std::sync::Arc<Self>, oneshot::Receiver<StreamOutcome>) {
        let (tx, rx) = oneshot::channel();
        let state = std::sync::Arc::new(Self {
            pending: AtomicUsize::new(pending),
            parts: Mutex::new(Vec::with_capacity(pending)),
            first_error: Mutex::new(None),
            completion: Mutex::new(Some(tx)),
        });
        (state, rx)
    }

    /// Record one chunk completion; fires the aggregate when it was the
    /// last one pending.
    pub fn chunk_done(&self, source: &str, result: Result<ChunkPart, LoadError>) {
        match result {
            Ok(part) => {
                self.parts.lock().unwrap().push(part);
            }
            Err(error) => {
                warn!(source = %source, error = %error, "chunk read failed");
                let mut first = self.first_error.lock().unwrap();
                if first.is_none() {
                    *first = Some(error);
                }
            }
        }

        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.complete();
        }
    }

    fn complete(&self) {
        let sender = self.completion.lock().unwrap().take();
        let Some(sender) = sender else {
            return;
        };

        let outcome = match self.first_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(std::mem::take(&mut *self.parts.lock().unwrap())),
        };
        // The receiver may have given up waiting; nothing to do then.
        let _ = sender.send(outcome);
    }
}

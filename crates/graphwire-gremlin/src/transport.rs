//! Boundary with the store's query engine.
//!
//! The engine itself lives outside this crate. It only has to hand out a
//! lazily fetched result collection per script: a "has more" predicate and
//! a "fetch next batch" call that honours a [`CancelSignal`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use graphwire_core::Collection;

/// Opens one query per submitted Gremlin script.
pub trait GremlinTransport: Send + Sync + 'static {
    type Query: GremlinQuery;

    /// Prepare `script` against `collection`. Nothing is fetched yet.
    fn create_gremlin_query(&self, collection: &Collection, script: &str) -> anyhow::Result<Self::Query>;
}

/// A lazily fetched result collection.
#[async_trait]
pub trait GremlinQuery: Send {
    /// Whether another batch may be fetched.
    fn has_more_results(&self) -> bool;

    /// Fetch the next batch of raw result documents.
    async fn execute_next(&mut self, cancel: &CancelSignal) -> anyhow::Result<Vec<Value>>;
}

/// Cooperative cancellation shared between a caller and in-flight fetches.
///
/// Cloning shares the signal; cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

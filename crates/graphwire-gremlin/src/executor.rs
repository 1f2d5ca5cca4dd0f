//! Single-result execution: submit one script, expect at most one document.

use serde_json::Value;

use graphwire_core::{from_document, Collection, VertexModel};

use crate::client::{require, GraphClient, GraphError};
use crate::transport::{CancelSignal, GremlinQuery, GremlinTransport};

const SINGLE_RESULT_FAILED: &str = "Failed to execute a single-result Gremlin query";

/// Fetch exactly one batch from `query` and enforce the single-result contract.
///
/// - No pending results before the first fetch is a precondition fault.
/// - An empty batch is `Ok(None)` when `allow_null`, otherwise [`GraphError::NoResults`].
/// - More than one document, in the batch or still pending, is [`GraphError::MultipleResults`].
pub async fn execute_single<Q: GremlinQuery>(
    mut query: Q,
    cancel: &CancelSignal,
    allow_null: bool,
) -> Result<Option<Value>, GraphError> {
    if !query.has_more_results() {
        return Err(GraphError::NoPendingResults);
    }

    let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GraphError::Cancelled),
        batch = query.execute_next(cancel) => batch.map_err(|source| GraphError::Transport { source }),
    };
    let batch = fetched?;

    let batch_size = batch.len();
    let Some(document) = batch.into_iter().next() else {
        if allow_null {
            return Ok(None);
        }
        tracing::warn!("Gremlin script returned no results");
        return Err(GraphError::NoResults);
    };

    if batch_size > 1 || query.has_more_results() {
        tracing::warn!(batch_size, "Gremlin script returned more than one result");
        return Err(GraphError::MultipleResults);
    }

    Ok(Some(document))
}

impl<T: GremlinTransport> GraphClient<T> {
    /// Submit `script` and return its single raw result document, if any.
    pub async fn submit_single_document(
        &self,
        collection: &Collection,
        script: &str,
        cancel: &CancelSignal,
        allow_null: bool,
    ) -> Result<Option<Value>, GraphError> {
        require("script", script).map_err(|e| e.context(SINGLE_RESULT_FAILED))?;
        self.single_document(collection, script, cancel, allow_null)
            .await
            .map_err(|e| e.context(SINGLE_RESULT_FAILED))
    }

    /// Submit `script` and decode its single result into `V`.
    ///
    /// The returned document is decoded in two passes: the vertex envelope
    /// first, then the nested property bag into the model's scalar fields.
    pub async fn submit_single<V: VertexModel>(
        &self,
        collection: &Collection,
        script: &str,
        cancel: &CancelSignal,
        allow_null: bool,
    ) -> Result<Option<V>, GraphError> {
        require("script", script).map_err(|e| e.context(SINGLE_RESULT_FAILED))?;
        let decoded = match self.single_document(collection, script, cancel, allow_null).await {
            Ok(Some(document)) => from_document::<V>(document).map(Some).map_err(GraphError::from),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        decoded.map_err(|e| e.context(SINGLE_RESULT_FAILED))
    }

    async fn single_document(
        &self,
        collection: &Collection,
        script: &str,
        cancel: &CancelSignal,
        allow_null: bool,
    ) -> Result<Option<Value>, GraphError> {
        tracing::debug!(collection = %collection, script, "Submitting Gremlin script");
        let query = self
            .transport()
            .create_gremlin_query(collection, script)
            .map_err(|source| GraphError::Transport { source })?;
        execute_single(query, cancel, allow_null).await
    }
}

//! Write operations for typed vertices and edges.
//!
//! Each operation builds its Gremlin command, submits it through the
//! single-result executor, and wraps any failure with a stable message.

use graphwire_core::{Collection, Edge, VertexModel};

use crate::client::{GraphClient, GraphError};
use crate::command::{to_add_edge_command, to_create_command, to_delete_command, to_update_command};
use crate::transport::{CancelSignal, GremlinTransport};

impl<T: GremlinTransport> GraphClient<T> {
    // ── Vertices ─────────────────────────────────────────────────

    /// Create a vertex and return the store's authoritative copy.
    pub async fn add_vertex<V: VertexModel>(
        &self,
        collection: &Collection,
        vertex: &V,
        cancel: &CancelSignal,
    ) -> Result<V, GraphError> {
        const CONTEXT: &str = "Failed to add a vertex to the graph";

        let script = to_create_command(vertex).map_err(|e| e.context(CONTEXT))?;
        let added = self
            .submit_single::<V>(collection, &script, cancel, false)
            .await
            .and_then(|v| v.ok_or(GraphError::NoResults))
            .map_err(|e| e.context(CONTEXT))?;

        tracing::info!(
            vertex_id = %added.vertex().id().map(|id| id.as_str()).unwrap_or_default(),
            label = V::LABEL,
            collection = %collection,
            "Added vertex"
        );
        Ok(added)
    }

    /// Overwrite every schema field of an existing vertex.
    ///
    /// Fails with a cardinality error when the vertex no longer exists.
    pub async fn update_vertex<V: VertexModel>(
        &self,
        collection: &Collection,
        vertex: &V,
        cancel: &CancelSignal,
    ) -> Result<V, GraphError> {
        const CONTEXT: &str = "Failed to update a vertex in the graph";

        let script = to_update_command(vertex).map_err(|e| e.context(CONTEXT))?;
        let updated = self
            .submit_single::<V>(collection, &script, cancel, false)
            .await
            .and_then(|v| v.ok_or(GraphError::NoResults))
            .map_err(|e| e.context(CONTEXT))?;

        tracing::info!(
            vertex_id = %updated.vertex().id().map(|id| id.as_str()).unwrap_or_default(),
            label = V::LABEL,
            collection = %collection,
            "Updated vertex"
        );
        Ok(updated)
    }

    /// Drop a vertex by id. Dropping a missing vertex is not an error.
    pub async fn delete_vertex(
        &self,
        collection: &Collection,
        vertex_id: &str,
        cancel: &CancelSignal,
    ) -> Result<(), GraphError> {
        const CONTEXT: &str = "Failed to delete a vertex from the graph";

        let script = to_delete_command(vertex_id).map_err(|e| e.context(CONTEXT))?;
        self.submit_single_document(collection, &script, cancel, true)
            .await
            .map_err(|e| e.context(CONTEXT))?;

        tracing::info!(vertex_id, collection = %collection, "Deleted vertex");
        Ok(())
    }

    // ── Edges ────────────────────────────────────────────────────

    /// Connect two persisted vertices with an edge labelled `edge_label`.
    pub async fn add_edge<S: VertexModel, D: VertexModel>(
        &self,
        collection: &Collection,
        source: &S,
        edge_label: &str,
        target: &D,
        cancel: &CancelSignal,
    ) -> Result<Edge, GraphError> {
        const CONTEXT: &str = "Failed to add an edge to the graph";

        let script = to_add_edge_command(source, edge_label, target).map_err(|e| e.context(CONTEXT))?;
        let document = self
            .submit_single_document(collection, &script, cancel, false)
            .await
            .and_then(|d| d.ok_or(GraphError::NoResults))
            .map_err(|e| e.context(CONTEXT))?;

        let edge: Edge = serde_json::from_value(document)
            .map_err(|e| GraphError::Serialization(format!("Failed to deserialize edge: {e}")).context(CONTEXT))?;

        tracing::info!(
            edge_id = %edge.id,
            label = %edge.label,
            out_v = %edge.out_v,
            in_v = %edge.in_v,
            "Added edge"
        );
        Ok(edge)
    }
}

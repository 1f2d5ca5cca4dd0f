//! Read operations for typed vertices.

use graphwire_core::{Collection, VertexModel};

use crate::client::{GraphClient, GraphError};
use crate::command::to_get_command;
use crate::transport::{CancelSignal, GremlinTransport};

impl<T: GremlinTransport> GraphClient<T> {
    /// Get a vertex by id. A missing vertex is `Ok(None)`, not an error.
    pub async fn get_vertex<V: VertexModel>(
        &self,
        collection: &Collection,
        vertex_id: &str,
        cancel: &CancelSignal,
    ) -> Result<Option<V>, GraphError> {
        const CONTEXT: &str = "Failed to get a vertex";

        let script = to_get_command(vertex_id).map_err(|e| e.context(CONTEXT))?;
        let vertex = self
            .submit_single::<V>(collection, &script, cancel, true)
            .await
            .map_err(|e| e.context(CONTEXT))?;

        if vertex.is_none() {
            tracing::debug!(vertex_id, label = V::LABEL, "Vertex not found");
        }
        Ok(vertex)
    }
}

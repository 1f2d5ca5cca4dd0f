//! Core graph types shared by the codec, the command builder, and clients.
//!
//! These mirror the JSON shapes a Gremlin-over-documents store exchanges:
//! vertices with a label and wrapped properties, and edges between them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Reserved names ────────────────────────────────────────────────

/// Wire name of the vertex identifier.
pub const ID_PROPERTY: &str = "id";
/// Wire name of the vertex label.
pub const LABEL_PROPERTY: &str = "label";
/// Wire name of the shape discriminator.
pub const TYPE_PROPERTY: &str = "type";
/// Wire name of the nested property bag.
pub const PROPERTIES_PROPERTY: &str = "properties";
/// Discriminator value carried by every vertex document.
pub const VERTEX_TYPE: &str = "vertex";
/// Discriminator value carried by every edge document.
pub const EDGE_TYPE: &str = "edge";

/// Names that are part of the vertex envelope rather than user properties.
pub const RESERVED_PROPERTIES: [&str; 4] = [
    ID_PROPERTY,
    LABEL_PROPERTY,
    TYPE_PROPERTY,
    PROPERTIES_PROPERTY,
];

/// Returns true when `name` belongs to the vertex envelope.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PROPERTIES.contains(&name)
}

// ── Identity ──────────────────────────────────────────────────────

/// Opaque identifier of a vertex, unique within one graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct VertexId(pub String);

impl VertexId {
    /// A fresh lowercase UUID, the form stores generate for new vertices.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VertexId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identity of the document collection (graph) every command is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Collection {
    pub database: String,
    pub id: String,
}

impl Collection {
    pub fn new(database: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            id: id.into(),
        }
    }

    /// Resource link in the `dbs/<database>/colls/<collection>` form.
    pub fn link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.id)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.database, self.id)
    }
}

// ── Vertex ────────────────────────────────────────────────────────

/// The envelope every typed vertex carries: identity, label, and type.
///
/// The label is fixed at construction. The id stays empty until the store
/// hands back an authoritative copy, or the caller selects an existing
/// vertex with [`Vertex::with_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: Option<VertexId>,
    label: String,
}

impl Vertex {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
        }
    }

    /// A vertex envelope pointing at an already persisted vertex.
    pub fn with_id(label: impl Into<String>, id: impl Into<VertexId>) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
        }
    }

    pub fn id(&self) -> Option<&VertexId> {
        self.id.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Always [`VERTEX_TYPE`].
    pub fn vertex_type(&self) -> &'static str {
        VERTEX_TYPE
    }

    /// Record the identifier the store returned. An id, once set, is kept.
    pub(crate) fn assign_id(&mut self, id: VertexId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }
}

/// Wire shape of one scalar field: the store-assigned property id plus the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexProperty<T> {
    pub id: Option<String>,
    pub value: T,
}

impl<T> VertexProperty<T> {
    /// A property that has not been persisted yet.
    pub fn new(value: T) -> Self {
        Self { id: None, value }
    }

    pub fn with_id(id: impl Into<String>, value: T) -> Self {
        Self {
            id: Some(id.into()),
            value,
        }
    }
}

// ── Edge ──────────────────────────────────────────────────────────

/// An edge document as returned by the store after `addE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default = "edge_type")]
    pub edge_type: String,
    #[serde(default)]
    pub in_v_label: Option<String>,
    #[serde(default)]
    pub out_v_label: Option<String>,
    #[serde(rename = "inV")]
    pub in_v: String,
    #[serde(rename = "outV")]
    pub out_v: String,
}

fn edge_type() -> String {
    EDGE_TYPE.to_string()
}

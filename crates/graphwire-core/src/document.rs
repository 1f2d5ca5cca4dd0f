//! Vertex documents: the JSON shape the store returns, and the two-pass
//! decode that turns one into a typed model.
//!
//! Pass one reads the envelope (`id`, `label`, `type`, `properties`).
//! Pass two walks the model's schema over the captured property bag and
//! unwraps each `[{ "id", "value" }]` entry into its scalar field. The bag
//! is dropped once both passes are done.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CodecError;
use crate::schema::VertexModel;
use crate::types::{VertexId, ID_PROPERTY, LABEL_PROPERTY, TYPE_PROPERTY, VERTEX_TYPE};

/// A vertex as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDocument {
    #[serde(default)]
    pub id: Option<VertexId>,
    pub label: String,
    #[serde(rename = "type", default = "vertex_type")]
    pub doc_type: String,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

fn vertex_type() -> String {
    VERTEX_TYPE.to_string()
}

impl VertexDocument {
    /// Decode the envelope of a raw store document.
    pub fn from_value(document: Value) -> Result<Self, CodecError> {
        // Derived struct deserializers also accept sequences.
        if !document.is_object() {
            return Err(CodecError::Envelope(serde::de::Error::custom(format!(
                "expected a vertex object, found {document}"
            ))));
        }
        let envelope: Self = serde_json::from_value(document)?;
        if envelope.doc_type != VERTEX_TYPE {
            return Err(CodecError::NotAVertex {
                found: envelope.doc_type,
            });
        }
        Ok(envelope)
    }

    /// Build the wire document for a model, wrapping every field.
    pub fn from_model<V: VertexModel>(model: &V) -> Result<Self, CodecError> {
        let properties = V::schema()
            .fields()
            .iter()
            .map(|field| Ok((field.name().to_string(), field.encode(model)?)))
            .collect::<Result<Map<String, Value>, CodecError>>()?;

        Ok(Self {
            id: model.vertex().id().cloned(),
            label: model.vertex().label().to_string(),
            doc_type: vertex_type(),
            properties: Some(properties),
        })
    }

    /// Populate a fresh `V` from this document.
    ///
    /// Fields missing from the property bag, or present in an unexpected
    /// shape, keep their default values.
    pub fn into_model<V: VertexModel>(self) -> Result<V, CodecError> {
        let mut model = V::default();

        // Pass one: envelope.
        if self.label != model.vertex().label() {
            return Err(CodecError::LabelMismatch {
                expected: model.vertex().label().to_string(),
                found: self.label,
            });
        }
        if let Some(id) = self.id {
            model.vertex_mut().assign_id(id);
        }

        // Pass two: property bag.
        let Some(properties) = self.properties else {
            return Ok(model);
        };
        for field in V::schema().fields() {
            if let Some(wrapped) = properties.get(field.name()) {
                if !field.write(&mut model, wrapped)? {
                    tracing::debug!(
                        field = field.name(),
                        label = V::LABEL,
                        "Skipping property with unexpected wire shape"
                    );
                }
            }
        }

        Ok(model)
    }
}

/// Decode a raw store document straight into a typed model.
pub fn from_document<V: VertexModel>(document: Value) -> Result<V, CodecError> {
    VertexDocument::from_value(document)?.into_model()
}

/// Flatten a model into a single JSON object: `id`, `label`, `type`, then
/// every schema field in declaration order as a plain literal.
///
/// Fails when a field holds a value JSON cannot carry.
pub fn to_object<V: VertexModel>(model: &V) -> Result<Map<String, Value>, CodecError> {
    let vertex = model.vertex();
    let mut object = Map::with_capacity(V::schema().len() + 3);
    object.insert(
        ID_PROPERTY.to_string(),
        vertex
            .id()
            .map_or(Value::Null, |id| Value::String(id.0.clone())),
    );
    object.insert(LABEL_PROPERTY.to_string(), Value::String(vertex.label().to_string()));
    object.insert(TYPE_PROPERTY.to_string(), Value::String(vertex.vertex_type().to_string()));
    for field in V::schema().fields() {
        object.insert(field.name().to_string(), field.read(model)?);
    }
    Ok(object)
}

//! Gremlin command builder.
//!
//! Turns typed vertices into the handful of command shapes the client
//! submits. Pure string building, no I/O. Every quoted literal (ids, labels,
//! property names, string values) is escaped so embedded quotes cannot end
//! the literal early.

use serde_json::{Map, Value};

use graphwire_core::types::{ID_PROPERTY, LABEL_PROPERTY, PROPERTIES_PROPERTY, TYPE_PROPERTY};
use graphwire_core::{to_object, VertexModel};

use crate::client::{require, GraphError};

/// Root step that creates a vertex.
pub const ADD_VERTEX_ROOT: &str = "g.addV";
/// Root step that selects vertices by id.
pub const SELECT_VERTEX_ROOT: &str = "g.V";

// ── Vertex commands ──────────────────────────────────────────────

/// `g.addV('<label>')` followed by one `.property(...)` per schema field.
///
/// The vertex id is never sent; the store assigns it.
pub fn to_create_command<V: VertexModel>(vertex: &V) -> Result<String, GraphError> {
    let object = to_object(vertex)?;
    let mut builder = format!("{ADD_VERTEX_ROOT}({})", quote(vertex.vertex().label()));
    append_properties(&mut builder, &object, false);
    Ok(builder)
}

/// `g.V('<id>')` followed by one `.property(...)` per schema field.
pub fn to_update_command<V: VertexModel>(vertex: &V) -> Result<String, GraphError> {
    let id = vertex
        .vertex()
        .id()
        .ok_or_else(|| GraphError::invalid_argument("vertex.id", "update requires a persisted vertex"))?;
    let object = to_object(vertex)?;
    let mut builder = to_get_command(id.as_str())?;
    append_properties(&mut builder, &object, false);
    Ok(builder)
}

/// `g.V('<id>')`
pub fn to_get_command(vertex_id: &str) -> Result<String, GraphError> {
    require("vertex_id", vertex_id)?;
    Ok(format!("{SELECT_VERTEX_ROOT}({})", quote(vertex_id)))
}

/// `g.V('<id>').drop()`
pub fn to_delete_command(vertex_id: &str) -> Result<String, GraphError> {
    Ok(format!("{}.drop()", to_get_command(vertex_id)?))
}

// ── Edge commands ────────────────────────────────────────────────

/// `g.V('<source>').addE('<label>').to(g.V('<target>'))`
pub fn to_add_edge_command<S: VertexModel, T: VertexModel>(
    source: &S,
    edge_label: &str,
    target: &T,
) -> Result<String, GraphError> {
    require("edge_label", edge_label)?;
    let source_id = source
        .vertex()
        .id()
        .ok_or_else(|| GraphError::invalid_argument("source.id", "edge source must be persisted"))?;
    let target_id = target
        .vertex()
        .id()
        .ok_or_else(|| GraphError::invalid_argument("target.id", "edge target must be persisted"))?;

    Ok(format!(
        "{}.addE({}).to({})",
        to_get_command(source_id.as_str())?,
        quote(edge_label),
        to_get_command(target_id.as_str())?
    ))
}

// ── Property clauses ─────────────────────────────────────────────

/// Append one `.property(...)` clause per entry of a flattened vertex,
/// skipping the envelope entries. `include_id` controls whether the id is
/// echoed as a settable property.
pub fn append_properties(builder: &mut String, object: &Map<String, Value>, include_id: bool) {
    for (name, value) in object {
        let name = name.as_str();
        if name == TYPE_PROPERTY
            || name == LABEL_PROPERTY
            || name == PROPERTIES_PROPERTY
            || (name == ID_PROPERTY && !include_id)
        {
            continue;
        }
        append_property(builder, name, value);
    }
}

/// `.property('<name>', <literal>)`
pub fn append_property(builder: &mut String, name: &str, value: &Value) {
    builder.push_str(".property(");
    builder.push_str(&quote(name));
    builder.push_str(", ");
    builder.push_str(&render_literal(value));
    builder.push(')');
}

/// Render a JSON value as a Gremlin literal.
///
/// Booleans, numbers, null, and arrays go in bare; everything else becomes
/// a single-quoted string.
pub fn render_literal(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) => value.to_string(),
        Value::String(s) => quote(s),
        Value::Object(_) => quote(&value.to_string()),
    }
}

/// Single-quote `text`, escaping backslashes, quotes, and line breaks.
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            other => quoted.push(other),
        }
    }
    quoted.push('\'');
    quoted
}

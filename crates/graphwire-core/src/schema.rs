//! Explicit, ordered field descriptors for typed vertex models.
//!
//! Each model registers its scalar fields once, in declaration order. The
//! command builder walks that list to emit property clauses, and the
//! document decoder walks it to unwrap the store's property bag.

use std::fmt;

use serde_json::Value;

use crate::codec::{PropertyScalar, ScalarKind};
use crate::converters::converters;
use crate::error::CodecError;
use crate::types::{is_reserved, Vertex};

/// A typed vertex: a [`Vertex`] envelope plus the fields its schema declares.
///
/// `Default` must produce an instance whose envelope carries [`Self::LABEL`].
pub trait VertexModel: Default + Send + Sync + 'static {
    /// Label every vertex of this type is created with.
    const LABEL: &'static str;

    fn vertex(&self) -> &Vertex;

    fn vertex_mut(&mut self) -> &mut Vertex;

    /// The registered fields, built once per type.
    fn schema() -> &'static VertexSchema<Self>;
}

type Reader<V> = Box<dyn Fn(&V) -> Result<Value, CodecError> + Send + Sync>;
type Writer<V> = Box<dyn Fn(&mut V, &Value) -> Result<bool, CodecError> + Send + Sync>;

/// One scalar field: wire name, value kind, and accessors.
pub struct Field<V> {
    name: &'static str,
    kind: ScalarKind,
    read: Reader<V>,
    encode: Reader<V>,
    write: Writer<V>,
}

impl<V: 'static> Field<V> {
    pub fn new<T: PropertyScalar>(name: &'static str, get: fn(&V) -> T, set: fn(&mut V, T)) -> Self {
        Self {
            name,
            kind: T::KIND,
            read: Box::new(move |vertex: &V| get(vertex).to_token()),
            encode: Box::new(move |vertex: &V| converters().get_or_create::<T>().encode_value(&get(vertex))),
            write: Box::new(move |vertex: &mut V, wrapped: &Value| {
                let codec = converters().get_or_create::<T>();
                match codec.decode(wrapped)? {
                    Some(value) => {
                        set(vertex, value);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// The field's current value as a plain JSON literal.
    pub fn read(&self, vertex: &V) -> Result<Value, CodecError> {
        (self.read)(vertex)
    }

    /// The field's current value in the `[{ "id", "value" }]` wire shape.
    pub fn encode(&self, vertex: &V) -> Result<Value, CodecError> {
        (self.encode)(vertex)
    }

    /// Unwrap a `[{ "id", "value" }]` token into the field.
    ///
    /// Returns `Ok(false)` and leaves the field untouched when the token has
    /// an unexpected shape.
    pub fn write(&self, vertex: &mut V, wrapped: &Value) -> Result<bool, CodecError> {
        (self.write)(vertex, wrapped)
    }
}

impl<V> fmt::Debug for Field<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Ordered list of a model's fields.
pub struct VertexSchema<V> {
    fields: Vec<Field<V>>,
}

impl<V: 'static> VertexSchema<V> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register the next field.
    ///
    /// Names that collide with the vertex envelope (`id`, `label`, `type`,
    /// `properties`) or with an earlier field are skipped with a warning.
    pub fn field<T: PropertyScalar>(
        mut self,
        name: &'static str,
        get: fn(&V) -> T,
        set: fn(&mut V, T),
    ) -> Self {
        if is_reserved(name) || self.get(name).is_some() {
            tracing::warn!(field = name, "Ignoring reserved or duplicate vertex field");
            return self;
        }
        self.fields.push(Field::new(name, get, set));
        self
    }

    pub fn fields(&self) -> &[Field<V>] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Field<V>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<V: 'static> Default for VertexSchema<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for VertexSchema<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

//! graphwire-core: typed vertex model and property codecs for Gremlin graph stores.
//!
//! This crate provides the pieces that never touch the network:
//! - Vertex, edge, and collection types shared with the wire format
//! - Per-type property codecs for the `[{ "id", "value" }]` wrapper
//! - The process-wide converter cache
//! - Explicit vertex schemas and the two-pass document decoder
//! - Configuration loading

pub mod codec;
pub mod config;
pub mod converters;
pub mod document;
pub mod error;
pub mod schema;
pub mod types;

pub use codec::{PropertyCodec, PropertyScalar, ScalarKind};
pub use config::GraphConfig;
pub use converters::{converters, ConverterCache};
pub use document::{from_document, to_object, VertexDocument};
pub use error::{CodecError, ConfigError};
pub use schema::{Field, VertexModel, VertexSchema};
pub use types::{Collection, Edge, Vertex, VertexId, VertexProperty};

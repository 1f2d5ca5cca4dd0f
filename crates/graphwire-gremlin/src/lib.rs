//! graphwire-gremlin: Gremlin commands and single-result execution for typed vertices.
//!
//! This crate turns [`VertexModel`](graphwire_core::VertexModel) values into
//! Gremlin scripts, submits them through a [`GremlinTransport`], and decodes
//! the store's answer back into typed vertices. Every submitted script must
//! yield at most one result document.

pub mod client;
pub mod command;
pub mod executor;
pub mod mutations;
pub mod queries;
pub mod transport;

pub use client::{GraphClient, GraphError};
pub use executor::execute_single;
pub use transport::{CancelSignal, GremlinQuery, GremlinTransport};

//! Graph client and the error type shared by every graph operation.

use std::sync::Arc;

use graphwire_core::CodecError;

use crate::transport::GremlinTransport;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Cannot execute single-vertex script because the query reports no pending results")]
    NoPendingResults,

    #[error("The Gremlin script executed but did not return any results")]
    NoResults,

    #[error("More than one result was returned from the Gremlin script")]
    MultipleResults,

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Gremlin transport error: {source}")]
    Transport {
        #[source]
        source: anyhow::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{context}")]
    Operation {
        context: &'static str,
        #[source]
        source: Box<GraphError>,
    },
}

impl GraphError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Wrap this error with an operation-specific message.
    pub(crate) fn context(self, context: &'static str) -> Self {
        Self::Operation {
            context,
            source: Box::new(self),
        }
    }

    /// The innermost fault beneath any operation wrappers.
    pub fn root_cause(&self) -> &GraphError {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Zero or several results where exactly one was required.
    pub fn is_cardinality_violation(&self) -> bool {
        matches!(self.root_cause(), Self::NoResults | Self::MultipleResults)
    }
}

/// Reject blank required strings before anything is sent.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), GraphError> {
    if value.trim().is_empty() {
        return Err(GraphError::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}

/// Typed vertex client over a Gremlin transport.
///
/// Every operation is scoped to a [`Collection`](graphwire_core::Collection)
/// and takes a [`CancelSignal`](crate::CancelSignal). Clone is cheap (inner Arc).
pub struct GraphClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for GraphClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: GremlinTransport> GraphClient<T> {
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<T>) -> Self {
        tracing::info!(transport = std::any::type_name::<T>(), "Graph client ready");
        Self { transport }
    }

    /// Get a reference to the underlying transport for direct operations.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

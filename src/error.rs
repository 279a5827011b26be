//! Errors returned by graph mutations and algorithms.
use thiserror::Error;

/// Coarse classification shared by all errors of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was missing or empty.
    InvalidArgument,
    /// The mutation is structurally forbidden for this graph.
    IllegalOperation,
    /// The graph contains a cycle where none is allowed.
    Cycle,
}

/// Error returned by the mutating methods of [`Graph`].
///
/// A method that returns an error leaves the graph unchanged.
///
/// [`Graph`]: crate::Graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node id must not be empty")]
    EmptyNodeId,
    #[error("node id {0:?} is reserved for the graph root")]
    ReservedNodeId(String),
    #[error("cannot set a named edge when multigraph = false")]
    NamedEdgeInSimpleGraph,
    #[error("cannot set parent in a non-compound graph")]
    NotCompound,
    #[error("setting {parent:?} as parent of {node:?} would create a cycle")]
    ParentCycle { node: String, parent: String },
    #[error("cannot change the {option} option of a non-empty graph")]
    OptionsLocked { option: &'static str },
}

impl GraphError {
    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::EmptyNodeId | GraphError::ReservedNodeId(_) => ErrorKind::InvalidArgument,
            GraphError::NamedEdgeInSimpleGraph
            | GraphError::NotCompound
            | GraphError::ParentCycle { .. }
            | GraphError::OptionsLocked { .. } => ErrorKind::IllegalOperation,
        }
    }
}

/// Error returned by [`topsort`] when the graph is not acyclic.
///
/// [`topsort`]: crate::algorithms::topsort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("graph contains a cycle")]
pub struct CycleError;

impl CycleError {
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Cycle
    }
}

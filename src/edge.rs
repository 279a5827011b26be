//! Edge descriptors and their canonical form.
use std::fmt;

use crate::{DEFAULT_EDGE_NAME, EDGE_KEY_DELIM};

/// An edge between two nodes, optionally distinguished by a name.
///
/// Descriptors handed out by a [`Graph`] are in canonical form: in an undirected
/// graph the source is never greater than the target and an empty name is stored
/// as `None`. Two descriptors are equal when all three components are equal.
///
/// [`Graph`]: crate::Graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    source: String,
    target: String,
    name: Option<String>,
}

impl Edge {
    /// Creates an unnamed edge descriptor.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            name: None,
        }
    }

    /// Creates a named edge descriptor. An empty name is treated as no name.
    pub fn named(
        source: impl Into<String>,
        target: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            source: source.into(),
            target: target.into(),
            name: (!name.is_empty()).then_some(name),
        }
    }

    /// Builds the canonical descriptor for the given endpoints.
    ///
    /// # Example
    ///
    /// ```
    /// # use graphlib::Edge;
    /// let edge = Edge::canonical(false, "b", "a", None);
    /// assert_eq!(edge.source(), "a");
    /// assert_eq!(edge.target(), "b");
    ///
    /// let edge = Edge::canonical(true, "b", "a", Some(""));
    /// assert_eq!(edge.source(), "b");
    /// assert_eq!(edge.name(), None);
    /// ```
    pub fn canonical(directed: bool, source: &str, target: &str, name: Option<&str>) -> Self {
        let (source, target) = if !directed && source > target {
            (target, source)
        } else {
            (source, target)
        };

        Self {
            source: source.to_owned(),
            target: target.to_owned(),
            name: name.filter(|name| !name.is_empty()).map(str::to_owned),
        }
    }

    /// Returns this descriptor in canonical form for a graph with the given directedness.
    pub(crate) fn canonicalize(&self, directed: bool) -> Self {
        Self::canonical(directed, &self.source, &self.target, self.name())
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the edge starts and ends at the same node.
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint across from `node`, if `node` is an endpoint at all.
    pub fn opposite(&self, node: &str) -> Option<&str> {
        if self.source == node {
            Some(&self.target)
        } else if self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }

    /// String form of the edge key, meant for debugging.
    ///
    /// The components are joined by [`EDGE_KEY_DELIM`] and a missing name is
    /// written as [`DEFAULT_EDGE_NAME`].
    ///
    /// ```
    /// # use graphlib::Edge;
    /// assert_eq!(Edge::new("a", "b").key_string(), "a\u{1}b\u{1}\u{0}");
    /// assert_eq!(Edge::named("a", "b", "x").key_string(), "a\u{1}b\u{1}x");
    /// ```
    pub fn key_string(&self) -> String {
        let name = self.name().unwrap_or(DEFAULT_EDGE_NAME);
        [self.source(), self.target(), name].join(EDGE_KEY_DELIM)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ name = {}, source = {}, target = {} ]",
            self.name().unwrap_or("null"),
            self.source,
            self.target
        )
    }
}

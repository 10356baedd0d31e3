//! Projection output and the edge sink shared by all strategies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::{Edge, EdgeSet, SUBCLASS_OF, SUPERCLASS_OF};

/// Counters for one projection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionStats {
    /// Axioms read from the store.
    pub visited: usize,
    /// Axioms that contributed no edges (unsupported kind or shape, malformed).
    pub skipped: usize,
    /// Edges emitted before deduplication.
    pub emitted: usize,
}

impl fmt::Display for ProjectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} axioms visited, {} skipped, {} edges emitted",
            self.visited, self.skipped, self.emitted
        )
    }
}

/// Result of running one projector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionOutput {
    /// Deduplicated edges in first-emission order.
    pub edges: EdgeSet,
    pub stats: ProjectionStats,
}

impl ProjectionOutput {
    /// Edges emitted more than once.
    pub fn collapsed(&self) -> usize {
        self.stats.emitted.saturating_sub(self.edges.len())
    }
}

/// Collects edges while a projector walks the store.
#[derive(Debug, Default)]
pub(crate) struct EdgeSink {
    output: ProjectionOutput,
    bidirectional: bool,
}

impl EdgeSink {
    pub(crate) fn new(bidirectional: bool) -> Self {
        Self {
            output: ProjectionOutput::default(),
            bidirectional,
        }
    }

    pub(crate) fn emit(&mut self, edge: Edge) {
        self.output.stats.emitted += 1;
        self.output.edges.insert(edge);
    }

    /// `(sub, subClassOf, sup)`, plus `(sup, superClassOf, sub)` when
    /// bidirectional.
    pub(crate) fn subclass(&mut self, sub: &str, sup: &str) {
        self.emit(Edge::new(sub, SUBCLASS_OF, sup));
        if self.bidirectional {
            self.emit(Edge::new(sup, SUPERCLASS_OF, sub));
        }
    }

    /// `(src, rel, dst)` for a restriction. A relation named like the
    /// taxonomy vocabulary goes through [`EdgeSink::subclass`], so the
    /// inverse follows the bidirectional setting.
    pub(crate) fn relation(&mut self, src: &str, rel: &str, dst: &str) {
        match rel {
            SUBCLASS_OF => self.subclass(src, dst),
            SUPERCLASS_OF => self.subclass(dst, src),
            _ => self.emit(Edge::new(src, rel, dst)),
        }
    }

    pub(crate) fn visited(&mut self) {
        self.output.stats.visited += 1;
    }

    pub(crate) fn skipped(&mut self) {
        self.output.stats.skipped += 1;
    }

    pub(crate) fn finish(self) -> ProjectionOutput {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_counts_before_dedup() {
        let mut sink = EdgeSink::new(false);
        sink.subclass("A", "B");
        sink.subclass("A", "B");
        let out = sink.finish();
        assert_eq!(out.edges.len(), 1);
        assert_eq!(out.stats.emitted, 2);
        assert_eq!(out.collapsed(), 1);
    }

    #[test]
    fn test_sink_bidirectional() {
        let mut sink = EdgeSink::new(true);
        sink.subclass("A", "B");
        let out = sink.finish();
        assert!(out.edges.contains("A", SUBCLASS_OF, "B"));
        assert!(out.edges.contains("B", SUPERCLASS_OF, "A"));
    }

    #[test]
    fn test_taxonomy_named_relations() {
        let mut off = EdgeSink::new(false);
        off.relation("A", SUBCLASS_OF, "B");
        off.relation("C", SUPERCLASS_OF, "D");
        off.relation("A", "partOf", "B");
        let out = off.finish();
        assert_eq!(
            out.edges.to_tuples(),
            vec![("A", SUBCLASS_OF, "B"), ("D", SUBCLASS_OF, "C"), ("A", "partOf", "B")]
        );

        let mut on = EdgeSink::new(true);
        on.relation("A", SUBCLASS_OF, "B");
        let out = on.finish();
        assert!(out.edges.contains("B", SUPERCLASS_OF, "A"));
        assert_eq!(out.edges.len(), 2);
    }
}

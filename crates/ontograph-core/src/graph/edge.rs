//! The `(source, relation, destination)` edge and the deduplicating edge set.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};

// =============================================================================
// RELATION VOCABULARY
// =============================================================================

/// A subClassOf B
pub const SUBCLASS_OF: &str = "subClassOf";

/// B superClassOf A (inverse taxonomy edge)
pub const SUPERCLASS_OF: &str = "superClassOf";

/// Composite expression to one of its conjuncts.
pub const AND: &str = "and";

/// Node to itself, added by graph builders that want self loops.
pub const SELF_LOOP: &str = "id";

// =============================================================================
// EDGE
// =============================================================================

/// What the destination of an edge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Destination is a class or class expression.
    #[default]
    Structural,
    /// Destination is a literal value (label, comment, cross-reference).
    Literal,
}

/// A typed edge `src --rel--> dst`.
///
/// Equality and hashing use the triple only; `kind` is payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    src: String,
    rel: String,
    dst: String,
    #[serde(default)]
    kind: EdgeKind,
}

impl Edge {
    pub fn new(src: impl Into<String>, rel: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            rel: rel.into(),
            dst: dst.into(),
            kind: EdgeKind::Structural,
        }
    }

    /// An edge whose destination is a literal value.
    pub fn literal(
        src: impl Into<String>,
        rel: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: EdgeKind::Literal,
            ..Self::new(src, rel, value)
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn dst(&self) -> &str {
        &self.dst
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn is_literal(&self) -> bool {
        self.kind == EdgeKind::Literal
    }

    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.src, &self.rel, &self.dst)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.as_tuple() == other.as_tuple()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_tuple().hash(state);
    }
}

// =============================================================================
// EDGE SET
// =============================================================================

/// Edges deduplicated by triple, iterated in first-insertion order.
///
/// Two sets are equal when they hold the same triples, whatever the order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeSet(IndexSet<Edge>);

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge. Returns `false` if the triple was already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        self.0.insert(edge)
    }

    pub fn contains(&self, src: &str, rel: &str, dst: &str) -> bool {
        self.0.contains(&Edge::new(src, rel, dst))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.0.iter()
    }

    /// Triples in insertion order.
    pub fn to_tuples(&self) -> Vec<(&str, &str, &str)> {
        self.0.iter().map(Edge::as_tuple).collect()
    }

    /// Distinct source and destination names, first-seen order.
    pub fn nodes(&self) -> Vec<&str> {
        let mut nodes = IndexSet::new();
        for edge in &self.0 {
            nodes.insert(edge.src());
            nodes.insert(edge.dst());
        }
        nodes.into_iter().collect()
    }

    /// Edge count per relation.
    pub fn relation_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for edge in &self.0 {
            *counts.entry(edge.rel()).or_insert(0) += 1;
        }
        counts
    }

    /// Write `src\trel\tdst` lines. Returns the number of lines.
    pub fn write_edgelist<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        for edge in &self.0 {
            writeln!(writer, "{}\t{}\t{}", edge.src, edge.rel, edge.dst)?;
        }
        writer.flush()?;
        Ok(self.0.len())
    }
}

impl PartialEq for EdgeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.0.iter().all(|e| other.0.contains(e))
    }
}

impl Eq for EdgeSet {}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Edge> for EdgeSet {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl IntoIterator for EdgeSet {
    type Item = Edge;
    type IntoIter = indexmap::set::IntoIter<Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = indexmap::set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

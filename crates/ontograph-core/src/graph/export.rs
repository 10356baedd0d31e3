//! Hand-off formats for downstream graph and embedding consumers.
//!
//! - [`TripleFactory`] - label-to-id maps and integer triples for
//!   knowledge-graph-embedding training
//! - [`RelationGraph`] - edges grouped per relation type, the layout of a
//!   heterogeneous graph

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

use super::edge::{Edge, EdgeSet, SELF_LOOP};

// =============================================================================
// TRIPLE FACTORY
// =============================================================================

/// Integer-mapped triples.
///
/// Entity and relation ids are dense and assigned in lexicographic label
/// order, so the mapping depends only on the set of edges, not on their
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleFactory {
    pub entity_to_id: BTreeMap<String, usize>,
    pub relation_to_id: BTreeMap<String, usize>,
    /// `[head, relation, tail]` in edge order.
    pub mapped_triples: Vec<[usize; 3]>,
}

impl TripleFactory {
    pub fn from_edges(edges: &EdgeSet) -> Self {
        let entities: BTreeSet<&str> = edges.iter().flat_map(|e| [e.src(), e.dst()]).collect();
        let relations: BTreeSet<&str> = edges.iter().map(Edge::rel).collect();

        let entity_to_id: BTreeMap<String, usize> = entities
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), i))
            .collect();
        let relation_to_id: BTreeMap<String, usize> = relations
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label.to_string(), i))
            .collect();

        let mapped_triples = edges
            .iter()
            .map(|e| {
                [
                    entity_to_id[e.src()],
                    relation_to_id[e.rel()],
                    entity_to_id[e.dst()],
                ]
            })
            .collect();

        Self {
            entity_to_id,
            relation_to_id,
            mapped_triples,
        }
    }

    pub fn num_entities(&self) -> usize {
        self.entity_to_id.len()
    }

    pub fn num_relations(&self) -> usize {
        self.relation_to_id.len()
    }

    pub fn num_triples(&self) -> usize {
        self.mapped_triples.len()
    }
}

// =============================================================================
// RELATION GRAPH
// =============================================================================

/// How [`RelationGraph::build`] shapes the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationGraphOptions {
    /// Add an `id` edge from every node to itself.
    pub self_loop: bool,
    /// Keep only relation types with more than this many edges. 0 keeps all.
    pub min_edges: usize,
    /// Attach `1 / count(relation, destination)` weights to every edge.
    pub normalize: bool,
}

/// Edges grouped per relation type over a shared node index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationGraph {
    /// Node names; a node's id is its position.
    pub nodes: Vec<String>,
    /// `(src_id, dst_id)` pairs per relation, relations in first-seen order.
    pub relations: IndexMap<String, Vec<(usize, usize)>>,
    /// Per-relation edge weights aligned with `relations`, when normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<IndexMap<String, Vec<f32>>>,
}

impl RelationGraph {
    pub fn build(edges: &EdgeSet, options: &RelationGraphOptions) -> Self {
        let nodes: Vec<String> = edges.nodes().into_iter().map(str::to_string).collect();
        let node_index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        let mut all: Vec<(&str, usize, usize)> = edges
            .iter()
            .map(|e| (e.rel(), node_index[e.src()], node_index[e.dst()]))
            .collect();
        if options.self_loop {
            all.extend((0..nodes.len()).map(|i| (SELF_LOOP, i, i)));
        }

        let mut unique: IndexMap<&str, IndexSet<(usize, usize)>> = IndexMap::new();
        for (rel, src, dst) in all {
            unique.entry(rel).or_default().insert((src, dst));
        }

        let mut in_degree: HashMap<(&str, usize), usize> = HashMap::new();
        if options.normalize {
            for (rel, pairs) in &unique {
                for (_, dst) in pairs {
                    *in_degree.entry((*rel, *dst)).or_insert(0) += 1;
                }
            }
        }

        let mut grouped: IndexMap<String, Vec<(usize, usize)>> = unique
            .iter()
            .map(|(rel, pairs)| (rel.to_string(), pairs.iter().copied().collect()))
            .collect();

        grouped.retain(|rel, pairs| {
            let keep = pairs.len() > options.min_edges;
            if !keep {
                debug!(relation = %rel, edges = pairs.len(), "dropping sparse relation type");
            }
            keep
        });

        let weights = options.normalize.then(|| {
            grouped
                .iter()
                .map(|(rel, pairs)| {
                    let w: Vec<f32> = pairs
                        .iter()
                        .map(|(_, dst)| 1.0 / in_degree[&(rel.as_str(), *dst)] as f32)
                        .collect();
                    (rel.clone(), w)
                })
                .collect()
        });

        Self {
            nodes,
            relations: grouped,
            weights,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.relations.values().map(Vec::len).sum()
    }

    pub fn node_id(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == name)
    }
}

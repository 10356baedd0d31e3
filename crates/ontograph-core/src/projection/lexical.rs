//! OWL2Vec*-style projection: the structural graph plus literal edges for
//! selected annotation properties.

use std::collections::HashSet;

use tracing::debug;

use crate::graph::Edge;
use crate::ontology::OntologyStore;

use super::config::ProjectionConfig;
use super::output::{EdgeSink, ProjectionOutput};
use super::structural::walk_subsumptions;
use super::traits::Projector;

#[derive(Debug, Clone, Copy, Default)]
pub struct Owl2VecStarProjector;

impl Owl2VecStarProjector {
    pub fn new() -> Self {
        Self
    }
}

impl Projector for Owl2VecStarProjector {
    fn project(
        &self,
        ontology: &dyn OntologyStore,
        config: &ProjectionConfig,
    ) -> ProjectionOutput {
        let mut sink = EdgeSink::new(config.bidirectional_taxonomy);
        walk_subsumptions(ontology, config, &mut sink);

        if config.include_literals {
            let wanted: HashSet<&str> = config
                .annotation_properties
                .iter()
                .map(String::as_str)
                .collect();
            let mut literals = 0usize;
            for annotation in ontology.annotations() {
                if wanted.contains(annotation.property.as_str()) {
                    sink.emit(Edge::literal(
                        annotation.subject.as_str(),
                        annotation.property.as_str(),
                        annotation.value.value.as_str(),
                    ));
                    literals += 1;
                }
            }
            debug!(literals, "added annotation edges");
        }

        sink.finish()
    }

    fn strategy_name(&self) -> &'static str {
        "owl2vec_star"
    }

    fn aliases(&self) -> &[&'static str] {
        &["owl2vec*", "lexical"]
    }

    fn description(&self) -> &'static str {
        "structural edges plus annotation literals"
    }
}

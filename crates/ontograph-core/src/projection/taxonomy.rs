//! Taxonomy projectors: the named class hierarchy, optionally with the
//! direct relations between named classes.

use tracing::debug;

use crate::expression::ClassExpression;
use crate::ontology::OntologyStore;

use super::config::ProjectionConfig;
use super::output::{EdgeSink, ProjectionOutput};
use super::traits::Projector;

/// Projects `A ⊑ B` with both sides named.
///
/// With relations enabled it also projects `A ⊑ ∃R.B` with A and B named to
/// `(A, R, B)`. Every other shape is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxonomyProjector {
    relations: bool,
}

impl TaxonomyProjector {
    pub fn new() -> Self {
        Self { relations: false }
    }

    pub fn with_relations() -> Self {
        Self { relations: true }
    }
}

impl Projector for TaxonomyProjector {
    fn project(
        &self,
        ontology: &dyn OntologyStore,
        config: &ProjectionConfig,
    ) -> ProjectionOutput {
        let mut sink = EdgeSink::new(config.bidirectional_taxonomy);

        for (index, axiom) in ontology.axioms().into_iter().enumerate() {
            sink.visited();
            let Some(ax) = axiom.as_subsumption() else {
                sink.skipped();
                continue;
            };

            if let Err(err) = ax.validate() {
                debug!(index, error = %err, "skipping malformed axiom");
                sink.skipped();
                continue;
            }

            match (&ax.sub, &ax.sup) {
                (ClassExpression::Atomic(sub), ClassExpression::Atomic(sup)) => {
                    sink.subclass(sub, sup);
                }
                (ClassExpression::Atomic(sub), ClassExpression::Existential(rel, filler))
                    if self.relations =>
                {
                    match filler.as_atomic() {
                        Some(dst) => sink.relation(sub, rel, dst),
                        None => sink.skipped(),
                    }
                }
                _ => sink.skipped(),
            }
        }

        sink.finish()
    }

    fn strategy_name(&self) -> &'static str {
        if self.relations {
            "taxonomy_rels"
        } else {
            "taxonomy"
        }
    }

    fn aliases(&self) -> &[&'static str] {
        if self.relations {
            &["taxonomy_with_relations"]
        } else {
            &[]
        }
    }

    fn description(&self) -> &'static str {
        if self.relations {
            "named subclass edges plus A -R-> B for A SubClassOf R some B"
        } else {
            "named subclass edges only"
        }
    }
}

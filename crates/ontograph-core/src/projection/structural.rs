//! Structural (DL2Vec-style) projection.
//!
//! Every subsumption `L ⊑ R` becomes edges from the node of `L`. Composite
//! expressions become nodes named by their rendering and are decomposed
//! into their parts:
//!
//! ```text
//! A ⊑ ∃R.(B ⊓ C)
//!   (A, R, "B and C")
//!   ("B and C", and, B)
//!   ("B and C", and, C)
//! ```
//!
//! With `only_taxonomy` the relation edge is kept but restriction fillers
//! are not decomposed.

use tracing::debug;

use crate::expression::{ClassExpression, Subsumption};
use crate::graph::{Edge, AND};
use crate::ontology::OntologyStore;

use super::config::ProjectionConfig;
use super::output::{EdgeSink, ProjectionOutput};
use super::traits::Projector;

/// Node name of an expression: the class id, or the rendering of a
/// composite.
pub fn node_name(expr: &ClassExpression) -> String {
    match expr {
        ClassExpression::Atomic(id) => id.clone(),
        composite => composite.to_string(),
    }
}

/// Walks one subsumption at a time into an [`EdgeSink`].
pub(crate) struct StructuralWalker<'s> {
    sink: &'s mut EdgeSink,
    only_taxonomy: bool,
}

impl<'s> StructuralWalker<'s> {
    pub(crate) fn new(sink: &'s mut EdgeSink, only_taxonomy: bool) -> Self {
        Self {
            sink,
            only_taxonomy,
        }
    }

    pub(crate) fn subsumption(&mut self, ax: &Subsumption) {
        let subject = node_name(&ax.sub);
        self.decompose(&ax.sub, &subject);
        self.link(&subject, &ax.sup);
    }

    fn link(&mut self, subject: &str, expr: &ClassExpression) {
        match expr {
            ClassExpression::Atomic(sup) => self.sink.subclass(subject, sup),
            ClassExpression::Conjunction(left, right) => {
                self.link(subject, left);
                self.link(subject, right);
            }
            ClassExpression::Existential(rel, filler) => self.restriction(subject, rel, filler),
        }
    }

    /// Edges from a composite node to its parts. Named classes have none.
    fn decompose(&mut self, expr: &ClassExpression, name: &str) {
        match expr {
            ClassExpression::Atomic(_) => {}
            ClassExpression::Conjunction(left, right) => {
                for conjunct in [left, right] {
                    let part = node_name(conjunct);
                    self.sink.emit(Edge::new(name, AND, part.as_str()));
                    self.decompose(conjunct, &part);
                }
            }
            ClassExpression::Existential(rel, filler) => self.restriction(name, rel, filler),
        }
    }

    fn restriction(&mut self, subject: &str, rel: &str, filler: &ClassExpression) {
        let dst = node_name(filler);
        self.sink.relation(subject, rel, &dst);
        if !self.only_taxonomy {
            self.decompose(filler, &dst);
        }
    }
}

/// Walks every subsumption in its nested form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dl2VecProjector;

impl Dl2VecProjector {
    pub fn new() -> Self {
        Self
    }
}

/// Run the structural walk over every subsumption of `ontology`.
pub(crate) fn walk_subsumptions(
    ontology: &dyn OntologyStore,
    config: &ProjectionConfig,
    sink: &mut EdgeSink,
) {
    for (index, axiom) in ontology.axioms().into_iter().enumerate() {
        sink.visited();
        let Some(ax) = axiom.as_subsumption() else {
            debug!(index, kind = axiom.kind_name(), "skipping unsupported axiom");
            sink.skipped();
            continue;
        };
        if let Err(err) = ax.validate() {
            debug!(index, error = %err, "skipping malformed axiom");
            sink.skipped();
            continue;
        }
        StructuralWalker::new(sink, config.only_taxonomy).subsumption(ax);
    }
}

impl Projector for Dl2VecProjector {
    fn project(
        &self,
        ontology: &dyn OntologyStore,
        config: &ProjectionConfig,
    ) -> ProjectionOutput {
        let mut sink = EdgeSink::new(config.bidirectional_taxonomy);
        walk_subsumptions(ontology, config, &mut sink);
        sink.finish()
    }

    fn strategy_name(&self) -> &'static str {
        "dl2vec"
    }

    fn aliases(&self) -> &[&'static str] {
        &["structural"]
    }

    fn description(&self) -> &'static str {
        "every subsumption, composite expressions decomposed into nodes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Axiom;
    use crate::graph::{SUBCLASS_OF, SUPERCLASS_OF};
    use crate::ontology::Ontology;

    fn and(l: &str, r: &str) -> ClassExpression {
        ClassExpression::conjunction(ClassExpression::atomic(l), ClassExpression::atomic(r))
    }

    fn some(rel: &str, filler: ClassExpression) -> ClassExpression {
        ClassExpression::existential(rel, filler).unwrap()
    }

    fn project(onto: &Ontology, config: &ProjectionConfig) -> ProjectionOutput {
        Dl2VecProjector::new().project(onto, config)
    }

    #[test]
    fn test_conjunction_on_left() {
        let onto = Ontology::new("http://test").with_axiom(Axiom::subclass_of(and("A", "B"), "C"));
        let out = project(&onto, &ProjectionConfig::default());
        assert_eq!(
            out.edges.to_tuples(),
            vec![
                ("A and B", AND, "A"),
                ("A and B", AND, "B"),
                ("A and B", SUBCLASS_OF, "C"),
            ]
        );
    }

    #[test]
    fn test_conjunction_on_right_links_each_conjunct() {
        let onto = Ontology::new("http://test").with_axiom(Axiom::subclass_of("A", and("B", "C")));
        let out = project(&onto, &ProjectionConfig::default());
        assert_eq!(
            out.edges.to_tuples(),
            vec![("A", SUBCLASS_OF, "B"), ("A", SUBCLASS_OF, "C")]
        );
    }

    #[test]
    fn test_restriction_filler_decomposed() {
        let onto =
            Ontology::new("http://test").with_axiom(Axiom::subclass_of("A", some("R", and("B", "C"))));
        let out = project(&onto, &ProjectionConfig::default());
        assert_eq!(
            out.edges.to_tuples(),
            vec![
                ("A", "R", "B and C"),
                ("B and C", AND, "B"),
                ("B and C", AND, "C"),
            ]
        );
    }

    #[test]
    fn test_only_taxonomy_keeps_relation_edge() {
        let onto =
            Ontology::new("http://test").with_axiom(Axiom::subclass_of("A", some("R", and("B", "C"))));
        let config = ProjectionConfig::default().only_taxonomy(true);
        let out = project(&onto, &config);
        assert_eq!(out.edges.to_tuples(), vec![("A", "R", "B and C")]);
    }

    #[test]
    fn test_nested_restriction_on_left() {
        let onto = Ontology::new("http://test")
            .with_axiom(Axiom::subclass_of(some("R", some("S", "B".into())), "C"));
        let out = project(&onto, &ProjectionConfig::default());
        assert_eq!(
            out.edges.to_tuples(),
            vec![
                ("R some (S some B)", "R", "S some B"),
                ("S some B", "S", "B"),
                ("R some (S some B)", SUBCLASS_OF, "C"),
            ]
        );
    }

    #[test]
    fn test_bidirectional_only_touches_subclass_edges() {
        let onto = Ontology::new("http://test")
            .subclass_of("A", "B")
            .with_axiom(Axiom::subclass_of("A", some("R", "C".into())));
        let config = ProjectionConfig::default().bidirectional(true);
        let out = project(&onto, &config);
        assert!(out.edges.contains("B", SUPERCLASS_OF, "A"));
        assert!(out.edges.contains("A", "R", "C"));
        assert_eq!(out.edges.len(), 3);
    }

    #[test]
    fn test_skips_other_axioms_and_malformed() {
        let malformed = Axiom::SubClassOf(Subsumption {
            sub: ClassExpression::atomic("A"),
            sup: ClassExpression::Existential(String::new(), ClassExpression::atomic("B").into()),
        });
        let onto = Ontology::new("http://test")
            .with_axiom(malformed)
            .with_axiom(Axiom::EquivalentClasses(vec!["A".into(), "B".into()]))
            .subclass_of("A", "B");
        let out = project(&onto, &ProjectionConfig::default());
        assert_eq!(out.edges.len(), 1);
        assert_eq!(out.stats.visited, 3);
        assert_eq!(out.stats.skipped, 2);
    }

    #[test]
    fn test_repeated_patterns_collapse() {
        let onto = Ontology::new("http://test")
            .with_axiom(Axiom::subclass_of("A", some("R", and("B", "C"))))
            .with_axiom(Axiom::subclass_of("D", some("R", and("B", "C"))));
        let out = project(&onto, &ProjectionConfig::default());
        assert_eq!(out.stats.emitted, 6);
        assert_eq!(out.edges.len(), 4);
    }

    #[test]
    fn test_taxonomy_named_restrictions_keep_inverse_rule() {
        let onto = Ontology::new("http://test")
            .with_axiom(Axiom::subclass_of("A", some(SUBCLASS_OF, "B".into())))
            .with_axiom(Axiom::subclass_of("C", some(SUPERCLASS_OF, "D".into())));

        let off = Dl2VecProjector::new().project(&onto, &ProjectionConfig::default());
        assert!(off.edges.iter().all(|e| e.rel() != SUPERCLASS_OF));
        assert!(off.edges.contains("D", SUBCLASS_OF, "C"));

        let config = ProjectionConfig::default().bidirectional(true);
        let on = Dl2VecProjector::new().project(&onto, &config);
        assert!(on.edges.contains("B", SUPERCLASS_OF, "A"));
        assert!(on.edges.contains("C", SUPERCLASS_OF, "D"));
        assert_eq!(on.edges.len(), 4);
    }
}

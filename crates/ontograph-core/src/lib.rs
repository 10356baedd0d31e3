//! Ontology axiom normalization and graph projection.
//!
//! Two independent paths read the subsumption axioms of an ontology store:
//!
//! - [`normalizer`] buckets axioms into the NF1..NF4 normal forms over
//!   integer symbol tables, for geometric embedding models
//! - [`projection`] walks axioms in their nested form and emits a
//!   deduplicated [`EdgeSet`], for graph builders, random walks and triple
//!   factories

pub mod config;
pub mod expression;
pub mod graph;
pub mod normalizer;
pub mod ontology;
pub mod projection;

pub use config::Config;
pub use expression::{Axiom, ClassExpression, ExpressionError, Subsumption, OWL_THING};
pub use graph::{Edge, EdgeKind, EdgeSet, RelationGraph, RelationGraphOptions, TripleFactory};
pub use normalizer::{
    classify, Normalization, NormalizationSummary, NormalFormCache, NormalFormError,
    NormalFormKind, NormalForms, Normalizer, SymbolTables,
};
pub use ontology::{Annotation, Literal, Ontology, OntologyStore};
pub use projection::{
    project, ProjectionConfig, ProjectionDriver, ProjectionError, ProjectionOutput, Projector,
    ProjectorRegistry,
};

//! Graph projection of ontology axioms.
//!
//! - [`Projector`] - one strategy; walks axioms in their nested form
//! - [`ProjectorRegistry`] - strategies by name and alias
//! - [`ProjectionDriver`] - validates name and options, then runs a strategy
//!
//! Built-in strategies:
//!
//! | name | aliases | edges |
//! |------|---------|-------|
//! | `taxonomy` | | `A subClassOf B` for named pairs |
//! | `taxonomy_rels` | `taxonomy_with_relations` | taxonomy plus `A R B` for `A ⊑ ∃R.B` |
//! | `dl2vec` | `structural` | every subsumption, composites decomposed |
//! | `owl2vec_star` | `owl2vec*`, `lexical` | `dl2vec` plus annotation literals |

mod config;
mod driver;
mod error;
mod lexical;
mod output;
mod registry;
mod structural;
mod taxonomy;
mod traits;

pub use config::{
    ProjectionConfig, BIDIRECTIONAL_TAXONOMY, INCLUDE_LITERALS, ONLY_TAXONOMY, RECOGNIZED_OPTIONS,
};
pub use driver::{project, ProjectionDriver};
pub use error::ProjectionError;
pub use lexical::Owl2VecStarProjector;
pub use output::{ProjectionOutput, ProjectionStats};
pub use registry::ProjectorRegistry;
pub use structural::{node_name, Dl2VecProjector};
pub use taxonomy::TaxonomyProjector;
pub use traits::Projector;

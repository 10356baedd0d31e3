//! Edge model for projected ontology graphs.
//!
//! - [`Edge`] - `(src, rel, dst)` with a structural/literal payload flag
//! - [`EdgeSet`] - triple-deduplicated, insertion-ordered output of every
//!   projector
//! - [`TripleFactory`], [`RelationGraph`] - export layouts for embedding and
//!   graph-neural-network consumers

mod edge;
mod export;

pub use edge::*;
pub use export::{RelationGraph, RelationGraphOptions, TripleFactory};

//! The projector trait implemented by every strategy.

use crate::ontology::OntologyStore;

use super::config::ProjectionConfig;
use super::output::ProjectionOutput;

/// A strategy that turns an ontology's axioms into graph edges.
///
/// Projectors hold no state. They read axioms in their native nested form
/// (not normal forms) and decide which shapes they recognize. Axioms they
/// do not recognize are skipped without error.
///
/// # Example Implementation
///
/// ```ignore
/// impl Projector for TaxonomyProjector {
///     fn project(&self, ontology: &dyn OntologyStore, config: &ProjectionConfig) -> ProjectionOutput {
///         let mut sink = EdgeSink::new(config.bidirectional_taxonomy);
///         // Walk subsumptions and emit edges...
///         sink.finish()
///     }
///
///     fn strategy_name(&self) -> &'static str { "taxonomy" }
/// }
/// ```
pub trait Projector: Send + Sync {
    /// Walk every axiom of `ontology` (import closure included).
    fn project(&self, ontology: &dyn OntologyStore, config: &ProjectionConfig)
        -> ProjectionOutput;

    /// Canonical registry name.
    fn strategy_name(&self) -> &'static str;

    /// Further names this strategy is registered under.
    fn aliases(&self) -> &[&'static str] {
        &[]
    }

    /// One-line summary for listings.
    fn description(&self) -> &'static str {
        ""
    }
}

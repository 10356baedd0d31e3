//! Projector registry for looking up strategies by name.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::lexical::Owl2VecStarProjector;
use super::structural::Dl2VecProjector;
use super::taxonomy::TaxonomyProjector;
use super::traits::Projector;

/// Registry of projection strategies.
///
/// Maps strategy names and aliases (case-insensitive) to projectors.
/// Registers the built-in strategies on creation.
pub struct ProjectorRegistry {
    projectors: HashMap<String, Arc<dyn Projector>>,
}

impl ProjectorRegistry {
    /// Create a registry with the built-in strategies.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Arc::new(TaxonomyProjector::new()));
        registry.register(Arc::new(TaxonomyProjector::with_relations()));
        registry.register(Arc::new(Dl2VecProjector::new()));
        registry.register(Arc::new(Owl2VecStarProjector::new()));

        registry
    }

    pub fn empty() -> Self {
        Self {
            projectors: HashMap::new(),
        }
    }

    /// Register a projector under its name and aliases. A later registration
    /// replaces an earlier one with the same name.
    pub fn register(&mut self, projector: Arc<dyn Projector>) {
        let names = std::iter::once(projector.strategy_name())
            .chain(projector.aliases().iter().copied());
        for name in names {
            self.projectors.insert(name.to_lowercase(), Arc::clone(&projector));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Projector>> {
        self.projectors.get(&name.to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.projectors.contains_key(&name.to_lowercase())
    }

    /// Every registered name, aliases included, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.projectors.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// One entry per strategy: name, aliases, description. Sorted by name.
    pub fn list_strategies(&self) -> Vec<(&'static str, &[&'static str], &'static str)> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for projector in self.projectors.values() {
            let name = projector.strategy_name();
            if seen.insert(name) {
                result.push((name, projector.aliases(), projector.description()));
            }
        }

        result.sort_by_key(|(name, _, _)| *name);
        result
    }
}

impl Default for ProjectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Strategy selection and option validation in front of the projectors.

use tracing::{debug, info};

use crate::config::ProjectionSettings;
use crate::graph::EdgeSet;
use crate::ontology::OntologyStore;

use super::config::ProjectionConfig;
use super::error::ProjectionError;
use super::output::ProjectionOutput;
use super::registry::ProjectorRegistry;

/// Entry point for projecting an ontology to an edge set.
///
/// Both the strategy name and the options are checked before any axiom is
/// read. The returned edge set is exactly what the strategy produced.
pub struct ProjectionDriver {
    registry: ProjectorRegistry,
    annotation_properties: Vec<String>,
}

impl ProjectionDriver {
    pub fn new() -> Self {
        Self::with_registry(ProjectorRegistry::new())
    }

    pub fn with_registry(registry: ProjectorRegistry) -> Self {
        Self {
            registry,
            annotation_properties: ProjectionConfig::default().annotation_properties,
        }
    }

    /// Use the annotation properties from loaded settings.
    pub fn with_settings(mut self, settings: &ProjectionSettings) -> Self {
        self.annotation_properties = settings.annotation_properties.clone();
        self
    }

    pub fn registry(&self) -> &ProjectorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ProjectorRegistry {
        &mut self.registry
    }

    /// Project with a loose option table.
    ///
    /// Recognized keys are `bidirectional_taxonomy`, `only_taxonomy` and
    /// `include_literals`; each must hold a boolean.
    pub fn project(
        &self,
        ontology: &dyn OntologyStore,
        strategy: &str,
        options: &toml::Table,
    ) -> Result<EdgeSet, ProjectionError> {
        self.check_strategy(strategy)?;
        let mut config = ProjectionConfig::from_options(options)?;
        config.annotation_properties = self.annotation_properties.clone();
        self.project_with(ontology, strategy, &config)
    }

    /// Project with an already typed config.
    pub fn project_with(
        &self,
        ontology: &dyn OntologyStore,
        strategy: &str,
        config: &ProjectionConfig,
    ) -> Result<EdgeSet, ProjectionError> {
        Ok(self.run(ontology, strategy, config)?.edges)
    }

    /// Like [`ProjectionDriver::project_with`] but keeps the run statistics.
    pub fn run(
        &self,
        ontology: &dyn OntologyStore,
        strategy: &str,
        config: &ProjectionConfig,
    ) -> Result<ProjectionOutput, ProjectionError> {
        let projector = self
            .registry
            .get(strategy)
            .ok_or_else(|| ProjectionError::UnknownStrategy(strategy.to_string()))?;

        debug!(
            ontology = ontology.iri(),
            strategy = projector.strategy_name(),
            ?config,
            "projecting"
        );
        let output = projector.project(ontology, config);

        info!(
            strategy = projector.strategy_name(),
            edges = output.edges.len(),
            visited = output.stats.visited,
            skipped = output.stats.skipped,
            collapsed = output.collapsed(),
            "projection finished"
        );
        Ok(output)
    }

    fn check_strategy(&self, strategy: &str) -> Result<(), ProjectionError> {
        if self.registry.contains(strategy) {
            Ok(())
        } else {
            Err(ProjectionError::UnknownStrategy(strategy.to_string()))
        }
    }
}

impl Default for ProjectionDriver {
    fn default() -> Self {
        Self::new()
    }
}

/// Project `ontology` with the built-in strategies and default annotation
/// properties.
pub fn project(
    ontology: &dyn OntologyStore,
    strategy: &str,
    options: &toml::Table,
) -> Result<EdgeSet, ProjectionError> {
    ProjectionDriver::new().project(ontology, strategy, options)
}

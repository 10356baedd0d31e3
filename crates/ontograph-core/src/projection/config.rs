//! Projector options and their validation.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_ANNOTATION_PROPERTIES;

use super::error::ProjectionError;

pub const BIDIRECTIONAL_TAXONOMY: &str = "bidirectional_taxonomy";
pub const ONLY_TAXONOMY: &str = "only_taxonomy";
pub const INCLUDE_LITERALS: &str = "include_literals";

/// Option names accepted in a driver option table.
pub const RECOGNIZED_OPTIONS: &[&str] = &[BIDIRECTIONAL_TAXONOMY, ONLY_TAXONOMY, INCLUDE_LITERALS];

/// Options shared by all projection strategies.
///
/// Strategies read the flags that apply to them and ignore the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Emit `(B, superClassOf, A)` next to every `(A, subClassOf, B)`.
    pub bidirectional_taxonomy: bool,

    /// Emit the relation edge of a restriction but do not descend into its
    /// filler.
    pub only_taxonomy: bool,

    /// Emit literal edges for annotations.
    pub include_literals: bool,

    /// Annotation properties followed when `include_literals` is set.
    pub annotation_properties: Vec<String>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            bidirectional_taxonomy: false,
            only_taxonomy: false,
            include_literals: false,
            annotation_properties: DEFAULT_ANNOTATION_PROPERTIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ProjectionConfig {
    /// Validate a loose option table.
    ///
    /// Every key must be one of [`RECOGNIZED_OPTIONS`] and hold a boolean.
    pub fn from_options(options: &toml::Table) -> Result<Self, ProjectionError> {
        let mut config = Self::default();

        for (key, value) in options {
            let flag = match key.as_str() {
                BIDIRECTIONAL_TAXONOMY => &mut config.bidirectional_taxonomy,
                ONLY_TAXONOMY => &mut config.only_taxonomy,
                INCLUDE_LITERALS => &mut config.include_literals,
                other => return Err(ProjectionError::unrecognized(other)),
            };
            *flag = value
                .as_bool()
                .ok_or_else(|| ProjectionError::type_mismatch(key, "boolean"))?;
        }

        Ok(config)
    }

    pub fn bidirectional(mut self, on: bool) -> Self {
        self.bidirectional_taxonomy = on;
        self
    }

    pub fn only_taxonomy(mut self, on: bool) -> Self {
        self.only_taxonomy = on;
        self
    }

    pub fn include_literals(mut self, on: bool) -> Self {
        self.include_literals = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(src: &str) -> toml::Table {
        src.parse().unwrap()
    }

    #[test]
    fn test_from_options() {
        let config =
            ProjectionConfig::from_options(&table("bidirectional_taxonomy = true\nonly_taxonomy = false"))
                .unwrap();
        assert!(config.bidirectional_taxonomy);
        assert!(!config.only_taxonomy);
        assert!(!config.include_literals);
    }

    #[test]
    fn test_rejects_non_boolean_values() {
        for src in [
            "bidirectional_taxonomy = \"True\"",
            "bidirectional_taxonomy = 1",
            "bidirectional_taxonomy = { a = 1, b = 2, c = 3 }",
            "only_taxonomy = []",
            "include_literals = 0.5",
        ] {
            let err = ProjectionConfig::from_options(&table(src)).unwrap_err();
            assert!(
                matches!(err, ProjectionError::InvalidConfiguration { .. }),
                "{} -> {:?}",
                src,
                err
            );
            assert!(err.to_string().ends_with("must be of type boolean"));
        }
    }

    #[test]
    fn test_error_names_parameter() {
        let err = ProjectionConfig::from_options(&table("bidirectional_taxonomy = 1")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Optional parameter bidirectional_taxonomy must be of type boolean"
        );
    }

    #[test]
    fn test_rejects_unknown_option() {
        let err = ProjectionConfig::from_options(&table("walk_length = 10")).unwrap_err();
        match err {
            ProjectionError::InvalidConfiguration { parameter, .. } => {
                assert_eq!(parameter, "walk_length")
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}

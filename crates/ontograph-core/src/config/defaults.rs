//! Default values for ontograph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Projection Defaults
// ============================================================================

/// Strategy used when none is named.
pub const DEFAULT_STRATEGY: &str = "dl2vec";

/// `rdfs:label`
pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

/// `rdfs:comment`
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

/// `oboInOwl:hasDbXref`
pub const OBO_HAS_DB_XREF: &str = "http://www.geneontology.org/formats/oboInOwl#hasDbXref";

/// Annotation properties followed by the literal projection.
pub const DEFAULT_ANNOTATION_PROPERTIES: &[&str] = &[RDFS_LABEL, RDFS_COMMENT, OBO_HAS_DB_XREF];

// ============================================================================
// Normalizer Defaults
// ============================================================================

/// Dropped axioms kept verbatim in a normalization summary.
pub const DEFAULT_MAX_RECORDED_ISSUES: usize = 100;

// ============================================================================
// Cache Defaults
// ============================================================================

/// Normal-form cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".ontograph/cache";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local config file.
pub const PROJECT_CONFIG_FILE: &str = "ontograph.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "ontograph";

/// File name under [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

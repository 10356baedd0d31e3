//! Axiom normalization into the NF1..NF4 integer tuples.
//!
//! ## Components
//!
//! - [`Normalizer`] - owns the symbol tables of one session and buckets
//!   subsumption axioms
//! - [`classify`] - the pure shape matcher behind the normalizer
//! - [`text`] - the `<left> SubClassOf <right>` interchange format
//! - [`NormalFormCache`] - on-disk cache of that format keyed by ontology
//!   content
//!
//! Ids depend on axiom order. Feed axioms in a stable order when the ids
//! must be reproducible, and seed later splits with the tables of earlier
//! ones:
//!
//! ```ignore
//! let mut normalizer = Normalizer::new();
//! let train = normalizer.normalize_store(&train_ontology);
//! let valid = normalizer.normalize_store(&valid_ontology);
//! let tables = normalizer.into_tables();
//! ```

mod cache;
mod error;
mod forms;
mod symbols;
pub mod text;

pub use cache::NormalFormCache;
pub use error::NormalFormError;
pub use forms::{classify, NormalForm, NormalFormKind, NormalForms};
pub use symbols::{SymbolRemap, SymbolTable, SymbolTables};

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::config::{NormalizerConfig, DEFAULT_MAX_RECORDED_ISSUES};
use crate::expression::{Axiom, ExpressionError, Subsumption};
use crate::ontology::OntologyStore;

/// Why an axiom did not make it into a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxiomIssueKind {
    /// Well formed, but none of the four shapes.
    Unclassified,
    /// A restriction without relation or filler, or unreadable text.
    Malformed,
}

/// One dropped axiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxiomIssue {
    /// Position in the input sequence (line number for text files).
    pub index: usize,
    pub kind: AxiomIssueKind,
    /// The axiom as rendered text.
    pub rendered: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Tally of one normalization call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationSummary {
    pub nf1: usize,
    pub nf2: usize,
    pub nf3: usize,
    pub nf4: usize,
    pub unclassified: usize,
    pub malformed: usize,
    /// Non-subsumption axioms passed in.
    pub ignored: usize,
    /// The first dropped axioms, up to the configured cap.
    pub issues: Vec<AxiomIssue>,
}

impl NormalizationSummary {
    pub fn classified(&self) -> usize {
        self.nf1 + self.nf2 + self.nf3 + self.nf4
    }

    /// Axioms that were subsumptions but were dropped.
    pub fn dropped(&self) -> usize {
        self.unclassified + self.malformed
    }
}

impl fmt::Display for NormalizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Normal forms:")?;
        writeln!(f, "  NF1:          {}", self.nf1)?;
        writeln!(f, "  NF2:          {}", self.nf2)?;
        writeln!(f, "  NF3:          {}", self.nf3)?;
        writeln!(f, "  NF4:          {}", self.nf4)?;
        writeln!(f, "Dropped:")?;
        writeln!(f, "  Unclassified: {}", self.unclassified)?;
        writeln!(f, "  Malformed:    {}", self.malformed)?;
        if self.ignored > 0 {
            writeln!(f, "Ignored:        {}", self.ignored)?;
        }
        Ok(())
    }
}

/// Output of one normalization call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalization {
    pub forms: NormalForms,
    pub summary: NormalizationSummary,
}

/// Buckets subsumption axioms into NF1..NF4 and assigns ids.
///
/// A normalizer is one session: its tables grow across calls and can be
/// taken out with [`Normalizer::into_tables`] or seeded with
/// [`Normalizer::with_tables`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    tables: SymbolTables,
    max_recorded_issues: usize,
}

impl Normalizer {
    /// A session with empty tables.
    pub fn new() -> Self {
        Self::with_tables(SymbolTables::new())
    }

    /// A session continuing from existing tables.
    pub fn with_tables(tables: SymbolTables) -> Self {
        Self {
            tables,
            max_recorded_issues: DEFAULT_MAX_RECORDED_ISSUES,
        }
    }

    pub fn with_config(mut self, config: &NormalizerConfig) -> Self {
        self.max_recorded_issues = config.max_recorded_issues;
        self
    }

    pub fn tables(&self) -> &SymbolTables {
        &self.tables
    }

    pub fn into_tables(self) -> SymbolTables {
        self.tables
    }

    /// Normalize a sequence of axioms in iteration order.
    pub fn normalize<'a, I>(&mut self, axioms: I) -> Normalization
    where
        I: IntoIterator<Item = &'a Axiom>,
    {
        let mut out = Normalization::default();

        for (index, axiom) in axioms.into_iter().enumerate() {
            match axiom {
                Axiom::SubClassOf(subsumption) => self.absorb(&mut out, index, subsumption),
                other => {
                    debug!(index, kind = other.kind_name(), "ignoring non-subsumption axiom");
                    out.summary.ignored += 1;
                }
            }
        }

        self.finish(&out);
        out
    }

    /// Normalize every axiom of a store's import closure.
    pub fn normalize_store(&mut self, store: &dyn OntologyStore) -> Normalization {
        self.normalize(store.axioms())
    }

    /// Classify one subsumption and append it to its bucket.
    pub(crate) fn absorb(&mut self, out: &mut Normalization, index: usize, axiom: &Subsumption) {
        if let Err(err) = axiom.validate() {
            self.reject(out, index, axiom.to_string(), &err);
            return;
        }

        let Some(form) = classify(axiom) else {
            debug!(index, axiom = %axiom, "dropping unclassified axiom");
            out.summary.unclassified += 1;
            self.record(out, index, AxiomIssueKind::Unclassified, axiom.to_string(), None);
            return;
        };

        let classes = &mut self.tables.classes;
        let relations = &mut self.tables.relations;

        match form {
            NormalForm::Nf1 { sub, sup } => {
                let sub = classes.id_or_insert(sub);
                let sup = classes.id_or_insert(sup);
                out.forms.nf1.push((sub, sup));
                out.summary.nf1 += 1;
            }
            NormalForm::Nf2 { left, right, sup } => {
                let left = classes.id_or_insert(left);
                let right = classes.id_or_insert(right);
                let sup = classes.id_or_insert(sup);
                out.forms.nf2.push((left, right, sup));
                out.summary.nf2 += 1;
            }
            NormalForm::Nf3 {
                relation,
                filler,
                sup,
            } => {
                let filler = classes.id_or_insert(filler);
                let sup = classes.id_or_insert(sup);
                let relation = relations.id_or_insert(relation);
                out.forms.nf3.push((relation, filler, sup));
                out.summary.nf3 += 1;
            }
            NormalForm::Nf4 {
                sub,
                relation,
                filler,
            } => {
                let sub = classes.id_or_insert(sub);
                let filler = classes.id_or_insert(filler);
                let relation = relations.id_or_insert(relation);
                out.forms.nf4.push((sub, relation, filler));
                out.summary.nf4 += 1;
            }
        }
    }

    /// Count an axiom that could not be read or validated.
    pub(crate) fn reject(
        &self,
        out: &mut Normalization,
        index: usize,
        rendered: String,
        err: &ExpressionError,
    ) {
        debug!(index, axiom = %rendered, error = %err, "dropping malformed axiom");
        out.summary.malformed += 1;
        self.record(out, index, AxiomIssueKind::Malformed, rendered, Some(err.to_string()));
    }

    fn record(
        &self,
        out: &mut Normalization,
        index: usize,
        kind: AxiomIssueKind,
        rendered: String,
        detail: Option<String>,
    ) {
        if out.summary.issues.len() < self.max_recorded_issues {
            out.summary.issues.push(AxiomIssue {
                index,
                kind,
                rendered,
                detail,
            });
        }
    }

    pub(crate) fn finish(&self, out: &Normalization) {
        let s = &out.summary;
        info!(
            nf1 = s.nf1,
            nf2 = s.nf2,
            nf3 = s.nf3,
            nf4 = s.nf4,
            unclassified = s.unclassified,
            malformed = s.malformed,
            ignored = s.ignored,
            classes = self.tables.classes.len(),
            relations = self.tables.relations.len(),
            "normalization finished"
        );
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ClassExpression;
    use std::sync::Arc;

    fn some(rel: &str, filler: &str) -> ClassExpression {
        ClassExpression::existential(rel, ClassExpression::atomic(filler)).unwrap()
    }

    #[test]
    fn test_normalize_all_forms() {
        let axioms = vec![
            Axiom::subclass_of("A", "B"),
            Axiom::subclass_of(
                ClassExpression::conjunction(ClassExpression::atomic("A"), ClassExpression::atomic("C")),
                "D",
            ),
            Axiom::subclass_of(some("r", "E"), "A"),
            Axiom::subclass_of("B", some("s", "F")),
        ];

        let mut normalizer = Normalizer::new();
        let result = normalizer.normalize(&axioms);

        assert_eq!(result.forms.nf1, vec![(0, 1)]);
        assert_eq!(result.forms.nf2, vec![(0, 2, 3)]);
        assert_eq!(result.forms.nf3, vec![(0, 4, 0)]);
        assert_eq!(result.forms.nf4, vec![(1, 1, 5)]);
        assert_eq!(result.summary.classified(), 4);

        let tables = normalizer.tables();
        assert_eq!(tables.classes.names(), &["A", "B", "C", "D", "E", "F"]);
        assert_eq!(tables.relations.names(), &["r", "s"]);
    }

    #[test]
    fn test_unclassified_axioms_do_not_grow_tables() {
        let nested = ClassExpression::conjunction(
            ClassExpression::conjunction(ClassExpression::atomic("X"), ClassExpression::atomic("Y")),
            ClassExpression::atomic("Z"),
        );
        let axioms = vec![Axiom::subclass_of(nested, "W")];

        let mut normalizer = Normalizer::new();
        let result = normalizer.normalize(&axioms);

        assert_eq!(result.summary.unclassified, 1);
        assert_eq!(result.summary.issues[0].kind, AxiomIssueKind::Unclassified);
        assert_eq!(result.summary.issues[0].rendered, "(X and Y) and Z SubClassOf W");
        assert!(normalizer.tables().classes.is_empty());
    }

    #[test]
    fn test_malformed_axiom_does_not_abort_batch() {
        let bad = ClassExpression::Existential(" ".to_string(), Arc::new("A".into()));
        let axioms = vec![
            Axiom::subclass_of("A", bad),
            Axiom::subclass_of("A", "B"),
        ];

        let result = Normalizer::new().normalize(&axioms);
        assert_eq!(result.summary.malformed, 1);
        assert_eq!(result.summary.nf1, 1);
        assert_eq!(result.summary.issues[0].kind, AxiomIssueKind::Malformed);
        assert!(result.summary.issues[0].detail.is_some());
    }

    #[test]
    fn test_non_subsumption_axioms_are_ignored() {
        let axioms = vec![
            Axiom::DisjointClasses(vec!["A".into(), "B".into()]),
            Axiom::Other {
                kind: "SubObjectPropertyOf".to_string(),
            },
        ];
        let result = Normalizer::new().normalize(&axioms);
        assert_eq!(result.summary.ignored, 2);
        assert!(result.forms.is_empty());
        assert!(result.summary.issues.is_empty());
    }

    #[test]
    fn test_issue_cap() {
        let axioms: Vec<Axiom> = (0..5)
            .map(|i| Axiom::subclass_of(some("r", &format!("A{i}")), some("s", "B")))
            .collect();

        let config = NormalizerConfig {
            max_recorded_issues: 2,
        };
        let result = Normalizer::new().with_config(&config).normalize(&axioms);
        assert_eq!(result.summary.unclassified, 5);
        assert_eq!(result.summary.issues.len(), 2);
    }

    #[test]
    fn test_seeded_session_extends_tables() {
        let mut normalizer = Normalizer::new();
        normalizer.normalize(&[Axiom::subclass_of("A", "B")]);

        let mut seeded = Normalizer::with_tables(normalizer.into_tables());
        let result = seeded.normalize(&[Axiom::subclass_of("C", "A")]);
        assert_eq!(result.forms.nf1, vec![(2, 0)]);
    }
}

//! Class expressions and axioms.
//!
//! The expression model is a closed sum type: every consumer (normalizer,
//! projectors, text format) matches on it exhaustively.
//!
//! - [`ClassExpression`] - `Atomic`, `Conjunction`, `Existential`
//! - [`Subsumption`] - `sub ⊑ sup`
//! - [`Axiom`] - subsumption plus the axiom kinds the store may report but
//!   the engine ignores

mod error;
mod render;

pub use error::ExpressionError;
pub(crate) use render::{KEYWORDS, NAME_CLOSE, NAME_ESCAPE, NAME_OPEN};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// IRI of the top concept.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";

/// A class expression.
///
/// Operands are reference counted so the same sub-expression can be shared
/// read-only between axioms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassExpression {
    /// A named class.
    Atomic(String),
    /// `left ⊓ right`
    Conjunction(Arc<ClassExpression>, Arc<ClassExpression>),
    /// `∃relation.filler`
    Existential(String, Arc<ClassExpression>),
}

impl ClassExpression {
    /// A named class.
    pub fn atomic(id: impl Into<String>) -> Self {
        Self::Atomic(id.into())
    }

    /// The top concept, `owl:Thing`.
    pub fn top() -> Self {
        Self::Atomic(OWL_THING.to_string())
    }

    pub fn conjunction(left: impl Into<Arc<Self>>, right: impl Into<Arc<Self>>) -> Self {
        Self::Conjunction(left.into(), right.into())
    }

    /// An existential restriction `∃relation.filler`.
    ///
    /// Fails when the relation id is blank or the filler is a blank named
    /// class.
    pub fn existential(
        relation: impl Into<String>,
        filler: impl Into<Arc<Self>>,
    ) -> Result<Self, ExpressionError> {
        let relation = relation.into();
        let filler = filler.into();

        if relation.trim().is_empty() {
            return Err(ExpressionError::malformed("restriction has no relation"));
        }
        if let Self::Atomic(id) = filler.as_ref() {
            if id.trim().is_empty() {
                return Err(ExpressionError::malformed(format!(
                    "restriction on {} has no filler",
                    relation
                )));
            }
        }

        Ok(Self::Existential(relation, filler))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Self::Atomic(_))
    }

    pub fn is_conjunction(&self) -> bool {
        matches!(self, Self::Conjunction(_, _))
    }

    pub fn is_existential(&self) -> bool {
        matches!(self, Self::Existential(_, _))
    }

    /// Direct sub-expressions: none for a named class, both conjuncts for a
    /// conjunction, the filler for a restriction.
    pub fn operands(&self) -> Vec<&ClassExpression> {
        match self {
            Self::Atomic(_) => Vec::new(),
            Self::Conjunction(left, right) => vec![left.as_ref(), right.as_ref()],
            Self::Existential(_, filler) => vec![filler.as_ref()],
        }
    }

    /// The class id if this is a named class.
    pub fn as_atomic(&self) -> Option<&str> {
        match self {
            Self::Atomic(id) => Some(id),
            _ => None,
        }
    }

    /// The relation id if this is a restriction.
    pub fn relation(&self) -> Option<&str> {
        match self {
            Self::Existential(relation, _) => Some(relation),
            _ => None,
        }
    }

    /// Re-check the construction rules over the whole expression tree.
    ///
    /// Expressions built through [`ClassExpression::existential`] always pass;
    /// this catches values that were deserialized or assembled directly from
    /// the enum variants.
    pub fn validate(&self) -> Result<(), ExpressionError> {
        match self {
            Self::Atomic(_) => Ok(()),
            Self::Conjunction(left, right) => {
                left.validate()?;
                right.validate()
            }
            Self::Existential(relation, filler) => {
                if relation.trim().is_empty() {
                    return Err(ExpressionError::malformed("restriction has no relation"));
                }
                match filler.as_ref() {
                    Self::Atomic(id) if id.trim().is_empty() => Err(ExpressionError::malformed(
                        format!("restriction on {} has no filler", relation),
                    )),
                    other => other.validate(),
                }
            }
        }
    }
}

impl From<&str> for ClassExpression {
    fn from(id: &str) -> Self {
        Self::atomic(id)
    }
}

/// `sub ⊑ sup`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subsumption {
    pub sub: ClassExpression,
    pub sup: ClassExpression,
}

impl Subsumption {
    pub fn new(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self {
            sub: sub.into(),
            sup: sup.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ExpressionError> {
        self.sub.validate()?;
        self.sup.validate()
    }
}

/// An axiom as reported by the ontology store.
///
/// Only [`Axiom::SubClassOf`] is processed by the engine; the other kinds are
/// carried so stores can report them and the engine can count what it skips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axiom {
    SubClassOf(Subsumption),
    EquivalentClasses(Vec<ClassExpression>),
    DisjointClasses(Vec<ClassExpression>),
    /// Any other axiom type (property chains, domain/range, assertions).
    Other { kind: String },
}

impl Axiom {
    pub fn subclass_of(sub: impl Into<ClassExpression>, sup: impl Into<ClassExpression>) -> Self {
        Self::SubClassOf(Subsumption::new(sub, sup))
    }

    pub fn as_subsumption(&self) -> Option<&Subsumption> {
        match self {
            Self::SubClassOf(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the axiom kind for logs and summaries.
    pub fn kind_name(&self) -> &str {
        match self {
            Self::SubClassOf(_) => "SubClassOf",
            Self::EquivalentClasses(_) => "EquivalentClasses",
            Self::DisjointClasses(_) => "DisjointClasses",
            Self::Other { kind } => kind,
        }
    }
}

impl From<Subsumption> for Axiom {
    fn from(s: Subsumption) -> Self {
        Self::SubClassOf(s)
    }
}

//! The four normal-form shapes.
//!
//! | Form | Pattern      | Tuple                 |
//! |------|--------------|-----------------------|
//! | NF1  | `A ⊑ B`      | (classA, classB)      |
//! | NF2  | `A ⊓ B ⊑ C`  | (classA, classB, classC) |
//! | NF3  | `∃R.A ⊑ B`   | (rel, classA, classB) |
//! | NF4  | `A ⊑ ∃R.B`   | (classA, rel, classB) |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expression::{ClassExpression, Subsumption};

/// Which of the four buckets an axiom falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalFormKind {
    Nf1,
    Nf2,
    Nf3,
    Nf4,
}

impl NormalFormKind {
    pub const ALL: [NormalFormKind; 4] = [Self::Nf1, Self::Nf2, Self::Nf3, Self::Nf4];
}

impl fmt::Display for NormalFormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nf1 => write!(f, "NF1"),
            Self::Nf2 => write!(f, "NF2"),
            Self::Nf3 => write!(f, "NF3"),
            Self::Nf4 => write!(f, "NF4"),
        }
    }
}

/// A classified axiom, still holding names rather than ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForm<'a> {
    /// `sub ⊑ sup`
    Nf1 { sub: &'a str, sup: &'a str },
    /// `left ⊓ right ⊑ sup`
    Nf2 {
        left: &'a str,
        right: &'a str,
        sup: &'a str,
    },
    /// `∃relation.filler ⊑ sup`
    Nf3 {
        relation: &'a str,
        filler: &'a str,
        sup: &'a str,
    },
    /// `sub ⊑ ∃relation.filler`
    Nf4 {
        sub: &'a str,
        relation: &'a str,
        filler: &'a str,
    },
}

impl NormalForm<'_> {
    pub fn kind(&self) -> NormalFormKind {
        match self {
            Self::Nf1 { .. } => NormalFormKind::Nf1,
            Self::Nf2 { .. } => NormalFormKind::Nf2,
            Self::Nf3 { .. } => NormalFormKind::Nf3,
            Self::Nf4 { .. } => NormalFormKind::Nf4,
        }
    }
}

/// Match an axiom against the four shapes.
///
/// The check order is NF1, NF2 (conjunction on the left), NF3 (restriction
/// on the left), NF4 (restriction on the right). Anything else, including
/// nested conjunctions and restrictions with composite fillers, is `None`.
pub fn classify(axiom: &Subsumption) -> Option<NormalForm<'_>> {
    use ClassExpression::{Atomic, Conjunction, Existential};

    match (&axiom.sub, &axiom.sup) {
        (Atomic(sub), Atomic(sup)) => Some(NormalForm::Nf1 { sub, sup }),
        (Conjunction(left, right), Atomic(sup)) => match (left.as_ref(), right.as_ref()) {
            (Atomic(left), Atomic(right)) => Some(NormalForm::Nf2 { left, right, sup }),
            _ => None,
        },
        (Existential(relation, filler), Atomic(sup)) => match filler.as_ref() {
            Atomic(filler) => Some(NormalForm::Nf3 {
                relation,
                filler,
                sup,
            }),
            _ => None,
        },
        (Atomic(sub), Existential(relation, filler)) => match filler.as_ref() {
            Atomic(filler) => Some(NormalForm::Nf4 {
                sub,
                relation,
                filler,
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Integer-id tuples, one sequence per normal form, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalForms {
    pub nf1: Vec<(usize, usize)>,
    pub nf2: Vec<(usize, usize, usize)>,
    pub nf3: Vec<(usize, usize, usize)>,
    pub nf4: Vec<(usize, usize, usize)>,
}

impl NormalForms {
    pub fn len(&self, kind: NormalFormKind) -> usize {
        match kind {
            NormalFormKind::Nf1 => self.nf1.len(),
            NormalFormKind::Nf2 => self.nf2.len(),
            NormalFormKind::Nf3 => self.nf3.len(),
            NormalFormKind::Nf4 => self.nf4.len(),
        }
    }

    pub fn total(&self) -> usize {
        NormalFormKind::ALL.iter().map(|k| self.len(*k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

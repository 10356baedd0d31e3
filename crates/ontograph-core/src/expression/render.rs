//! Manchester-style rendering.
//!
//! Named classes render verbatim, conjunctions as `L and R`, restrictions as
//! `R some F`. A composite operand of a composite expression is wrapped in
//! parentheses so the text reads back to the same tree.
//!
//! A class or relation name that would not read back as one word is
//! bracketed, with `\`, `>` and line breaks escaped:
//!
//! ```text
//! Father Figure   ->  <Father Figure>
//! and             ->  <and>
//! a>b             ->  <a\>b>
//! ```

use std::fmt::{self, Write};

use super::{Axiom, ClassExpression, Subsumption};

/// Words with a meaning of their own in the rendering.
pub(crate) const KEYWORDS: [&str; 3] = ["and", "some", "SubClassOf"];

pub(crate) const NAME_OPEN: char = '<';
pub(crate) const NAME_CLOSE: char = '>';
pub(crate) const NAME_ESCAPE: char = '\\';

/// True when `name` reads back unchanged as a bare word.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !KEYWORDS.contains(&name)
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>' | '\\'))
}

fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_name(name) {
        return f.write_str(name);
    }
    f.write_char(NAME_OPEN)?;
    for c in name.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            NAME_ESCAPE | NAME_CLOSE => {
                f.write_char(NAME_ESCAPE)?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(NAME_CLOSE)
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &ClassExpression) -> fmt::Result {
    if expr.is_atomic() {
        write!(f, "{}", expr)
    } else {
        write!(f, "({})", expr)
    }
}

impl fmt::Display for ClassExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(id) => write_name(f, id),
            Self::Conjunction(left, right) => {
                write_operand(f, left)?;
                f.write_str(" and ")?;
                write_operand(f, right)
            }
            Self::Existential(relation, filler) => {
                write_name(f, relation)?;
                f.write_str(" some ")?;
                write_operand(f, filler)
            }
        }
    }
}

impl fmt::Display for Subsumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SubClassOf {}", self.sub, self.sup)
    }
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubClassOf(s) => write!(f, "{}", s),
            Self::EquivalentClasses(exprs) | Self::DisjointClasses(exprs) => {
                write!(f, "{}(", self.kind_name())?;
                for (i, expr) in exprs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", expr)?;
                }
                f.write_str(")")
            }
            Self::Other { kind } => write!(f, "{}(..)", kind),
        }
    }
}

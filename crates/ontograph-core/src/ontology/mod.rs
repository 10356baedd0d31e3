//! Ontology store seam.
//!
//! The engine never loads or reasons over ontology files. It reads axioms
//! and annotations through [`OntologyStore`], which the reasoner layer
//! implements. [`Ontology`] is the in-memory implementation used by the CLI
//! (as a JSON snapshot) and by tests.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::expression::{Axiom, ClassExpression, Subsumption};

/// Read access to a loaded ontology and its import closure.
pub trait OntologyStore {
    /// IRI of the root ontology.
    fn iri(&self) -> &str;

    /// All axioms of the import closure, root ontology first.
    fn axioms(&self) -> Vec<&Axiom>;

    /// All annotation assertions of the import closure, root ontology first.
    fn annotations(&self) -> Vec<&Annotation>;

    /// The subsumption axioms among [`OntologyStore::axioms`], in order.
    fn subsumptions(&self) -> Vec<&Subsumption> {
        self.axioms()
            .into_iter()
            .filter_map(Axiom::as_subsumption)
            .collect()
    }
}

/// A literal value attached through an annotation property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    /// Language tag, e.g. `en`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: None,
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// `subject property "value"` (label, comment, cross-reference, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotated class id.
    pub subject: String,
    /// Annotation property IRI.
    pub property: String,
    pub value: Literal,
}

/// In-memory ontology with an import closure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ontology {
    pub iri: String,
    pub axioms: Vec<Axiom>,
    pub annotations: Vec<Annotation>,
    pub imports: Vec<Ontology>,
}

impl Ontology {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            ..Default::default()
        }
    }

    pub fn add_axiom(&mut self, axiom: impl Into<Axiom>) {
        self.axioms.push(axiom.into());
    }

    /// Add `sub ⊑ sup`.
    pub fn subclass_of(
        mut self,
        sub: impl Into<ClassExpression>,
        sup: impl Into<ClassExpression>,
    ) -> Self {
        self.axioms.push(Axiom::subclass_of(sub, sup));
        self
    }

    pub fn with_axiom(mut self, axiom: impl Into<Axiom>) -> Self {
        self.add_axiom(axiom);
        self
    }

    /// Attach a literal to a class.
    pub fn annotate(
        mut self,
        subject: impl Into<String>,
        property: impl Into<String>,
        value: Literal,
    ) -> Self {
        self.annotations.push(Annotation {
            subject: subject.into(),
            property: property.into(),
            value,
        });
        self
    }

    pub fn import(mut self, ontology: Ontology) -> Self {
        self.imports.push(ontology);
        self
    }

    /// The import closure, depth-first, each IRI visited once.
    pub fn closure(&self) -> Vec<&Ontology> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.collect_closure(&mut seen, &mut out);
        out
    }

    fn collect_closure<'a>(&'a self, seen: &mut HashSet<&'a str>, out: &mut Vec<&'a Ontology>) {
        if !seen.insert(self.iri.as_str()) {
            return;
        }
        out.push(self);
        for import in &self.imports {
            import.collect_closure(seen, out);
        }
    }

    /// Read a JSON snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl OntologyStore for Ontology {
    fn iri(&self) -> &str {
        &self.iri
    }

    fn axioms(&self) -> Vec<&Axiom> {
        self.closure()
            .into_iter()
            .flat_map(|o| o.axioms.iter())
            .collect()
    }

    fn annotations(&self) -> Vec<&Annotation> {
        self.closure()
            .into_iter()
            .flat_map(|o| o.annotations.iter())
            .collect()
    }
}

//! Property-based tests for normalization and projection.
//!
//! - classification puts each axiom in at most one bucket
//! - normalization is deterministic up to id renaming across input orders
//! - seeding a session with earlier tables never moves earlier ids
//! - projection output is a set: duplicating input never adds edges
//! - the text format reads back what it wrote, whatever the names contain

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::Path;

use ontograph_core::graph::SUPERCLASS_OF;
use ontograph_core::normalizer::text::{read_normal_forms, write_normal_forms};
use ontograph_core::{
    classify, project, Axiom, ClassExpression, Normalization, Normalizer, Ontology, Subsumption,
    SymbolTables,
};

fn arb_class() -> impl Strategy<Value = String> {
    "[A-F]".prop_map(|s| s)
}

fn arb_relation() -> impl Strategy<Value = String> {
    "[rs]".prop_map(|s| s)
}

fn arb_expression() -> impl Strategy<Value = ClassExpression> {
    let leaf = arb_class().prop_map(ClassExpression::Atomic);
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| ClassExpression::conjunction(l, r)),
            (arb_relation(), inner).prop_map(|(rel, filler)| {
                ClassExpression::existential(rel, filler).unwrap()
            }),
        ]
    })
}

fn arb_axioms() -> impl Strategy<Value = Vec<Axiom>> {
    prop::collection::vec(
        (arb_expression(), arb_expression()).prop_map(|(sub, sup)| Axiom::subclass_of(sub, sup)),
        0..20,
    )
}

/// Names with spaces, brackets, escapes, line breaks and keywords.
fn arb_awkward_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ab <>()\\\\\n\t]{1,6}",
        Just("and".to_string()),
        Just("some".to_string()),
        Just("SubClassOf".to_string()),
        Just("Father Figure".to_string()),
    ]
    .prop_filter("restrictions need a non-blank name", |s| !s.trim().is_empty())
}

fn arb_awkward_expression() -> impl Strategy<Value = ClassExpression> {
    let leaf = arb_awkward_name().prop_map(ClassExpression::Atomic);
    leaf.prop_recursive(2, 8, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| ClassExpression::conjunction(l, r)),
            (arb_awkward_name(), inner).prop_map(|(rel, filler)| {
                ClassExpression::existential(rel, filler).unwrap()
            }),
        ]
    })
}

fn arb_awkward_subsumptions() -> impl Strategy<Value = Vec<Subsumption>> {
    prop::collection::vec(
        (arb_awkward_expression(), arb_awkward_expression())
            .prop_map(|(sub, sup)| Subsumption::new(sub, sup)),
        0..12,
    )
}

/// Tuples of a normalization rendered back to names, so results from
/// different id assignments can be compared.
fn named(result: &Normalization, tables: &SymbolTables) -> BTreeSet<Vec<String>> {
    let class = |id: usize| tables.classes.name(id).unwrap_or_default().to_string();
    let rel = |id: usize| tables.relations.name(id).unwrap_or_default().to_string();

    let mut out = BTreeSet::new();
    for &(a, b) in &result.forms.nf1 {
        out.insert(vec!["nf1".to_string(), class(a), class(b)]);
    }
    for &(a, b, c) in &result.forms.nf2 {
        out.insert(vec!["nf2".to_string(), class(a), class(b), class(c)]);
    }
    for &(r, a, b) in &result.forms.nf3 {
        out.insert(vec!["nf3".to_string(), rel(r), class(a), class(b)]);
    }
    for &(a, r, b) in &result.forms.nf4 {
        out.insert(vec!["nf4".to_string(), class(a), rel(r), class(b)]);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn classification_partitions_axioms(axioms in arb_axioms()) {
        let mut normalizer = Normalizer::new();
        let result = normalizer.normalize(&axioms);

        let matched = axioms
            .iter()
            .filter_map(Axiom::as_subsumption)
            .filter(|s| classify(s).is_some())
            .count();
        prop_assert_eq!(result.summary.classified(), matched);
        prop_assert_eq!(result.forms.total(), matched);
        prop_assert_eq!(
            result.summary.classified() + result.summary.dropped(),
            axioms.len()
        );
    }

    #[test]
    fn normalization_is_order_independent(axioms in arb_axioms()) {
        let mut forward = Normalizer::new();
        let forward_result = forward.normalize(&axioms);

        let reversed: Vec<Axiom> = axioms.iter().rev().cloned().collect();
        let mut backward = Normalizer::new();
        let backward_result = backward.normalize(&reversed);

        prop_assert_eq!(
            named(&forward_result, forward.tables()),
            named(&backward_result, backward.tables())
        );
        prop_assert_eq!(forward.tables().classes.len(), backward.tables().classes.len());
    }

    #[test]
    fn seeded_split_keeps_earlier_ids(first in arb_axioms(), second in arb_axioms()) {
        let mut normalizer = Normalizer::new();
        normalizer.normalize(&first);
        let before = normalizer.tables().clone();
        normalizer.normalize(&second);
        let after = normalizer.tables();

        for (id, name) in before.classes.iter() {
            prop_assert_eq!(after.classes.get(name), Some(id));
        }
        for (id, name) in before.relations.iter() {
            prop_assert_eq!(after.relations.get(name), Some(id));
        }
    }

    #[test]
    fn duplicated_axioms_add_no_edges(axioms in arb_axioms()) {
        let once = axioms
            .iter()
            .cloned()
            .fold(Ontology::new("http://once"), Ontology::with_axiom);
        let twice = axioms
            .iter()
            .chain(axioms.iter())
            .cloned()
            .fold(Ontology::new("http://twice"), Ontology::with_axiom);

        let options = toml::Table::new();
        let a = project(&once, "dl2vec", &options).unwrap();
        let b = project(&twice, "dl2vec", &options).unwrap();
        prop_assert_eq!(a.to_tuples(), b.to_tuples());
    }

    #[test]
    fn inverse_edges_only_when_bidirectional(axioms in arb_axioms()) {
        let onto = axioms
            .iter()
            .cloned()
            .fold(Ontology::new("http://o"), Ontology::with_axiom);

        let off = project(&onto, "dl2vec", &toml::Table::new()).unwrap();
        prop_assert!(off.iter().all(|e| e.rel() != SUPERCLASS_OF));

        let mut options = toml::Table::new();
        options.insert("bidirectional_taxonomy".to_string(), toml::Value::Boolean(true));
        let on = project(&onto, "dl2vec", &options).unwrap();
        for edge in off.iter() {
            prop_assert!(on.contains(edge.src(), edge.rel(), edge.dst()));
        }
    }

    #[test]
    fn text_format_reads_back_any_names(subsumptions in arb_awkward_subsumptions()) {
        let mut buf = Vec::new();
        let written = write_normal_forms(&mut buf, &subsumptions).unwrap();
        prop_assert_eq!(written, subsumptions.len());

        let axioms: Vec<Axiom> = subsumptions.iter().cloned().map(Axiom::SubClassOf).collect();
        let mut in_memory = Normalizer::new();
        let expected = in_memory.normalize(&axioms);

        let mut from_text = Normalizer::new();
        let loaded =
            read_normal_forms(Cursor::new(buf), &mut from_text, Path::new("mem")).unwrap();

        prop_assert_eq!(loaded.summary.malformed, 0);
        prop_assert_eq!(from_text.tables(), in_memory.tables());
        prop_assert_eq!(&loaded.forms, &expected.forms);
        prop_assert_eq!(loaded.summary.unclassified, expected.summary.unclassified);
    }
}

//! Tests for the constraint builder.

use depforge_config::ParserConfig;
use depforge_core::{Constraint, ConstraintKind, Direction, FactError, Prediction};

use super::*;

fn null() -> Prediction {
    Prediction::new("__", 0.5)
}

fn nulls(count: usize) -> Vec<Prediction> {
    (0..count).map(|_| null()).collect()
}

fn facts_of(facts: &FactSet) -> Vec<Constraint> {
    facts.iter().map(|(_, fact)| fact.clone()).collect()
}

#[test]
fn test_from_config() {
    let config = ParserConfig::new()
        .with_max_span(3)
        .unwrap()
        .with_null_label("NONE");
    let builder = ConstraintBuilder::from_config(&config);
    assert_eq!(builder.max_span(), 3);
    assert_eq!(builder.null_label(), "NONE");
    assert_eq!(builder.layout(5).edge_count(), InstanceLayout::new(5, 3).edge_count());
}

#[test]
fn test_edge_stream_order() {
    let builder = ConstraintBuilder::new(20, "__");
    // root(1), root(2), root(3), 1<-2, 1<-3, 2<-1, 2<-3, 3<-1, 3<-2
    let mut edges = nulls(9);
    edges[1] = Prediction::new("ROOT", 0.9);
    edges[5] = Prediction::new("nsubj", 0.8);
    edges[6] = Prediction::new("obj", 0.7);

    let facts = builder.build(3, &edges, &nulls(3), &nulls(3)).unwrap();
    assert_eq!(
        facts_of(&facts),
        vec![
            Constraint::dependency(2, 0, "ROOT", 0.9),
            Constraint::dependency(2, 1, "nsubj", 0.8),
            Constraint::dependency(2, 3, "obj", 0.7),
        ]
    );
}

#[test]
fn test_null_edges_produce_no_facts() {
    let builder = ConstraintBuilder::new(20, "__");
    let facts = builder.build(3, &nulls(9), &nulls(3), &nulls(3)).unwrap();
    assert!(facts.is_empty());
    assert_eq!(facts.sentence_length(), 3);
}

#[test]
fn test_custom_null_label() {
    let builder = ConstraintBuilder::new(20, "NONE");
    let edges = vec![
        Prediction::new("NONE", 0.9),
        Prediction::new("__", 0.4),
    ];
    let none = vec![Prediction::new("NONE", 1.0)];
    let facts = builder.build(1, &edges[..1], &none, &none).unwrap();
    assert!(facts.is_empty());

    let facts = builder.build(1, &edges[1..], &none, &none).unwrap();
    assert_eq!(facts_of(&facts), vec![Constraint::dependency(1, 0, "__", 0.4)]);

    // "__" is an ordinary label once another marker is configured.
    let roles = vec![Prediction::new("__", 0.3).with_distribution([("__", 0.3)])];
    let facts = builder.build(1, &edges[..1], &none, &roles).unwrap();
    assert_eq!(
        facts_of(&facts),
        vec![Constraint::incoming_relation(1, "__", 0.3)]
    );
}

#[test]
fn test_every_nonzero_direction_entry_becomes_a_fact() {
    let builder = ConstraintBuilder::new(20, "__");
    let directions = vec![
        Prediction::new("LEFT", 0.6).with_distribution([("LEFT", 0.6), ("RIGHT", 0.3), ("ROOT", 0.0)]),
        Prediction::new("ROOT", 1.0),
    ];
    let facts = builder.build(2, &nulls(4), &directions, &nulls(2)).unwrap();
    assert_eq!(
        facts_of(&facts),
        vec![
            Constraint::direction(1, Direction::Left, 0.6),
            Constraint::direction(1, Direction::Right, 0.3),
        ]
    );
}

#[test]
fn test_unknown_direction_label() {
    let builder = ConstraintBuilder::new(20, "__");
    let directions = vec![
        Prediction::new("ROOT", 1.0).with_distribution([("ROOT", 1.0)]),
        Prediction::new("UP", 1.0).with_distribution([("UP", 1.0)]),
    ];
    let err = builder
        .build(2, &nulls(4), &directions, &nulls(2))
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::Fact {
            stream: Stream::Direction,
            position: 1,
            source: FactError::UnknownDirection("UP".to_string()),
        }
    );
}

#[test]
fn test_role_disjunction_sums_weights() {
    let builder = ConstraintBuilder::new(20, "__");
    let roles = vec![Prediction::new("obj|iobj", 0.5).with_distribution([
        ("obj|iobj", 0.5),
        ("obj", 0.2),
        ("nsubj", 0.25),
        ("iobj|nsubj", 0.05),
    ])];
    let facts = builder.build(1, &nulls(1), &nulls(1), &roles).unwrap();

    let relations: Vec<_> = facts
        .iter()
        .map(|(_, fact)| (fact.label().unwrap().to_string(), fact.weight()))
        .collect();
    assert_eq!(relations.len(), 2);
    assert_eq!(relations[0].0, "obj");
    assert!((relations[0].1 - 0.7).abs() < 1e-12);
    assert_eq!(relations[1].0, "iobj");
    assert!((relations[1].1 - 0.55).abs() < 1e-12);
}

#[test]
fn test_role_repeated_sub_label_emitted_once() {
    let builder = ConstraintBuilder::new(20, "__");
    let roles = vec![Prediction::new("obj||obj", 0.5).with_distribution([("obj", 0.5)])];
    let facts = builder.build(1, &nulls(1), &nulls(1), &roles).unwrap();
    assert_eq!(
        facts_of(&facts),
        vec![Constraint::incoming_relation(1, "obj", 0.5)]
    );
}

#[test]
fn test_null_role_emits_nothing() {
    let builder = ConstraintBuilder::new(20, "__");
    let roles = vec![Prediction::new("__", 0.9).with_distribution([("__", 0.9), ("obj", 0.1)])];
    let facts = builder.build(1, &nulls(1), &nulls(1), &roles).unwrap();
    assert_eq!(facts.count_of(ConstraintKind::IncomingRelation), 0);
}

#[test]
fn test_short_and_long_streams_rejected() {
    let builder = ConstraintBuilder::new(1, "__");
    // N=3, span 1: 3 root + 4 pair instances
    let short = builder.build(3, &nulls(6), &nulls(3), &nulls(3));
    assert_eq!(
        short.unwrap_err(),
        BuildError::StreamLength {
            stream: Stream::Edge,
            expected: 7,
            actual: 6
        }
    );

    let long = builder.build(3, &nulls(8), &nulls(3), &nulls(3));
    assert!(matches!(
        long,
        Err(BuildError::StreamLength {
            stream: Stream::Edge,
            actual: 8,
            ..
        })
    ));

    let err = builder
        .build(3, &nulls(7), &nulls(4), &nulls(3))
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::StreamLength {
            stream: Stream::Direction,
            ..
        }
    ));

    let err = builder
        .build(3, &nulls(7), &nulls(3), &nulls(2))
        .unwrap_err();
    assert_eq!(err.to_string(), "role stream has 2 results, expected 3");
}

#[test]
fn test_empty_sentence_rejected() {
    let builder = ConstraintBuilder::new(20, "__");
    assert_eq!(
        builder.build(0, &[], &[], &[]),
        Err(BuildError::EmptySentence)
    );
}

#[test]
fn test_invalid_weight_reports_position() {
    let builder = ConstraintBuilder::new(20, "__");
    let edges = vec![
        Prediction::new("ROOT", 0.9),
        Prediction::new("ROOT", -1.0),
        null(),
        null(),
    ];
    let err = builder
        .build(2, &edges, &nulls(2), &nulls(2))
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Fact {
            stream: Stream::Edge,
            position: 1,
            source: FactError::InvalidWeight { token: 2, .. },
        }
    ));
}

#[test]
fn test_window_limits_pair_facts() {
    let builder = ConstraintBuilder::new(1, "__");
    // N=3, span 1: root(1..3), 1<-2, 2<-1, 2<-3, 3<-2
    let edges: Vec<_> = (0..7).map(|_| Prediction::new("dep", 0.5)).collect();
    let facts = builder.build(3, &edges, &nulls(3), &nulls(3)).unwrap();

    let pairs: Vec<_> = facts
        .iter()
        .filter_map(|(_, fact)| match fact {
            Constraint::Dependency {
                dependent, head, ..
            } if *head != 0 => Some((*dependent, *head)),
            _ => None,
        })
        .collect();
    assert_eq!(pairs, vec![(1, 2), (2, 1), (2, 3), (3, 2)]);
}

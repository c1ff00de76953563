//! End-to-end parsing of single sentences through the classifier pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};

use depforge::prelude::*;
use depforge::{BuildError, ConfigError, RelationSlot, Stream, ThreadCount};
use depforge_test::{assert_attachments, assert_close, assert_projective, ClassifierStreams};

/// Edge classifier for a left-branching chain: token 1 is the root and every
/// other token attaches to its left neighbour.
fn chain_edges(_: &Sentence, instances: &[EdgeInstance]) -> ClassifierResult {
    Ok(instances
        .iter()
        .map(|instance| match *instance {
            EdgeInstance::Root { dependent: 1 } => Prediction::new("ROOT", 1.0),
            EdgeInstance::Pair { dependent, head } if head + 1 == dependent => {
                Prediction::new("next", 1.0)
            }
            _ => Prediction::new("__", 0.9),
        })
        .collect())
}

fn chain_directions(_: &Sentence, tokens: &[TokenIndex]) -> ClassifierResult {
    Ok(tokens
        .iter()
        .map(|&token| {
            let label = if token == 1 { "ROOT" } else { "LEFT" };
            Prediction::new(label, 0.5).with_distribution([(label, 0.5)])
        })
        .collect())
}

fn abstain(_: &Sentence, tokens: &[TokenIndex]) -> ClassifierResult {
    Ok(tokens.iter().map(|_| Prediction::new("__", 1.0)).collect())
}

fn scripted(
    streams: ClassifierStreams,
) -> (
    impl Fn(&Sentence, &[EdgeInstance]) -> ClassifierResult + Send + Sync,
    impl Fn(&Sentence, &[TokenIndex]) -> ClassifierResult + Send + Sync,
    impl Fn(&Sentence, &[TokenIndex]) -> ClassifierResult + Send + Sync,
) {
    let ClassifierStreams {
        edges,
        directions,
        roles,
    } = streams;
    (
        move |_: &Sentence, _: &[EdgeInstance]| -> ClassifierResult { Ok(edges.clone()) },
        move |_: &Sentence, _: &[TokenIndex]| -> ClassifierResult { Ok(directions.clone()) },
        move |_: &Sentence, _: &[TokenIndex]| -> ClassifierResult { Ok(roles.clone()) },
    )
}

#[test]
fn test_chain_sentence() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        chain_edges,
        chain_directions,
        abstain,
    ).unwrap();
    let outcome = parser
        .parse(&Sentence::from_forms(["the", "old", "man", "slept"]))
        .unwrap();

    assert_attachments(
        &outcome.tree,
        &[(0, "ROOT"), (1, "next"), (2, "next"), (3, "next")],
    );
    assert_close(outcome.score, 6.0);
    assert_close(outcome.analysis.total(), outcome.score);
    assert_eq!(outcome.analysis.unsupported_count(), 0);
}

#[test]
fn test_scripted_streams_reproduce_gold_tree() {
    let gold = [(2, "nsubj"), (0, "ROOT"), (4, "det"), (2, "obj")];
    let config = ParserConfig::default();
    let (edges, directions, roles) = scripted(ClassifierStreams::from_tree(
        &gold,
        config.max_span,
        &config.null_label,
    ));
    let parser = DependencyParser::new(config, edges, directions, roles).unwrap();

    let outcome = parser
        .parse(&Sentence::from_forms(["John", "saw", "a", "dog"]))
        .unwrap();
    assert_attachments(&outcome.tree, &gold);
    assert_projective(&outcome.tree);
}

#[test]
fn test_sequential_classifiers_match_parallel() {
    let sentence = Sentence::from_forms(["a", "b", "c", "d", "e"]);

    let parallel = DependencyParser::new(
        ParserConfig::default(),
        chain_edges,
        chain_directions,
        abstain,
    ).unwrap();
    let sequential = DependencyParser::new(
        ParserConfig::default().with_parallel_classifiers(false),
        chain_edges,
        chain_directions,
        abstain,
    ).unwrap();

    let a = parallel.parse(&sentence).unwrap();
    let b = sequential.parse(&sentence).unwrap();
    assert_eq!(a.tree, b.tree);
    assert_close(a.score, b.score);
}

#[test]
fn test_abstaining_classifiers_attach_everything_to_root() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        |_: &Sentence, instances: &[EdgeInstance]| -> ClassifierResult {
            Ok(instances.iter().map(|_| Prediction::new("__", 1.0)).collect())
        },
        abstain,
        abstain,
    ).unwrap();

    let outcome = parser.parse(&Sentence::from_forms(["x", "y", "z"])).unwrap();
    assert_attachments(&outcome.tree, &[(0, "ROOT"), (0, "ROOT"), (0, "ROOT")]);
    assert_close(outcome.score, 0.0);
}

#[test]
fn test_empty_sentence_is_rejected() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        chain_edges,
        chain_directions,
        abstain,
    ).unwrap();

    let err = parser.parse(&Sentence::default()).unwrap_err();
    assert_eq!(err, ParseError::EmptySentence);
    assert_eq!(err.stream(), None);
    assert_eq!(parser.statistics().sentences_failed, 1);
}

#[test]
fn test_classifier_failure_names_stream() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        chain_edges,
        chain_directions,
        |_: &Sentence, _: &[TokenIndex]| -> ClassifierResult {
            Err(ClassifierError::new("model unavailable"))
        },
    ).unwrap();

    let err = parser.parse(&Sentence::from_forms(["a", "b"])).unwrap_err();
    assert_eq!(
        err,
        ParseError::Classifier {
            stream: Stream::Role,
            source: ClassifierError::new("model unavailable"),
        }
    );
    assert_eq!(err.to_string(), "role classifier failed: model unavailable");
}

#[test]
fn test_short_stream_is_rejected() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        chain_edges,
        |_: &Sentence, tokens: &[TokenIndex]| -> ClassifierResult {
            Ok(tokens
                .iter()
                .skip(1)
                .map(|_| Prediction::new("LEFT", 1.0))
                .collect())
        },
        abstain,
    ).unwrap();

    let err = parser.parse(&Sentence::from_forms(["a", "b", "c"])).unwrap_err();
    assert_eq!(
        err,
        ParseError::Build(BuildError::StreamLength {
            stream: Stream::Direction,
            expected: 3,
            actual: 2,
        })
    );
    assert_eq!(err.stream(), Some(Stream::Direction));
}

#[test]
fn test_window_limits_edge_instances() {
    let seen = AtomicUsize::new(0);
    let config = ParserConfig::default().with_max_span(1).unwrap();
    let parser = DependencyParser::new(
        config,
        |sentence: &Sentence, instances: &[EdgeInstance]| -> ClassifierResult {
            seen.store(instances.len(), Ordering::Relaxed);
            chain_edges(sentence, instances)
        },
        chain_directions,
        abstain,
    ).unwrap();

    let outcome = parser
        .parse(&Sentence::from_forms(["a", "b", "c", "d", "e"]))
        .unwrap();
    // 5 root instances plus neighbours: 1 + 2 + 2 + 2 + 1
    assert_eq!(seen.load(Ordering::Relaxed), 13);
    assert_eq!(outcome.tree.heads(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_instances_are_distinct_tokens() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        |sentence: &Sentence, instances: &[EdgeInstance]| -> ClassifierResult {
            assert!(instances
                .iter()
                .all(|i| i.dependent() != i.head() && i.dependent() <= sentence.len()));
            chain_edges(sentence, instances)
        },
        |sentence: &Sentence, tokens: &[TokenIndex]| -> ClassifierResult {
            assert_eq!(tokens.len(), sentence.len());
            assert!(tokens.iter().all(|&t| sentence.token(t).is_some()));
            chain_directions(sentence, tokens)
        },
        abstain,
    ).unwrap();
    assert!(parser.parse(&Sentence::from_forms(["a", "b", "c"])).is_ok());
}

#[test]
fn test_relation_slot_from_config() {
    let config = ParserConfig::default().with_relation_slot(RelationSlot::Dependent);
    let parser = DependencyParser::new(config, chain_edges, chain_directions, abstain).unwrap();
    assert_eq!(parser.config().relation_slot, RelationSlot::Dependent);
    assert!(parser.parse(&Sentence::from_forms(["a"])).is_ok());
}

#[test]
fn test_statistics_accumulate() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        chain_edges,
        chain_directions,
        abstain,
    ).unwrap();
    parser.parse(&Sentence::from_forms(["a", "b", "c"])).unwrap();
    parser.parse(&Sentence::from_forms(["a", "b"])).unwrap();
    let _ = parser.parse(&Sentence::default());

    let stats = parser.statistics();
    assert_eq!(stats.sentences_parsed, 2);
    assert_eq!(stats.sentences_failed, 1);
    assert_eq!(stats.tokens, 5);
    // per token: one dependency and one direction fact
    assert_eq!(stats.facts, 10);
    assert_eq!(stats.unsupported_arcs, 0);

    parser.reset_statistics();
    assert_eq!(parser.statistics().sentences(), 0);
}

#[test]
fn test_constructor_rejects_span_above_ceiling() {
    let config = ParserConfig {
        max_span: 51,
        ..ParserConfig::default()
    };
    let err = DependencyParser::new(config, chain_edges, chain_directions, abstain).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MaxSpanTooLarge {
            max_span: 51,
            ceiling: 50
        }
    ));

    let config = ParserConfig {
        max_span: 50,
        ..ParserConfig::default()
    };
    assert!(DependencyParser::new(config, chain_edges, chain_directions, abstain).is_ok());
}

#[test]
fn test_constructor_rejects_invalid_fields() {
    let config = ParserConfig {
        null_label: String::new(),
        ..ParserConfig::default()
    };
    assert!(matches!(
        DependencyParser::new(config, chain_edges, chain_directions, abstain),
        Err(ConfigError::Invalid(_))
    ));

    let config = ParserConfig::default().with_thread_count(ThreadCount::Count(0));
    assert!(matches!(
        DependencyParser::new(config, chain_edges, chain_directions, abstain),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_bare_root_arcs_are_not_unsupported() {
    let parser = DependencyParser::new(
        ParserConfig::default(),
        |_: &Sentence, instances: &[EdgeInstance]| -> ClassifierResult {
            Ok(instances.iter().map(|_| Prediction::new("__", 1.0)).collect())
        },
        abstain,
        abstain,
    )
    .unwrap();

    let outcome = parser.parse(&Sentence::from_forms(["x", "y"])).unwrap();
    assert_eq!(outcome.analysis.unsupported_count(), 0);
    assert_eq!(parser.statistics().unsupported_arcs, 0);
}

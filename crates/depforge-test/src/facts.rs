//! Fact-set fixtures.
//!
//! # Example
//!
//! ```
//! use depforge_test::facts::{random_fact_set, RandomFacts};
//!
//! let a = random_fact_set(7, &RandomFacts::new(6));
//! let b = random_fact_set(7, &RandomFacts::new(6));
//! assert_eq!(a, b);
//! ```

use depforge_core::{Constraint, Direction, FactSet, TokenIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LABELS: [&str; 5] = ["nsubj", "obj", "det", "amod", "advmod"];

/// One token with a labelled root fact and a root direction fact.
pub fn single_token_facts() -> FactSet {
    build(
        1,
        [
            Constraint::dependency(1, 0, "ROOT", 1.0),
            Constraint::direction(1, Direction::Root, 1.0),
        ],
    )
}

/// Token 1 is the root, token 2 its `obj` dependent.
pub fn two_token_facts() -> FactSet {
    build(
        2,
        [
            Constraint::dependency(1, 0, "ROOT", 1.0),
            Constraint::dependency(2, 1, "obj", 1.0),
            Constraint::direction(1, Direction::Root, 0.5),
            Constraint::direction(2, Direction::Right, 0.5),
        ],
    )
}

/// Token 2 heads both token 1 and token 3, and carries one incoming-relation
/// fact matching both arcs' labels.
///
/// With head-indexed relation lookup both arcs can match the same fact.
pub fn shared_relation_facts() -> FactSet {
    build(
        3,
        [
            Constraint::dependency(2, 0, "ROOT", 1.0),
            Constraint::dependency(1, 2, "dep", 0.5),
            Constraint::dependency(3, 2, "dep", 0.5),
            Constraint::incoming_relation(2, "dep", 2.0),
        ],
    )
}

/// Chain where every token attaches to its left neighbour.
pub fn chain_facts(sentence_length: usize) -> FactSet {
    let mut facts = Vec::new();
    if sentence_length > 0 {
        facts.push(Constraint::dependency(1, 0, "ROOT", 1.0));
        facts.push(Constraint::direction(1, Direction::Root, 1.0));
    }
    for dependent in 2..=sentence_length {
        facts.push(Constraint::dependency(dependent, dependent - 1, "next", 1.0));
        facts.push(Constraint::direction(dependent, Direction::Left, 0.5));
    }
    build(sentence_length, facts)
}

/// Shape of a seeded random fact set.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomFacts {
    /// Number of tokens.
    pub sentence_length: usize,
    /// Largest head distance of generated dependency facts.
    pub max_span: usize,
    /// Probability that a candidate pair receives a dependency fact.
    pub density: f64,
    /// Generate incoming-relation facts.
    pub relations: bool,
}

impl RandomFacts {
    /// Dense facts over every pair, with relations.
    pub fn new(sentence_length: usize) -> Self {
        Self {
            sentence_length,
            max_span: sentence_length,
            density: 0.5,
            relations: true,
        }
    }

    pub fn with_max_span(mut self, max_span: usize) -> Self {
        self.max_span = max_span;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn without_relations(mut self) -> Self {
        self.relations = false;
        self
    }
}

/// Generates a reproducible fact set.
///
/// Pairs are visited in a fixed order and one draw decides each pair, so for
/// the same seed a wider `max_span` only adds dependency facts; all facts
/// shared with the narrower window keep their weights.
pub fn random_fact_set(seed: u64, shape: &RandomFacts) -> FactSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = shape.sentence_length;
    let mut facts = Vec::new();

    for dependent in 1..=n {
        if rng.random_bool(0.3) {
            facts.push(Constraint::dependency(
                dependent,
                0,
                "ROOT",
                rng.random::<f64>(),
            ));
        }
        facts.push(Constraint::direction(
            dependent,
            random_direction(&mut rng),
            rng.random::<f64>(),
        ));
        if shape.relations {
            facts.push(Constraint::incoming_relation(
                dependent,
                random_label(&mut rng),
                rng.random::<f64>(),
            ));
        }
    }

    for dependent in 1..=n {
        for head in 1..=n {
            if head == dependent {
                continue;
            }
            let keep = rng.random_bool(shape.density);
            let label = random_label(&mut rng);
            let weight = rng.random::<f64>();
            if keep && head.abs_diff(dependent) <= shape.max_span {
                facts.push(Constraint::dependency(dependent, head, label, weight));
            }
        }
    }

    build(n, facts)
}

fn random_direction(rng: &mut ChaCha8Rng) -> Direction {
    match rng.random_range(0..3) {
        0 => Direction::Root,
        1 => Direction::Left,
        _ => Direction::Right,
    }
}

fn random_label(rng: &mut ChaCha8Rng) -> &'static str {
    LABELS[rng.random_range(0..LABELS.len())]
}

fn build(sentence_length: TokenIndex, facts: impl IntoIterator<Item = Constraint>) -> FactSet {
    FactSet::from_facts(sentence_length, facts).expect("fixture facts are valid")
}

//! Parse statistics collection.
//!
//! Counters are atomics so batch workers record concurrently without
//! locking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Snapshot of the work done by a parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStatistics {
    /// Sentences parsed successfully.
    pub sentences_parsed: u64,
    /// Sentences rejected with an error.
    pub sentences_failed: u64,
    /// Tokens in successfully parsed sentences.
    pub tokens: u64,
    /// Facts built for successfully parsed sentences.
    pub facts: u64,
    /// Arcs no fact backed.
    pub unsupported_arcs: u64,
    /// Time spent parsing, summed over sentences.
    pub parse_duration: Duration,
}

impl ParseStatistics {
    /// Returns the number of sentences seen.
    pub fn sentences(&self) -> u64 {
        self.sentences_parsed + self.sentences_failed
    }

    /// Returns the mean number of facts per parsed sentence.
    pub fn facts_per_sentence(&self) -> f64 {
        if self.sentences_parsed == 0 {
            0.0
        } else {
            self.facts as f64 / self.sentences_parsed as f64
        }
    }

    /// Returns parsed tokens per second of parse time.
    pub fn tokens_per_second(&self) -> f64 {
        let secs = self.parse_duration.as_secs_f64();
        if secs > 0.0 {
            self.tokens as f64 / secs
        } else {
            0.0
        }
    }
}

/// Thread-safe collector for parse statistics.
#[derive(Debug, Default)]
pub struct StatisticsCollector {
    sentences_parsed: AtomicU64,
    sentences_failed: AtomicU64,
    tokens: AtomicU64,
    facts: AtomicU64,
    unsupported_arcs: AtomicU64,
    parse_nanos: AtomicU64,
}

impl StatisticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successfully parsed sentence.
    pub fn record_parsed(&self, tokens: usize, facts: usize, unsupported: usize, duration: Duration) {
        self.sentences_parsed.fetch_add(1, Ordering::Relaxed);
        self.tokens.fetch_add(tokens as u64, Ordering::Relaxed);
        self.facts.fetch_add(facts as u64, Ordering::Relaxed);
        self.unsupported_arcs
            .fetch_add(unsupported as u64, Ordering::Relaxed);
        self.parse_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Records a rejected sentence.
    pub fn record_failed(&self) {
        self.sentences_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current counts.
    pub fn snapshot(&self) -> ParseStatistics {
        ParseStatistics {
            sentences_parsed: self.sentences_parsed.load(Ordering::Relaxed),
            sentences_failed: self.sentences_failed.load(Ordering::Relaxed),
            tokens: self.tokens.load(Ordering::Relaxed),
            facts: self.facts.load(Ordering::Relaxed),
            unsupported_arcs: self.unsupported_arcs.load(Ordering::Relaxed),
            parse_duration: Duration::from_nanos(self.parse_nanos.load(Ordering::Relaxed)),
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        for counter in [
            &self.sentences_parsed,
            &self.sentences_failed,
            &self.tokens,
            &self.facts,
            &self.unsupported_arcs,
            &self.parse_nanos,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

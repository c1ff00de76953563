//! Batch parsing.
//!
//! Sentences are independent; a batch is parsed on the thread pool selected
//! by [`ThreadCount`] and a failing sentence never stops the others.

use std::time::{Duration, Instant};

use depforge_config::ThreadCount;
use depforge_constraints::EdgeInstance;
use depforge_core::TokenIndex;
use depforge_parser::ParseOutcome;
use rayon::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::classifier::Classifier;
use crate::error::ParseError;
use crate::pipeline::DependencyParser;
use crate::sentence::Sentence;

/// The result for the sentence at a batch position.
pub type SentenceResult = (usize, Result<ParseOutcome, ParseError>);

/// Totals of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub sentences: usize,
    pub parsed: usize,
    pub failed: usize,
    /// Tokens in the parsed sentences.
    pub tokens: usize,
    pub duration: Duration,
}

impl<E, D, R> DependencyParser<E, D, R>
where
    E: Classifier<EdgeInstance>,
    D: Classifier<TokenIndex>,
    R: Classifier<TokenIndex>,
{
    /// Parses a batch of sentences, one result per sentence in input order.
    pub fn parse_batch(&self, sentences: &[Sentence]) -> Vec<Result<ParseOutcome, ParseError>> {
        let start = Instant::now();
        info!(event = "batch_start", sentences = sentences.len());

        let results = self.map_sentences(sentences, |index, sentence| {
            let result = self.parse(sentence);
            if let Err(e) = &result {
                warn!(event = "sentence_failed", index = index, error = %e);
            }
            result
        });

        let summary = summarize(sentences, &results, start.elapsed());
        log_summary(&summary);
        results
    }

    /// Parses a batch, streaming each result to `sender` as it completes.
    ///
    /// Results may arrive out of input order; each carries its sentence's
    /// position. A dropped receiver does not stop the batch.
    pub fn parse_with_channel(
        &self,
        sentences: &[Sentence],
        sender: mpsc::UnboundedSender<SentenceResult>,
    ) -> BatchSummary {
        let start = Instant::now();
        info!(event = "batch_start", sentences = sentences.len());

        let results = self.map_sentences(sentences, |index, sentence| {
            let result = self.parse(sentence);
            let tokens = match &result {
                Ok(_) => Some(sentence.len()),
                Err(e) => {
                    warn!(event = "sentence_failed", index = index, error = %e);
                    None
                }
            };
            let _ = sender.send((index, result));
            tokens
        });

        let mut summary = BatchSummary {
            sentences: sentences.len(),
            duration: start.elapsed(),
            ..BatchSummary::default()
        };
        for tokens in results {
            match tokens {
                Some(tokens) => {
                    summary.parsed += 1;
                    summary.tokens += tokens;
                }
                None => summary.failed += 1,
            }
        }
        log_summary(&summary);
        summary
    }

    fn map_sentences<T, F>(&self, sentences: &[Sentence], work: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize, &Sentence) -> T + Send + Sync,
    {
        let parallel = || -> Vec<T> {
            sentences
                .par_iter()
                .enumerate()
                .map(|(index, sentence)| work(index, sentence))
                .collect()
        };

        match self.config().thread_count {
            ThreadCount::None => sentences
                .iter()
                .enumerate()
                .map(|(index, sentence)| work(index, sentence))
                .collect(),
            ThreadCount::Auto => parallel(),
            ThreadCount::Count(threads) => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => pool.install(parallel),
                    Err(e) => {
                        warn!(event = "thread_pool_fallback", threads = threads, error = %e);
                        parallel()
                    }
                }
            }
        }
    }
}

fn summarize(
    sentences: &[Sentence],
    results: &[Result<ParseOutcome, ParseError>],
    duration: Duration,
) -> BatchSummary {
    let mut summary = BatchSummary {
        sentences: sentences.len(),
        duration,
        ..BatchSummary::default()
    };
    for (sentence, result) in sentences.iter().zip(results) {
        if result.is_ok() {
            summary.parsed += 1;
            summary.tokens += sentence.len();
        } else {
            summary.failed += 1;
        }
    }
    summary
}

fn log_summary(summary: &BatchSummary) {
    info!(
        event = "batch_end",
        sentences = summary.sentences,
        parsed = summary.parsed,
        failed = summary.failed,
        tokens = summary.tokens,
        duration_ms = summary.duration.as_millis() as u64,
    );
}

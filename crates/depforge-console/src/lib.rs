//! Colorful console output for parse events.
//!
//! Provides a `tracing` layer that formats depforge batch and sentence events
//! with colors. Initialized by the parser when the `console` feature of the
//! `depforge` crate is enabled.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

#[cfg(feature = "verbose-logging")]
const DEFAULT_DIRECTIVE: &str = "depforge=debug";
#[cfg(not(feature = "verbose-logging"))]
const DEFAULT_DIRECTIVE: &str = "depforge=info";

/// Initializes the console output.
///
/// Safe to call multiple times; only the first call has effect. Does
/// nothing further if another global subscriber is already installed.
/// `RUST_LOG` overrides the default `depforge` level.
pub fn init() {
    INIT.get_or_init(|| {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

        let _ = tracing_subscriber::registry()
            .with(env_filter(&env))
            .with(ParseConsoleLayer)
            .try_init();
    });
}

// The default directive applies only when `env` holds no valid directive.
fn env_filter(env: &str) -> EnvFilter {
    let default: Directive = DEFAULT_DIRECTIVE
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    EnvFilter::builder()
        .with_default_directive(default)
        .parse_lossy(env)
}

/// A tracing layer that formats depforge events with colors.
pub struct ParseConsoleLayer;

impl<S: Subscriber> Layer<S> for ParseConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("depforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_parse_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    error: Option<String>,
    index: Option<u64>,
    sentences: Option<u64>,
    parsed: Option<u64>,
    failed: Option<u64>,
    tokens: Option<u64>,
    facts: Option<u64>,
    unsupported: Option<u64>,
    threads: Option<u64>,
    duration_ms: Option<u64>,
    duration_us: Option<u64>,
    score: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "index" => self.index = Some(value),
            "sentences" => self.sentences = Some(value),
            "parsed" => self.parsed = Some(value),
            "failed" => self.failed = Some(value),
            "tokens" => self.tokens = Some(value),
            "facts" => self.facts = Some(value),
            "unsupported" => self.unsupported = Some(value),
            "threads" => self.threads = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "duration_us" => self.duration_us = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "score" {
            self.score = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_parse_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "batch_start" => format_batch_start(v),
        "batch_end" => format_batch_end(v),
        "sentence_failed" => format_sentence_failed(v),
        "sentence_parsed" => format_sentence_parsed(v),
        "thread_pool_fallback" => format_thread_pool_fallback(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_batch_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Parsing {} sentences",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Batch]".bright_cyan(),
        count(v.sentences).bright_yellow(),
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    let failed = v.failed.unwrap_or(0);
    let failed_str = if failed > 0 {
        count(v.failed).bright_red().to_string()
    } else {
        count(v.failed).white().to_string()
    };

    format!(
        "{} {} {} Batch ended: time spent ({}), sentences ({}), parsed ({}), failed ({}), tokens ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Batch]".bright_cyan(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.sentences).white(),
        count(v.parsed).bright_green(),
        failed_str,
        count(v.tokens).bright_magenta().bold(),
    )
}

fn format_sentence_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Sentence {} rejected: {}",
        timestamp().bright_black(),
        "WARN".yellow(),
        "[Batch]".bright_cyan(),
        count(v.index).white().bold(),
        v.error.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_sentence_parsed(v: &EventVisitor) -> String {
    let unsupported = v.unsupported.unwrap_or(0);
    let unsupported_str = if unsupported > 0 {
        count(v.unsupported).yellow().to_string()
    } else {
        count(v.unsupported).white().to_string()
    };

    format!(
        "    {} {:>4} tokens | {:>6} facts | score {} | unsupported {} | {}us",
        "->".bright_blue(),
        count(v.tokens).white(),
        count(v.facts).white(),
        format!("{:.3}", v.score.unwrap_or(0.0)).bright_green(),
        unsupported_str,
        count(v.duration_us),
    )
}

fn format_thread_pool_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Could not build a pool of {} threads, using the global pool: {}",
        timestamp().bright_black(),
        "WARN".yellow(),
        "[Batch]".bright_cyan(),
        count(v.threads).white(),
        v.error.as_deref().unwrap_or("unknown error"),
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(event: &str) -> EventVisitor {
        EventVisitor {
            event: Some(event.to_string()),
            ..EventVisitor::default()
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_batch_end_reports_counts() {
        let v = EventVisitor {
            sentences: Some(1200),
            parsed: Some(1199),
            failed: Some(1),
            tokens: Some(25_000),
            duration_ms: Some(340),
            ..visitor("batch_end")
        };
        let output = format_parse_event(&v);
        assert!(output.contains("Batch ended"));
        assert!(output.contains("1,200"));
        assert!(output.contains("1,199"));
        assert!(output.contains("25,000"));
        assert!(output.contains("340ms"));
    }

    #[test]
    fn test_sentence_failed_shows_error() {
        let v = EventVisitor {
            index: Some(7),
            error: Some("cannot parse an empty sentence".to_string()),
            ..visitor("sentence_failed")
        };
        let output = format_parse_event(&v);
        assert!(output.contains("WARN"));
        assert!(output.contains("cannot parse an empty sentence"));
    }

    #[test]
    fn test_sentence_parsed_shows_score() {
        let v = EventVisitor {
            tokens: Some(12),
            facts: Some(48),
            score: Some(7.25),
            ..visitor("sentence_parsed")
        };
        assert!(format_parse_event(&v).contains("7.250"));
    }

    #[test]
    fn test_unknown_events_are_silent() {
        assert!(format_parse_event(&visitor("constraints_built")).is_empty());
        assert!(format_parse_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 9);
        assert_eq!(ts.as_bytes()[5], b'.');
    }

    #[cfg(not(feature = "verbose-logging"))]
    #[test]
    fn test_env_filter_defaults_to_info() {
        assert_eq!(env_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[cfg(not(feature = "verbose-logging"))]
    #[test]
    fn test_env_directive_raises_depforge_level() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        struct CountingLayer(Arc<AtomicUsize>);

        impl<S: Subscriber> Layer<S> for CountingLayer {
            fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }

        let seen = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry()
            .with(env_filter("depforge=debug"))
            .with(CountingLayer(Arc::clone(&seen)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "depforge::pipeline", event = "sentence_parsed");
            tracing::trace!(target: "depforge::pipeline", event = "arc");
        });
        assert_eq!(seen.load(Ordering::Relaxed), 1);

        let seen = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry()
            .with(env_filter(""))
            .with(CountingLayer(Arc::clone(&seen)));
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "depforge::pipeline", event = "sentence_parsed");
            tracing::info!(target: "depforge::batch", event = "batch_start");
        });
        assert_eq!(seen.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!(event = "batch_start", sentences = 1u64);
    }
}

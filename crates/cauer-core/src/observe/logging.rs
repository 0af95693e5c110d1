//! # Subscriber Setup
//!
//! Installs a `tracing` subscriber that renders the pipeline's `design` spans
//! and stage events as compact lines, multi-line pretty output, or JSON
//! records for batch runs.
//!
//! Filtering, in order of precedence:
//!
//! 1. `LogConfig::filter` directives (e.g. `"cauer_core::design=debug"`)
//! 2. `RUST_LOG`, when no directives are configured
//! 3. `LogConfig::level`
//!
//! ```rust,ignore
//! use cauer_core::observe::{init_logging, LogConfig};
//!
//! // Per-stage events for every filter in the run
//! init_logging(&LogConfig::stages());
//! ```

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Minimum severity shown when no directives apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    /// Stage-by-stage design events
    Debug,
    /// One summary line per design
    #[default]
    Info,
    /// Failed designs only
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// How events are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    Pretty,
    /// One line per event
    #[default]
    Compact,
}

/// Subscriber settings, usually read from the `logging` section of a
/// [`DesignConfig`](crate::config::DesignConfig).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Print `file:line` of each event
    pub source_location: bool,
    pub thread_ids: bool,
    /// Emit an event when each `design` span opens and closes
    pub span_events: bool,
    /// `EnvFilter` directives, taking precedence over `level`
    pub filter: Option<String>,
}

impl LogConfig {
    /// Every pipeline stage, pretty printed, with span timings.
    pub fn stages() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            span_events: true,
            ..Default::default()
        }
    }

    /// JSON summaries for parallel batch runs.
    pub fn batch() -> Self {
        Self {
            format: LogFormat::Json,
            thread_ids: true,
            ..Default::default()
        }
    }

    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            ..Default::default()
        }
    }
}

/// Event filter for `config`.
///
/// Configured directives that fail to parse are ignored in favour of the
/// level, as is an unparsable `RUST_LOG`.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    let level = LevelFilter::from(config.level);
    let builder = EnvFilter::builder().with_default_directive(level.into());
    let parsed = match config.filter.as_deref() {
        Some(directives) => builder.parse(directives).ok(),
        None => builder.try_from_env().ok(),
    };
    parsed.unwrap_or_else(|| EnvFilter::new(level.to_string()))
}

/// Install the global subscriber.
///
/// Only the first call in a process takes effect; later calls, or a
/// subscriber installed by the host application, leave it unchanged.
pub fn init_logging(config: &LogConfig) {
    let spans = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let layer = fmt::layer()
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_ids(config.thread_ids)
        .with_span_events(spans);
    let registry = tracing_subscriber::registry().with(build_filter(config));

    let installed = match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

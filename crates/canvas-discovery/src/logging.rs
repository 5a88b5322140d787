//! Tracing subscriber setup
//!
//! The base level comes from `RUST_LOG` or `daemon.log_level`. While
//! verbose logging is on, `debug` events pass as well.

use canvas_core::Verbosity;
use tracing::{Level, Subscriber};
use tracing_subscriber::filter::{EnvFilter, FilterExt, dynamic_filter_fn};
use tracing_subscriber::layer::{Filter, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, fmt};

use crate::config::{DaemonConfig, LogFormat};

/// Install the global subscriber
///
/// # Errors
/// Returns error if a global subscriber is already set or the level is invalid
pub fn init(config: &DaemonConfig, verbosity: Verbosity) -> eyre::Result<()> {
    let base = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .map_err(|e| eyre::eyre!("invalid log level {:?}: {e}", config.log_level))?,
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.log_format {
        LogFormat::Text => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(verbosity_filter(base, verbosity)))
        .try_init()
        .map_err(|e| eyre::eyre!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// `base`, widened to `debug` while `verbosity` is on
///
/// The verbose half is evaluated per event, so toggling takes effect for
/// callsites that have already fired.
fn verbosity_filter<S>(base: EnvFilter, verbosity: Verbosity) -> impl Filter<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let verbose = dynamic_filter_fn(move |meta, _cx| verbose_allows(&verbosity, meta.level()));
    base.or(verbose)
}

/// Whether the verbose switch alone lets an event at `level` through
fn verbose_allows(verbosity: &Verbosity, level: &Level) -> bool {
    verbosity.is_verbose() && *level <= Level::DEBUG
}

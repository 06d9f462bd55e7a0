use std::fmt;

use colored::*;
use netsweep_common::config::Config;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_subscriber::filter::{EnvFilter, filter_fn};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// Events on this target are program output, written to stdout without decoration.
pub const PRINT_TARGET: &str = "netsweep::print";
pub const RAW_FIELD: &str = "raw_msg";

pub struct NetsweepFormatter;

impl<S, N> FormatEvent<S, N> for NetsweepFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0);
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(String);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == RAW_FIELD {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == RAW_FIELD {
            self.0 = format!("{value:?}");
        }
    }
}

fn default_level(cfg: &Config) -> &'static str {
    if cfg.quiet > 0 {
        return "error";
    }
    match cfg.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// Program output goes to stdout, log lines to stderr; both are routed through the
/// progress-bar layer so they print above any active bar. `RUST_LOG` replaces the
/// level chosen by `-q`/`-v`.
pub fn init_logging(cfg: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(cfg)))
        .add_directive(format!("{PRINT_TARGET}=info").parse()?);

    let indicatif_layer = IndicatifLayer::new();

    let output_layer = tracing_subscriber::fmt::layer()
        .event_format(NetsweepFormatter)
        .with_writer(indicatif_layer.get_stdout_writer())
        .with_filter(filter_fn(|meta| meta.target() == PRINT_TARGET));

    let log_layer = tracing_subscriber::fmt::layer()
        .event_format(NetsweepFormatter)
        .with_writer(indicatif_layer.get_stderr_writer())
        .with_filter(filter_fn(|meta| meta.target() != PRINT_TARGET));

    tracing_subscriber::registry()
        .with(filter)
        .with(output_layer)
        .with(log_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .try_init()?;

    Ok(())
}

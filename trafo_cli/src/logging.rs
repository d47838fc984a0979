//! Subscriber setup for a design run.
//!
//! Two `fmt` layers share one `EnvFilter` (`RUST_LOG`, default `info`):
//! - console: `> message`, no timestamp, level shown only for warnings
//! - file: timestamped, no ANSI, every structured field, appended to the
//!   locked run log

use std::fmt;
use std::fs::File;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the console + file subscriber.
///
/// `log_file` should be a handle on the locked run log; the subscriber
/// keeps it for the rest of the process.
pub fn init(log_file: File) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let console = tracing_fmt::layer().event_format(ConsoleFormat);

    let file = tracing_fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| e.to_string())
}

/// Console-only subscriber for commands that do not touch the run log.
pub fn init_console() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().event_format(ConsoleFormat))
        .try_init()
        .map_err(|e| e.to_string())
}

/// Prints only the event message, prefixed with `> `.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, _ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let mut message = MessageVisitor::default();
        event.record(&mut message);

        write!(writer, "> ")?;
        let level = *event.metadata().level();
        if level <= Level::WARN {
            write!(writer, "{}: ", level)?;
        }
        writeln!(writer, "{}", message.0)
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{:?}", value);
        }
    }
}

//! Logging system for wordforge.
//!
//! Diagnostics go through `tracing`. The binary installs one subscriber at
//! startup that writes to stderr, marking each line with its level:
//! `[~]` debug, `[+]` info, `[!]` warning, `[x]` error.

use colored::{ColoredString, Colorize};
use std::fmt;
use std::io::IsTerminal;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;
use wordforge_types::{LogLevel, Result, WordlistError};

/// Initialize the logging system at `level`.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
pub fn init(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .event_format(MarkerFormat)
        .try_init()
        .map_err(|e| WordlistError::Other(format!("Failed to initialize logging: {}", e)))
}

/// Filter directives for `level`, keeping HTTP internals quiet.
pub fn directives(level: LogLevel) -> String {
    match level {
        LogLevel::Debug | LogLevel::Trace => format!(
            "{},hyper=warn,reqwest=warn,rustls=warn",
            level.directive()
        ),
        _ => level.directive().to_string(),
    }
}

/// Event formatter writing `<marker> <message>` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerFormat;

impl<S, N> FormatEvent<S, N> for MarkerFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            write!(writer, "{} ", colored_marker(level))?;
        } else {
            write!(writer, "{} ", marker(level))?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Plain marker for a level.
pub fn marker(level: Level) -> &'static str {
    match level {
        Level::TRACE | Level::DEBUG => "[~]",
        Level::INFO => "[+]",
        Level::WARN => "[!]",
        _ => "[x]",
    }
}

fn colored_marker(level: Level) -> ColoredString {
    let text = marker(level);
    match level {
        Level::TRACE | Level::DEBUG => text.white().bold(),
        Level::INFO => text.green().bold(),
        Level::WARN => text.yellow().bold(),
        _ => text.red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(marker(Level::INFO), "[+]");
        assert_eq!(marker(Level::WARN), "[!]");
        assert_eq!(marker(Level::ERROR), "[x]");
        assert_eq!(marker(Level::DEBUG), "[~]");
    }

    #[test]
    fn test_directives() {
        assert_eq!(directives(LogLevel::Info), "info");
        assert_eq!(directives(LogLevel::None), "off");
        assert!(directives(LogLevel::Debug).starts_with("debug,"));
    }
}

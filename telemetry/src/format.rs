//! Colored one-line event format for development terminals.

use colored::*;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_subscriber::{
    field::RecordFields,
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, FormattedFields},
    registry::LookupSpan,
};

/// `12:00:01.123 [ INFO] adapter  append_row{supplier=Acme}: message key=value`
pub struct ColoredFormatter;

impl<S, N> FormatEvent<S, N> for ColoredFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        write!(
            writer,
            "{} ",
            chrono::Utc::now().format("%H:%M:%S%.3f").to_string().bright_black()
        )?;

        let level = match *metadata.level() {
            Level::TRACE => "TRACE".bright_purple(),
            Level::DEBUG => "DEBUG".bright_blue(),
            Level::INFO => " INFO".bright_green(),
            Level::WARN => " WARN".bright_yellow(),
            Level::ERROR => "ERROR".bright_red(),
        };
        write!(writer, "[{}] ", level)?;

        if let Some(target) = metadata.target().split("::").last() {
            write!(writer, "{:<10} ", target.bright_cyan())?;
        }

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}", span.name().bright_magenta())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, "{} ", ":".bright_black())?;
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;

        if *metadata.level() >= Level::DEBUG {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                let file = file.rsplit('/').next().unwrap_or(file);
                write!(writer, " {}", format!("({}:{})", file, line).bright_black())?;
            }
        }

        writeln!(writer)
    }
}

/// Writes the message in bold and other fields as `key=value`.
pub struct ColoredFieldFormatter;

impl<'writer> FormatFields<'writer> for ColoredFieldFormatter {
    fn format_fields<R: RecordFields>(
        &self,
        writer: Writer<'writer>,
        fields: R,
    ) -> std::fmt::Result {
        let mut visitor = ColoredFieldVisitor {
            writer,
            is_first: true,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }
}

struct ColoredFieldVisitor<'a> {
    writer: Writer<'a>,
    is_first: bool,
    result: std::fmt::Result,
}

impl ColoredFieldVisitor<'_> {
    fn write_field(&mut self, field: &Field, value: &str) {
        if self.result.is_err() {
            return;
        }

        self.result = if field.name() == "message" {
            write!(self.writer, "{}", value.white().bold())
        } else {
            write!(
                self.writer,
                "{}{}={}",
                if self.is_first { "" } else { " " },
                field.name().bright_yellow(),
                value.bright_white()
            )
        };
        self.is_first = false;
    }
}

impl Visit for ColoredFieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.write_field(field, &format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.write_field(field, value);
    }
}

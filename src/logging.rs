//! Tracing layer that renders events as single lines for a browser console.
//!
//! The native CLI uses `tracing_subscriber::fmt`. In the browser there is no
//! stdout, so [`ConsoleLayer`] formats each event itself and hands the line
//! to a [`ConsoleSink`] together with its level, letting the sink pick
//! `console.error`, `console.warn` and so on.

use std::fmt::Write as FmtWrite;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Where formatted lines go.
pub trait ConsoleSink: 'static {
    fn write(&self, level: Level, line: &str);
}

pub struct ConsoleLayer<K> {
    sink: K,
}

impl<K: ConsoleSink> ConsoleLayer<K> {
    pub fn new(sink: K) -> Self {
        Self { sink }
    }
}

impl<S, K> Layer<S> for ConsoleLayer<K>
where
    S: Subscriber,
    K: ConsoleSink,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let line = visitor.finish(metadata.target());
        self.sink.write(*metadata.level(), &line);
    }
}

/// Collects the message and `key=value` pairs of one event.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self, target: &str) -> String {
        let mut line = format!("{target}: {}", self.message);
        if !self.fields.is_empty() {
            line.push_str(&self.fields);
        }
        line
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

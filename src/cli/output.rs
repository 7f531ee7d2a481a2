//! User-facing output for the CLI: sinks, recursive result rendering, and
//! colored status lines.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::atoms::OutputSink;
use crate::runtime::value::Value;

/// Writes `print` output straight to stdout.
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Collects `print` output into a string, for tests and programmatic use.
#[derive(Default)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> OutputBuffer {
        OutputBuffer::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// Renders a result value recursively: sequences bracketed with one
/// element per line and indented, scalars inline.
pub fn render_value(value: &Value) -> String {
    let mut out = String::new();
    render_into(&mut out, value, 0);
    out
}

fn render_into(out: &mut String, value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::List(items) => {
            out.push_str(&pad);
            out.push_str("[\n");
            for item in items {
                render_into(out, item, indent + 1);
            }
            out.push_str(&pad);
            out.push_str("]\n");
        }
        scalar => {
            out.push_str(&pad);
            out.push_str(&scalar.to_string());
            out.push('\n');
        }
    }
}

/// Prints a bold green status line, for `check` success.
pub fn print_ok(message: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
    let _ = writeln!(stdout, "{}", message);
    let _ = stdout.reset();
}

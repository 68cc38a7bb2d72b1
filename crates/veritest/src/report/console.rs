use std::io::{self, Write};
use std::time::Duration;

use super::Reporter;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Renders events as colored lines, one suite block at a time.
///
/// Write failures never abort a run; they are ignored.
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
    color: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            color: true,
        }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, color: true }
    }

    /// Same output without ANSI escapes, for dumb terminals and log files.
    pub fn plain(out: W) -> Self {
        Self { out, color: false }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl<W: Write + Send> Reporter for ConsoleReporter<W> {
    fn suite_started(&mut self, name: &str) {
        let _ = writeln!(self.out, "{name}");
    }

    fn test_passed(&mut self, message: &str) {
        let tick = self.paint(GREEN, "✓ passed");
        let _ = writeln!(self.out, "    {tick} {message}");
    }

    fn test_failed(&mut self, message: &str, _error: &anyhow::Error) {
        let cross = self.paint(RED, "✗ failed");
        let _ = writeln!(self.out, "    {cross} {message}");
    }

    fn suite_separator(&mut self) {
        let _ = writeln!(self.out);
    }

    fn failure_detail(&mut self, suite_name: &str, test_message: &str, error: &anyhow::Error) {
        let head = self.paint(RED, &format!("{suite_name}: {test_message}"));
        let _ = writeln!(self.out, "{head}");
        let _ = writeln!(self.out, "{error:?}");
        let _ = writeln!(self.out);
    }

    fn summary(&mut self, passed: usize, failed: usize, elapsed: Duration) {
        let passed = self.paint(GREEN, &passed.to_string());
        let failed = self.paint(RED, &failed.to_string());
        let time = self.paint(YELLOW, &format!("{:.3}s", elapsed.as_secs_f64()));
        let _ = writeln!(self.out, "passed: {passed}");
        let _ = writeln!(self.out, "failed: {failed}");
        let _ = writeln!(self.out, "time: {time}");
        let _ = self.out.flush();
    }
}

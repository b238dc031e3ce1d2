//! Determinate progress bar
//!
//! On a terminal the bar is redrawn in place on every update:
//!
//! ```text
//! [███████████████░░░░░░░░░░░░░░░] 50/100 (12s) Uploading
//! ```
//!
//! Elsewhere a plain line is written each time progress crosses a
//! 10% boundary, plus exactly one line on completion.

use std::fmt;
use std::time::Instant;

use termkit_core::format_duration;

use crate::stream::{self, CLEAR_LINE, Output, TermStream};

/// Default bar width in cells
pub const DEFAULT_WIDTH: usize = 30;

/// Default glyph for completed cells
pub const DEFAULT_COMPLETE: &str = "█";

/// Default glyph for remaining cells
pub const DEFAULT_INCOMPLETE: &str = "░";

/// Percentage points between plain-text progress lines
const LOG_STEP: i64 = 10;

/// Whole percent complete, rounded down; a zero total counts as done
pub fn percent(current: u64, total: u64) -> u64 {
    if total == 0 {
        return 100;
    }
    (u128::from(current.min(total)) * 100 / u128::from(total)) as u64
}

/// Number of completed cells in a bar of `width` cells, never above `width`
pub fn filled_width(current: u64, total: u64, width: usize) -> usize {
    if total == 0 {
        return width;
    }
    let filled = u128::from(current.min(total)) * width as u128 / u128::from(total);
    filled as usize
}

/// Progress bar configuration
pub struct ProgressBarOptions {
    total: u64,
    width: usize,
    complete: String,
    incomplete: String,
    show_count: bool,
    show_elapsed: bool,
    stream: Option<Box<dyn TermStream>>,
}

impl fmt::Debug for ProgressBarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBarOptions")
            .field("total", &self.total)
            .field("width", &self.width)
            .field("complete", &self.complete)
            .field("incomplete", &self.incomplete)
            .field("show_count", &self.show_count)
            .field("show_elapsed", &self.show_elapsed)
            .finish_non_exhaustive()
    }
}

impl ProgressBarOptions {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            width: DEFAULT_WIDTH,
            complete: DEFAULT_COMPLETE.to_string(),
            incomplete: DEFAULT_INCOMPLETE.to_string(),
            show_count: true,
            show_elapsed: true,
            stream: None,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Glyphs for completed and remaining cells
    pub fn glyphs(mut self, complete: impl Into<String>, incomplete: impl Into<String>) -> Self {
        self.complete = complete.into();
        self.incomplete = incomplete.into();
        self
    }

    /// Append ` current/total` after the bar
    pub fn show_count(mut self, show: bool) -> Self {
        self.show_count = show;
        self
    }

    /// Append ` (elapsed)` after the count
    pub fn show_elapsed(mut self, show: bool) -> Self {
        self.show_elapsed = show;
        self
    }

    /// Output stream (default stdout)
    pub fn stream(mut self, stream: Box<dyn TermStream>) -> Self {
        self.stream = Some(stream);
        self
    }
}

/// A progress bar over a fixed number of items
pub struct ProgressBar {
    output: Output,
    total: u64,
    current: u64,
    text: String,
    width: usize,
    complete: String,
    incomplete: String,
    show_count: bool,
    show_elapsed: bool,
    started_at: Instant,
    last_logged_percent: i64,
    completion_logged: bool,
}

impl fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("current", &self.current)
            .field("total", &self.total)
            .field("text", &self.text)
            .field("tty", &self.output.is_tty())
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// Progress bar over `total` items writing to stdout
    pub fn new(total: u64) -> Self {
        Self::with_options(ProgressBarOptions::new(total))
    }

    pub fn with_options(options: ProgressBarOptions) -> Self {
        Self {
            output: Output::new(options.stream.unwrap_or_else(stream::stdout)),
            total: options.total,
            current: 0,
            text: String::new(),
            width: options.width,
            complete: options.complete,
            incomplete: options.incomplete,
            show_count: options.show_count,
            show_elapsed: options.show_elapsed,
            started_at: Instant::now(),
            last_logged_percent: -LOG_STEP,
            completion_logged: false,
        }
    }

    /// Set progress, clamped into `0..=total`; `text` replaces the trailing text
    pub fn update(&mut self, current: i64, text: Option<&str>) {
        self.current = self.clamp(i128::from(current));
        if let Some(text) = text {
            self.text = text.to_string();
        }
        self.render();
    }

    /// Move progress by `delta`, clamped into `0..=total`
    pub fn increment(&mut self, delta: i64, text: Option<&str>) {
        self.current = self.clamp(i128::from(self.current) + i128::from(delta));
        if let Some(text) = text {
            self.text = text.to_string();
        }
        self.render();
    }

    /// Write the completion line
    ///
    /// On a terminal this always prints, defaulting to `Completed N items`.
    /// Elsewhere it prints only when `final_text` is given.
    pub fn stop(&mut self, final_text: Option<&str>) {
        if self.output.is_tty() {
            let text = match final_text {
                Some(text) => text.to_string(),
                None => format!("Completed {} items", self.total),
            };
            let elapsed = format_duration(self.started_at.elapsed());
            let line = format!("{CLEAR_LINE}✓ {text} ({elapsed})\n");
            self.output.emit(&line);
        } else if let Some(text) = final_text {
            let line = format!("✓ {text}\n");
            self.output.emit(&line);
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Percent complete, rounded down
    pub fn percent(&self) -> u64 {
        percent(self.current, self.total)
    }

    fn clamp(&self, value: i128) -> u64 {
        value.clamp(0, i128::from(self.total)) as u64
    }

    /// The bar line as drawn on a terminal, without control sequences
    fn bar_line(&self) -> String {
        let filled = filled_width(self.current, self.total, self.width);
        let mut line = format!(
            "[{}{}]",
            self.complete.repeat(filled),
            self.incomplete.repeat(self.width - filled)
        );
        if self.show_count {
            line.push_str(&format!(" {}/{}", self.current, self.total));
        }
        if self.show_elapsed {
            line.push_str(&format!(" ({})", format_duration(self.started_at.elapsed())));
        }
        if !self.text.is_empty() {
            line.push(' ');
            line.push_str(&self.text);
        }
        line
    }

    fn render(&mut self) {
        if self.output.is_tty() {
            let line = format!("{CLEAR_LINE}{}", self.bar_line());
            self.output.emit(&line);
            return;
        }

        let percent = self.percent() as i64;
        let complete = self.current == self.total;
        if complete && self.completion_logged {
            return;
        }
        if !complete && percent < self.last_logged_percent + LOG_STEP {
            return;
        }

        self.last_logged_percent = percent / LOG_STEP * LOG_STEP;
        self.completion_logged = complete;

        let mut line = format!("[{percent}%] {}/{}", self.current, self.total);
        if !self.text.is_empty() {
            line.push_str(" - ");
            line.push_str(&self.text);
        }
        line.push('\n');
        self.output.emit(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemoryStream;

    fn plain(stream: &MemoryStream, total: u64) -> ProgressBar {
        ProgressBar::with_options(
            ProgressBarOptions::new(total)
                .show_elapsed(false)
                .stream(Box::new(stream.clone())),
        )
    }

    #[test]
    fn test_filled_width_never_exceeds_width() {
        for total in [0u64, 1, 3, 7, 100, 1_000] {
            for current in 0..=total.min(200) {
                for width in [0usize, 1, 10, 30, 77] {
                    assert!(filled_width(current, total, width) <= width);
                }
            }
            assert!(filled_width(total + 5, total, 30) <= 30);
        }
        assert_eq!(filled_width(50, 100, 30), 15);
        assert_eq!(filled_width(99, 100, 30), 29);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0, 100), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(100, 100), 100);
        assert_eq!(percent(0, 0), 100);
    }

    #[test]
    fn test_update_clamps_current() {
        let stream = MemoryStream::new();
        let mut bar = plain(&stream, 10);

        bar.update(-5, None);
        assert_eq!(bar.current(), 0);

        bar.update(25, None);
        assert_eq!(bar.current(), 10);

        bar.increment(-100, None);
        assert_eq!(bar.current(), 0);

        bar.increment(i64::MAX, None);
        assert_eq!(bar.current(), 10);
    }

    #[test]
    fn test_non_tty_logs_buckets_and_one_completion_line() {
        let stream = MemoryStream::new();
        let mut bar = plain(&stream, 100);

        for i in 1..=100 {
            bar.update(i, None);
        }
        bar.update(100, None);
        bar.increment(1, None);

        let output = stream.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 11, "{output}");
        assert_eq!(lines[0], "[1%] 1/100");
        assert_eq!(lines[1], "[10%] 10/100");
        assert_eq!(lines[10], "[100%] 100/100");
        assert_eq!(output.matches("100/100").count(), 1);
    }

    #[test]
    fn test_non_tty_small_total_logs_completion_once() {
        let stream = MemoryStream::new();
        let mut bar = plain(&stream, 3);

        bar.update(1, Some("a"));
        bar.update(2, None);
        bar.update(3, Some("c"));
        bar.update(3, None);

        assert_eq!(
            stream.contents(),
            "[33%] 1/3 - a\n[66%] 2/3 - a\n[100%] 3/3 - c\n"
        );
    }

    #[test]
    fn test_tty_render() {
        let stream = MemoryStream::tty();
        let mut bar = ProgressBar::with_options(
            ProgressBarOptions::new(4)
                .width(8)
                .show_elapsed(false)
                .glyphs("#", "-")
                .stream(Box::new(stream.clone())),
        );

        bar.update(2, Some("Uploading"));
        assert_eq!(stream.contents(), "\r\x1b[K[####----] 2/4 Uploading");

        stream.clear();
        bar.increment(1, None);
        assert_eq!(stream.contents(), "\r\x1b[K[######--] 3/4 Uploading");
    }

    #[test]
    fn test_zero_total_is_full() {
        let stream = MemoryStream::tty();
        let mut bar = ProgressBar::with_options(
            ProgressBarOptions::new(0)
                .width(4)
                .show_count(false)
                .show_elapsed(false)
                .stream(Box::new(stream.clone())),
        );

        bar.update(3, None);
        assert_eq!(bar.current(), 0);
        assert_eq!(bar.percent(), 100);
        assert_eq!(stream.contents(), "\r\x1b[K[████]");
    }

    #[test]
    fn test_stop() {
        let stream = MemoryStream::tty();
        let mut bar = plain(&stream, 5);
        bar.update(5, None);
        stream.clear();
        bar.stop(None);
        assert_eq!(stream.contents(), "\r\x1b[K✓ Completed 5 items (0s)\n");

        let stream = MemoryStream::new();
        let mut bar = plain(&stream, 5);
        bar.stop(None);
        assert_eq!(stream.contents(), "");
        bar.stop(Some("Imported 5 rows"));
        assert_eq!(stream.contents(), "✓ Imported 5 rows\n");
    }
}

//! Animated terminal spinner
//!
//! On an interactive terminal the spinner hides the cursor and redraws
//! `frame text (elapsed)` in place on a timer. Anywhere else it degrades to
//! plain lines: one when it starts, one per text change, one when it ends.
//! Output is never corrupted with control sequences on a pipe.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use termkit_core::format_duration;

use crate::manager::{Animation, SpinnerId, SpinnerManager};
use crate::stream::{self, HIDE_CURSOR, Output, SHOW_CURSOR, TermStream, clear_lines, line_count};
use crate::ticker::Ticker;

/// Default spinner frames - dots animation
pub const DEFAULT_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Hourglass
pub const HOURGLASS_FRAMES: &[&str] = &["⏳", "⌛"];

/// Clock faces
pub const CLOCK_FRAMES: &[&str] = &[
    "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛",
];

/// Growing dots, padded to a fixed width
pub const DOTS_FRAMES: &[&str] = &[".  ", ".. ", "...", "   "];

/// Braille bar, used by the task spinner
pub const BAR_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Default time between frames
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(80);

/// Final elapsed time is only printed once it reaches this
const MIN_REPORTED_ELAPSED: Duration = Duration::from_secs(1);

const SUCCESS: &str = "✓";
const FAILURE: &str = "✗";
const WARNING: &str = "⚠";
const INFO: &str = "ℹ";

/// Spinner configuration
pub struct SpinnerOptions {
    frames: Vec<String>,
    interval: Duration,
    show_elapsed: bool,
    stream: Option<Box<dyn TermStream>>,
    manager: Option<Arc<SpinnerManager>>,
}

impl Default for SpinnerOptions {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval: DEFAULT_INTERVAL,
            show_elapsed: true,
            stream: None,
            manager: None,
        }
    }
}

impl fmt::Debug for SpinnerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinnerOptions")
            .field("frames", &self.frames)
            .field("interval", &self.interval)
            .field("show_elapsed", &self.show_elapsed)
            .field("stream", &self.stream.is_some())
            .field("manager", &self.manager.is_some())
            .finish()
    }
}

impl SpinnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation frames; an empty set keeps the default frames
    pub fn frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let frames: Vec<String> = frames.into_iter().map(Into::into).collect();
        if !frames.is_empty() {
            self.frames = frames;
        }
        self
    }

    /// Time between frames (default 80ms)
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Append `(elapsed)` to every frame and to the final line
    pub fn show_elapsed(mut self, show: bool) -> Self {
        self.show_elapsed = show;
        self
    }

    /// Output stream (default stdout)
    pub fn stream(mut self, stream: Box<dyn TermStream>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Manager to register with (default the global one)
    pub fn manager(mut self, manager: Arc<SpinnerManager>) -> Self {
        self.manager = Some(manager);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

struct SpinnerState {
    output: Output,
    frames: Vec<String>,
    show_elapsed: bool,
    text: String,
    frame_index: usize,
    started_at: Option<Instant>,
    /// Rows occupied by the last render
    line_count: usize,
    lifecycle: Lifecycle,
    spinning: bool,
    /// Erased by the manager, waiting for `render`
    suspended: bool,
    last_logged: Option<String>,
}

impl SpinnerState {
    fn elapsed(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    fn draw(&mut self) {
        if !self.output.is_tty() {
            return;
        }

        let frame = &self.frames[self.frame_index];
        self.frame_index = (self.frame_index + 1) % self.frames.len();

        let mut line = format!("{frame} {}", self.text);
        if self.show_elapsed && self.started_at.is_some() {
            line.push_str(&format!(" ({})", format_duration(self.elapsed())));
        }

        // Only rows this spinner drew; a taller frame grows downwards
        let mut out = clear_lines(self.line_count);
        out.push_str(&line);
        self.line_count = line_count(&line);
        self.output.emit(&out);
    }

    fn erase(&mut self) {
        if self.output.is_tty() {
            let seq = clear_lines(self.line_count);
            self.output.emit(&seq);
        }
        self.line_count = 0;
    }

    fn log_line(&mut self) {
        if self.last_logged.as_deref() == Some(self.text.as_str()) {
            return;
        }
        let line = format!("... {}\n", self.text);
        self.output.emit(&line);
        self.last_logged = Some(self.text.clone());
    }
}

pub(crate) struct SpinnerCore {
    state: Mutex<SpinnerState>,
}

impl SpinnerCore {
    fn lock(&self) -> MutexGuard<'_, SpinnerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tick(&self) {
        let mut state = self.lock();
        if state.spinning && !state.suspended {
            state.draw();
        }
    }
}

impl Animation for SpinnerCore {
    fn is_spinning(&self) -> bool {
        self.lock().spinning
    }

    fn clear_line(&self) {
        let mut state = self.lock();
        state.suspended = true;
        state.erase();
    }

    fn render(&self) {
        let mut state = self.lock();
        state.suspended = false;
        if state.spinning {
            state.draw();
        }
    }
}

/// An animated terminal spinner
///
/// ```no_run
/// use termkit_term::Spinner;
///
/// let spinner = Spinner::new("Loading...");
/// spinner.start(None);
/// // ... do work ...
/// spinner.succeed(Some("Done!"));
/// ```
///
/// A stopped spinner cannot be restarted. Dropping a running spinner stops it
/// without a status line.
pub struct Spinner {
    core: Arc<SpinnerCore>,
    manager: Arc<SpinnerManager>,
    interval: Duration,
    ticker: Mutex<Option<Ticker>>,
    registration: Mutex<Option<SpinnerId>>,
}

impl fmt::Debug for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.core.lock();
        f.debug_struct("Spinner")
            .field("text", &state.text)
            .field("lifecycle", &state.lifecycle)
            .field("spinning", &state.spinning)
            .field("line_count", &state.line_count)
            .finish()
    }
}

impl Spinner {
    /// Create an idle spinner writing to stdout
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_options(text, SpinnerOptions::default())
    }

    /// Create an idle spinner
    pub fn with_options(text: impl Into<String>, options: SpinnerOptions) -> Self {
        let frames = if options.frames.is_empty() {
            SpinnerOptions::default().frames
        } else {
            options.frames
        };
        let output = Output::new(options.stream.unwrap_or_else(stream::stdout));

        let state = SpinnerState {
            output,
            frames,
            show_elapsed: options.show_elapsed,
            text: text.into(),
            frame_index: 0,
            started_at: None,
            line_count: 0,
            lifecycle: Lifecycle::Idle,
            spinning: false,
            suspended: false,
            last_logged: None,
        };

        Self {
            core: Arc::new(SpinnerCore {
                state: Mutex::new(state),
            }),
            manager: options.manager.unwrap_or_else(SpinnerManager::global),
            interval: options.interval,
            ticker: Mutex::new(None),
            registration: Mutex::new(None),
        }
    }

    /// Start the spinner, optionally replacing its text
    ///
    /// Does nothing if the spinner is already running or has been stopped.
    pub fn start(&self, text: Option<&str>) {
        let (tty, current_text) = {
            let mut state = self.core.lock();
            match state.lifecycle {
                Lifecycle::Idle => {}
                Lifecycle::Running => return,
                Lifecycle::Stopped => {
                    tracing::debug!("Stopped spinner cannot be restarted");
                    return;
                }
            }

            if let Some(text) = text.filter(|t| !t.is_empty()) {
                state.text = text.to_string();
            }
            state.started_at = Some(Instant::now());
            state.lifecycle = Lifecycle::Running;

            if state.output.is_tty() {
                state.output.emit(HIDE_CURSOR);
                state.spinning = true;
                state.draw();
            } else {
                state.log_line();
            }
            (state.output.is_tty(), state.text.clone())
        };

        if tty {
            let core = self.core.clone();
            let ticker = Ticker::spawn("termkit-spinner", self.interval, move || core.tick());
            if !ticker.is_active() {
                self.core.lock().spinning = false;
            }
            *lock(&self.ticker) = Some(ticker);
        }

        let id = self.manager.register(&self.core);
        self.manager.update_text(id, &current_text);
        *lock(&self.registration) = Some(id);
    }

    /// Replace the text shown by the spinner
    ///
    /// On a terminal this shows up on the next frame. Elsewhere the new text
    /// is logged as its own line unless it equals the last one logged.
    pub fn update(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.core.lock();
            state.text = text.clone();
            if !state.output.is_tty() && state.lifecycle != Lifecycle::Stopped {
                state.log_line();
            }
        }
        if let Some(id) = *lock(&self.registration) {
            self.manager.update_text(id, &text);
        }
    }

    /// Stop and clear the spinner without a status line
    pub fn stop(&self) {
        self.finish(None, None);
    }

    /// Stop with a success symbol (✓)
    pub fn succeed(&self, text: Option<&str>) {
        self.finish(Some(SUCCESS), text);
    }

    /// Stop with a failure symbol (✗)
    pub fn fail(&self, text: Option<&str>) {
        self.finish(Some(FAILURE), text);
    }

    /// Stop with a warning symbol (⚠)
    pub fn warn(&self, text: Option<&str>) {
        self.finish(Some(WARNING), text);
    }

    /// Stop with an info symbol (ℹ)
    pub fn info(&self, text: Option<&str>) {
        self.finish(Some(INFO), text);
    }

    /// Whether the frame timer is running
    pub fn is_spinning(&self) -> bool {
        self.core.is_spinning()
    }

    /// Whether the output stream is an interactive terminal
    pub fn is_tty(&self) -> bool {
        self.core.lock().output.is_tty()
    }

    /// Current text
    pub fn text(&self) -> String {
        self.core.lock().text.clone()
    }

    /// Erase the current frame without stopping (used by the manager)
    pub fn clear_line(&self) {
        self.core.clear_line();
    }

    /// Redraw the current frame without stopping (used by the manager)
    pub fn render(&self) {
        self.core.render();
    }

    /// Draw the next frame now instead of waiting for the timer
    ///
    /// Skipped while the manager has the spinner paused.
    pub fn redraw(&self) {
        self.core.tick();
    }

    fn finish(&self, symbol: Option<&str>, text: Option<&str>) {
        // The tick locks the state, so the ticker must be joined first
        let ticker = lock(&self.ticker).take();
        if let Some(ticker) = ticker {
            ticker.cancel();
        }
        let registration = lock(&self.registration).take();
        if let Some(id) = registration {
            self.manager.unregister(id);
        }

        let mut state = self.core.lock();
        if state.lifecycle == Lifecycle::Stopped {
            return;
        }
        state.lifecycle = Lifecycle::Stopped;
        state.spinning = false;
        state.suspended = false;

        let elapsed = state.elapsed();
        state.erase();

        if let Some(symbol) = symbol {
            let mut line = format!("{symbol} {}", text.unwrap_or(&state.text));
            if state.show_elapsed && elapsed >= MIN_REPORTED_ELAPSED {
                line.push_str(&format!(" ({})", format_duration(elapsed)));
            }
            line.push('\n');
            state.output.emit(&line);
        }

        if state.output.is_tty() {
            state.output.emit(SHOW_CURSOR);
        }
        state.started_at = None;
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        let running = self.core.lock().lifecycle == Lifecycle::Running;
        if running {
            self.stop();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{CLEAR_LINE, MemoryStream, UP_AND_CLEAR};

    /// Long enough that no tick fires during a test
    const NO_TICK: Duration = Duration::from_secs(60);

    fn spinner_on(stream: &MemoryStream, text: &str) -> (Spinner, Arc<SpinnerManager>) {
        let manager = Arc::new(SpinnerManager::new());
        let spinner = Spinner::with_options(
            text,
            SpinnerOptions::new()
                .interval(NO_TICK)
                .show_elapsed(false)
                .stream(Box::new(stream.clone()))
                .manager(manager.clone()),
        );
        (spinner, manager)
    }

    #[test]
    fn test_non_tty_start_and_succeed_writes_two_plain_lines() {
        let stream = MemoryStream::new();
        let manager = Arc::new(SpinnerManager::new());
        let spinner = Spinner::with_options(
            "Loading",
            SpinnerOptions::new()
                .stream(Box::new(stream.clone()))
                .manager(manager),
        );

        spinner.start(None);
        assert!(!spinner.is_spinning());
        spinner.succeed(Some("Done"));

        let output = stream.contents();
        assert_eq!(output, "... Loading\n✓ Done\n");
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_non_tty_update_logs_changes_once() {
        let stream = MemoryStream::new();
        let (spinner, _manager) = spinner_on(&stream, "Step 1");

        spinner.start(None);
        spinner.update("Step 2");
        spinner.update("Step 2");
        spinner.stop();

        assert_eq!(stream.contents(), "... Step 1\n... Step 2\n");
    }

    #[test]
    fn test_tty_start_hides_cursor_and_renders() {
        let stream = MemoryStream::tty();
        let (spinner, manager) = spinner_on(&stream, "Loading");

        spinner.start(None);

        assert!(spinner.is_spinning());
        assert_eq!(manager.len(), 1);
        assert_eq!(stream.contents(), format!("{HIDE_CURSOR}{CLEAR_LINE}⠋ Loading"));

        spinner.stop();
        assert!(!spinner.is_spinning());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_tty_frames_advance_per_render() {
        let stream = MemoryStream::tty();
        let (spinner, _manager) = spinner_on(&stream, "Working");

        spinner.start(None);
        stream.clear();
        spinner.render();
        spinner.render();

        assert_eq!(
            stream.contents(),
            format!("{CLEAR_LINE}⠙ Working{CLEAR_LINE}⠹ Working")
        );
    }

    #[test]
    fn test_tty_fail_clears_and_restores_cursor() {
        let stream = MemoryStream::tty();
        let (spinner, _manager) = spinner_on(&stream, "Deploying");

        spinner.start(None);
        stream.clear();
        spinner.fail(Some("Deploy failed"));

        assert_eq!(
            stream.contents(),
            format!("{CLEAR_LINE}✗ Deploy failed\n{SHOW_CURSOR}")
        );
    }

    #[test]
    fn test_status_symbols_use_current_text_by_default() {
        for (finish, symbol) in [
            (Spinner::succeed as fn(&Spinner, Option<&str>), "✓"),
            (Spinner::fail, "✗"),
            (Spinner::warn, "⚠"),
            (Spinner::info, "ℹ"),
        ] {
            let stream = MemoryStream::new();
            let (spinner, _manager) = spinner_on(&stream, "Syncing");
            spinner.start(None);
            spinner.update("Synced");
            finish(&spinner, None);
            assert!(stream.contents().ends_with(&format!("{symbol} Synced\n")));
        }
    }

    #[test]
    fn test_multi_line_text_clears_every_row() {
        let stream = MemoryStream::tty();
        let (spinner, _manager) = spinner_on(&stream, "label\n  └─ state");

        spinner.start(None);
        stream.clear();
        spinner.update("short");
        spinner.render();

        // Previous render spanned two rows
        assert_eq!(
            stream.contents(),
            format!("{CLEAR_LINE}{UP_AND_CLEAR}⠙ short")
        );

        stream.clear();
        spinner.render();
        assert_eq!(stream.contents(), format!("{CLEAR_LINE}⠹ short"));
    }

    #[test]
    fn test_clear_line_suspends_until_render() {
        let stream = MemoryStream::tty();
        let (spinner, _manager) = spinner_on(&stream, "Busy");

        spinner.start(None);
        stream.clear();
        spinner.clear_line();
        assert_eq!(stream.contents(), CLEAR_LINE);

        // Ticks are ignored while suspended
        spinner.core.tick();
        assert_eq!(stream.contents(), CLEAR_LINE);

        spinner.render();
        assert_eq!(stream.contents(), format!("{CLEAR_LINE}{CLEAR_LINE}⠙ Busy"));
        assert!(spinner.is_spinning());
    }

    #[test]
    fn test_redraw_draws_now_unless_paused() {
        let stream = MemoryStream::tty();
        let (spinner, manager) = spinner_on(&stream, "Queued");

        spinner.start(None);
        stream.clear();
        spinner.update("Running");
        assert_eq!(stream.contents(), "");
        spinner.redraw();
        assert_eq!(stream.contents(), format!("{CLEAR_LINE}⠙ Running"));

        manager.pause();
        stream.clear();
        spinner.redraw();
        assert_eq!(stream.contents(), "");
    }

    #[test]
    fn test_taller_frame_clears_only_rows_it_drew() {
        let stream = MemoryStream::tty();
        let (spinner, _manager) = spinner_on(&stream, "one");

        spinner.start(None);
        stream.clear();
        spinner.update("one\n  └─ two");
        spinner.render();

        assert_eq!(stream.contents(), format!("{CLEAR_LINE}⠙ one\n  └─ two"));
    }

    #[test]
    fn test_manager_pause_resume_drives_spinner() {
        let stream = MemoryStream::tty();
        let (spinner, manager) = spinner_on(&stream, "Indexing");

        spinner.start(None);
        stream.clear();
        manager.pause();
        manager.pause();
        manager.resume();

        assert_eq!(
            stream.contents(),
            format!("{CLEAR_LINE}{CLEAR_LINE}⠙ Indexing")
        );
    }

    #[test]
    fn test_stopped_spinner_cannot_restart() {
        let stream = MemoryStream::new();
        let (spinner, manager) = spinner_on(&stream, "Once");

        spinner.start(None);
        spinner.succeed(None);
        spinner.start(Some("Twice"));
        spinner.succeed(None);

        assert_eq!(stream.contents(), "... Once\n✓ Once\n");
        assert!(manager.is_empty());
    }

    #[test]
    fn test_start_replaces_text() {
        let stream = MemoryStream::new();
        let (spinner, manager) = spinner_on(&stream, "Initial");

        spinner.start(Some("Replaced"));

        assert_eq!(spinner.text(), "Replaced");
        assert_eq!(stream.contents(), "... Replaced\n");
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_drop_stops_running_spinner() {
        let stream = MemoryStream::tty();
        let manager = {
            let (spinner, manager) = spinner_on(&stream, "Abandoned");
            spinner.start(None);
            manager
        };

        assert!(manager.is_empty());
        assert!(stream.contents().ends_with(SHOW_CURSOR));
    }

    #[test]
    fn test_ticker_animates() {
        let stream = MemoryStream::tty();
        let manager = Arc::new(SpinnerManager::new());
        let spinner = Spinner::with_options(
            "Spinning",
            SpinnerOptions::new()
                .frames(["a", "b"])
                .interval(Duration::from_millis(5))
                .show_elapsed(false)
                .stream(Box::new(stream.clone()))
                .manager(manager),
        );

        spinner.start(None);
        std::thread::sleep(Duration::from_millis(60));
        spinner.stop();

        let output = stream.contents();
        assert!(output.contains("a Spinning"));
        assert!(output.contains("b Spinning"));
    }

    #[test]
    fn test_empty_frames_fall_back_to_default() {
        let stream = MemoryStream::tty();
        let manager = Arc::new(SpinnerManager::new());
        let spinner = Spinner::with_options(
            "Fallback",
            SpinnerOptions::new()
                .frames(Vec::<String>::new())
                .interval(NO_TICK)
                .show_elapsed(false)
                .stream(Box::new(stream.clone()))
                .manager(manager),
        );

        spinner.start(None);
        assert!(stream.contents().ends_with("⠋ Fallback"));
    }
}

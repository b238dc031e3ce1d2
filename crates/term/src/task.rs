//! Spinner for long-running tasks with named states
//!
//! Wraps a [`Spinner`] and keeps its text current with the task's state and
//! the time since the task started:
//!
//! ```text
//! ⣾ Waiting for batch 42 ⚙️ Processing (1m 12s)
//! ```
//!
//! or, in multi-line mode:
//!
//! ```text
//! ⣾ Waiting for batch 42
//!   └─ ⚙️ Processing (1m 12s)
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use jiff::Timestamp;
use termkit_core::format_elapsed;

use crate::manager::SpinnerManager;
use crate::spinner::{BAR_FRAMES, DEFAULT_INTERVAL, Spinner, SpinnerOptions};
use crate::stream::TermStream;
use crate::ticker::Ticker;

/// How often the elapsed time is recomputed on a terminal
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

const TREE_BRANCH: &str = "\n  └─ ";
const COMPLETED: &str = "✅ Completed";
const FAILED: &str = "❌";

/// Task spinner configuration
pub struct TaskSpinnerOptions {
    state_labels: HashMap<String, String>,
    started_at: Option<Timestamp>,
    multi_line: bool,
    frames: Vec<String>,
    interval: Duration,
    stream: Option<Box<dyn TermStream>>,
    manager: Option<Arc<SpinnerManager>>,
}

impl Default for TaskSpinnerOptions {
    fn default() -> Self {
        Self {
            state_labels: HashMap::new(),
            started_at: None,
            multi_line: false,
            frames: BAR_FRAMES.iter().map(|f| f.to_string()).collect(),
            interval: DEFAULT_INTERVAL,
            stream: None,
            manager: None,
        }
    }
}

impl fmt::Debug for TaskSpinnerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSpinnerOptions")
            .field("state_labels", &self.state_labels)
            .field("started_at", &self.started_at)
            .field("multi_line", &self.multi_line)
            .field("frames", &self.frames)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl TaskSpinnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display label for one state
    pub fn state_label(mut self, state: impl Into<String>, label: impl Into<String>) -> Self {
        self.state_labels.insert(state.into(), label.into());
        self
    }

    /// Display labels for several states
    pub fn state_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.state_labels
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// When the task really started, for resuming a task begun elsewhere
    pub fn started_at(mut self, started_at: Timestamp) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Show state and elapsed time on a second line
    pub fn multi_line(mut self, multi_line: bool) -> Self {
        self.multi_line = multi_line;
        self
    }

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

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn stream(mut self, stream: Box<dyn TermStream>) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn manager(mut self, manager: Arc<SpinnerManager>) -> Self {
        self.manager = Some(manager);
        self
    }
}

#[derive(Debug, Default)]
struct Progress {
    state: String,
    started_at: Option<Timestamp>,
}

/// Everything needed to rebuild the display text
#[derive(Debug)]
struct TaskView {
    label: String,
    state_labels: HashMap<String, String>,
    multi_line: bool,
    progress: Mutex<Progress>,
}

impl TaskView {
    fn lock(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mapped label for a state, or the state itself
    fn state_text<'a>(&'a self, state: &'a str) -> &'a str {
        self.state_labels
            .get(state)
            .map(String::as_str)
            .unwrap_or(state)
    }

    fn build_text(&self) -> String {
        let progress = self.lock();
        let state = self.state_text(&progress.state);
        let elapsed = progress.started_at.map(|t| format_elapsed(millis_since(t)));

        let separator = if self.multi_line { TREE_BRANCH } else { " " };
        match (state.is_empty(), elapsed) {
            (false, Some(elapsed)) => format!("{}{separator}{state} ({elapsed})", self.label),
            (false, None) => format!("{}{separator}{state}", self.label),
            (true, Some(elapsed)) => format!("{}{separator}({elapsed})", self.label),
            (true, None) => self.label.clone(),
        }
    }
}

fn millis_since(start: Timestamp) -> u64 {
    let millis = Timestamp::now().duration_since(start).as_millis();
    u64::try_from(millis.max(0)).unwrap_or(u64::MAX)
}

/// A spinner tracking a long-running task through named states
///
/// ```no_run
/// use termkit_term::{TaskSpinner, TaskSpinnerOptions};
///
/// let spinner = TaskSpinner::with_options(
///     "Processing batch",
///     TaskSpinnerOptions::new()
///         .state_label("submitted", "📤 Submitted")
///         .state_label("processing", "⚙️ Processing"),
/// );
/// spinner.start();
/// spinner.update("processing", 30_000);
/// spinner.succeed(120_000, None);
/// ```
pub struct TaskSpinner {
    view: Arc<TaskView>,
    spinner: Arc<Spinner>,
    refresh: Mutex<Option<Ticker>>,
}

impl fmt::Debug for TaskSpinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSpinner")
            .field("view", &self.view)
            .field("spinner", &self.spinner)
            .finish()
    }
}

impl TaskSpinner {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_options(label, TaskSpinnerOptions::default())
    }

    pub fn with_options(label: impl Into<String>, options: TaskSpinnerOptions) -> Self {
        let label = label.into();

        let mut spinner_options = SpinnerOptions::new()
            .frames(options.frames)
            .interval(options.interval)
            .show_elapsed(false);
        if let Some(stream) = options.stream {
            spinner_options = spinner_options.stream(stream);
        }
        if let Some(manager) = options.manager {
            spinner_options = spinner_options.manager(manager);
        }

        let view = TaskView {
            label: label.clone(),
            state_labels: options.state_labels,
            multi_line: options.multi_line,
            progress: Mutex::new(Progress {
                state: String::new(),
                started_at: options.started_at,
            }),
        };

        Self {
            view: Arc::new(view),
            spinner: Arc::new(Spinner::with_options(label, spinner_options)),
            refresh: Mutex::new(None),
        }
    }

    /// Start the spinner and, on a terminal, the elapsed-time refresh
    pub fn start(&self) {
        {
            let mut progress = self.view.lock();
            if progress.started_at.is_none() {
                progress.started_at = Some(Timestamp::now());
            }
        }
        self.spinner.start(None);

        // A pipe would get one line per refresh
        if !self.spinner.is_tty() || !self.spinner.is_spinning() {
            return;
        }

        let view = self.view.clone();
        let spinner = self.spinner.clone();
        let ticker = Ticker::spawn("termkit-task-refresh", REFRESH_INTERVAL, move || {
            spinner.update(view.build_text());
        });
        *lock(&self.refresh) = Some(ticker);
    }

    /// Record the current state and redraw immediately
    ///
    /// The displayed elapsed time is measured from the start time, so
    /// `_elapsed_ms` is accepted for call-site symmetry with `succeed` only.
    pub fn update(&self, state: &str, _elapsed_ms: u64) {
        self.view.lock().state = state.to_string();
        self.spinner.update(self.view.build_text());
        self.spinner.redraw();
    }

    /// Stop with success
    ///
    /// Without a message the final line reads `<label> completed in <elapsed>`.
    /// In multi-line mode on a terminal the final state stays on its own line.
    pub fn succeed(&self, elapsed_ms: u64, message: Option<&str>) {
        self.stop_refresh();
        let elapsed = format_elapsed(elapsed_ms);

        if self.view.multi_line && self.spinner.is_tty() {
            let state = self.view.lock().state.clone();
            let state_text = if state.is_empty() {
                COMPLETED
            } else {
                self.view.state_text(&state)
            };
            let text = format!("{}{TREE_BRANCH}{state_text} ({elapsed})", self.view.label);
            self.spinner.succeed(Some(&text));
        } else {
            let text = match message {
                Some(message) => message.to_string(),
                None => format!("{} completed in {elapsed}", self.view.label),
            };
            self.spinner.succeed(Some(&text));
        }
    }

    /// Stop with failure
    pub fn fail(&self, message: &str) {
        self.stop_refresh();

        if self.view.multi_line && self.spinner.is_tty() {
            let text = format!("{}{TREE_BRANCH}{FAILED} {message}", self.view.label);
            self.spinner.fail(Some(&text));
        } else {
            self.spinner.fail(Some(message));
        }
    }

    /// Text the spinner would show right now
    pub fn display_text(&self) -> String {
        self.view.build_text()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_spinning()
    }

    fn stop_refresh(&self) {
        let refresh = lock(&self.refresh).take();
        if let Some(refresh) = refresh {
            refresh.cancel();
        }
    }
}

impl Drop for TaskSpinner {
    fn drop(&mut self) {
        self.stop_refresh();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

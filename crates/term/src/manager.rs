//! Spinner manager
//!
//! Coordinates spinners with logging. Log calls pause every active spinner
//! (erasing its frame), write their line, then resume (redrawing the frame),
//! so a log line is never drawn over or half-overwritten by an animation.
//!
//! The manager only holds weak references: it never starts or stops a
//! spinner, it only asks it to step aside and come back.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use termkit_core::RenderCoordinator;

/// The part of a spinner the manager is allowed to drive
pub trait Animation: Send + Sync {
    /// Whether the frame timer is running
    fn is_spinning(&self) -> bool;

    /// Erase the current frame without changing lifecycle state
    fn clear_line(&self);

    /// Redraw the current frame without changing lifecycle state
    fn render(&self);
}

/// Registration handle returned by [`SpinnerManager::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinnerId(u64);

struct Managed {
    spinner: Weak<dyn Animation>,
    last_text: String,
}

#[derive(Default)]
struct Registry {
    spinners: BTreeMap<SpinnerId, Managed>,
    paused: bool,
    next_id: u64,
}

impl Registry {
    /// Live spinners whose frame timer is running; drops dead entries
    fn spinning(&mut self) -> Vec<Arc<dyn Animation>> {
        self.spinners
            .retain(|_, managed| managed.spinner.strong_count() > 0);
        self.spinners
            .values()
            .filter_map(|managed| managed.spinner.upgrade())
            .filter(|spinner| spinner.is_spinning())
            .collect()
    }
}

/// Registry of active spinners with pause/resume semantics
#[derive(Default)]
pub struct SpinnerManager {
    registry: Mutex<Registry>,
}

impl fmt::Debug for SpinnerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        f.debug_struct("SpinnerManager")
            .field("spinners", &registry.spinners.len())
            .field("paused", &registry.paused)
            .finish()
    }
}

impl SpinnerManager {
    /// Create an isolated manager
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide manager used by spinners unless told otherwise
    pub fn global() -> Arc<SpinnerManager> {
        static GLOBAL: OnceLock<Arc<SpinnerManager>> = OnceLock::new();
        GLOBAL
            .get_or_init(|| Arc::new(SpinnerManager::new()))
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a spinner; the manager keeps only a weak reference
    pub fn register<A: Animation + 'static>(&self, spinner: &Arc<A>) -> SpinnerId {
        let weak: Weak<A> = Arc::downgrade(spinner);
        let weak: Weak<dyn Animation> = weak;

        let mut registry = self.lock();
        let id = SpinnerId(registry.next_id);
        registry.next_id += 1;
        registry.spinners.insert(
            id,
            Managed {
                spinner: weak,
                last_text: String::new(),
            },
        );
        tracing::trace!(?id, "Spinner registered");
        id
    }

    /// Forget a spinner
    pub fn unregister(&self, id: SpinnerId) {
        let mut registry = self.lock();
        registry.spinners.remove(&id);
        if registry.spinners.is_empty() {
            registry.paused = false;
        }
        tracing::trace!(?id, "Spinner unregistered");
    }

    /// Record the last text a spinner displayed (diagnostics only)
    pub fn update_text(&self, id: SpinnerId, text: &str) {
        if let Some(managed) = self.lock().spinners.get_mut(&id) {
            managed.last_text = text.to_string();
        }
    }

    /// Last text recorded for a spinner
    pub fn last_text(&self, id: SpinnerId) -> Option<String> {
        self.lock()
            .spinners
            .get(&id)
            .map(|managed| managed.last_text.clone())
    }

    /// Erase every spinning spinner; call before logging
    ///
    /// No-op when already paused or when nothing is registered.
    pub fn pause(&self) {
        let mut registry = self.lock();
        if registry.paused || registry.spinners.is_empty() {
            return;
        }
        for spinner in registry.spinning() {
            spinner.clear_line();
        }
        registry.paused = true;
    }

    /// Redraw every spinning spinner; call after logging
    ///
    /// No-op when not paused or when nothing is registered.
    pub fn resume(&self) {
        let mut registry = self.lock();
        if !registry.paused || registry.spinners.is_empty() {
            return;
        }
        for spinner in registry.spinning() {
            spinner.render();
        }
        registry.paused = false;
    }

    /// Whether any registered spinner is spinning
    pub fn has_active_spinners(&self) -> bool {
        self.lock()
            .spinners
            .values()
            .filter_map(|managed| managed.spinner.upgrade())
            .any(|spinner| spinner.is_spinning())
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Number of registered spinners
    pub fn len(&self) -> usize {
        self.lock().spinners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderCoordinator for SpinnerManager {
    fn pause(&self) {
        SpinnerManager::pause(self);
    }

    fn resume(&self) {
        SpinnerManager::resume(self);
    }
}

/// Route every logger write through the global spinner manager
///
/// After this call, `termkit_core::Logger` pauses active spinners before each
/// line and resumes them afterwards.
pub fn coordinate_logging() {
    let manager: Arc<dyn RenderCoordinator> = SpinnerManager::global();
    termkit_core::configure(|c| c.coordinator = Some(manager));
}

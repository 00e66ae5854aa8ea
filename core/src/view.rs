//! Shared view handle for a presented indicator.

use std::sync::{Arc, Mutex, PoisonError};

use islet_types::IndicatorConfig;

use crate::phase::{Phase, PhaseMachine, VisualParams};

/// Cheaply cloneable handle to one presented indicator's state.
///
/// The sequencing task mutates the underlying phase machine through one
/// clone while the host's rendering layer polls another. Lock poisoning is
/// recovered rather than propagated: a panicked writer must never take the
/// render path down with it.
#[derive(Clone)]
pub struct IndicatorView {
    config: Arc<IndicatorConfig>,
    machine: Arc<Mutex<PhaseMachine>>,
}

impl IndicatorView {
    pub fn new(config: IndicatorConfig) -> Self {
        Self {
            config: Arc::new(config),
            machine: Arc::new(Mutex::new(PhaseMachine::new())),
        }
    }

    /// The config this indicator was attached with
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Rendering snapshot: visibility flags, clamped ring fraction, rotation
    pub fn visual(&self) -> VisualParams {
        self.lock().visual(self.config.rotation_enabled)
    }

    pub(crate) fn begin_tracking(&self) {
        self.lock().begin_tracking();
    }

    pub(crate) fn observe(&self, value: f64) -> bool {
        self.lock().observe(value)
    }

    pub(crate) fn collapse_alert(&self) {
        self.lock().collapse_alert();
    }

    pub(crate) fn mark_dismissed(&self) {
        self.lock().dismiss();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PhaseMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for IndicatorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorView")
            .field("title", &self.config.title)
            .field("phase", &self.phase())
            .finish()
    }
}

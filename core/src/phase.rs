//! Phase state for a presented indicator.
//!
//! The indicator moves through a fixed sequence of visual phases:
//! Entering → Tracking → Completing → Collapsing → Dismissed. Transitions
//! are strictly ordered and never re-entered within one presentation; the
//! timed scheduling that drives them lives in [`crate::sequence`].

use serde::{Deserialize, Serialize};

/// One stage of the indicator's animation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Attached but not yet visible (the short appear delay)
    Entering,
    /// Progress ring visible, following incoming values
    Tracking,
    /// Expanded completion alert shown
    Completing,
    /// Alert collapsing back down before teardown
    Collapsing,
    /// Terminal: the surface has been (or is being) detached
    Dismissed,
}

/// Snapshot of everything a rendering layer needs to draw the indicator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualParams {
    /// Progress capsule visible (appear/disappear animation trigger)
    pub show_progress: bool,
    /// Expanded completion alert visible (expand/collapse animation trigger)
    pub show_alert: bool,
    /// Ring fill fraction, clamped to [0, 1]
    pub ring_fraction: f64,
    /// Progress glyph rotation, `ring_fraction * 360` when rotation is enabled
    pub rotation_degrees: f64,
}

/// Pure phase machine for one presented indicator.
///
/// Holds no timers and spawns nothing; the sequencing task calls the
/// transition methods and the rendering layer reads [`Self::visual`].
/// All transition methods are defensive no-ops outside their source phase,
/// so a late caller can never push the machine backwards.
#[derive(Debug)]
pub struct PhaseMachine {
    phase: Phase,
    /// Last forwarded progress value; never assigned a value >= 1.0
    rendered: f64,
    show_progress: bool,
    show_alert: bool,
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Entering,
            rendered: 0.0,
            show_progress: false,
            show_alert: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Entering → Tracking: the progress capsule becomes visible.
    pub fn begin_tracking(&mut self) {
        if self.phase == Phase::Entering {
            self.phase = Phase::Tracking;
            self.show_progress = true;
        }
    }

    /// Feed one progress value while Tracking. Returns true on the
    /// completion edge (Tracking → Completing).
    ///
    /// Values >= 1.0 are never forwarded to the renderer, so the ring can
    /// never overshoot (clamp-by-omission rather than clamp-to-1). The
    /// completion test is an exact match on the rounded percentage: a value
    /// that stalls at 0.994 never completes, and neither does one that jumps
    /// straight to 1.01, because 101 != 100.
    pub fn observe(&mut self, value: f64) -> bool {
        if self.phase != Phase::Tracking {
            return false;
        }

        if value < 1.0 {
            self.rendered = value;
        }

        if (value * 100.0).round() == 100.0 {
            self.phase = Phase::Completing;
            self.show_progress = false;
            self.show_alert = true;
            return true;
        }

        false
    }

    /// Completing → Collapsing: the alert starts shrinking back down.
    pub fn collapse_alert(&mut self) {
        if self.phase == Phase::Completing {
            self.phase = Phase::Collapsing;
            self.show_alert = false;
        }
    }

    /// Terminal transition; valid from any phase (manual removal included).
    pub fn dismiss(&mut self) {
        self.phase = Phase::Dismissed;
        self.show_progress = false;
        self.show_alert = false;
    }

    /// Rendering snapshot for the current state
    pub fn visual(&self, rotation_enabled: bool) -> VisualParams {
        let ring_fraction = self.rendered.clamp(0.0, 1.0);
        VisualParams {
            show_progress: self.show_progress,
            show_alert: self.show_alert,
            ring_fraction,
            rotation_degrees: if rotation_enabled {
                ring_fraction * 360.0
            } else {
                0.0
            },
        }
    }
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

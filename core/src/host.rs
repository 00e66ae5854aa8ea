//! Host environment abstraction.
//!
//! The core never touches a real window system. Everything it needs from
//! the platform sits behind two traits: a [`RootContainer`] it can insert
//! the indicator surface into, and a [`HostEnvironment`] that resolves the
//! currently active root (or none, in which case every dependent operation
//! degrades to a silent no-op).

use std::sync::{Arc, Mutex, PoisonError};

use crate::view::IndicatorView;

/// Screen-space rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    /// Fallback frame when no live window can report its bounds
    pub const ZERO: ScreenRect = ScreenRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The root view the indicator surface is inserted into.
///
/// Implementations must tolerate redundant calls: `remove_overlay` with
/// nothing inserted is a no-op, as is repeating a status-bar state.
pub trait RootContainer: Send + Sync {
    /// Bounds of the container; `ScreenRect::ZERO` when unknown
    fn bounds(&self) -> ScreenRect;

    /// Insert the indicator surface, sized to `frame` (full screen)
    fn insert_overlay(&self, view: IndicatorView, frame: ScreenRect);

    /// Detach the indicator surface, if present
    fn remove_overlay(&self);

    /// Show or hide the system status bar
    fn set_status_bar_hidden(&self, hidden: bool);
}

/// Resolves the active root container, if the host currently has one
pub trait HostEnvironment: Send + Sync {
    fn active_root(&self) -> Option<Arc<dyn RootContainer>>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Headless Host (recording, for tests and embedding)
// ─────────────────────────────────────────────────────────────────────────────

/// One observable call made against a [`HeadlessRoot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootEvent {
    Inserted { frame: ScreenRect },
    Removed,
    StatusBarHidden(bool),
}

/// Recording root container with no rendering behind it
pub struct HeadlessRoot {
    bounds: ScreenRect,
    view: Mutex<Option<IndicatorView>>,
    events: Mutex<Vec<RootEvent>>,
}

impl HeadlessRoot {
    pub fn new(bounds: ScreenRect) -> Self {
        Self {
            bounds,
            view: Mutex::new(None),
            events: Mutex::new(Vec::new()),
        }
    }

    /// The currently inserted surface, if any
    pub fn view(&self) -> Option<IndicatorView> {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every call recorded so far, in order
    pub fn events(&self) -> Vec<RootEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: RootEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl RootContainer for HeadlessRoot {
    fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    fn insert_overlay(&self, view: IndicatorView, frame: ScreenRect) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = Some(view);
        self.record(RootEvent::Inserted { frame });
    }

    fn remove_overlay(&self) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = None;
        self.record(RootEvent::Removed);
    }

    fn set_status_bar_hidden(&self, hidden: bool) {
        self.record(RootEvent::StatusBarHidden(hidden));
    }
}

/// Host environment whose single root is a [`HeadlessRoot`]
pub struct HeadlessHost {
    root: Arc<HeadlessRoot>,
}

impl HeadlessHost {
    /// Headless host with phone-ish logical bounds
    pub fn new() -> Self {
        Self::with_bounds(ScreenRect {
            x: 0,
            y: 0,
            width: 390,
            height: 844,
        })
    }

    pub fn with_bounds(bounds: ScreenRect) -> Self {
        Self {
            root: Arc::new(HeadlessRoot::new(bounds)),
        }
    }

    pub fn root(&self) -> &Arc<HeadlessRoot> {
        &self.root
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for HeadlessHost {
    fn active_root(&self) -> Option<Arc<dyn RootContainer>> {
        Some(self.root.clone())
    }
}

/// Host environment with no active window; every lookup fails gracefully
pub struct DetachedHost;

impl HostEnvironment for DetachedHost {
    fn active_root(&self) -> Option<Arc<dyn RootContainer>> {
        None
    }
}

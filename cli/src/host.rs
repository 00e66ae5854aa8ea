//! Terminal collaborator for the demo driver.
//!
//! Plays the platform's part from the core's point of view: a root
//! container the indicator surface is inserted into, plus a status bar
//! that can be hidden. The indicator renders as a single repainted stdout
//! line built from the view's visual parameters.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use islet_core::{HostEnvironment, IndicatorView, Phase, RootContainer, ScreenRect};

const RING_SLOTS: usize = 20;
const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Root container backed by the terminal
pub struct TerminalRoot {
    bounds: ScreenRect,
    view: Mutex<Option<IndicatorView>>,
    status_hidden: AtomicBool,
}

impl TerminalRoot {
    fn new() -> Self {
        Self {
            // Logical phone-screen bounds; the line renderer ignores them
            bounds: ScreenRect {
                x: 0,
                y: 0,
                width: 390,
                height: 844,
            },
            view: Mutex::new(None),
            status_hidden: AtomicBool::new(false),
        }
    }

    fn view(&self) -> Option<IndicatorView> {
        self.view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RootContainer for TerminalRoot {
    fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    fn insert_overlay(&self, view: IndicatorView, _frame: ScreenRect) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = Some(view);
    }

    fn remove_overlay(&self) {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn set_status_bar_hidden(&self, hidden: bool) {
        self.status_hidden.store(hidden, Ordering::Relaxed);
    }
}

/// Host environment whose active root is the terminal
pub struct TerminalHost {
    root: Arc<TerminalRoot>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            root: Arc::new(TerminalRoot::new()),
        }
    }

    /// Redraw the indicator line in place
    pub fn repaint(&self) {
        let line = self.render_line();
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r{line:<70}");
        let _ = stdout.flush();
    }

    /// Leave the last painted line behind and move to a fresh one
    pub fn finish(&self) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout);
        let _ = stdout.flush();
    }

    fn render_line(&self) -> String {
        let status = if self.root.status_hidden.load(Ordering::Relaxed) {
            "         ".to_string()
        } else {
            "9:41 ▂▄▆█".to_string()
        };

        let body = match self.root.view() {
            None => String::new(),
            Some(view) => {
                let visual = view.visual();
                let config = view.config();
                match view.phase() {
                    Phase::Entering => "(      )".to_string(),
                    Phase::Tracking => {
                        let filled = (visual.ring_fraction * RING_SLOTS as f64).round() as usize;
                        let empty = RING_SLOTS - filled;
                        let spin = if config.rotation_enabled {
                            SPINNER[((visual.rotation_degrees / 90.0) as usize) % SPINNER.len()]
                        } else {
                            '·'
                        };
                        format!(
                            "( {spin} {}{} {:5.1}% )",
                            "●".repeat(filled),
                            "○".repeat(empty),
                            visual.ring_fraction * 100.0
                        )
                    }
                    Phase::Completing if visual.show_alert => {
                        format!(
                            "▌ [{}]  Downloaded  {} ▐",
                            config.completion_glyph, config.title
                        )
                    }
                    Phase::Completing | Phase::Collapsing => "(      )".to_string(),
                    Phase::Dismissed => String::new(),
                }
            }
        };

        format!("{status}  {body}")
    }
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEnvironment for TerminalHost {
    fn active_root(&self) -> Option<Arc<dyn RootContainer>> {
        Some(self.root.clone())
    }
}

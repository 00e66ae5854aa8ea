//! Timed sequencing for one presented indicator.
//!
//! A single task per presentation owns the whole timeline: the appear
//! delay, the tracking loop, and the dismissal schedule after the
//! completion edge. Because everything lives in one task, an external
//! `remove()` cancels every pending step at once; no deferred step can
//! fire into a torn-down indicator.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::controller::ControllerLink;
use crate::view::IndicatorView;

/// Delay before the progress capsule first becomes visible
pub const ENTER_DELAY_MS: u64 = 100;

/// What a dismissal step does when its delay elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissAction {
    /// Hide the system status bar once the expand animation is underway
    HideStatusBar,
    /// Collapse the completion alert
    CollapseAlert,
    /// Spacing only; keeps the status-bar restore staggered before teardown
    Settle,
    /// Restore the status bar, then tear the indicator down
    RestoreAndDismiss,
}

/// One step of the dismissal timeline, delayed relative to the previous step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissStep {
    pub delay_ms: u64,
    pub action: DismissAction,
}

/// Dismissal timeline, relative to the completion edge: status-bar hide at
/// +500 ms, alert collapse at +3000 ms, a settle gap at +3200 ms, status-bar
/// restore and teardown at +3300 ms.
pub const DISMISS_SCHEDULE: [DismissStep; 4] = [
    DismissStep {
        delay_ms: 500,
        action: DismissAction::HideStatusBar,
    },
    DismissStep {
        delay_ms: 2500,
        action: DismissAction::CollapseAlert,
    },
    DismissStep {
        delay_ms: 200,
        action: DismissAction::Settle,
    },
    DismissStep {
        delay_ms: 100,
        action: DismissAction::RestoreAndDismiss,
    },
];

/// Drive one indicator from appearance to teardown.
///
/// `updates` is unbounded and drained one value at a time, so bursts faster
/// than the appear delay are queued rather than coalesced and the completion
/// edge can never be lost between polls.
pub(crate) async fn run(
    view: IndicatorView,
    mut updates: mpsc::UnboundedReceiver<f64>,
    link: ControllerLink,
) {
    sleep(Duration::from_millis(ENTER_DELAY_MS)).await;
    view.begin_tracking();
    tracing::debug!("indicator tracking");

    loop {
        let Some(value) = updates.recv().await else {
            // Sender dropped: the controller tore the presentation down
            return;
        };
        if view.observe(value) {
            break;
        }
    }
    tracing::debug!("indicator completing");

    for step in DISMISS_SCHEDULE {
        sleep(Duration::from_millis(step.delay_ms)).await;
        match step.action {
            DismissAction::HideStatusBar => link.set_status_bar_hidden(true),
            DismissAction::CollapseAlert => {
                view.collapse_alert();
                tracing::debug!("indicator collapsing");
            }
            DismissAction::Settle => {}
            DismissAction::RestoreAndDismiss => {
                link.set_status_bar_hidden(false);
                view.mark_dismissed();
                link.dismiss();
            }
        }
    }
}

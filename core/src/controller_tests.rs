//! Lifecycle tests for the indicator controller.
//!
//! All tests run on a paused tokio clock so the 100/500/3000/3200/3300 ms
//! schedule can be asserted exactly, with the recording headless host
//! standing in for the platform.

use std::sync::Arc;
use std::time::Duration;

use islet_types::IndicatorConfig;
use tokio::time::sleep;

use crate::controller::IndicatorController;
use crate::error::{DismissError, PresentError};
use crate::host::{DetachedHost, HeadlessHost, HeadlessRoot, RootContainer, RootEvent, ScreenRect};
use crate::phase::Phase;

fn sample_config() -> IndicatorConfig {
    IndicatorConfig {
        title: "Your New File".to_string(),
        rotation_enabled: true,
        ..Default::default()
    }
}

/// Controller with one indicator freshly attached to a headless root
fn presented() -> (IndicatorController, Arc<HeadlessRoot>) {
    let host = Arc::new(HeadlessHost::new());
    let root = host.root().clone();
    let controller = IndicatorController::new(host);
    controller.attach(sample_config());
    (controller, root)
}

/// Yield to the sequencing task and let queued updates drain
async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn double_attach_is_idempotent() {
    let (controller, root) = presented();
    assert!(controller.is_presented());

    assert_eq!(
        controller.try_attach(sample_config()),
        Err(PresentError::AlreadyPresented)
    );
    // The logging variant swallows the error the same way
    controller.attach(sample_config());

    let inserts = root
        .events()
        .iter()
        .filter(|e| matches!(e, RootEvent::Inserted { .. }))
        .count();
    assert_eq!(inserts, 1);
    assert!(controller.is_presented());
}

#[tokio::test(start_paused = true)]
async fn attach_without_root_stays_unpresented() {
    let controller = IndicatorController::new(Arc::new(DetachedHost));

    assert_eq!(
        controller.try_attach(sample_config()),
        Err(PresentError::RootUnavailable)
    );
    controller.attach(sample_config());
    assert!(!controller.is_presented());

    // Dependent operations degrade to no-ops, never panics
    controller.update_progress(0.5);
    assert_eq!(controller.progress(), 0.5);
    assert_eq!(controller.try_remove(), Err(DismissError::NotPresented));
}

#[tokio::test(start_paused = true)]
async fn surface_is_inserted_full_screen() {
    let (_controller, root) = presented();
    assert_eq!(
        root.events(),
        vec![RootEvent::Inserted {
            frame: root.bounds()
        }]
    );
    assert!(root.view().is_some());
}

#[tokio::test(start_paused = true)]
async fn progress_appears_after_enter_delay() {
    let (_controller, root) = presented();
    let view = root.view().unwrap();

    sleep(Duration::from_millis(50)).await;
    assert_eq!(view.phase(), Phase::Entering);
    assert!(!view.visual().show_progress);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(view.phase(), Phase::Tracking);
    assert!(view.visual().show_progress);
}

#[tokio::test(start_paused = true)]
async fn updates_during_enter_delay_are_queued_not_dropped() {
    let (controller, root) = presented();
    controller.update_progress(1.0);

    sleep(Duration::from_millis(150)).await;
    assert_eq!(root.view().unwrap().phase(), Phase::Completing);
}

#[tokio::test(start_paused = true)]
async fn rendered_progress_is_clamped_by_omission() {
    let (controller, root) = presented();
    let view = root.view().unwrap();
    sleep(Duration::from_millis(150)).await;

    controller.update_progress(0.42);
    controller.update_progress(1.2);
    settle().await;

    // 1.2 is neither rendered (>= 1.0) nor a completion (rounds to 120)
    assert_eq!(view.phase(), Phase::Tracking);
    assert_eq!(view.visual().ring_fraction, 0.42);
    assert_eq!(view.visual().rotation_degrees, 0.42 * 360.0);
}

#[tokio::test(start_paused = true)]
async fn progress_capped_below_rounding_window_never_completes() {
    let (controller, root) = presented();
    let view = root.view().unwrap();
    sleep(Duration::from_millis(150)).await;

    let mut value: f64 = 0.0;
    while value <= 0.994 {
        controller.update_progress(value);
        value += 0.004;
    }
    settle().await;
    assert_eq!(view.phase(), Phase::Tracking);

    // No completion means no dismissal schedule: still presented much later
    sleep(Duration::from_secs(10)).await;
    assert!(controller.is_presented());
    assert_eq!(view.phase(), Phase::Tracking);
    assert_eq!(root.events().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn values_past_the_rounding_window_never_complete() {
    // Regression pin for the exact-equality completion test: a producer
    // that skips from 0.99 straight past 1.005 can never complete.
    let (controller, root) = presented();
    let view = root.view().unwrap();
    sleep(Duration::from_millis(150)).await;

    controller.update_progress(0.99);
    controller.update_progress(1.01);
    controller.update_progress(1.5);
    settle().await;

    sleep(Duration::from_secs(10)).await;
    assert!(controller.is_presented());
    assert_eq!(view.phase(), Phase::Tracking);
    assert_eq!(view.visual().ring_fraction, 0.99);
}

#[tokio::test(start_paused = true)]
async fn completion_schedule_fires_at_exact_offsets() {
    let (controller, root) = presented();
    let view = root.view().unwrap();
    sleep(Duration::from_millis(150)).await;

    // Completion edge is processed at the current paused instant
    controller.update_progress(1.0);

    // +499 ms: alert expanded, status bar not yet hidden
    sleep(Duration::from_millis(499)).await;
    assert_eq!(view.phase(), Phase::Completing);
    assert!(view.visual().show_alert);
    assert!(!view.visual().show_progress);
    assert!(!controller.status_bar_hidden());

    // +501 ms: status bar hidden
    sleep(Duration::from_millis(2)).await;
    assert!(controller.status_bar_hidden());

    // +2999 ms: alert still expanded
    sleep(Duration::from_millis(2498)).await;
    assert_eq!(view.phase(), Phase::Completing);

    // +3001 ms: collapsing, status bar still hidden
    sleep(Duration::from_millis(2)).await;
    assert_eq!(view.phase(), Phase::Collapsing);
    assert!(!view.visual().show_alert);
    assert!(controller.status_bar_hidden());

    // +3299 ms: not yet torn down
    sleep(Duration::from_millis(298)).await;
    assert!(controller.is_presented());
    assert!(controller.status_bar_hidden());

    // +3301 ms: status bar restored, then the indicator is torn down
    sleep(Duration::from_millis(2)).await;
    assert!(!controller.status_bar_hidden());
    assert!(!controller.is_presented());
    assert_eq!(view.phase(), Phase::Dismissed);
    assert!(root.view().is_none());
}

#[tokio::test(start_paused = true)]
async fn auto_dismissal_restores_status_bar_before_removal() {
    let (controller, root) = presented();
    sleep(Duration::from_millis(150)).await;
    controller.update_progress(1.0);
    sleep(Duration::from_secs(5)).await;

    assert!(!controller.is_presented());
    assert_eq!(
        root.events(),
        vec![
            RootEvent::Inserted {
                frame: root.bounds()
            },
            RootEvent::StatusBarHidden(true),
            RootEvent::StatusBarHidden(false),
            RootEvent::Removed,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn manual_remove_mid_tracking_detaches_silently() {
    let (controller, root) = presented();
    let view = root.view().unwrap();
    sleep(Duration::from_millis(150)).await;
    controller.update_progress(0.5);
    settle().await;

    controller.remove();
    assert!(!controller.is_presented());
    assert_eq!(view.phase(), Phase::Dismissed);
    assert!(root.view().is_none());

    // Later updates are stored but render nowhere
    controller.update_progress(0.7);
    assert_eq!(controller.progress(), 0.7);
    assert_eq!(controller.try_remove(), Err(DismissError::NotPresented));
    assert_eq!(
        root.events(),
        vec![
            RootEvent::Inserted {
                frame: root.bounds()
            },
            RootEvent::Removed,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn manual_remove_mid_completing_cancels_pending_steps() {
    let (controller, root) = presented();
    sleep(Duration::from_millis(150)).await;
    controller.update_progress(1.0);

    // Past the status-bar hide, before the collapse
    sleep(Duration::from_millis(700)).await;
    assert!(controller.status_bar_hidden());

    controller.remove();
    assert!(!controller.is_presented());
    assert!(!controller.status_bar_hidden());

    // Nothing scheduled survives the teardown
    let events = root.events();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(root.events(), events);
    assert!(!controller.status_bar_hidden());
    assert_eq!(
        events,
        vec![
            RootEvent::Inserted {
                frame: root.bounds()
            },
            RootEvent::StatusBarHidden(true),
            RootEvent::StatusBarHidden(false),
            RootEvent::Removed,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn reattach_after_dismissal_starts_a_fresh_instance() {
    let (controller, root) = presented();
    sleep(Duration::from_millis(150)).await;
    controller.update_progress(1.0);
    sleep(Duration::from_secs(5)).await;
    assert!(!controller.is_presented());

    controller.attach(sample_config());
    assert!(controller.is_presented());
    let view = root.view().unwrap();
    assert_eq!(view.phase(), Phase::Entering);
    assert_eq!(view.visual().ring_fraction, 0.0);
}

#[tokio::test(start_paused = true)]
async fn watchers_observe_presentation_and_status_bar() {
    let host = Arc::new(HeadlessHost::with_bounds(ScreenRect {
        x: 0,
        y: 0,
        width: 1170,
        height: 2532,
    }));
    let controller = IndicatorController::new(host);
    let mut presented_rx = controller.subscribe_presented();
    let mut status_rx = controller.subscribe_status_bar();

    controller.attach(sample_config());
    assert!(presented_rx.has_changed().unwrap());
    assert!(*presented_rx.borrow_and_update());

    sleep(Duration::from_millis(150)).await;
    controller.update_progress(1.0);
    sleep(Duration::from_millis(600)).await;
    assert!(*status_rx.borrow_and_update());

    sleep(Duration::from_secs(5)).await;
    assert!(!*presented_rx.borrow_and_update());
    assert!(!*status_rx.borrow_and_update());
}

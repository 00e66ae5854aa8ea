//! Indicator lifecycle controller.
//!
//! The controller is the single source of truth for presentation state.
//! The host owns it explicitly and passes it where needed; observers
//! subscribe to its `watch` channels instead of reading ambient globals.
//! At most one indicator is presented at a time: presence of the handle in
//! the slot is the uniqueness guard.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use islet_types::IndicatorConfig;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::{DismissError, PresentError};
use crate::host::{HostEnvironment, RootContainer};
use crate::sequence;
use crate::view::IndicatorView;

/// The one live presentation: surface, root it was inserted into, and the
/// sequencing task driving it
struct IndicatorHandle {
    root: Arc<dyn RootContainer>,
    view: IndicatorView,
    updates: mpsc::UnboundedSender<f64>,
    task: JoinHandle<()>,
}

struct ControllerInner {
    host: Arc<dyn HostEnvironment>,
    slot: Mutex<Option<IndicatorHandle>>,
    presented_tx: watch::Sender<bool>,
    progress_tx: watch::Sender<f64>,
    status_bar_tx: watch::Sender<bool>,
}

/// Owns the lifecycle of the single presented indicator.
///
/// All imperative operations are infallible by contract: guard conditions
/// (double attach, remove while absent, no resolvable root) are logged
/// no-ops. The `try_` variants surface the reason instead.
#[derive(Clone)]
pub struct IndicatorController {
    inner: Arc<ControllerInner>,
}

impl IndicatorController {
    pub fn new(host: Arc<dyn HostEnvironment>) -> Self {
        let (presented_tx, _) = watch::channel(false);
        let (progress_tx, _) = watch::channel(0.0);
        let (status_bar_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(ControllerInner {
                host,
                slot: Mutex::new(None),
                presented_tx,
                progress_tx,
                status_bar_tx,
            }),
        }
    }

    /// Present an indicator bound to `config` and start its animation
    /// sequence. Ignored (with an info log) if one is already presented or
    /// no root container can be resolved.
    pub fn attach(&self, config: IndicatorConfig) {
        if let Err(err) = self.try_attach(config) {
            tracing::info!(%err, "attach ignored");
        }
    }

    /// Fallible variant of [`Self::attach`]
    pub fn try_attach(&self, config: IndicatorConfig) -> Result<(), PresentError> {
        let mut slot = self.inner.lock_slot();
        if slot.is_some() {
            return Err(PresentError::AlreadyPresented);
        }

        let root = self
            .inner
            .host
            .active_root()
            .ok_or(PresentError::RootUnavailable)?;

        // Full-screen frame; a zero rect from a degraded host is tolerated
        let frame = root.bounds();
        let view = IndicatorView::new(config);
        root.insert_overlay(view.clone(), frame);

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let link = ControllerLink {
            inner: Arc::downgrade(&self.inner),
        };
        let task = tokio::spawn(sequence::run(view.clone(), updates_rx, link));

        *slot = Some(IndicatorHandle {
            root,
            view,
            updates: updates_tx,
            task,
        });
        drop(slot);

        self.inner.presented_tx.send_replace(true);
        tracing::debug!(?frame, "indicator attached");
        Ok(())
    }

    /// Publish a new progress value.
    ///
    /// No validation: out-of-range values are stored as-is and clamped by
    /// consumers. The value is always recorded, even with nothing presented;
    /// forwarding into the sequencing task only happens while an indicator
    /// is live.
    pub fn update_progress(&self, value: f64) {
        self.inner.progress_tx.send_replace(value);

        let slot = self.inner.lock_slot();
        if let Some(handle) = slot.as_ref() {
            // Unbounded so every value is delivered in order; coalescing to
            // latest-only could drop the completion edge.
            let _ = handle.updates.send(value);
        }
    }

    /// Tear down the presented indicator. Ignored (with an info log) if
    /// nothing is presented.
    pub fn remove(&self) {
        if let Err(err) = self.try_remove() {
            tracing::info!(%err, "remove ignored");
        }
    }

    /// Fallible variant of [`Self::remove`]
    pub fn try_remove(&self) -> Result<(), DismissError> {
        let handle = self
            .inner
            .lock_slot()
            .take()
            .ok_or(DismissError::NotPresented)?;
        self.inner.teardown(handle);
        Ok(())
    }

    /// Plain settable flag; forwarded to the root while presented
    pub fn set_status_bar_hidden(&self, hidden: bool) {
        self.inner.set_status_bar_hidden(hidden);
    }

    pub fn is_presented(&self) -> bool {
        *self.inner.presented_tx.borrow()
    }

    pub fn progress(&self) -> f64 {
        *self.inner.progress_tx.borrow()
    }

    pub fn status_bar_hidden(&self) -> bool {
        *self.inner.status_bar_tx.borrow()
    }

    /// View handle for the presented indicator, if any
    pub fn presented_view(&self) -> Option<IndicatorView> {
        self.inner
            .lock_slot()
            .as_ref()
            .map(|handle| handle.view.clone())
    }

    pub fn subscribe_presented(&self) -> watch::Receiver<bool> {
        self.inner.presented_tx.subscribe()
    }

    pub fn subscribe_progress(&self) -> watch::Receiver<f64> {
        self.inner.progress_tx.subscribe()
    }

    pub fn subscribe_status_bar(&self) -> watch::Receiver<bool> {
        self.inner.status_bar_tx.subscribe()
    }
}

impl ControllerInner {
    fn lock_slot(&self) -> MutexGuard<'_, Option<IndicatorHandle>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status_bar_hidden(&self, hidden: bool) {
        self.status_bar_tx.send_replace(hidden);
        let slot = self.lock_slot();
        if let Some(handle) = slot.as_ref() {
            handle.root.set_status_bar_hidden(hidden);
        }
    }

    fn teardown(&self, handle: IndicatorHandle) {
        // Aborting the sequencing task cancels every pending timed step as
        // a unit. Self-dismissal also lands here: the abort then takes
        // effect at the task's next await, after which nothing remains.
        handle.task.abort();

        let was_hidden = self.status_bar_tx.send_replace(false);
        if was_hidden {
            handle.root.set_status_bar_hidden(false);
        }

        handle.view.mark_dismissed();
        handle.root.remove_overlay();
        self.presented_tx.send_replace(false);
        tracing::debug!("indicator removed");
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Some(handle) = self.lock_slot().take() {
            handle.task.abort();
        }
    }
}

/// Weak callback link handed to the sequencing task.
///
/// Holds no strong reference, so a dropped controller simply turns every
/// callback into a no-op instead of keeping the presentation alive.
pub(crate) struct ControllerLink {
    inner: Weak<ControllerInner>,
}

impl ControllerLink {
    pub(crate) fn set_status_bar_hidden(&self, hidden: bool) {
        if let Some(inner) = self.inner.upgrade() {
            inner.set_status_bar_hidden(hidden);
        }
    }

    /// Terminal step: request removal from the controller
    pub(crate) fn dismiss(&self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let taken = inner.lock_slot().take();
        match taken {
            Some(handle) => inner.teardown(handle),
            // Raced with a manual remove(); nothing left to do
            None => tracing::debug!("dismiss after teardown ignored"),
        }
    }
}

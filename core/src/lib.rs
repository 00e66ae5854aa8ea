pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod phase;
pub mod sequence;
pub mod view;

#[cfg(test)]
mod controller_tests;

// Re-exports for convenience
pub use config::AppConfigExt;
pub use controller::IndicatorController;
pub use error::{DismissError, PresentError};
pub use host::{
    DetachedHost, HeadlessHost, HeadlessRoot, HostEnvironment, RootContainer, RootEvent,
    ScreenRect,
};
pub use phase::{Phase, VisualParams};
pub use sequence::{DISMISS_SCHEDULE, DismissAction, DismissStep, ENTER_DELAY_MS};
pub use view::IndicatorView;

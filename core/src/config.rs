//! App config persistence.

use islet_types::AppConfig;

/// Load/save extension for [`AppConfig`], backed by the platform config
/// directory via confy.
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn save(self);
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load("islet", None).unwrap_or_default()
    }

    fn save(self) {
        if let Err(err) = confy::store("islet", None, self) {
            tracing::warn!(%err, "failed to save configuration");
        }
    }
}

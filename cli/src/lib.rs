pub mod host;
pub mod logging;

pub use host::TerminalHost;

//! Centralised logging metadata (event names, shared keys, etc.).

/// Canonical event names used across the crate.
pub mod events {
    /// Logging lifecycle.
    pub const LOG_INIT: &str = "log.init";
    pub const LOG_RETENTION: &str = "log.retention";
    pub const LOG_CLEANUP: &str = "log.cleanup";
    pub const LOG_CLEANUP_FAILED: &str = "log.cleanup_failed";

    /// Configuration.
    pub const CONFIG_LOADED: &str = "config.loaded";

    /// Build information record.
    pub const BUILD_INFO: &str = "app.build_info";
}

//! Static build information for the application.
//!
//! [`APP_INFO`] holds the name, bundle identifier, version and build number
//! resolved by `build.rs` from `app-info.yaml` and the `APP_*` build-time
//! environment overrides.

pub mod build_info;
#[cfg(test)]
mod build_checks;
pub mod util;

pub use build_info::{BuildInfo, APP_INFO, BUILD_COMMIT, BUILD_TIMESTAMP};

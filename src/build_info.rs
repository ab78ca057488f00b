//! Build-time metadata exposed at runtime.
//!
//! The values are resolved by `build.rs` and baked into the binary through
//! `cargo:rustc-env`, so the record below is a plain `static`: initialised once
//! at compile time, never mutated, readable from any thread without locking.

use std::fmt;

use crate::util::logging::standards::events;

pub const BUILD_COMMIT: &str = env!("APP_BUILD_COMMIT");
pub const BUILD_TIMESTAMP: &str = env!("APP_BUILD_TIMESTAMP");

/// The process-wide build information record.
pub static APP_INFO: BuildInfo = BuildInfo::new(
    env!("APP_BUILD_NAME"),
    env!("APP_BUILD_IDENTIFIER"),
    env!("APP_BUILD_VERSION"),
    parse_build_number(env!("APP_BUILD_NUMBER")),
);

/// Name, bundle identifier, version and build number of a compiled artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuildInfo {
    name: &'static str,
    identifier: &'static str,
    version: &'static str,
    build: u16,
}

impl BuildInfo {
    /// Panics on an empty text field. Inside a `static` initialiser that is a
    /// compile error, so an initialised record always has all three set.
    pub const fn new(
        name: &'static str,
        identifier: &'static str,
        version: &'static str,
        build: u16,
    ) -> Self {
        assert!(!name.is_empty(), "build info: name must not be empty");
        assert!(!identifier.is_empty(), "build info: identifier must not be empty");
        assert!(!version.is_empty(), "build info: version must not be empty");

        Self {
            name,
            identifier,
            version,
            build,
        }
    }

    pub fn current() -> &'static BuildInfo {
        &APP_INFO
    }

    /// Human-readable product name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reverse-DNS bundle identifier, e.g. `com.example.drawing`.
    pub const fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// Version string (major, minor, patch).
    pub const fn version(&self) -> &'static str {
        self.version
    }

    pub const fn build(&self) -> u16 {
        self.build
    }

    /// Labelled lines for an about screen.
    pub fn about_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.to_string()),
            ("Identifier", self.identifier.to_string()),
            ("Version", self.version.to_string()),
            ("Build", self.build.to_string()),
            ("Commit", BUILD_COMMIT.to_string()),
            ("Built at", BUILD_TIMESTAMP.to_string()),
        ]
    }

    /// [`about_lines`](Self::about_lines) as aligned `Label: value` text.
    pub fn about_screen(&self) -> String {
        self.about_lines()
            .into_iter()
            .map(|(label, value)| format!("{:<12}{}", format!("{label}:"), value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.build)
    }
}

/// Human-readable summary combining the record and build provenance.
pub fn summary() -> String {
    format!(
        "{} {} (build {}, commit {}, built at {})",
        APP_INFO.name, APP_INFO.version, APP_INFO.build, BUILD_COMMIT, BUILD_TIMESTAMP
    )
}

pub fn log_build_info() {
    tracing::info!(
        event = events::BUILD_INFO,
        app_name = APP_INFO.name,
        identifier = APP_INFO.identifier,
        version = APP_INFO.version,
        build = APP_INFO.build,
        commit = BUILD_COMMIT,
        built_at = BUILD_TIMESTAMP
    );
}

/// Decodes the decimal build counter handed over by `build.rs`.
///
/// Evaluated in const context for [`APP_INFO`], so malformed input stops the
/// compilation instead of silently becoming zero.
pub const fn parse_build_number(raw: &str) -> u16 {
    let bytes = raw.as_bytes();
    assert!(!bytes.is_empty(), "build number is empty");

    let mut value: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit.is_ascii_digit(), "build number must be decimal digits");
        value = value * 10 + (digit - b'0') as u32;
        assert!(value <= u16::MAX as u32, "build number does not fit in u16");
        i += 1;
    }

    value as u16
}

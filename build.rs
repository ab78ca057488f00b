#[path = "src/build_checks.rs"]
mod build_checks;

use anyhow::{Context, Result};
use build_checks::{check_identifier, check_text, check_version, parse_build_number};
use chrono::Utc;
use serde::Deserialize;
use std::{env, fs, path::Path, process::Command};

const MANIFEST: &str = "app-info.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppManifest {
    name: Option<String>,
    identifier: Option<String>,
    version: Option<String>,
    build: Option<u16>,
}

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed={MANIFEST}");
    println!("cargo:rerun-if-changed=src/build_checks.rs");
    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");
    for var in ["APP_NAME", "APP_IDENTIFIER", "APP_VERSION", "APP_BUILD_NUMBER"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let manifest = read_manifest(Path::new(MANIFEST))?;
    set_app_info(manifest)?;
    set_build_metadata();

    Ok(())
}

fn read_manifest(path: &Path) -> Result<AppManifest> {
    if !path.exists() {
        println!("cargo:warning={} not found, using Cargo package metadata", path.display());
        return Ok(AppManifest::default());
    }

    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn set_app_info(manifest: AppManifest) -> Result<()> {
    let name = env_override("APP_NAME")
        .or(non_empty(manifest.name))
        .or_else(|| env_override("CARGO_PKG_NAME"))
        .context("application name is empty")?;
    check_text("application name", &name)?;

    let identifier = env_override("APP_IDENTIFIER")
        .or(non_empty(manifest.identifier))
        .context("bundle identifier is missing: set `identifier` in app-info.yaml or APP_IDENTIFIER")?;
    check_identifier(&identifier)?;

    let version = env_override("APP_VERSION")
        .or(non_empty(manifest.version))
        .or_else(|| non_empty(fs::read_to_string("VERSION").ok()))
        .or_else(|| env_override("CARGO_PKG_VERSION"))
        .context("application version is empty")?;
    check_version(&version)?;

    let build = match env_override("APP_BUILD_NUMBER") {
        Some(raw) => parse_build_number(&raw).context("invalid APP_BUILD_NUMBER")?,
        None => manifest.build.unwrap_or(0),
    };

    println!("cargo:rustc-env=APP_BUILD_NAME={name}");
    println!("cargo:rustc-env=APP_BUILD_IDENTIFIER={identifier}");
    println!("cargo:rustc-env=APP_BUILD_VERSION={version}");
    println!("cargo:rustc-env=APP_BUILD_NUMBER={build}");

    Ok(())
}

fn set_build_metadata() {
    let git_commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    println!("cargo:rustc-env=APP_BUILD_COMMIT={}", git_commit);
    println!("cargo:rustc-env=APP_BUILD_TIMESTAMP={}", build_timestamp);
}

fn env_override(key: &str) -> Option<String> {
    non_empty(env::var(key).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

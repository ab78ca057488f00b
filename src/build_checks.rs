//! Checks applied by `build.rs` to the metadata before it is baked in.
//!
//! `build.rs` pulls this file in with `#[path]`; the library includes it under
//! `cfg(test)` only, so the tests below run with `cargo test`.

use anyhow::{bail, Context, Result};

/// Text fields travel through `cargo:rustc-env`, which ends at the first
/// newline, so control characters are refused outright.
pub fn check_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        bail!("{field} is empty");
    }
    if let Some(c) = value.chars().find(|c| c.is_control()) {
        bail!("{field} `{}` contains control character {:?}", value.escape_debug(), c);
    }
    Ok(())
}

/// Reverse-DNS: at least two dot-separated labels, each starting and ending
/// with an ASCII alphanumeric and otherwise made of alphanumerics, `-`, `_`.
pub fn check_identifier(identifier: &str) -> Result<()> {
    check_text("bundle identifier", identifier)?;

    let labels: Vec<&str> = identifier.split('.').collect();
    let well_formed = labels.len() >= 2 && labels.iter().all(|label| is_label(label));

    if !well_formed {
        bail!("bundle identifier `{identifier}` is not reverse-DNS style");
    }
    Ok(())
}

fn is_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || *b == b'-' || *b == b'_')
        }
        _ => false,
    }
}

/// `major.minor.patch`, numeric without leading zeros, optionally followed by
/// a non-empty `-pre` and/or `+meta` suffix.
pub fn check_version(version: &str) -> Result<()> {
    check_text("version", version)?;

    let (rest, meta) = match version.split_once('+') {
        Some((rest, meta)) => (rest, Some(meta)),
        None => (version, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let parts: Vec<&str> = core.split('.').collect();
    let core_ok = parts.len() == 3 && parts.iter().all(|part| is_numeric_component(part));
    let pre_ok = pre.map_or(true, is_suffix);
    let meta_ok = meta.map_or(true, is_suffix);

    if !(core_ok && pre_ok && meta_ok) {
        bail!("version `{version}` is not major.minor.patch[-pre][+meta]");
    }
    Ok(())
}

fn is_numeric_component(part: &str) -> bool {
    !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'))
}

// dot-separated, non-empty identifiers of alphanumerics and `-`
fn is_suffix(suffix: &str) -> bool {
    !suffix.is_empty()
        && suffix.split('.').all(|ident| {
            !ident.is_empty() && ident.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
        })
}

pub fn parse_build_number(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .with_context(|| format!("build number `{raw}` is not a number in 0..=65535"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_accepts_plain_names() {
        assert!(check_text("name", "Drawing").is_ok());
        assert!(check_text("name", "Drawing Pro 2").is_ok());
    }

    #[test]
    fn test_text_rejects_control_characters() {
        assert!(check_text("name", "Line1\nLine2").is_err());
        assert!(check_text("name", "Line1\rLine2").is_err());
        assert!(check_text("name", "tab\there").is_err());
        assert!(check_text("name", "   ").is_err());
    }

    #[test]
    fn test_identifier_good() {
        assert!(check_identifier("com.example.drawing").is_ok());
        assert!(check_identifier("org.my-company.app_2").is_ok());
        assert!(check_identifier("io.x").is_ok());
    }

    #[test]
    fn test_identifier_bad() {
        assert!(check_identifier("drawing").is_err());
        assert!(check_identifier("com..drawing").is_err());
        assert!(check_identifier("com.example.").is_err());
        assert!(check_identifier("-.-").is_err());
        assert!(check_identifier("com.-example").is_err());
        assert!(check_identifier("com.example drawing").is_err());
        assert!(check_identifier("com.example\ndrawing").is_err());
    }

    #[test]
    fn test_version_good() {
        assert!(check_version("1.0.0").is_ok());
        assert!(check_version("0.10.3").is_ok());
        assert!(check_version("2.0.0-beta.1").is_ok());
        assert!(check_version("2.0.0+build.7").is_ok());
        assert!(check_version("2.0.0-rc-1+sha.1a2b3c").is_ok());
    }

    #[test]
    fn test_version_bad() {
        assert!(check_version("1.0").is_err());
        assert!(check_version("1.0.0.0").is_err());
        assert!(check_version("01.0.0").is_err());
        assert!(check_version("1.x.0").is_err());
        assert!(check_version("1.0.0-").is_err());
        assert!(check_version("1.0.0+").is_err());
        assert!(check_version("01.0.0-").is_err());
        assert!(check_version("1.0.0-beta..1").is_err());
        assert!(check_version("1.0.0\n").is_err());
    }

    #[test]
    fn test_build_number() {
        assert_eq!(parse_build_number("0").unwrap(), 0);
        assert_eq!(parse_build_number("42").unwrap(), 42);
        assert_eq!(parse_build_number("65535").unwrap(), u16::MAX);
        assert!(parse_build_number("65536").is_err());
        assert!(parse_build_number("-1").is_err());
        assert!(parse_build_number("forty").is_err());
    }
}

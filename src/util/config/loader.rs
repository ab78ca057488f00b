//! 配置加载
//! 读取 YAML 配置文件并应用环境变量覆盖

use super::types::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "APP_INFO_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从YAML文件读取配置
    pub fn read_yaml(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&config_str)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Config file location: `APP_INFO_CONFIG`, else `config.yaml` in the
    /// working directory.
    pub fn config_path() -> PathBuf {
        std::env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Reads `path` if it exists (defaults otherwise) and applies env
    /// overrides. Runs before the subscriber is installed, so nothing here
    /// logs; the caller reports the outcome once logging is up.
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::read_yaml(path)?
        } else {
            Config::default()
        };
        Self::apply_env_overrides(config)
    }

    /// 从环境变量读取配置覆盖
    pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
        if let Some(level) = non_empty_var("APP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(raw) = non_empty_var("APP_LOG_STRUCTURED") {
            let structured = parse_bool(&raw)
                .with_context(|| format!("APP_LOG_STRUCTURED expects a boolean, got `{raw}`"))?;
            config.logging.structured = Some(structured);
        }

        if let Some(dir) = non_empty_var("APP_LOG_DIR") {
            config.logging.file.directory = dir;
            config.logging.file.enabled = true;
        }

        Ok(config)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

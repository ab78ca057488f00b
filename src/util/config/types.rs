use serde::Deserialize;
use std::collections::HashMap;

/// Runtime configuration of the `app-info` binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub file: LogFileConfig,
    /// JSON log lines instead of plain text.
    #[serde(default)]
    pub structured: Option<bool>,
    #[serde(default)]
    pub level_config: Option<LevelConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: LogFileConfig::default(),
            structured: None,
            level_config: None,
        }
    }
}

/// 日志文件配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogFileConfig {
    pub enabled: bool,
    pub directory: String,
    pub retention_days: Option<u32>,
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: "logs".to_string(),
            retention_days: Some(7),
        }
    }
}

/// Per-target level overrides. Keys are module paths relative to the crate
/// (`build_info`, `util.log`) or raw targets prefixed with `target:`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelConfig {
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_level() -> String {
    "info".to_string()
}

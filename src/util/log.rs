use crate::util::config::{LevelConfig, LoggingConfig};
use crate::util::logging::standards::events;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::fmt::format::{Format, Full};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter::EnvFilter, Layer, Registry};

const CRATE_TARGET: &str = "app_info";
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Installs the global subscriber.
///
/// Console output goes to stderr so stdout stays free for the binary's own
/// output. When file logging is enabled a daily-rolling `<file_prefix>.<date>`
/// file is added and the returned guard must be kept alive until exit.
pub fn log_init_with_config(
    file_prefix: &str,
    config: &LoggingConfig,
) -> anyhow::Result<Option<WorkerGuard>> {
    let level_filter = parse_level(&config.level).unwrap_or(LevelFilter::INFO);
    let filter_expression = build_env_filter_expression(level_filter, config.level_config.as_ref());
    let use_json = config.structured.unwrap_or(false);

    let stderr_filter = EnvFilter::try_new(filter_expression.as_str())
        .unwrap_or_else(|_| EnvFilter::new(level_filter_to_str(level_filter)));

    if config.file.enabled {
        let log_dir = resolve_log_dir(&config.file.directory);
        std::fs::create_dir_all(&log_dir)?;

        let file_filter = EnvFilter::try_new(filter_expression.as_str())
            .unwrap_or_else(|_| EnvFilter::new(level_filter_to_str(level_filter)));
        let file_appender = daily(&log_dir, file_prefix);
        let (no_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if use_json {
            let stderr_layer = layer()
                .json()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(stderr_filter);

            let file_layer = layer()
                .json()
                .with_target(false)
                .with_ansi(false)
                .with_writer(no_blocking)
                .with_filter(file_filter);

            Registry::default()
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;
        } else {
            let stderr_layer = layer()
                .event_format(plain_format())
                .with_writer(io::stderr)
                .with_filter(stderr_filter);

            let file_layer = layer()
                .event_format(plain_format())
                .with_ansi(false)
                .with_writer(no_blocking)
                .with_filter(file_filter);

            Registry::default()
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;
        }

        tracing::info!(
            event = events::LOG_INIT,
            level = %config.level,
            console = true,
            file = true,
            directory = %log_dir.display(),
            rotation = "daily",
            structured = use_json
        );

        if let Some(retention) = config.file.retention_days {
            tracing::info!(event = events::LOG_RETENTION, days = retention);
            if let Err(e) = cleanup_old_logs(&log_dir, file_prefix, retention) {
                tracing::warn!(event = events::LOG_CLEANUP_FAILED, error = %e);
            }
        }

        Ok(Some(guard))
    } else {
        if use_json {
            let stderr_layer = layer()
                .json()
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(stderr_filter);

            Registry::default().with(stderr_layer).try_init()?;
        } else {
            let stderr_layer = layer()
                .event_format(plain_format())
                .with_writer(io::stderr)
                .with_filter(stderr_filter);

            Registry::default().with(stderr_layer).try_init()?;
        }

        tracing::info!(event = events::LOG_INIT, level = %config.level, console = true, file = false, structured = use_json);

        Ok(None)
    }
}

fn plain_format() -> Format<Full, ()> {
    Format::default()
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
}

// 相对路径基于当前工作目录
fn resolve_log_dir(directory: &str) -> PathBuf {
    let path = Path::new(directory);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

/// Removes rolled log files named `<file_prefix>.*` last written before the
/// start of the UTC day `retention_days` days ago. `0` keeps only today's
/// file, which is the one the appender is writing to. Returns the number of
/// files deleted.
pub fn cleanup_old_logs(
    log_dir: &Path,
    file_prefix: &str,
    retention_days: u32,
) -> anyhow::Result<usize> {
    if !log_dir.exists() {
        tracing::debug!("log directory does not exist: {}", log_dir.display());
        return Ok(0);
    }

    let cutoff = retention_cutoff(SystemTime::now(), retention_days);
    let rolled_prefix = format!("{file_prefix}.");

    let mut deleted_count = 0;
    let mut error_count = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();

        // 只处理本应用滚动出的日志文件
        let is_ours = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(&rolled_prefix));
        if !is_ours {
            continue;
        }

        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata
            .modified()
            .or_else(|_| metadata.created())
            .unwrap_or_else(|_| SystemTime::now());
        if modified >= cutoff {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                deleted_count += 1;
                tracing::debug!("removed expired log: {}", path.display());
            }
            Err(e) => {
                error_count += 1;
                tracing::warn!("failed to remove log file: {} - {}", path.display(), e);
            }
        }
    }

    if deleted_count > 0 {
        tracing::info!(event = events::LOG_CLEANUP, deleted = deleted_count);
    }
    if error_count > 0 {
        tracing::warn!("{} log files could not be removed", error_count);
    }

    Ok(deleted_count)
}

// daily() names files by UTC date, so day boundaries are UTC midnights
fn retention_cutoff(now: SystemTime, retention_days: u32) -> SystemTime {
    let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let start_of_today = UNIX_EPOCH + Duration::from_secs(since_epoch - since_epoch % SECS_PER_DAY);
    start_of_today
        .checked_sub(Duration::from_secs(u64::from(retention_days) * SECS_PER_DAY))
        .unwrap_or(UNIX_EPOCH)
}

pub(crate) fn build_env_filter_expression(
    default_level: LevelFilter,
    level_config: Option<&LevelConfig>,
) -> String {
    let mut directives = vec![level_filter_to_str(default_level).to_string()];

    if let Some(cfg) = level_config {
        // HashMap 无序，排序保证表达式稳定
        let mut overrides: Vec<_> = cfg.overrides.iter().collect();
        overrides.sort();
        for (target, level_str) in overrides {
            if let Some(level) = parse_level(level_str) {
                directives.push(format!(
                    "{}={}",
                    normalize_directive_target(target),
                    level_filter_to_str(level)
                ));
            }
        }
    }

    directives.join(",")
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        _ => None,
    }
}

fn level_filter_to_str(level: LevelFilter) -> &'static str {
    match level {
        LevelFilter::OFF => "off",
        LevelFilter::ERROR => "error",
        LevelFilter::WARN => "warn",
        LevelFilter::INFO => "info",
        LevelFilter::DEBUG => "debug",
        LevelFilter::TRACE => "trace",
    }
}

fn normalize_directive_target(target: &str) -> String {
    if let Some(raw) = target.strip_prefix("target:") {
        raw.to_string()
    } else if target.contains("::") {
        target.to_string()
    } else {
        let path = target.replace('.', "::");
        format!("{CRATE_TARGET}::{path}")
    }
}

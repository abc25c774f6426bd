//! Logging initialization
//!
//! Human-readable logs go to stderr so `--json` output on stdout stays parseable.
//! Setting `AGENTCTL_LOG_DIR` adds a daily-rotated file log.

use lib_utils::get_env_opt;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "agentctl=info,agent_engine=info,warn";
const VERBOSE_FILTER: &str = "agentctl=debug,agent_engine=debug,lib_evm=debug,info";

/// Logging configuration from environment variables
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for the rotated file log, if any
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_env(verbose: bool) -> Self {
        let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        Self {
            log_level: get_env_opt("RUST_LOG").unwrap_or_else(|| fallback.to_string()),
            log_dir: get_env_opt("AGENTCTL_LOG_DIR").map(PathBuf::from),
        }
    }
}

/// Initialize the logging system.
///
/// The returned guard flushes the file log on drop; hold it for the life of the process.
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let config = LogConfig::from_env(verbose);

    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, "agentctl.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false); // No ANSI codes in log files
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log directory {}: {}", dir.display(), e);
                (None, None)
            }
        },
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        log_level = %config.log_level,
        log_dir = ?config.log_dir,
        "Logging initialized"
    );

    guard
}

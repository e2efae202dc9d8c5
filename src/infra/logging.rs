//! # Logging Module / 日志模块
//!
//! Installs the global tracing subscriber. Diagnostics go to stderr so they
//! never mix with the reports printed on stdout.
//!
//! 安装全局 tracing 订阅器。诊断信息写入 stderr，以免与 stdout 上的报告混在一起。

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a filter directive, e.g. `langpack_inspector=debug`.
pub const LOG_ENV: &str = "LANGPACK_INSPECTOR_LOG";

static INSTALLED: OnceLock<()> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter in LANGPACK_INSPECTOR_LOG: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing_subscriber::util::TryInitError),
}

/// Initializes logging once; later calls are no-ops.
///
/// `LANGPACK_INSPECTOR_LOG` wins when set. Otherwise `verbose` selects
/// `debug` and the default is `warn`.
///
/// 初始化日志，仅执行一次；之后的调用不执行任何操作。
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = build_env_filter(verbose)?;
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()?;
    let _ = INSTALLED.set(());

    tracing::debug!("logging initialized");
    Ok(())
}

fn build_env_filter(verbose: bool) -> Result<EnvFilter, LoggingError> {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => Ok(EnvFilter::try_new(directive)?),
        _ => {
            let level = if verbose { "debug" } else { "warn" };
            Ok(EnvFilter::new(format!("langpack_inspector={level},warn")))
        }
    }
}

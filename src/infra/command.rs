//! # Command Execution Module / 命令执行模块
//!
//! Runs host tools (`dpkg-query`, `dpkg`) and captures their output with a
//! deadline, so a hung package database never blocks a scan.
//!
//! 运行主机工具（`dpkg-query`、`dpkg`）并在截止时间内捕获其输出，
//! 以免挂起的软件包数据库阻塞扫描。

use anyhow::{Context, Result};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::infra::t;

/// Output of a finished process.
/// 已结束进程的输出。
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Spawns a command and captures stdout and stderr separately.
/// Both streams are read concurrently, line by line.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// The exit status and both captured streams.
///
/// 派生一个命令并分别捕获 stdout 和 stderr。
/// 两个流被并发地逐行读取。
pub async fn spawn_and_capture(mut cmd: Command) -> Result<CapturedOutput> {
    let program = program_name(&cmd);
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| t!("command.spawn_failed", program = program).to_string())?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!(t!("command.capture_stdout_failed").to_string()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!(t!("command.capture_stderr_failed").to_string()))?;

    let stdout_handle = tokio::spawn(read_lines(stdout));
    let stderr_handle = tokio::spawn(read_lines(stderr));

    let status = child.wait().await?;

    // Join the readers so nothing written just before exit is lost.
    // 等待读取任务结束，确保退出前写入的内容不会丢失。
    let stdout = stdout_handle.await.unwrap_or_else(|e| {
        tracing::warn!("failed to join stdout task: {}", e);
        String::new()
    });
    let stderr = stderr_handle.await.unwrap_or_else(|e| {
        tracing::warn!("failed to join stderr task: {}", e);
        String::new()
    });

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

/// Like [`spawn_and_capture`], but gives up after `timeout`; the child is killed on drop.
/// 与 [`spawn_and_capture`] 相同，但在 `timeout` 后放弃；子进程在丢弃时被终止。
pub async fn capture_with_timeout(cmd: Command, timeout: Duration) -> Result<CapturedOutput> {
    let program = program_name(&cmd);
    match tokio::time::timeout(timeout, spawn_and_capture(cmd)).await {
        Ok(result) => result,
        Err(_) => anyhow::bail!(
            t!("command.timed_out", program = program, timeout = timeout.as_secs()).to_string()
        ),
    }
}

async fn read_lines<R: AsyncRead + Unpin>(stream: R) -> String {
    let mut output = String::new();
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

fn program_name(cmd: &Command) -> String {
    cmd.as_std().get_program().to_string_lossy().into_owned()
}

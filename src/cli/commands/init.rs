//! # Init Command Module / 初始化命令模块
//!
//! Writes a commented default configuration file.
//! 写入带注释的默认配置文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use crate::cli::InitArgs;
use crate::core::config::{DEFAULT_CONFIG, default_path};
use crate::infra::t;

/// Executes the init command.
///
/// Without `--output` the file goes to the default configuration path. An
/// existing file is only replaced with `--force` or after confirmation on an
/// interactive terminal.
///
/// 执行 init 命令。未指定 `--output` 时写入默认配置路径。
/// 已存在的文件只有在使用 `--force` 或在交互式终端上确认后才会被替换。
pub fn execute(args: &InitArgs, locale: &str) -> Result<()> {
    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_path().with_context(|| t!("init.no_config_dir", locale = locale).to_string())?,
    };

    if output.exists() && !args.force && !confirm_overwrite(&output, locale)? {
        println!(
            "{}",
            t!("init.file_exists", locale = locale, path = output.display()).red()
        );
        println!("{}", t!("init.use_force", locale = locale).yellow());
        return Ok(());
    }

    write_config(&output, locale)?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init.success", locale = locale, path = output.display()).bold()
    );
    println!("{}", t!("init.next_steps", locale = locale));
    Ok(())
}

/// Asks before overwriting. Never prompts when stdin is not a terminal.
/// 覆盖前询问。stdin 不是终端时从不提示。
fn confirm_overwrite(path: &Path, locale: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("init.overwrite_prompt", locale = locale, path = path.display()).to_string())
        .default(false)
        .interact()
        .with_context(|| t!("init.confirmation_failed", locale = locale).to_string())
}

fn write_config(output: &Path, locale: &str) -> Result<()> {
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            t!("init.create_parent_dir_failed", locale = locale, path = parent.display()).to_string()
        })?;
    }
    fs::write(output, DEFAULT_CONFIG)
        .with_context(|| t!("init.write_failed", locale = locale, path = output.display()).to_string())
}

//! # Scan Command Module / 扫描命令模块
//!
//! Enumerates the installed catalogs for a language, scans them and prints
//! the coverage, optionally writing HTML and JSON reports.
//!
//! 枚举某种语言已安装的目录，扫描并打印覆盖率，可选地写出 HTML 和 JSON 报告。

use anyhow::Result;
use chrono::Utc;
use colored::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::cli::ScanArgs;
use crate::core::aggregate::aggregate;
use crate::core::config::{InspectorConfig, TemplateConfig};
use crate::core::scanner::{self, ScanOptions};
use crate::infra::packages;
use crate::infra::t;
use crate::infra::templates::TemplateProvider;
use crate::reporting::{self, console};

/// Applies `--templates` and `--template-dir` on top of the configured template settings.
/// 在配置的模板设置之上应用 `--templates` 和 `--template-dir`。
pub fn effective_template_config(args: &ScanArgs, config: &TemplateConfig) -> TemplateConfig {
    let mut templates = config.clone();
    if args.templates {
        templates.enabled = true;
    }
    if let Some(directory) = &args.template_dir {
        templates.enabled = true;
        templates.directory = Some(directory.clone());
    }
    templates
}

/// Executes the scan command.
///
/// # Arguments
/// * `args` - Parsed `scan` arguments
/// * `config` - Loaded configuration
/// * `locale` - UI language for messages
pub async fn execute(args: ScanArgs, config: &InspectorConfig, locale: &str) -> Result<()> {
    let system_language = packages::system_language();
    let lang_code = args
        .lang_code
        .clone()
        .unwrap_or_else(|| system_language.clone());

    let templates = effective_template_config(&args, &config.templates);
    let provider = TemplateProvider::from_config(&templates)?;
    tracing::debug!(enabled = provider.is_enabled(), "template comparison");

    let installed = packages::list_installed_langpacks().await;
    if !installed.iter().any(|package| package.provides(&lang_code)) {
        tracing::warn!(lang = %lang_code, "no installed language pack provides this language");
    }
    let records = packages::enumerate(&config.locale_root, &lang_code, &installed).await;
    if records.is_empty() {
        println!(
            "{}",
            t!(
                "scan.nothing_found",
                locale = locale,
                code = lang_code,
                root = config.locale_root.display()
            )
            .yellow()
        );
    } else {
        println!(
            "{}",
            t!("scan.starting", locale = locale, count = records.len(), code = lang_code)
        );
    }

    let options = ScanOptions {
        jobs: args.jobs.filter(|jobs| *jobs > 0).unwrap_or_else(|| config.jobs()),
        template_timeout: Duration::from_secs(templates.timeout_secs),
        outdated_after_days: config.outdated_after_days,
        now: Utc::now(),
    };

    // Ctrl-C abandons the files that have not been processed yet.
    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted; abandoning remaining catalogs");
                cancel.cancel();
            }
        }
    });

    let report = scanner::scan(records, Arc::new(provider), &options, cancel).await;
    interrupt.abort();

    let report = match &args.filter {
        Some(query) => report.filtered(query),
        None => report,
    };
    let summary = aggregate(&report.records());

    let primary = summary.summary_or_empty(args.lang_code.as_deref(), &system_language);
    console::print_locale_summary(&primary, locale);
    for other in summary.locales.iter().filter(|other| other.locale != primary.locale) {
        console::print_locale_summary(other, locale);
    }
    console::print_scan(&report, &config.launchpad_url, locale);
    console::print_failures(&report.failures, locale);

    if let Some(path) = &args.html {
        reporting::generate_html_report(&report, &summary, &config.launchpad_url, path, locale)?;
        println!("\n{}", t!("scan.html_written", locale = locale, path = path.display()).green());
    }
    if let Some(path) = &args.json {
        reporting::write_json_report(&report, &summary, path, locale)?;
        println!("{}", t!("scan.json_written", locale = locale, path = path.display()).green());
    }
    Ok(())
}

//! # Inspect Command Module / 检查命令模块
//!
//! Analyzes a single `.mo` or `.po` file, optionally against a local `.pot`
//! template.
//!
//! 分析单个 `.mo` 或 `.po` 文件，可选地与本地 `.pot` 模板比较。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::*;

use crate::cli::InspectArgs;
use crate::core::config::InspectorConfig;
use crate::core::coverage;
use crate::core::models::{Catalog, TemplateReference};
use crate::core::{po, scanner};
use crate::infra::t;
use crate::reporting::console;

/// Reads the template at `args.template`, if any, for the catalog's domain and locale.
async fn load_template(args: &InspectArgs, catalog: &Catalog, locale: &str) -> Result<Option<TemplateReference>> {
    let Some(path) = &args.template else {
        return Ok(None);
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| t!("inspect.template_read_failed", locale = locale, path = path.display()).to_string())?;
    let modified = tokio::fs::metadata(path)
        .await
        .and_then(|meta| meta.modified())
        .ok()
        .map(DateTime::<Utc>::from);
    let template = po::parse_template(
        &text,
        &catalog.domain,
        catalog.locale.as_deref().unwrap_or_default(),
        modified,
    )?;
    Ok(Some(template))
}

/// Executes the inspect command.
///
/// # Errors
/// Fails when the catalog cannot be read or parsed, or when the given
/// template cannot be read.
pub async fn execute(args: InspectArgs, config: &InspectorConfig, locale: &str) -> Result<()> {
    let catalog = scanner::load_catalog(&args.file).await?;
    let template = load_template(&args, &catalog, locale).await?;
    let result = coverage::analyze(&catalog, template.as_ref());

    console::print_catalog(&catalog, &result, args.show_entries, locale);

    if coverage::is_outdated_by_age(&catalog, Utc::now(), config.outdated_after_days) {
        println!(
            "\n{}",
            t!("inspect.outdated", locale = locale, days = config.outdated_after_days).yellow()
        );
    }
    Ok(())
}

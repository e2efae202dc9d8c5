//! # JSON Export Module / JSON 导出模块
//!
//! Machine-readable form of a scan for other tools.
//! 供其他工具使用的机器可读扫描结果。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::aggregate::Aggregate;
use crate::core::scanner::{CatalogReport, ScanFailure, ScanReport};
use crate::infra::t;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: &'a Aggregate,
    pub catalogs: &'a [CatalogReport],
    pub failures: &'a [ScanFailure],
    pub skipped: usize,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a ScanReport, aggregate: &'a Aggregate, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            summary: aggregate,
            catalogs: &report.catalogs,
            failures: &report.failures,
            skipped: report.skipped,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes the scan as pretty-printed JSON.
/// 将扫描结果写为格式化的 JSON。
pub fn write_json_report(
    report: &ScanReport,
    aggregate: &Aggregate,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let json = JsonReport::new(report, aggregate, Utc::now()).to_json()?;
    fs::write(output_path, json).with_context(|| {
        t!("json_report.write_failed", locale = locale, path = output_path.display()).to_string()
    })?;
    tracing::info!(path = %output_path.display(), "wrote JSON report");
    Ok(())
}

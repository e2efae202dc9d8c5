//! # Scanner Module / 扫描模块
//!
//! Processes a set of catalog files concurrently: read, parse, optionally
//! compare with the upstream template, and analyze. Files are independent; a
//! corrupt catalog is reported as a failure for that file only.
//!
//! 并发处理一组目录文件：读取、解析、可选地与上游模板比较并分析。
//! 文件之间相互独立；损坏的目录只会作为该文件的失败被报告。

use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::aggregate::CoverageRecord;
use crate::core::coverage::{self, Coverage, DEFAULT_OUTDATED_AFTER_DAYS};
use crate::core::error::{ErrorKind, InspectError, Result};
use crate::core::models::{Catalog, CatalogRecord, Package};
use crate::core::{mo, po};
use crate::infra::templates::{TemplateSource, fetch_with_timeout};

/// Settings for one scan.
/// 单次扫描的设置。
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Maximum number of catalogs processed at once.
    pub jobs: usize,
    pub template_timeout: Duration,
    pub outdated_after_days: i64,
    /// Reference time for the age check.
    pub now: DateTime<Utc>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            jobs: num_cpus::get(),
            template_timeout: Duration::from_secs(10),
            outdated_after_days: DEFAULT_OUTDATED_AFTER_DAYS,
            now: Utc::now(),
        }
    }
}

/// Everything known about one successfully analyzed catalog file.
/// 一个成功分析的目录文件的全部信息。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReport {
    pub path: PathBuf,
    pub domain: String,
    pub locale: String,
    pub package: Option<Package>,
    pub last_modified: Option<DateTime<Utc>>,
    pub coverage: Coverage,
    /// Not modified within `outdated_after_days`.
    pub outdated: bool,
    /// Entries decoded with replacement characters.
    pub decode_warnings: usize,
}

impl CatalogReport {
    pub fn record(&self) -> CoverageRecord {
        CoverageRecord::new(self.package.clone(), &self.locale, self.coverage.stats)
            .with_domain(&self.domain)
            .with_outdated(self.outdated)
    }
}

/// A file that could not be analyzed.
/// 无法分析的文件。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub kind: ErrorKind,
    pub message: String,
}

impl ScanFailure {
    fn new(path: PathBuf, error: &InspectError) -> Self {
        Self {
            path,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// Sorted by domain, then path.
    pub catalogs: Vec<CatalogReport>,
    pub failures: Vec<ScanFailure>,
    /// Files abandoned because the scan was cancelled.
    pub skipped: usize,
}

impl ScanReport {
    pub fn records(&self) -> Vec<CoverageRecord> {
        self.catalogs.iter().map(CatalogReport::record).collect()
    }

    /// Keeps catalogs whose domain contains `query`, case-insensitively.
    /// 保留域名包含 `query` 的目录（不区分大小写）。
    pub fn filtered(&self, query: &str) -> ScanReport {
        let query = query.to_lowercase();
        ScanReport {
            catalogs: self
                .catalogs
                .iter()
                .filter(|report| report.domain.to_lowercase().contains(&query))
                .cloned()
                .collect(),
            failures: self.failures.clone(),
            skipped: self.skipped,
        }
    }

    pub fn outdated_count(&self) -> usize {
        self.catalogs.iter().filter(|report| report.outdated).count()
    }
}

enum Outcome {
    Analyzed(Box<CatalogReport>),
    Failed(ScanFailure),
    Skipped,
}

/// Parses catalog bytes, choosing the text reader for `.po`/`.pot` paths and the binary parser otherwise.
/// 解析目录字节：`.po`/`.pot` 路径使用文本读取器，其他情况使用二进制解析器。
pub fn parse_catalog_bytes(bytes: &[u8], path: &Path) -> Result<Catalog> {
    let origin = path.display().to_string();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("po") | Some("pot") => po::parse_catalog(&String::from_utf8_lossy(bytes), &origin),
        _ => mo::parse(bytes, &origin),
    }
}

/// Reads a catalog file; the file's modification time stands in for a missing revision date.
/// 读取目录文件；缺少修订日期时使用文件的修改时间代替。
pub async fn load_catalog(path: &Path) -> Result<Catalog> {
    let io_error = |source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    };
    let bytes = tokio::fs::read(path).await.map_err(io_error)?;
    let mut catalog = parse_catalog_bytes(&bytes, path)?;
    if catalog.last_modified.is_none() {
        catalog.last_modified = tokio::fs::metadata(path)
            .await
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from);
    }
    Ok(catalog)
}

/// Analyzes a single record: load, fetch the template, compare, age check.
/// 分析单条记录：加载、获取模板、比较以及年龄检查。
pub async fn inspect_record<S: TemplateSource>(
    record: CatalogRecord,
    templates: &S,
    options: &ScanOptions,
) -> Result<CatalogReport> {
    let mut catalog = load_catalog(&record.path).await?;
    catalog.package = record.package.as_ref().map(|package| package.name.clone());
    if catalog.locale.is_none() {
        catalog.locale = Some(record.locale.clone());
    }

    let template =
        fetch_with_timeout(templates, &catalog.domain, &record.locale, options.template_timeout)
            .await;
    let coverage = coverage::analyze(&catalog, template.as_ref());
    let outdated = coverage::is_outdated_by_age(&catalog, options.now, options.outdated_after_days);

    Ok(CatalogReport {
        domain: catalog.domain.clone(),
        locale: record.locale,
        package: record.package,
        last_modified: catalog.last_modified,
        decode_warnings: catalog.warnings().len(),
        path: record.path,
        coverage,
        outdated,
    })
}

/// Scans all records with at most `options.jobs` in flight.
///
/// Cancelling `cancel` abandons pending files; they are counted in
/// [`ScanReport::skipped`]. Failures never stop the other files.
///
/// 以最多 `options.jobs` 个并发扫描所有记录。
/// 取消 `cancel` 会放弃待处理的文件，它们计入 [`ScanReport::skipped`]。
pub async fn scan<S: TemplateSource + 'static>(
    records: Vec<CatalogRecord>,
    templates: Arc<S>,
    options: &ScanOptions,
    cancel: CancellationToken,
) -> ScanReport {
    let jobs = options.jobs.max(1);
    let total = records.len();

    let outcomes: Vec<Outcome> = stream::iter(records.into_iter().map(|record| {
        let templates = Arc::clone(&templates);
        let options = options.clone();
        let cancel = cancel.clone();

        async move {
            if cancel.is_cancelled() {
                return Outcome::Skipped;
            }
            let path = record.path.clone();
            let mut handle = tokio::spawn(async move {
                inspect_record(record, templates.as_ref(), &options).await
            });

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    handle.abort();
                    Outcome::Skipped
                }
                joined = &mut handle => match joined {
                    Ok(Ok(report)) => Outcome::Analyzed(Box::new(report)),
                    Ok(Err(error)) => {
                        tracing::warn!(path = %path.display(), %error, "skipping catalog");
                        Outcome::Failed(ScanFailure::new(path, &error))
                    }
                    Err(error) => {
                        tracing::error!(path = %path.display(), %error, "catalog task failed");
                        Outcome::Failed(ScanFailure {
                            path,
                            kind: ErrorKind::Io,
                            message: error.to_string(),
                        })
                    }
                },
            }
        }
    }))
    .buffer_unordered(jobs)
    .collect()
    .await;

    let mut report = ScanReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Analyzed(catalog) => report.catalogs.push(*catalog),
            Outcome::Failed(failure) => report.failures.push(failure),
            Outcome::Skipped => report.skipped += 1,
        }
    }
    report
        .catalogs
        .sort_by(|a, b| a.domain.cmp(&b.domain).then_with(|| a.path.cmp(&b.path)));
    report.failures.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!(
        total,
        analyzed = report.catalogs.len(),
        failed = report.failures.len(),
        skipped = report.skipped,
        "scan finished"
    );
    report
}

//! # Aggregator / 聚合器
//!
//! Rolls per-catalog coverage into per-locale, per-package and global
//! summaries. Ratios are always recomputed from summed counts, never averaged
//! across catalogs, so a catalog with three strings weighs as much as its
//! three strings and no more.
//!
//! 将每个目录的覆盖率汇总为按语言区域、按软件包和全局的摘要。
//! 比率始终根据计数总和重新计算，而不是对各目录取平均。

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::error::{InspectError, Result};
use crate::core::models::{CoverageStats, Package};

/// Coverage of one catalog, tagged with where it came from.
/// 单个目录的覆盖率，并标注其来源。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRecord {
    pub package: Option<Package>,
    pub locale: String,
    pub domain: String,
    pub stats: CoverageStats,
    /// The catalog was not modified within the configured age threshold.
    pub outdated: bool,
}

impl CoverageRecord {
    pub fn new(package: Option<Package>, locale: impl Into<String>, stats: CoverageStats) -> Self {
        Self {
            package,
            locale: locale.into(),
            domain: String::new(),
            stats,
            outdated: false,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn with_outdated(mut self, outdated: bool) -> Self {
        self.outdated = outdated;
        self
    }
}

/// Summed coverage for every catalog sharing one locale code.
/// 共享同一语言区域代码的所有目录的覆盖率总和。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocaleSummary {
    pub locale: String,
    pub stats: CoverageStats,
    pub catalogs: usize,
    pub outdated_catalogs: usize,
    pub packages: BTreeSet<String>,
}

impl LocaleSummary {
    /// A summary with no catalogs, used when nothing is known about a locale.
    /// 没有目录的摘要，在对某语言区域一无所知时使用。
    pub fn empty(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            ..Self::default()
        }
    }

    pub fn ratio(&self) -> Option<f64> {
        self.stats.ratio()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub version: String,
    pub stats: CoverageStats,
    pub catalogs: usize,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    /// Sorted by locale code, case-insensitively.
    pub locales: Vec<LocaleSummary>,
    /// Sorted by package name.
    pub packages: Vec<PackageSummary>,
    pub global: CoverageStats,
}

/// Sums coverage records by locale and by package.
/// 按语言区域和软件包对覆盖率记录求和。
pub fn aggregate(records: &[CoverageRecord]) -> Aggregate {
    let mut locales: BTreeMap<String, LocaleSummary> = BTreeMap::new();
    let mut packages: BTreeMap<String, PackageSummary> = BTreeMap::new();

    for record in records {
        let summary = locales
            .entry(record.locale.clone())
            .or_insert_with(|| LocaleSummary::empty(&record.locale));
        summary.stats = summary.stats + record.stats;
        summary.catalogs += 1;
        if record.outdated {
            summary.outdated_catalogs += 1;
        }

        if let Some(package) = &record.package {
            summary.packages.insert(package.name.clone());
            let entry = packages
                .entry(package.name.clone())
                .or_insert_with(|| PackageSummary {
                    name: package.name.clone(),
                    version: package.version.clone(),
                    stats: CoverageStats::default(),
                    catalogs: 0,
                });
            entry.stats = entry.stats + record.stats;
            entry.catalogs += 1;
        }
    }

    let mut locales: Vec<LocaleSummary> = locales.into_values().collect();
    locales.sort_by(|a, b| {
        a.locale
            .to_ascii_lowercase()
            .cmp(&b.locale.to_ascii_lowercase())
            .then_with(|| a.locale.cmp(&b.locale))
    });

    Aggregate {
        global: records.iter().map(|record| record.stats).sum(),
        locales,
        packages: packages.into_values().collect(),
    }
}

impl Aggregate {
    pub fn locale(&self, code: &str) -> Option<&LocaleSummary> {
        self.locales.iter().find(|summary| summary.locale == code)
    }

    /// Summary for `requested`, or for `system_locale` when no locale was requested.
    ///
    /// # Errors
    /// `UnknownLocale` when no catalog was aggregated for the chosen locale.
    ///
    /// 返回 `requested` 的摘要；未指定时返回 `system_locale` 的摘要。
    pub fn summary_for(&self, requested: Option<&str>, system_locale: &str) -> Result<LocaleSummary> {
        let code = requested.unwrap_or(system_locale);
        self.locale(code)
            .cloned()
            .ok_or_else(|| InspectError::UnknownLocale {
                locale: code.to_string(),
            })
    }

    /// Like [`Aggregate::summary_for`], but falls back to an empty summary.
    /// 与 [`Aggregate::summary_for`] 相同，但回退为空摘要。
    pub fn summary_or_empty(&self, requested: Option<&str>, system_locale: &str) -> LocaleSummary {
        match self.summary_for(requested, system_locale) {
            Ok(summary) => summary,
            Err(error) => {
                tracing::info!(%error, "falling back to an empty summary");
                LocaleSummary::empty(requested.unwrap_or(system_locale))
            }
        }
    }
}

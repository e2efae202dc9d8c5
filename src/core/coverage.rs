//! # Coverage Analyzer / 覆盖率分析器
//!
//! Tallies translated, untranslated and fuzzy entries of a catalog and, when
//! an upstream template is newer than the catalog, flags strings that are
//! missing or whose source text changed upstream.
//!
//! 统计目录中已翻译、未翻译和模糊的条目；当上游模板比目录更新时，
//! 标记缺失的字符串或上游源文本已更改的字符串。

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::core::error::{InspectError, Result};
use crate::core::models::{
    Catalog, CoverageStats, Entry, EntryFlag, EntryKey, FlaggedEntry, TemplateReference,
};

/// Days after which a catalog that has not been touched is reported as old.
pub const DEFAULT_OUTDATED_AFTER_DAYS: i64 = 180;

/// How a single entry counts toward coverage.
/// 单个条目如何计入覆盖率。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Translated,
    Untranslated,
    Fuzzy,
}

/// Classifies an entry. Fuzzy wins over empty so every entry lands in exactly one bucket.
/// 对条目进行分类。模糊优先于空，以保证每个条目恰好落入一个类别。
pub fn classify(entry: &Entry) -> EntryState {
    if entry.fuzzy {
        EntryState::Fuzzy
    } else if entry.has_empty_translation() {
        EntryState::Untranslated
    } else {
        EntryState::Translated
    }
}

/// Result of analyzing one catalog.
/// 分析单个目录的结果。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    pub origin: String,
    pub stats: CoverageStats,
    pub flagged: Vec<FlaggedEntry>,
    /// Whether a template was compared at all.
    pub compared: bool,
}

impl Coverage {
    /// The coverage ratio, or `EmptyCatalog` when the catalog has no countable entries.
    /// 覆盖率；当目录没有可计数的条目时返回 `EmptyCatalog`。
    pub fn ratio(&self) -> Result<f64> {
        self.stats.ratio().ok_or_else(|| InspectError::EmptyCatalog {
            origin: self.origin.clone(),
        })
    }

    pub fn count_flag(&self, flag: EntryFlag) -> usize {
        self.flagged.iter().filter(|f| f.flag == flag).count()
    }
}

/// Computes coverage counts for `catalog` and, when `template` is newer, its flagged entries.
///
/// Obsolete entries are ignored. Without a template, or with a template that
/// is not strictly newer than the catalog, no entries are flagged.
///
/// 计算 `catalog` 的覆盖率计数，并在 `template` 更新时计算被标记的条目。
pub fn analyze(catalog: &Catalog, template: Option<&TemplateReference>) -> Coverage {
    let stats = tally(catalog.entries());
    let (flagged, compared) = match template {
        Some(template) if template_is_newer(catalog, template) => {
            (compare(catalog, template), true)
        }
        Some(template) => {
            tracing::debug!(
                origin = %catalog.origin,
                published = %template.published,
                "template not newer than catalog; skipping outdated detection"
            );
            (Vec::new(), false)
        }
        None => (Vec::new(), false),
    };

    Coverage {
        origin: catalog.origin.clone(),
        stats,
        flagged,
        compared,
    }
}

/// Counts active (non-obsolete) entries.
pub fn tally(entries: &[Entry]) -> CoverageStats {
    let (mut translated, mut untranslated, mut fuzzy) = (0, 0, 0);
    for entry in entries.iter().filter(|entry| !entry.obsolete) {
        match classify(entry) {
            EntryState::Translated => translated += 1,
            EntryState::Untranslated => untranslated += 1,
            EntryState::Fuzzy => fuzzy += 1,
        }
    }
    CoverageStats::new(translated, untranslated, fuzzy)
}

/// An unknown catalog timestamp counts as older than any template.
fn template_is_newer(catalog: &Catalog, template: &TemplateReference) -> bool {
    match catalog.last_modified {
        Some(modified) => template.published > modified,
        None => true,
    }
}

fn compare(catalog: &Catalog, template: &TemplateReference) -> Vec<FlaggedEntry> {
    let mut seen: HashSet<EntryKey> = HashSet::new();
    let mut flagged = Vec::new();
    for upstream in &template.entries {
        let key = upstream.key();
        if !seen.insert(key.clone()) {
            continue;
        }
        let flag = match catalog.get(&key) {
            None => Some(EntryFlag::MissingUpstream),
            Some(local) if local.obsolete || local.has_empty_translation() => {
                Some(EntryFlag::MissingUpstream)
            }
            Some(local) if local.source_plural != upstream.source_plural => Some(EntryFlag::Stale),
            Some(_) => None,
        };
        if let Some(flag) = flag {
            flagged.push(FlaggedEntry {
                context: key.context,
                source: key.source,
                flag,
            });
        }
    }
    flagged
}

/// Whether the catalog has not been modified within `max_age_days` of `now`.
/// A catalog without a timestamp is never old.
///
/// 目录是否在 `now` 之前的 `max_age_days` 天内未被修改。没有时间戳的目录永远不算旧。
pub fn is_outdated_by_age(catalog: &Catalog, now: DateTime<Utc>, max_age_days: i64) -> bool {
    catalog
        .last_modified
        .is_some_and(|modified| now - modified > Duration::days(max_age_days))
}

/// Coarse coverage classes used for colors in the console and the HTML heatmap.
/// 用于控制台颜色和 HTML 热力图的粗略覆盖率等级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CoverageBand {
    /// No strings translated, or nothing to translate.
    None,
    /// Below 50 %.
    Low,
    /// 50 % to 70 %.
    Partial,
    /// 70 % to 90 %.
    Good,
    /// 90 % and above.
    High,
}

impl CoverageBand {
    pub fn from_stats(stats: &CoverageStats) -> Self {
        match stats.percent() {
            Some(pct) if pct >= 90.0 => CoverageBand::High,
            Some(pct) if pct >= 70.0 => CoverageBand::Good,
            Some(pct) if pct >= 50.0 => CoverageBand::Partial,
            Some(pct) if pct > 0.0 => CoverageBand::Low,
            _ => CoverageBand::None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            CoverageBand::High => "heatmap-green",
            CoverageBand::Good => "heatmap-yellow",
            CoverageBand::Partial => "heatmap-orange",
            CoverageBand::Low => "heatmap-red",
            CoverageBand::None => "heatmap-gray",
        }
    }
}

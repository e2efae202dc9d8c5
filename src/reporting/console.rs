//! # Console Reporting Module / 控制台报告模块
//!
//! Colored tables for the terminal. Colors follow the coverage bands so the
//! console and the HTML heatmap agree.
//!
//! 终端的彩色表格。颜色遵循覆盖率等级，使控制台与 HTML 热力图保持一致。

use colored::*;

use crate::core::aggregate::LocaleSummary;
use crate::core::coverage::{self, Coverage, CoverageBand, EntryState};
use crate::core::models::{Catalog, CoverageStats, EntryFlag, Package};
use crate::core::scanner::{ScanFailure, ScanReport};
use crate::infra::packages::launchpad_url;
use crate::infra::t;

/// `"87.5%"`, or `"n/a"` when there is nothing to count.
pub fn percent_label(stats: &CoverageStats) -> String {
    stats
        .percent()
        .map(|pct| format!("{:.1}%", pct))
        .unwrap_or_else(|| "n/a".to_string())
}

fn paint(text: String, band: CoverageBand) -> ColoredString {
    match band {
        CoverageBand::High => text.green(),
        CoverageBand::Good => text.yellow(),
        CoverageBand::Partial => text.truecolor(255, 165, 0),
        CoverageBand::Low => text.red(),
        CoverageBand::None => text.dimmed(),
    }
}

/// Prints the headline numbers for one locale.
///
/// # Output Format / 输出格式
/// ```text
/// --- Coverage for sv ---
///   75.0%  translated 75 | untranslated 20 | fuzzy 5 | total 100
///   12 catalogs from 3 packages, 2 older than the age threshold
/// ```
pub fn print_locale_summary(summary: &LocaleSummary, locale: &str) {
    println!(
        "\n{}",
        t!("summary.banner", locale = locale, code = summary.locale).bold()
    );
    let band = CoverageBand::from_stats(&summary.stats);
    println!(
        "  {}  {}",
        paint(percent_label(&summary.stats), band).bold(),
        t!(
            "summary.counts",
            locale = locale,
            translated = summary.stats.translated,
            untranslated = summary.stats.untranslated,
            fuzzy = summary.stats.fuzzy,
            total = summary.stats.total
        )
    );
    println!(
        "  {}",
        t!(
            "summary.catalogs",
            locale = locale,
            catalogs = summary.catalogs,
            packages = summary.packages.len(),
            outdated = summary.outdated_catalogs
        )
    );
}

/// Prints one row per analyzed catalog. Incomplete catalogs get a link to
/// their translation page underneath.
///
/// 为每个已分析的目录打印一行。未完成的目录在下方附带其翻译页面链接。
pub fn print_scan(report: &ScanReport, launchpad_pattern: &str, locale: &str) {
    println!("\n{}", t!("scan.banner", locale = locale).bold());
    if report.catalogs.is_empty() {
        println!("  {}", t!("scan.no_catalogs", locale = locale).dimmed());
        return;
    }

    println!(
        "  {:>7} | {:<32} | {:<8} | {:>11} | {:>5}",
        t!("scan.header.coverage", locale = locale),
        t!("scan.header.domain", locale = locale),
        t!("scan.header.locale", locale = locale),
        t!("scan.header.translated", locale = locale),
        t!("scan.header.fuzzy", locale = locale),
    );

    for catalog in &report.catalogs {
        let stats = &catalog.coverage.stats;
        let band = CoverageBand::from_stats(stats);
        let old_badge = if catalog.outdated {
            format!(" [{}]", t!("scan.old_badge", locale = locale))
                .yellow()
                .to_string()
        } else {
            String::new()
        };
        let flags = if catalog.coverage.compared && !catalog.coverage.flagged.is_empty() {
            format!(
                "  {}",
                t!(
                    "scan.flagged",
                    locale = locale,
                    missing = catalog.coverage.count_flag(EntryFlag::MissingUpstream),
                    stale = catalog.coverage.count_flag(EntryFlag::Stale)
                )
            )
            .magenta()
            .to_string()
        } else {
            String::new()
        };

        println!(
            "  {:>7} | {:<32} | {:<8} | {:>11} | {:>5}{}{}",
            paint(percent_label(stats), band),
            catalog.domain,
            catalog.locale,
            format!("{}/{}", stats.translated, stats.total),
            stats.fuzzy,
            old_badge,
            flags
        );

        if band != CoverageBand::High && stats.total > 0 {
            println!(
                "  {:>7}   {}",
                "",
                launchpad_url(launchpad_pattern, &catalog.domain, &catalog.locale)
                    .dimmed()
                    .underline()
            );
        }
    }

    if report.skipped > 0 {
        println!(
            "\n{}",
            t!("scan.skipped", locale = locale, count = report.skipped).yellow()
        );
    }
}

/// Prints the files that could not be analyzed. Does nothing when there are none.
/// 打印无法分析的文件。没有时不输出任何内容。
pub fn print_failures(failures: &[ScanFailure], locale: &str) {
    if failures.is_empty() {
        return;
    }

    println!("\n{}", t!("failures.banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));
    for (i, failure) in failures.iter().enumerate() {
        println!(
            "[{}/{}] {} ({:?})",
            i + 1,
            failures.len(),
            failure.path.display().to_string().cyan(),
            failure.kind
        );
        println!("    {}", failure.message);
    }
}

/// Lists installed language packs with the locale each one provides.
pub fn print_packages(packages: &[Package], locale: &str) {
    println!("\n{}", t!("packs.banner", locale = locale).bold());
    if packages.is_empty() {
        println!("  {}", t!("packs.none", locale = locale).dimmed());
        return;
    }
    for package in packages {
        let locales: Vec<&str> = package.locales.iter().map(String::as_str).collect();
        println!(
            "  - {:<40} {:<24} {}",
            package.name.cyan(),
            package.version,
            locales.join(", ")
        );
    }
}

/// Prints the metadata, counts and flagged entries of a single catalog.
/// With `show_entries`, every entry is listed with its state.
///
/// 打印单个目录的元数据、计数和被标记的条目。
/// 启用 `show_entries` 时，列出每个条目及其状态。
pub fn print_catalog(catalog: &Catalog, coverage: &Coverage, show_entries: bool, locale: &str) {
    println!(
        "\n{}",
        t!("inspect.banner", locale = locale, origin = catalog.origin).bold()
    );

    let unknown = t!("inspect.unknown", locale = locale).to_string();
    let metadata = &catalog.metadata;
    let rows = [
        (t!("inspect.domain", locale = locale), catalog.domain.clone()),
        (
            t!("inspect.project", locale = locale),
            metadata.project().unwrap_or(unknown.as_str()).to_string(),
        ),
        (
            t!("inspect.language", locale = locale),
            catalog.locale.clone().unwrap_or_else(|| unknown.clone()),
        ),
        (
            t!("inspect.last_translator", locale = locale),
            metadata.last_translator().unwrap_or(unknown.as_str()).to_string(),
        ),
        (
            t!("inspect.revision_date", locale = locale),
            catalog
                .last_modified
                .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| unknown.clone()),
        ),
        (
            t!("inspect.plural_forms", locale = locale),
            metadata.plural_forms().unwrap_or(unknown.as_str()).to_string(),
        ),
    ];
    for (label, value) in rows {
        println!("  {:<18} {}", format!("{}:", label).dimmed(), value);
    }

    let band = CoverageBand::from_stats(&coverage.stats);
    println!(
        "\n  {}  {}",
        paint(percent_label(&coverage.stats), band).bold(),
        t!(
            "summary.counts",
            locale = locale,
            translated = coverage.stats.translated,
            untranslated = coverage.stats.untranslated,
            fuzzy = coverage.stats.fuzzy,
            total = coverage.stats.total
        )
    );

    let warnings = catalog.warnings();
    if !warnings.is_empty() {
        println!(
            "  {}",
            t!("inspect.decode_warnings", locale = locale, count = warnings.len()).yellow()
        );
    }

    if coverage.compared {
        if coverage.flagged.is_empty() {
            println!("  {}", t!("inspect.up_to_date", locale = locale).green());
        } else {
            println!("\n{}", t!("inspect.flagged_banner", locale = locale).magenta().bold());
            for flagged in &coverage.flagged {
                let label = match flagged.flag {
                    EntryFlag::MissingUpstream => t!("inspect.flag_missing", locale = locale),
                    EntryFlag::Stale => t!("inspect.flag_stale", locale = locale),
                };
                println!("  - {:<10} {}", label.magenta(), describe(&flagged.context, &flagged.source));
            }
        }
    }

    if show_entries {
        println!("\n{}", t!("inspect.entries_banner", locale = locale).bold());
        for entry in catalog.entries().iter().filter(|entry| !entry.obsolete) {
            let state = match coverage::classify(entry) {
                EntryState::Translated => t!("inspect.state_translated", locale = locale).green(),
                EntryState::Untranslated => t!("inspect.state_untranslated", locale = locale).red(),
                EntryState::Fuzzy => t!("inspect.state_fuzzy", locale = locale).yellow(),
            };
            println!("  - {:<14} {}", state, describe(&entry.context, &entry.source));
        }
    }
}

fn describe(context: &Option<String>, source: &str) -> String {
    let source = source.replace('\n', "\\n");
    match context {
        Some(context) => format!("[{}] {}", context, source),
        None => source,
    }
}

//! # HTML Reporting Module / HTML 报告模块
//!
//! A self-contained HTML page: per-locale summary cards, a coverage heatmap
//! with one cell per catalog, package and catalog tables, and the files that
//! failed to parse.
//!
//! 自包含的 HTML 页面：按语言区域的摘要卡片、每个目录一个单元格的覆盖率热力图、
//! 软件包和目录表格，以及解析失败的文件。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::aggregate::Aggregate;
use crate::core::coverage::CoverageBand;
use crate::core::scanner::ScanReport;
use crate::infra::packages::launchpad_url;
use crate::infra::t;
use crate::reporting::console::percent_label;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Builds the report page.
///
/// # Arguments / 参数
/// * `report` - The scan to render
///              要渲染的扫描结果
/// * `aggregate` - Summaries computed from `report`
///                 根据 `report` 计算的摘要
/// * `launchpad_pattern` - Translation page pattern used for heatmap links
///                         热力图链接所用的翻译页面模式
/// * `generated_at` - Timestamp shown in the footer
/// * `locale` - Language of the page text
pub fn render_html_report(
    report: &ScanReport,
    aggregate: &Aggregate,
    launchpad_pattern: &str,
    generated_at: DateTime<Utc>,
    locale: &str,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }

                div class="summary-container" {
                    div class="summary-item" {
                        span class="count" { (percent_label(&aggregate.global)) }
                        span class="label" { (t!("html_report.summary.coverage", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count" { (report.catalogs.len()) }
                        span class="label" { (t!("html_report.summary.catalogs", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count" { (report.outdated_count()) }
                        span class="label" { (t!("html_report.summary.outdated", locale = locale)) }
                    }
                    div class="summary-item" {
                        span class="count" { (report.failures.len()) }
                        span class="label" { (t!("html_report.summary.failed", locale = locale)) }
                    }
                }

                h2 { (t!("html_report.heatmap", locale = locale)) }
                div class="heatmap" {
                    @for catalog in &report.catalogs {
                        @let band = CoverageBand::from_stats(&catalog.coverage.stats);
                        @let label = format!("{} ({}) {}", catalog.domain, catalog.locale, percent_label(&catalog.coverage.stats));
                        div class={ "heatmap-cell " (band.css_class()) } title=(label) {
                            a href=(launchpad_url(launchpad_pattern, &catalog.domain, &catalog.locale)) {
                                (catalog.domain)
                            }
                        }
                    }
                }

                h2 { (t!("html_report.locales", locale = locale)) }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.locale", locale = locale)) }
                            th class="number" { (t!("html_report.table.coverage", locale = locale)) }
                            th class="number" { (t!("html_report.table.translated", locale = locale)) }
                            th class="number" { (t!("html_report.table.untranslated", locale = locale)) }
                            th class="number" { (t!("html_report.table.fuzzy", locale = locale)) }
                            th class="number" { (t!("html_report.table.catalogs", locale = locale)) }
                        }
                    }
                    tbody {
                        @for summary in &aggregate.locales {
                            tr {
                                td {
                                    (summary.locale)
                                    @if summary.outdated_catalogs > 0 {
                                        span class="badge-old" {
                                            (t!("html_report.old_count", locale = locale, count = summary.outdated_catalogs))
                                        }
                                    }
                                }
                                td class="number" { (percent_label(&summary.stats)) }
                                td class="number" { (summary.stats.translated) }
                                td class="number" { (summary.stats.untranslated) }
                                td class="number" { (summary.stats.fuzzy) }
                                td class="number" { (summary.catalogs) }
                            }
                        }
                    }
                }

                @if !aggregate.packages.is_empty() {
                    h2 { (t!("html_report.packages", locale = locale)) }
                    table {
                        thead {
                            tr {
                                th { (t!("html_report.table.package", locale = locale)) }
                                th { (t!("html_report.table.version", locale = locale)) }
                                th class="number" { (t!("html_report.table.coverage", locale = locale)) }
                                th class="number" { (t!("html_report.table.catalogs", locale = locale)) }
                            }
                        }
                        tbody {
                            @for package in &aggregate.packages {
                                tr {
                                    td { (package.name) }
                                    td { (package.version) }
                                    td class="number" { (percent_label(&package.stats)) }
                                    td class="number" { (package.catalogs) }
                                }
                            }
                        }
                    }
                }

                @if !report.failures.is_empty() {
                    h2 { (t!("html_report.failures", locale = locale)) }
                    table class="failures" {
                        tbody {
                            @for failure in &report.failures {
                                tr {
                                    td { (failure.path.display().to_string()) }
                                    td { (failure.message) }
                                }
                            }
                        }
                    }
                }

                footer {
                    (t!("html_report.generated", locale = locale, time = generated_at.format("%Y-%m-%d %H:%M UTC")))
                }
            }
        }
    }
}

/// Renders the report and writes it to `output_path`.
///
/// # Errors / 错误
/// Fails when the file cannot be written.
/// 无法写入文件时失败。
pub fn generate_html_report(
    report: &ScanReport,
    aggregate: &Aggregate,
    launchpad_pattern: &str,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let markup = render_html_report(report, aggregate, launchpad_pattern, Utc::now(), locale);
    fs::write(output_path, markup.into_string()).with_context(|| {
        t!("html_report.write_failed", locale = locale, path = output_path.display()).to_string()
    })?;
    tracing::info!(path = %output_path.display(), "wrote HTML report");
    Ok(())
}

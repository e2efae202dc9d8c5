//! # Reporting Module / 报告模块
//!
//! Presents scan and inspection results: colored console tables, an HTML
//! report with a coverage heatmap, and a JSON export for other tools.
//!
//! 展示扫描和检查结果：彩色控制台表格、带覆盖率热力图的 HTML 报告，
//! 以及供其他工具使用的 JSON 导出。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_catalog, print_failures, print_locale_summary, print_packages, print_scan};
pub use html::generate_html_report;
pub use json::write_json_report;

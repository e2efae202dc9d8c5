//! # Core Module / 核心模块
//!
//! Catalog parsing, coverage analysis, aggregation and the concurrent scanner.
//! Nothing in here touches the terminal.
//!
//! 目录解析、覆盖率分析、汇总以及并发扫描器。此处的代码不直接操作终端。

pub mod aggregate;
pub mod config;
pub mod coverage;
pub mod error;
pub mod models;
pub mod mo;
pub mod po;
pub mod scanner;

// Re-exports
pub use aggregate::{Aggregate, CoverageRecord, LocaleSummary, aggregate};
pub use config::InspectorConfig;
pub use coverage::{Coverage, CoverageBand, analyze};
pub use error::{ErrorKind, InspectError};
pub use models::{Catalog, CatalogRecord, CoverageStats, Entry, Package, TemplateReference};
pub use scanner::{ScanOptions, ScanReport, scan};

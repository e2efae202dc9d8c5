//! # Infrastructure Module / 基础设施模块
//!
//! This module provides the host-facing services of the inspector: running
//! dpkg, finding installed catalogs, fetching upstream templates, logging and
//! i18n support.
//!
//! 此模块提供检查器面向主机的服务：运行 dpkg、查找已安装的目录、
//! 获取上游模板、日志以及国际化支持。

pub mod command;
pub mod logging;
pub mod packages;
pub mod templates;

// Re-export i18n functions for easier access
pub use rust_i18n::t;

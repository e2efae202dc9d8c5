//! # Language Pack Inspector Library / 语言包检查器库
//!
//! Reads installed gettext catalogs (`.mo`, and `.po` for development),
//! measures how much of each is translated, compares them with upstream
//! templates and rolls the numbers up per locale and per package.
//!
//! 读取已安装的 gettext 目录（`.mo`，开发时也支持 `.po`），
//! 统计每个目录的翻译程度，与上游模板比较，并按语言区域和软件包汇总。
//!
//! ## Modules / 模块
//!
//! - `core` - Catalog parsing, coverage analysis, aggregation and scanning
//! - `infra` - Package enumeration, template sources, processes and logging
//! - `reporting` - Console, HTML and JSON output
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 目录解析、覆盖率分析、汇总和扫描
//! - `infra` - 软件包枚举、模板来源、进程和日志
//! - `reporting` - 控制台、HTML 和 JSON 输出
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::config;
pub use core::models;
pub use core::scanner;

/// Picks the UI language: `requested` if given, otherwise the system locale.
///
/// Tries the full locale first (e.g. "zh-CN"), then just the language part
/// (e.g. "sv" from "sv_SE.UTF-8"), and finally falls back to "en".
///
/// 选择界面语言：优先使用 `requested`，否则使用系统语言区域。
/// 先尝试完整区域（如 "zh-CN"），再尝试语言部分（如从 "sv_SE.UTF-8" 得到 "sv"），最后回退到 "en"。
pub fn resolve_ui_language(requested: Option<&str>) -> String {
    let locale = requested
        .map(str::to_string)
        .or_else(sys_locale::get_locale)
        .unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let normalized = locale.split(['.', '@']).next().unwrap_or_default().replace('_', "-");
    if let Some(found) = available_locales
        .iter()
        .find(|available| available.eq_ignore_ascii_case(&normalized))
    {
        return found.to_string();
    }

    normalized
        .split('-')
        .next()
        .and_then(|lang_code| {
            available_locales
                .iter()
                .find(|available| available.eq_ignore_ascii_case(lang_code))
        })
        .map(|found| found.to_string())
        .unwrap_or_else(|| "en".to_string())
}

/// Resolves the UI language and makes it the process-wide default.
/// 解析界面语言并将其设为进程范围的默认值。
pub fn init(requested: Option<&str>) -> String {
    let language = resolve_ui_language(requested);
    rust_i18n::set_locale(&language);
    language
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");

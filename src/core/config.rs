//! # Configuration Module / 配置模块
//!
//! The inspector's settings, loaded from a TOML file. Every field has a
//! default, so a missing file or a partial file is fine.
//!
//! 检查器的设置，从 TOML 文件加载。每个字段都有默认值，
//! 因此缺少文件或只有部分字段都没有问题。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::coverage::DEFAULT_OUTDATED_AFTER_DAYS;
use crate::infra::t;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "langpack-inspector";

/// Settings for obtaining upstream templates.
/// 获取上游模板的设置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Fetch templates at all. Off by default since it needs the network.
    /// 是否获取模板。默认关闭，因为需要网络。
    pub enabled: bool,
    /// URL pattern with `{series}`, `{domain}` and `{locale}` placeholders.
    /// 带有 `{series}`、`{domain}` 和 `{locale}` 占位符的 URL 模式。
    pub url: String,
    /// Ubuntu release series substituted for `{series}`.
    pub series: String,
    /// Read `<domain>.pot` files from this directory instead of the network.
    /// 从此目录读取 `<domain>.pot` 文件，而不是通过网络获取。
    pub directory: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "https://translations.launchpad.net/ubuntu/{series}/+source/{domain}/+pots/{domain}/{domain}.pot"
                .to_string(),
            series: "noble".to_string(),
            directory: None,
            timeout_secs: 10,
        }
    }
}

/// Represents the whole configuration file.
/// 代表整个配置文件。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Language of the inspector's own messages (e.g. "en", "sv", "zh-CN").
    /// Unset means the system language.
    ///
    /// 检查器自身消息的语言（例如 "en"、"sv"、"zh-CN"）。未设置时使用系统语言。
    pub language: Option<String>,
    /// Root of the installed locale tree.
    pub locale_root: PathBuf,
    /// Number of catalogs processed concurrently. Unset means CPU count.
    pub jobs: Option<usize>,
    /// Catalogs untouched for longer than this are reported as old.
    pub outdated_after_days: i64,
    /// Pattern of the translation page linked for each catalog,
    /// with `{domain}` and `{locale}` placeholders.
    pub launchpad_url: String,
    pub templates: TemplateConfig,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            language: None,
            locale_root: PathBuf::from("/usr/share/locale"),
            jobs: None,
            outdated_after_days: DEFAULT_OUTDATED_AFTER_DAYS,
            launchpad_url:
                "https://translations.launchpad.net/ubuntu/+source/{domain}/+pots/{domain}/{locale}/+translate"
                    .to_string(),
            templates: TemplateConfig::default(),
        }
    }
}

impl InspectorConfig {
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: InspectorConfig =
            toml::from_str(content).with_context(|| t!("config.parse_failed").to_string())?;
        config.locale_root = expand_path(&config.locale_root);
        config.templates.directory = config.templates.directory.as_deref().map(expand_path);
        Ok(config)
    }

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present, and built-in defaults otherwise. Returns the path
    /// that was actually read, if any.
    ///
    /// 加载配置。显式给出的 `path` 必须存在；否则在默认位置存在时使用它，
    /// 不存在时使用内置默认值。返回实际读取的路径（如有）。
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path().filter(|path| path.is_file()) {
                Some(path) => path,
                None => {
                    tracing::debug!("no configuration file found; using defaults");
                    return Ok((Self::default(), None));
                }
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok((config, Some(path)))
    }

    pub fn jobs(&self) -> usize {
        self.jobs.filter(|jobs| *jobs > 0).unwrap_or_else(num_cpus::get)
    }
}

/// `<config dir>/langpack-inspector/config.toml`, e.g. `~/.config/langpack-inspector/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Expands a leading `~` and environment variables.
/// 展开开头的 `~` 和环境变量。
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// The commented configuration written by `init`.
pub const DEFAULT_CONFIG: &str = r#"# Language Pack Inspector configuration / 语言包检查器配置

# Language of the inspector's messages; remove to follow the system language.
# 检查器消息的语言；删除此行则跟随系统语言。
# language = "en"

# Root of the installed locale tree / 已安装语言区域树的根目录
locale_root = "/usr/share/locale"

# Catalogs processed concurrently; defaults to the CPU count.
# jobs = 4

# Catalogs untouched for longer than this many days are reported as old.
outdated_after_days = 180

# Translation page linked for each catalog.
launchpad_url = "https://translations.launchpad.net/ubuntu/+source/{domain}/+pots/{domain}/{locale}/+translate"

[templates]
# Compare catalogs with upstream templates (needs network unless `directory` is set).
enabled = false
url = "https://translations.launchpad.net/ubuntu/{series}/+source/{domain}/+pots/{domain}/{domain}.pot"
series = "noble"
# directory = "~/templates"
timeout_secs = 10
"#;

//! # Template Sources / 模板来源
//!
//! Obtains the upstream `.pot` template for a domain so the coverage analyzer
//! can detect outdated translations. Templates come from a web service or a
//! local directory; any failure or timeout means "no template", never a failed
//! scan.
//!
//! 获取某个域的上游 `.pot` 模板，以便覆盖率分析器检测过时的翻译。
//! 模板来自网络服务或本地目录；任何失败或超时都视为"没有模板"，而不会使扫描失败。

use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::TemplateConfig;
use crate::core::error::{InspectError, Result};
use crate::core::models::TemplateReference;
use crate::core::po;

/// Lookup of the current template for a domain and locale.
/// 按域和语言区域查找当前模板。
pub trait TemplateSource: Send + Sync {
    /// `Ok(None)` means the source has no template for this domain.
    fn fetch(
        &self,
        domain: &str,
        locale: &str,
    ) -> impl Future<Output = Result<Option<TemplateReference>>> + Send;
}

/// Downloads `.pot` text from a URL pattern.
/// 从 URL 模式下载 `.pot` 文本。
#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    client: reqwest::Client,
    url: String,
    series: String,
}

impl HttpTemplateSource {
    pub fn new(url: &str, series: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| InspectError::Template {
                domain: String::new(),
                locale: String::new(),
                reason: error.to_string(),
            })?;
        Ok(Self {
            client,
            url: url.to_string(),
            series: series.to_string(),
        })
    }

    pub fn url_for(&self, domain: &str, locale: &str) -> String {
        self.url
            .replace("{series}", &self.series)
            .replace("{domain}", domain)
            .replace("{locale}", locale)
    }
}

impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, domain: &str, locale: &str) -> Result<Option<TemplateReference>> {
        let url = self.url_for(domain, locale);
        let failed = |reason: String| InspectError::Template {
            domain: domain.to_string(),
            locale: locale.to_string(),
            reason,
        };

        tracing::debug!(%url, "fetching template");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| failed(error.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response
            .error_for_status()
            .map_err(|error| failed(error.to_string()))?;
        let last_modified = response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
            .map(|date| date.with_timezone(&Utc));
        let text = response.text().await.map_err(|error| failed(error.to_string()))?;

        po::parse_template(&text, domain, locale, last_modified).map(Some)
    }
}

/// Reads `<directory>/<domain>.pot`; the file's modification time backs up a missing creation date.
/// 读取 `<directory>/<domain>.pot`；文件修改时间作为缺失创建日期的后备。
#[derive(Debug, Clone)]
pub struct DirectoryTemplateSource {
    directory: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl TemplateSource for DirectoryTemplateSource {
    async fn fetch(&self, domain: &str, locale: &str) -> Result<Option<TemplateReference>> {
        let path = self.directory.join(format!("{}.pot", domain));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        let io_error = |source| InspectError::Io {
            path: path.clone(),
            source,
        };
        let text = tokio::fs::read_to_string(&path).await.map_err(io_error)?;
        let modified = tokio::fs::metadata(&path)
            .await
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from);
        po::parse_template(&text, domain, locale, modified).map(Some)
    }
}

/// The template source chosen by configuration.
/// 由配置选择的模板来源。
#[derive(Debug, Clone)]
pub enum TemplateProvider {
    Disabled,
    Http(HttpTemplateSource),
    Directory(DirectoryTemplateSource),
}

impl TemplateProvider {
    /// A directory wins over the URL; nothing is fetched unless templates are enabled.
    /// 目录优先于 URL；除非启用模板，否则不获取任何内容。
    pub fn from_config(config: &TemplateConfig) -> Result<Self> {
        if !config.enabled {
            return Ok(TemplateProvider::Disabled);
        }
        match &config.directory {
            Some(directory) => Ok(TemplateProvider::Directory(DirectoryTemplateSource::new(
                directory,
            ))),
            None => HttpTemplateSource::new(
                &config.url,
                &config.series,
                Duration::from_secs(config.timeout_secs),
            )
            .map(TemplateProvider::Http),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, TemplateProvider::Disabled)
    }
}

impl TemplateSource for TemplateProvider {
    async fn fetch(&self, domain: &str, locale: &str) -> Result<Option<TemplateReference>> {
        match self {
            TemplateProvider::Disabled => Ok(None),
            TemplateProvider::Http(source) => source.fetch(domain, locale).await,
            TemplateProvider::Directory(source) => source.fetch(domain, locale).await,
        }
    }
}

/// Fetches with a deadline. Errors and timeouts are logged and become `None`,
/// which degrades the analysis to plain coverage.
///
/// 带截止时间的获取。错误和超时会被记录并转为 `None`，分析随之降级为仅统计覆盖率。
pub async fn fetch_with_timeout<S: TemplateSource>(
    source: &S,
    domain: &str,
    locale: &str,
    timeout: Duration,
) -> Option<TemplateReference> {
    match tokio::time::timeout(timeout, source.fetch(domain, locale)).await {
        Ok(Ok(template)) => template,
        Ok(Err(error)) => {
            tracing::warn!(%error, "template unavailable; reporting coverage only");
            None
        }
        Err(_) => {
            tracing::warn!(
                domain,
                locale,
                timeout_secs = timeout.as_secs(),
                "template fetch timed out; reporting coverage only"
            );
            None
        }
    }
}

//! # Error Module / 错误模块
//!
//! Structured errors raised by the catalog parser, the coverage analyzer and
//! the aggregator. Every variant names the file or locale it concerns so the
//! caller can report an actionable message and move on to the next file.
//!
//! 目录解析器、覆盖率分析器和聚合器产生的结构化错误。
//! 每个变体都带有相关的文件或语言区域标识，便于调用方报告并继续处理下一个文件。

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// The category of an [`InspectError`], without its payload.
/// [`InspectError`] 的类别，不含具体数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    MalformedCatalog,
    TruncatedCatalog,
    DecodeFailure,
    EmptyCatalog,
    UnknownLocale,
    Template,
    Io,
}

#[derive(Debug, Error)]
pub enum InspectError {
    /// Bad magic number, unsupported revision or unusable header.
    /// 魔数错误、不支持的修订版本或无法使用的头部。
    #[error("malformed catalog {origin}: {reason}")]
    MalformedCatalog { origin: String, reason: String },

    /// An offset/length pair points past the end of the byte stream.
    /// 偏移量/长度对超出了字节流末尾。
    #[error("truncated catalog {origin}: {what} needs bytes {start}..{end} but the file has {size}")]
    TruncatedCatalog {
        origin: String,
        what: String,
        start: u64,
        end: u64,
        size: usize,
    },

    /// Invalid text in one entry. Recorded as a warning on the catalog.
    ///
    /// `index` is the position in the file's string tables, counting the
    /// metadata entry, so it matches what `msgunfmt` or a hex dump shows.
    /// It is not a position in [`Catalog::entries`](crate::core::models::Catalog::entries).
    ///
    /// 某个条目中的文本无效。作为警告记录在目录上。
    /// `index` 是文件字符串表中的位置（包括元数据条目），而不是目录条目列表中的位置。
    #[error("string {index} of {origin} is not valid UTF-8; decoded with replacement characters")]
    DecodeFailure { origin: String, index: usize },

    #[error("catalog {origin} has no entries; coverage ratio is undefined")]
    EmptyCatalog { origin: String },

    #[error("no catalogs found for locale '{locale}'")]
    UnknownLocale { locale: String },

    #[error("template for {domain}/{locale} unavailable: {reason}")]
    Template {
        domain: String,
        locale: String,
        reason: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl InspectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InspectError::MalformedCatalog { .. } => ErrorKind::MalformedCatalog,
            InspectError::TruncatedCatalog { .. } => ErrorKind::TruncatedCatalog,
            InspectError::DecodeFailure { .. } => ErrorKind::DecodeFailure,
            InspectError::EmptyCatalog { .. } => ErrorKind::EmptyCatalog,
            InspectError::UnknownLocale { .. } => ErrorKind::UnknownLocale,
            InspectError::Template { .. } => ErrorKind::Template,
            InspectError::Io { .. } => ErrorKind::Io,
        }
    }

    /// The file, locale or template this error is about.
    /// 此错误涉及的文件、语言区域或模板。
    pub fn subject(&self) -> String {
        match self {
            InspectError::MalformedCatalog { origin, .. }
            | InspectError::TruncatedCatalog { origin, .. }
            | InspectError::DecodeFailure { origin, .. }
            | InspectError::EmptyCatalog { origin } => origin.clone(),
            InspectError::UnknownLocale { locale } => locale.clone(),
            InspectError::Template { domain, locale, .. } => format!("{}/{}", domain, locale),
            InspectError::Io { path, .. } => path.display().to_string(),
        }
    }

    pub(crate) fn malformed(origin: &str, reason: impl Into<String>) -> Self {
        InspectError::MalformedCatalog {
            origin: origin.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = InspectError> = std::result::Result<T, E>;

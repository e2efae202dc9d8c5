//! # PO Reader / PO 读取器
//!
//! Reads the gettext text format: `.po` catalogs (with fuzzy and obsolete
//! flags, which the compiled `.mo` format does not carry) and `.pot`
//! templates used as the upstream reference for outdated detection.
//!
//! Message decoding is done by `polib`. Obsolete `#~` entries are split off
//! and read as a second catalog so they can be flagged, and a light line
//! check runs first so structural errors carry a line number.
//!
//! 读取 gettext 文本格式：`.po` 目录（包含 `.mo` 格式不携带的模糊和过时标记）
//! 以及用作过时检测上游参考的 `.pot` 模板。
//! 消息解码由 `polib` 完成。过时的 `#~` 条目被分离出来作为第二个目录读取，
//! 以便标记它们；解析前先进行轻量的行检查，使结构错误带有行号。

use chrono::{DateTime, Utc};
use polib::catalog::Catalog as PoCatalog;
use polib::po_file;

use crate::core::error::{InspectError, Result};
use crate::core::models::{Catalog, CatalogMetadata, Entry, TemplateEntry, TemplateReference};

const KEYWORDS: [&str; 4] = ["msgctxt", "msgid", "msgid_plural", "msgstr"];

/// Active lines and obsolete (`#~`) lines of one file, with the prefix removed
/// from the latter.
#[derive(Debug, Default)]
struct Sections {
    active: String,
    obsolete: String,
}

/// Tracks whether a bare `"..."` line may continue the previous keyword.
#[derive(Debug, Default)]
struct LineCheck {
    in_field: bool,
}

impl LineCheck {
    fn reset(&mut self) {
        self.in_field = false;
    }

    fn check(&mut self, line: &str) -> std::result::Result<(), String> {
        let quoted = if line.starts_with('"') {
            if !self.in_field {
                return Err("string continuation without a keyword".to_string());
            }
            line
        } else {
            let (keyword, rest) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| "expected a keyword followed by a string".to_string())?;
            if !is_keyword(keyword) {
                return Err(format!("unknown keyword '{}'", keyword));
            }
            self.in_field = true;
            rest.trim()
        };
        if is_quoted(quoted) {
            Ok(())
        } else {
            Err("unterminated string".to_string())
        }
    }
}

fn is_keyword(keyword: &str) -> bool {
    KEYWORDS.contains(&keyword)
        || keyword
            .strip_prefix("msgstr[")
            .and_then(|index| index.strip_suffix(']'))
            .is_some_and(|index| index.parse::<usize>().is_ok())
}

/// `"..."` with a closing quote that is not itself escaped.
fn is_quoted(text: &str) -> bool {
    let Some(inner) = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };
    let trailing_backslashes = inner.chars().rev().take_while(|&c| c == '\\').count();
    trailing_backslashes % 2 == 0
}

/// Splits `text` into active and obsolete sections and checks every message
/// line. Templates drop their `Plural-Forms` placeholder
/// (`nplurals=INTEGER; plural=EXPRESSION;`), which is not a valid rule.
fn split_sections(text: &str, origin: &str, template: bool) -> Result<Sections> {
    let mut sections = Sections::default();
    let mut active = LineCheck::default();
    let mut obsolete = LineCheck::default();

    for (line_no, raw) in text.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        let line = raw.trim();
        let malformed =
            |reason: String| InspectError::malformed(origin, format!("line {}: {}", line_no, reason));

        if line.is_empty() {
            active.reset();
            obsolete.reset();
            sections.active.push('\n');
            sections.obsolete.push('\n');
            continue;
        }
        if let Some(rest) = line.strip_prefix("#~") {
            let rest = rest.trim_start();
            // "#~|" holds the previous msgid of an obsolete entry.
            if rest.is_empty() || rest.starts_with('|') {
                continue;
            }
            if rest.starts_with('#') {
                obsolete.reset();
            } else {
                obsolete.check(rest).map_err(malformed)?;
            }
            sections.obsolete.push_str(rest);
            sections.obsolete.push('\n');
            continue;
        }
        if line.starts_with('#') {
            active.reset();
        } else {
            active.check(line).map_err(malformed)?;
            if template && line.starts_with("\"Plural-Forms:") {
                continue;
            }
        }
        sections.active.push_str(line);
        sections.active.push('\n');
    }
    Ok(sections)
}

fn read_section(text: &str, origin: &str) -> Result<PoCatalog> {
    po_file::parse_from_reader(text.as_bytes())
        .map_err(|err| InspectError::malformed(origin, err.to_string()))
}

/// Header fields of a parsed catalog, under their gettext header names.
fn metadata_of(catalog: &PoCatalog) -> CatalogMetadata {
    let source = &catalog.metadata;
    let mut metadata = CatalogMetadata::default();
    metadata.insert("Project-Id-Version", &source.project_id_version);
    metadata.insert("POT-Creation-Date", &source.pot_creation_date);
    metadata.insert("PO-Revision-Date", &source.po_revision_date);
    metadata.insert("Last-Translator", &source.last_translator);
    metadata.insert("Language-Team", &source.language_team);
    metadata.insert("MIME-Version", &source.mime_version);
    metadata.insert("Content-Type", &source.content_type);
    metadata.insert("Content-Transfer-Encoding", &source.content_transfer_encoding);
    metadata.insert("Language", &source.language);
    let rules = &source.plural_rules;
    if !rules.expr.trim().is_empty() {
        metadata.insert(
            "Plural-Forms",
            &format!("nplurals={}; plural={};", rules.nplurals, rules.expr),
        );
    }
    metadata
}

fn entries_of(catalog: &PoCatalog, obsolete: bool) -> Vec<Entry> {
    catalog
        .messages()
        .map(|message| {
            let context = message.msgctxt().map(str::to_string).filter(|context| !context.is_empty());
            let (source_plural, plural_translations) = if message.is_plural() {
                (
                    message.msgid_plural().ok().map(|plural| plural.to_string()),
                    message
                        .msgstr_plural()
                        .map(|forms| forms.to_vec())
                        .unwrap_or_default(),
                )
            } else {
                (None, Vec::new())
            };
            let translation = if message.is_plural() {
                plural_translations.first().cloned().unwrap_or_default()
            } else {
                message
                    .msgstr()
                    .map(|text| text.to_string())
                    .unwrap_or_default()
            };
            Entry {
                context,
                source: message.msgid().to_string(),
                source_plural,
                translation,
                plural_translations,
                fuzzy: message.is_fuzzy(),
                obsolete,
                decode_warning: false,
            }
        })
        .collect()
}

/// Obsolete entries are read on a best-effort basis: `#~` blocks the parser
/// rejects are logged and dropped instead of failing the whole catalog.
fn obsolete_entries(text: &str, origin: &str) -> Vec<Entry> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    match read_section(text, origin) {
        Ok(catalog) => entries_of(&catalog, true),
        Err(err) => {
            tracing::warn!(origin, error = %err, "ignoring unreadable obsolete entries");
            Vec::new()
        }
    }
}

/// Parses `.po` text into a [`Catalog`], keeping fuzzy and obsolete flags.
///
/// An obsolete entry never replaces an active entry with the same key.
///
/// 将 `.po` 文本解析为 [`Catalog`]，保留模糊和过时标记。
/// 过时条目永远不会替换具有相同键的活动条目。
pub fn parse_catalog(text: &str, origin: &str) -> Result<Catalog> {
    let sections = split_sections(text, origin, false)?;
    let parsed = read_section(&sections.active, origin)?;

    let mut catalog = Catalog::new(origin);
    catalog.metadata = metadata_of(&parsed);
    for entry in entries_of(&parsed, false) {
        catalog.insert(entry);
    }
    for entry in obsolete_entries(&sections.obsolete, origin) {
        catalog.insert(entry);
    }

    catalog.locale = catalog.metadata.language().map(str::to_string);
    catalog.last_modified = catalog.metadata.revision_date();
    tracing::debug!(origin, entries = catalog.len(), "parsed po catalog");
    Ok(catalog)
}

/// Parses `.pot` text into a [`TemplateReference`].
///
/// The publish timestamp comes from `POT-Creation-Date`, then from
/// `fallback_published` (e.g. an HTTP `Last-Modified` header).
/// Obsolete entries are not part of the template.
///
/// 将 `.pot` 文本解析为 [`TemplateReference`]。
/// 发布时间取自 `POT-Creation-Date`，其次取 `fallback_published`。
pub fn parse_template(
    text: &str,
    domain: &str,
    locale: &str,
    fallback_published: Option<DateTime<Utc>>,
) -> Result<TemplateReference> {
    let sections = split_sections(text, domain, true)?;
    let parsed = read_section(&sections.active, domain)?;
    let metadata = metadata_of(&parsed);

    let entries = entries_of(&parsed, false)
        .into_iter()
        .map(|entry| TemplateEntry {
            context: entry.context,
            source: entry.source,
            source_plural: entry.source_plural,
        })
        .collect();

    let published = metadata
        .creation_date()
        .or(fallback_published)
        .ok_or_else(|| InspectError::Template {
            domain: domain.to_string(),
            locale: locale.to_string(),
            reason: "template carries no publish date".to_string(),
        })?;

    Ok(TemplateReference {
        domain: domain.to_string(),
        locale: locale.to_string(),
        entries,
        published,
    })
}

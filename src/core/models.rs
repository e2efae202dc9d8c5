//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the inspector:
//! installed packages, parsed catalogs and their entries, template references
//! and the coverage counts derived from them.
//!
//! 此模块定义了整个检查器中使用的核心数据结构：
//! 已安装的软件包、解析后的目录及其条目、模板引用以及由它们得出的覆盖率计数。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::ops::Add;
use std::path::PathBuf;

use crate::core::error::InspectError;

/// Package name prefixes stripped to obtain a language pack's locale code.
/// Longest first so `language-pack-gnome-sv` yields `sv`, not `gnome-sv`.
const LANGPACK_PREFIXES: [&str; 3] = [
    "language-pack-gnome-",
    "language-pack-kde-",
    "language-pack-",
];

/// An installed package, captured at enumeration time.
/// 在枚举时捕获的已安装软件包快照。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    /// Package name, e.g. `language-pack-gnome-sv`.
    /// 软件包名称，例如 `language-pack-gnome-sv`。
    pub name: String,
    /// Installed version string as reported by dpkg.
    /// dpkg 报告的已安装版本字符串。
    pub version: String,
    /// Locale codes this package provides translations for.
    /// 此软件包提供翻译的语言区域代码。
    pub locales: BTreeSet<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            locales: BTreeSet::new(),
        }
    }

    /// Builds a language pack package, deriving its locale code from the name.
    /// 构建语言包软件包，并从名称推导其语言区域代码。
    pub fn from_langpack(name: &str, version: &str) -> Self {
        let mut package = Self::new(name, version);
        if let Some(locale) = langpack_locale(name) {
            package.locales.insert(locale);
        }
        package
    }

    pub fn provides(&self, locale: &str) -> bool {
        self.locales.contains(locale)
    }
}

/// Returns the locale code encoded in a `language-pack-*` package name.
pub fn langpack_locale(name: &str) -> Option<String> {
    LANGPACK_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .map(|rest| rest.strip_suffix("-base").unwrap_or(rest))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}

/// One catalog file found on the host, with its owning package if known.
/// 主机上找到的一个目录文件，以及其所属软件包（如果已知）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub package: Option<Package>,
    pub locale: String,
    pub path: PathBuf,
}

/// Identity of an entry inside a catalog: optional context plus the singular source text.
/// 目录中条目的标识：可选的上下文加单数源文本。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryKey {
    pub context: Option<String>,
    pub source: String,
}

impl EntryKey {
    pub fn new(context: Option<&str>, source: &str) -> Self {
        Self {
            context: context.map(str::to_string),
            source: source.to_string(),
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(f, "[{}] {}", context, self.source),
            None => write!(f, "{}", self.source),
        }
    }
}

/// One source/translation pair.
/// 一个源文本/译文对。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Disambiguating context (msgctxt).
    pub context: Option<String>,
    /// Source string (msgid).
    pub source: String,
    /// Plural source form (msgid_plural), set for plural entries.
    pub source_plural: Option<String>,
    /// Translated string; the first form for plural entries.
    pub translation: String,
    /// All translated forms of a plural entry, in order.
    pub plural_translations: Vec<String>,
    pub fuzzy: bool,
    pub obsolete: bool,
    /// Set when the entry's bytes were not valid UTF-8.
    pub decode_warning: bool,
}

impl Entry {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            ..Self::default()
        }
    }

    pub fn fuzzy(mut self) -> Self {
        self.fuzzy = true;
        self
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.context.as_deref(), &self.source)
    }

    pub fn is_plural(&self) -> bool {
        self.source_plural.is_some()
    }

    /// An entry is untranslated when every translated form is empty.
    /// 当所有译文形式都为空时，条目视为未翻译。
    pub fn has_empty_translation(&self) -> bool {
        self.translation.is_empty() && self.plural_translations.iter().all(String::is_empty)
    }
}

/// Header fields from the metadata entry (the entry with an empty msgid).
/// 元数据条目（msgid 为空的条目）中的头部字段。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogMetadata {
    pub fields: BTreeMap<String, String>,
}

impl CatalogMetadata {
    /// Parses `Key: value` lines. Lines without a colon are ignored.
    /// 解析 `Key: value` 行。没有冒号的行将被忽略。
    pub fn from_header(text: &str) -> Self {
        let fields = text
            .lines()
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        if !value.trim().is_empty() {
            self.fields.insert(key.to_string(), value.trim().to_string());
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.get("Language")
    }

    pub fn plural_forms(&self) -> Option<&str> {
        self.get("Plural-Forms")
    }

    /// The `nplurals` value from `Plural-Forms`, e.g. `2` for Swedish.
    pub fn nplurals(&self) -> Option<usize> {
        self.plural_forms()?
            .split(';')
            .filter_map(|part| part.split_once('='))
            .find(|(key, _)| key.trim() == "nplurals")
            .and_then(|(_, value)| value.trim().parse().ok())
    }

    pub fn last_translator(&self) -> Option<&str> {
        self.get("Last-Translator")
    }

    pub fn project(&self) -> Option<&str> {
        self.get("Project-Id-Version")
    }

    pub fn charset(&self) -> Option<&str> {
        self.get("Content-Type")?
            .split(';')
            .filter_map(|part| part.trim().strip_prefix("charset="))
            .next()
    }

    pub fn revision_date(&self) -> Option<DateTime<Utc>> {
        self.get("PO-Revision-Date").and_then(parse_gettext_date)
    }

    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.get("POT-Creation-Date").and_then(parse_gettext_date)
    }
}

/// Parses the date format gettext writes into headers, e.g. `2024-01-15 12:34+0100`.
/// Template placeholders such as `YEAR-MO-DA HO:MI+ZONE` yield `None`.
///
/// 解析 gettext 写入头部的日期格式，例如 `2024-01-15 12:34+0100`。
/// 诸如 `YEAR-MO-DA HO:MI+ZONE` 的模板占位符返回 `None`。
pub fn parse_gettext_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    ["%Y-%m-%d %H:%M%z", "%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M %z"]
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|date| date.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// A parsed translation catalog for one domain and locale.
///
/// Entries keep the order in which they were read. Keys are unique: a later
/// entry with the same key replaces the earlier one in place.
///
/// 一个域和语言区域的已解析翻译目录。
/// 条目保持读取顺序。键是唯一的：相同键的后续条目会原地替换先前的条目。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    /// Identifier of the byte stream this catalog came from, usually its path.
    pub origin: String,
    /// Text domain, the file stem of the catalog.
    pub domain: String,
    pub locale: Option<String>,
    pub package: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub metadata: CatalogMetadata,
    entries: Vec<Entry>,
    #[serde(skip)]
    index: HashMap<EntryKey, usize>,
    /// Indices of entries that were decoded with replacement characters.
    decode_failures: Vec<usize>,
}

impl Catalog {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        let domain = domain_of(&origin);
        Self {
            origin,
            domain,
            ..Self::default()
        }
    }

    pub fn with_last_modified(mut self, timestamp: DateTime<Utc>) -> Self {
        self.last_modified = Some(timestamp);
        self
    }

    /// Adds an entry; an existing entry with the same key is overwritten in place,
    /// except that an obsolete entry never replaces an active one.
    ///
    /// 添加条目；相同键的现有条目将被原地覆盖，但过时条目永远不会替换活动条目。
    pub fn insert(&mut self, entry: Entry) {
        let key = entry.key();
        match self.index.get(&key) {
            Some(&position) if entry.obsolete && !self.entries[position].obsolete => {}
            Some(&position) => self.entries[position] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.index.get(key).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `index` is the string-table index in the `.mo` file, header included.
    pub(crate) fn record_decode_failure(&mut self, index: usize) {
        self.decode_failures.push(index);
    }

    /// Non-fatal decode problems found while parsing.
    /// 解析过程中发现的非致命解码问题。
    pub fn warnings(&self) -> Vec<InspectError> {
        self.decode_failures
            .iter()
            .map(|&index| InspectError::DecodeFailure {
                origin: self.origin.clone(),
                index,
            })
            .collect()
    }
}

/// The file stem of a path-like identifier: `/x/LC_MESSAGES/gedit.mo` -> `gedit`.
pub fn domain_of(origin: &str) -> String {
    let name = origin.rsplit(['/', '\\']).next().unwrap_or(origin);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// One string from the authoritative upstream template.
/// 上游权威模板中的一个字符串。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub context: Option<String>,
    pub source: String,
    pub source_plural: Option<String>,
}

impl TemplateEntry {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            context: None,
            source: source.into(),
            source_plural: None,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.context.as_deref(), &self.source)
    }
}

/// The current upstream string set for a domain and locale. Only used for comparison.
/// 某个域和语言区域的当前上游字符串集合。仅用于比较。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateReference {
    pub domain: String,
    pub locale: String,
    pub entries: Vec<TemplateEntry>,
    pub published: DateTime<Utc>,
}

/// Translation counts for a catalog or a group of catalogs.
///
/// Values are never changed after construction; combining two stats with `+`
/// yields a new value.
///
/// 一个目录或一组目录的翻译计数。
/// 构造后不会修改；使用 `+` 组合两个统计会得到一个新值。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub translated: usize,
    pub untranslated: usize,
    pub fuzzy: usize,
    pub total: usize,
}

impl CoverageStats {
    pub fn new(translated: usize, untranslated: usize, fuzzy: usize) -> Self {
        Self {
            translated,
            untranslated,
            fuzzy,
            total: translated + untranslated + fuzzy,
        }
    }

    /// translated / (translated + untranslated + fuzzy), or `None` when there is nothing to count.
    /// 已翻译 / (已翻译 + 未翻译 + 模糊)，没有可计数的条目时为 `None`。
    pub fn ratio(&self) -> Option<f64> {
        let denominator = self.translated + self.untranslated + self.fuzzy;
        if denominator == 0 {
            None
        } else {
            Some(self.translated as f64 / denominator as f64)
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.ratio().map(|ratio| ratio * 100.0)
    }
}

impl Add for CoverageStats {
    type Output = CoverageStats;

    fn add(self, other: CoverageStats) -> CoverageStats {
        CoverageStats {
            translated: self.translated + other.translated,
            untranslated: self.untranslated + other.untranslated,
            fuzzy: self.fuzzy + other.fuzzy,
            total: self.total + other.total,
        }
    }
}

impl std::iter::Sum for CoverageStats {
    fn sum<I: Iterator<Item = CoverageStats>>(iter: I) -> Self {
        iter.fold(CoverageStats::default(), Add::add)
    }
}

/// Why an entry was flagged during template comparison.
/// 模板比较时条目被标记的原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryFlag {
    /// Present upstream but absent here, or present with an empty translation.
    /// 上游存在但此处缺失，或存在但译文为空。
    MissingUpstream,
    /// Present in both, but the upstream source text changed.
    /// 两边都存在，但上游源文本已更改。
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlaggedEntry {
    pub context: Option<String>,
    pub source: String,
    pub flag: EntryFlag,
}

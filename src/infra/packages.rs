//! # Package Enumeration Module / 软件包枚举模块
//!
//! Finds installed language packs through dpkg, the `.mo` files installed for
//! a language under the locale tree, and the package owning each file.
//!
//! 通过 dpkg 查找已安装的语言包、语言区域树下为某种语言安装的 `.mo` 文件，
//! 以及拥有每个文件的软件包。

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

use crate::core::models::{CatalogRecord, Package};
use crate::infra::command::capture_with_timeout;

const DPKG_QUERY_TIMEOUT: Duration = Duration::from_secs(10);
const DPKG_SEARCH_TIMEOUT: Duration = Duration::from_secs(15);
/// Paths per `dpkg -S` invocation, keeping the argument list short.
const DPKG_SEARCH_CHUNK: usize = 50;

/// Lists installed `language-pack-*` packages. Any dpkg failure yields an empty list.
/// 列出已安装的 `language-pack-*` 软件包。dpkg 出现任何故障时返回空列表。
pub async fn list_installed_langpacks() -> Vec<Package> {
    let mut cmd = Command::new("dpkg-query");
    cmd.args([
        "-W",
        "-f",
        "${Package}\t${Version}\t${Status}\n",
        "language-pack-*",
    ]);
    match capture_with_timeout(cmd, DPKG_QUERY_TIMEOUT).await {
        Ok(output) => parse_dpkg_query(&output.stdout),
        Err(error) => {
            tracing::warn!(%error, "could not query installed language packs");
            Vec::new()
        }
    }
}

/// Parses `Package\tVersion\tStatus` lines, keeping installed packages only.
/// 解析 `Package\tVersion\tStatus` 行，只保留已安装的软件包。
pub fn parse_dpkg_query(output: &str) -> Vec<Package> {
    let mut packages: Vec<Package> = output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split('\t');
            let name = parts.next()?.trim();
            let version = parts.next()?.trim();
            let status = parts.next()?;
            let installed = status.split_whitespace().any(|word| word == "installed");
            (installed && !name.is_empty()).then(|| Package::from_langpack(name, version))
        })
        .collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

/// Finds `.mo` files for `lang` in `<root>/<lang>/LC_MESSAGES` and every
/// `<root>/<lang>_*/LC_MESSAGES` variant. Sorted and deduplicated.
///
/// 在 `<root>/<lang>/LC_MESSAGES` 及所有 `<root>/<lang>_*/LC_MESSAGES`
/// 变体中查找 `.mo` 文件。结果已排序并去重。
pub fn list_mo_files(root: &Path, lang: &str) -> Vec<(String, PathBuf)> {
    let mut locale_dirs = vec![(lang.to_string(), root.join(lang))];
    let variant_prefix = format!("{}_", lang);
    match fs::read_dir(root) {
        Ok(entries) => {
            for entry in entries.filter_map(Result::ok) {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with(&variant_prefix) {
                    locale_dirs.push((name, entry.path()));
                }
            }
        }
        Err(error) => tracing::warn!(root = %root.display(), %error, "cannot read locale root"),
    }

    let mut files: BTreeMap<PathBuf, String> = BTreeMap::new();
    for (locale, dir) in locale_dirs {
        let messages = dir.join("LC_MESSAGES");
        let Ok(entries) = fs::read_dir(&messages) else {
            continue;
        };
        for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
            if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("mo") {
                files.insert(path, locale.clone());
            }
        }
    }
    files.into_iter().map(|(path, locale)| (locale, path)).collect()
}

/// Parses `dpkg -S` output (`package[, package]: /path`) into a path -> package map.
/// Diversion lines and errors are skipped.
///
/// 将 `dpkg -S` 的输出（`package[, package]: /path`）解析为路径到软件包的映射。
pub fn parse_dpkg_search(output: &str) -> BTreeMap<PathBuf, String> {
    output
        .lines()
        .filter(|line| !line.starts_with("diversion by"))
        .filter_map(|line| line.split_once(": "))
        .filter(|(_, path)| path.trim_start().starts_with('/'))
        .filter_map(|(packages, path)| {
            let package = packages.split(',').next()?.trim();
            let package = package.split(':').next().unwrap_or(package);
            (!package.is_empty()).then(|| (PathBuf::from(path.trim()), package.to_string()))
        })
        .collect()
}

/// Maps each path to its owning package name via `dpkg -S`.
/// 通过 `dpkg -S` 将每个路径映射到其所属软件包名称。
pub async fn map_owning_packages(paths: &[PathBuf]) -> BTreeMap<PathBuf, String> {
    let mut owners = BTreeMap::new();
    for chunk in paths.chunks(DPKG_SEARCH_CHUNK) {
        let mut cmd = Command::new("dpkg");
        cmd.arg("-S").args(chunk);
        match capture_with_timeout(cmd, DPKG_SEARCH_TIMEOUT).await {
            // dpkg -S exits non-zero when any path is unowned; the rest is still valid.
            Ok(output) => owners.extend(parse_dpkg_search(&output.stdout)),
            Err(error) => {
                tracing::warn!(%error, "could not map catalogs to packages");
                break;
            }
        }
    }
    owners
}

/// Lists every catalog installed for `lang`, each with its owning package when known.
///
/// Package versions come from `installed`; owners that are not language packs
/// get an empty version.
///
/// 列出为 `lang` 安装的所有目录，并在已知时附带其所属软件包。
pub async fn enumerate(root: &Path, lang: &str, installed: &[Package]) -> Vec<CatalogRecord> {
    let files = list_mo_files(root, lang);
    let paths: Vec<PathBuf> = files.iter().map(|(_, path)| path.clone()).collect();
    let owners = map_owning_packages(&paths).await;
    tracing::info!(lang, files = files.len(), owned = owners.len(), "enumerated catalogs");
    build_records(files, &owners, installed)
}

/// Joins found files with their owners. Separate from [`enumerate`] so it can run without dpkg.
pub fn build_records(
    files: Vec<(String, PathBuf)>,
    owners: &BTreeMap<PathBuf, String>,
    installed: &[Package],
) -> Vec<CatalogRecord> {
    files
        .into_iter()
        .map(|(locale, path)| {
            let package = owners.get(&path).map(|name| {
                let mut package = installed
                    .iter()
                    .find(|package| &package.name == name)
                    .cloned()
                    .unwrap_or_else(|| Package::new(name.as_str(), ""));
                package.locales.insert(locale.clone());
                package
            });
            CatalogRecord {
                package,
                locale,
                path,
            }
        })
        .collect()
}

/// The system language as a bare language code: `sv_SE.UTF-8` and `sv-SE` give `sv`.
/// Falls back to `en`.
///
/// 以纯语言代码表示的系统语言：`sv_SE.UTF-8` 和 `sv-SE` 都得到 `sv`。回退为 `en`。
pub fn system_language() -> String {
    sys_locale::get_locale()
        .and_then(|locale| language_code(&locale))
        .unwrap_or_else(|| "en".to_string())
}

pub fn language_code(locale: &str) -> Option<String> {
    let code = locale
        .split(['_', '-', '.', '@'])
        .next()
        .map(str::trim)
        .filter(|code| !code.is_empty() && *code != "C" && *code != "POSIX")?;
    Some(code.to_ascii_lowercase())
}

/// Fills `{domain}` and `{locale}` into the translation page pattern.
pub fn launchpad_url(pattern: &str, domain: &str, locale: &str) -> String {
    pattern.replace("{domain}", domain).replace("{locale}", locale)
}

/// Locale codes of all installed language packs.
pub fn installed_locales(packages: &[Package]) -> BTreeSet<String> {
    packages
        .iter()
        .flat_map(|package| package.locales.iter().cloned())
        .collect()
}

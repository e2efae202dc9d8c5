//! # PO Reader Unit Tests / PO 读取器单元测试
//!
//! Tests for `core::po`: fuzzy and obsolete flags, continuation lines,
//! escapes, and `.pot` templates with their publish dates.
//!
//! `core::po` 的测试：模糊和过时标记、续行、转义以及带发布日期的 `.pot` 模板。

mod common;

use chrono::{TimeZone, Utc};
use common::{SAMPLE_PO, SAMPLE_POT};
use langpack_inspector::core::coverage;
use langpack_inspector::core::error::{ErrorKind, InspectError};
use langpack_inspector::core::models::EntryKey;
use langpack_inspector::core::po;

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn test_sample_catalog_metadata() {
        let catalog = po::parse_catalog(SAMPLE_PO, "po/sv.po").unwrap();

        assert_eq!(catalog.domain, "sv");
        assert_eq!(catalog.locale.as_deref(), Some("sv"));
        assert_eq!(catalog.metadata.project(), Some("gedit 46.1"));
        assert_eq!(
            catalog.metadata.last_translator(),
            Some("Anna Berg <anna@example.org>")
        );
        assert_eq!(catalog.metadata.nplurals(), Some(2));
        assert_eq!(
            catalog.last_modified,
            Some(Utc.with_ymd_and_hms(2023, 3, 5, 13, 20, 0).unwrap())
        );
    }

    #[test]
    fn test_sample_catalog_entries() {
        let catalog = po::parse_catalog(SAMPLE_PO, "sample.po").unwrap();

        // Five active entries plus one obsolete entry.
        assert_eq!(catalog.len(), 6);

        let fuzzy = catalog.get(&EntryKey::new(None, "Print Preview")).unwrap();
        assert!(fuzzy.fuzzy);
        assert_eq!(fuzzy.translation, "Förhandsgranskning");

        let quit = catalog.get(&EntryKey::new(Some("menu"), "Quit")).unwrap();
        assert_eq!(quit.translation, "Avsluta");
        assert!(!quit.fuzzy, "flags do not leak into the next entry");

        let plural = catalog.get(&EntryKey::new(None, "%d document")).unwrap();
        assert_eq!(plural.source_plural.as_deref(), Some("%d documents"));
        assert_eq!(plural.plural_translations.len(), 2);

        let obsolete = catalog.get(&EntryKey::new(None, "Old string")).unwrap();
        assert!(obsolete.obsolete);

        let empty = catalog.get(&EntryKey::new(None, "Replace All")).unwrap();
        assert!(empty.has_empty_translation());
    }

    /// An obsolete copy of a live message keeps the live translation.
    /// 活动消息的过时副本不会覆盖活动翻译。
    #[test]
    fn test_obsolete_duplicate_keeps_active_entry() {
        let text = "msgid \"Open\"\nmsgstr \"Öppna\"\n\n#~ msgid \"Open\"\n#~ msgstr \"Gammal\"\n";
        let catalog = po::parse_catalog(text, "sv.po").unwrap();

        assert_eq!(catalog.len(), 1);
        let open = catalog.get(&EntryKey::new(None, "Open")).unwrap();
        assert_eq!(open.translation, "Öppna");
        assert!(!open.obsolete);

        let stats = coverage::analyze(&catalog, None).stats;
        assert_eq!(stats.translated, 1);
        assert_eq!(stats.total, 1);
    }

    #[test]
    fn test_obsolete_previous_msgid_lines_are_ignored() {
        let text = "#~| msgid \"Olde\"\n#~ msgid \"Old\"\n#~ msgstr \"Gammal\"\n";
        let catalog = po::parse_catalog(text, "sv.po").unwrap();

        let old = catalog.get(&EntryKey::new(None, "Old")).unwrap();
        assert!(old.obsolete);
        assert_eq!(old.translation, "Gammal");
    }

    #[test]
    fn test_continuation_lines_and_escapes() {
        let text = r#"
msgid ""
"A long "
"message\n"
msgstr ""
"Ett långt "
"meddelande\n"

msgid "Tab\there \"quoted\""
msgstr "Tabb\there \"citerad\""
"#;
        let catalog = po::parse_catalog(text, "x.po").unwrap();

        let long = catalog.get(&EntryKey::new(None, "A long message\n")).unwrap();
        assert_eq!(long.translation, "Ett långt meddelande\n");

        let escaped = catalog
            .get(&EntryKey::new(None, "Tab\there \"quoted\""))
            .unwrap();
        assert_eq!(escaped.translation, "Tabb\there \"citerad\"");
    }

    #[test]
    fn test_entries_without_blank_line_separator() {
        let text = "msgid \"One\"\nmsgstr \"Ett\"\nmsgid \"Two\"\nmsgstr \"Två\"\n";
        let catalog = po::parse_catalog(text, "x.po").unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_fuzzy_among_other_flags() {
        let text = "#, c-format, fuzzy\nmsgid \"%s saved\"\nmsgstr \"%s sparad\"\n";
        let catalog = po::parse_catalog(text, "x.po").unwrap();
        assert!(catalog.entries()[0].fuzzy);
    }

    #[test]
    fn test_unknown_keyword_reports_line() {
        let text = "msgid \"One\"\nmsgstr \"Ett\"\n\nmsgfoo \"Two\"\n";
        let err = po::parse_catalog(text, "broken.po").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MalformedCatalog);
        assert_eq!(err.subject(), "broken.po");
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = po::parse_catalog("msgid \"Open\nmsgstr \"\"\n", "broken.po").unwrap_err();
        assert!(matches!(err, InspectError::MalformedCatalog { .. }));
    }

    #[test]
    fn test_continuation_without_keyword() {
        let err = po::parse_catalog("\"dangling\"\n", "broken.po").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}

#[cfg(test)]
mod template_tests {
    use super::*;

    #[test]
    fn test_sample_template() {
        let template = po::parse_template(SAMPLE_POT, "gedit", "sv", None).unwrap();

        assert_eq!(template.domain, "gedit");
        assert_eq!(template.locale, "sv");
        assert_eq!(template.entries.len(), 6);
        assert_eq!(
            template.published,
            Utc.with_ymd_and_hms(2024, 4, 10, 9, 0, 0).unwrap()
        );
        let plural = template
            .entries
            .iter()
            .find(|entry| entry.source == "%d document")
            .unwrap();
        assert_eq!(plural.source_plural.as_deref(), Some("%d open documents"));
    }

    #[test]
    fn test_placeholder_header_is_not_an_error() {
        // Template headers carry `nplurals=INTEGER` and placeholder dates.
        let template = po::parse_template(SAMPLE_POT, "gedit", "sv", None).unwrap();
        assert!(template.entries.iter().all(|entry| !entry.source.is_empty()));
    }

    #[test]
    fn test_fallback_publish_date() {
        let fallback = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let text = "msgid \"Open\"\nmsgstr \"\"\n";

        let template = po::parse_template(text, "gedit", "sv", Some(fallback)).unwrap();
        assert_eq!(template.published, fallback);
    }

    #[test]
    fn test_missing_publish_date_is_a_template_error() {
        let text = "msgid \"Open\"\nmsgstr \"\"\n";
        let err = po::parse_template(text, "gedit", "sv", None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Template);
        assert_eq!(err.subject(), "gedit/sv");
    }

    #[test]
    fn test_obsolete_template_entries_are_skipped() {
        let text = common::template_text("2024-01-01 00:00+0000", &["Open"])
            + "#~ msgid \"Gone\"\n#~ msgstr \"\"\n";
        let template = po::parse_template(&text, "gedit", "sv", None).unwrap();

        assert_eq!(template.entries.len(), 1);
        assert_eq!(template.entries[0].source, "Open");
    }
}

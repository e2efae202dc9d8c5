//! # MO Parser Unit Tests / MO 解析器单元测试
//!
//! Tests for `core::mo`: byte order detection, header metadata, context and
//! plural splitting, and the structured errors for damaged streams.
//!
//! `core::mo` 的测试：字节序检测、头部元数据、上下文与复数拆分，以及损坏数据流的结构化错误。

mod common;

use chrono::{TimeZone, Utc};
use common::{MoBuilder, SAMPLE_MO, swedish_header};
use langpack_inspector::core::error::{ErrorKind, InspectError};
use langpack_inspector::core::mo::{self, Endianness};
use langpack_inspector::core::models::EntryKey;

#[cfg(test)]
mod header_tests {
    use super::*;

    #[test]
    fn test_detect_both_byte_orders() {
        let le = MoBuilder::new().build();
        let be = MoBuilder::new().big_endian().build();

        assert_eq!(mo::detect(&le), Some(Endianness::Little));
        assert_eq!(mo::detect(&be), Some(Endianness::Big));
        assert_eq!(mo::detect(b"\x00\x01\x02\x03"), None);
        assert_eq!(mo::detect(b"\xde\x12"), None);
    }

    #[test]
    fn test_metadata_sets_locale_and_revision_date() {
        let bytes = MoBuilder::new()
            .header(&swedish_header("2023-03-05 14:20+0100"))
            .entry("Open", "Öppna")
            .build();

        let catalog = mo::parse(&bytes, "/usr/share/locale/sv/LC_MESSAGES/gedit.mo").unwrap();

        assert_eq!(catalog.domain, "gedit");
        assert_eq!(catalog.locale.as_deref(), Some("sv"));
        assert_eq!(
            catalog.last_modified,
            Some(Utc.with_ymd_and_hms(2023, 3, 5, 13, 20, 0).unwrap())
        );
        assert_eq!(catalog.metadata.nplurals(), Some(2));
        assert_eq!(catalog.metadata.charset(), Some("UTF-8"));
        assert_eq!(catalog.len(), 1, "the metadata entry is not a translatable entry");
    }

    #[test]
    fn test_minor_revision_is_accepted() {
        let bytes = MoBuilder::new().revision(1).entry("Open", "Öppna").build();
        assert!(mo::parse(&bytes, "gedit.mo").is_ok());
    }

    #[test]
    fn test_header_only_catalog_is_empty() {
        let bytes = MoBuilder::new().header(&swedish_header("2023-03-05 14:20+0100")).build();
        let catalog = mo::parse(&bytes, "empty.mo").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.locale.as_deref(), Some("sv"));
    }
}

#[cfg(test)]
mod entry_tests {
    use super::*;

    #[test]
    fn test_big_and_little_endian_parse_equal() {
        let build = |builder: MoBuilder| {
            builder
                .header(&swedish_header("2023-03-05 14:20+0100"))
                .entry("Open", "Öppna")
                .context_entry("menu", "Quit", "Avsluta")
                .plural_entry("%d file", "%d files", &["%d fil", "%d filer"])
                .build()
        };
        let le = mo::parse(&build(MoBuilder::new()), "gedit.mo").unwrap();
        let be = mo::parse(&build(MoBuilder::new().big_endian()), "gedit.mo").unwrap();

        assert_eq!(le, be);
        assert_eq!(le.len(), 3);
    }

    #[test]
    fn test_context_is_split_from_source() {
        let bytes = MoBuilder::new()
            .context_entry("menu", "Quit", "Avsluta")
            .entry("Quit", "Stäng")
            .build();
        let catalog = mo::parse(&bytes, "gedit.mo").unwrap();

        let with_context = catalog.get(&EntryKey::new(Some("menu"), "Quit")).unwrap();
        let without_context = catalog.get(&EntryKey::new(None, "Quit")).unwrap();
        assert_eq!(with_context.translation, "Avsluta");
        assert_eq!(without_context.translation, "Stäng");
        assert_eq!(catalog.len(), 2, "same msgid with different contexts are distinct keys");
    }

    #[test]
    fn test_plural_forms_are_split() {
        let bytes = MoBuilder::new()
            .plural_entry("%d file", "%d files", &["%d fil", "%d filer"])
            .build();
        let catalog = mo::parse(&bytes, "nautilus.mo").unwrap();
        let entry = &catalog.entries()[0];

        assert_eq!(entry.source, "%d file");
        assert_eq!(entry.source_plural.as_deref(), Some("%d files"));
        assert_eq!(entry.translation, "%d fil");
        assert_eq!(entry.plural_translations, vec!["%d fil", "%d filer"]);
        assert!(entry.is_plural());
    }

    #[test]
    fn test_invalid_utf8_becomes_a_warning() {
        let bytes = MoBuilder::new()
            .entry("Open", "Öppna")
            .raw_entry(b"Save", b"Spara \xff\xfe")
            .build();

        let catalog = mo::parse(&bytes, "gedit.mo").unwrap();

        assert_eq!(catalog.len(), 2);
        let entry = catalog.get(&EntryKey::new(None, "Save")).unwrap();
        assert!(entry.decode_warning);
        assert!(entry.translation.starts_with("Spara "));
        assert!(entry.translation.contains('\u{FFFD}'));

        let warnings = catalog.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind(), ErrorKind::DecodeFailure);
        assert_eq!(warnings[0].subject(), "gedit.mo");
    }

    /// The warning names the string-table index, which counts the header.
    /// 警告给出字符串表索引，该索引包括头部。
    #[test]
    fn test_decode_warning_uses_file_index() {
        let bytes = MoBuilder::new()
            .header(&swedish_header("2023-03-05 14:20+0100"))
            .entry("Open", "Öppna")
            .raw_entry(b"Save", b"Spara \xff")
            .build();

        let catalog = mo::parse(&bytes, "gedit.mo").unwrap();

        assert_eq!(catalog.len(), 2);
        let warnings = catalog.warnings();
        assert!(matches!(
            warnings[0],
            InspectError::DecodeFailure { index: 2, .. }
        ));
        assert!(warnings[0].to_string().contains("string 2 of gedit.mo"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = mo::parse(SAMPLE_MO, "sample.mo").unwrap();
        let second = mo::parse(SAMPLE_MO, "sample.mo").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_keys_keep_the_last_entry() {
        let bytes = MoBuilder::new()
            .entry("Open", "Öppen")
            .entry("Open", "Öppna")
            .build();
        let catalog = mo::parse(&bytes, "gedit.mo").unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].translation, "Öppna");
    }

    #[test]
    fn test_sample_fixture() {
        let catalog = mo::parse(SAMPLE_MO, "tests/fixtures/sample.mo").unwrap();

        assert_eq!(catalog.domain, "sample");
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.metadata.project(), Some("gedit 46.1"));
        assert!(catalog.warnings().is_empty());
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_too_short_for_magic() {
        let err = mo::parse(b"\xde\x12", "tiny.mo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCatalog);
        assert_eq!(err.subject(), "tiny.mo");
    }

    #[test]
    fn test_unknown_magic() {
        let err = mo::parse(b"this is not a catalog at all", "text.mo").unwrap_err();
        assert!(matches!(err, InspectError::MalformedCatalog { ref origin, .. } if origin == "text.mo"));
    }

    #[test]
    fn test_unsupported_major_revision() {
        let bytes = MoBuilder::new().revision(2 << 16).entry("Open", "Öppna").build();
        let err = mo::parse(&bytes, "future.mo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedCatalog);
        assert!(err.to_string().contains("revision"));
    }

    #[test]
    fn test_truncated_header() {
        let bytes = MoBuilder::new().entry("Open", "Öppna").build();
        let err = mo::parse(&bytes[..16], "cut.mo").unwrap_err();
        assert!(matches!(
            err,
            InspectError::TruncatedCatalog { size: 16, .. }
        ));
    }

    #[test]
    fn test_string_past_end_of_file() {
        let bytes = MoBuilder::new().entry("Open", "Öppna").build();
        // Drop the terminator and the last bytes of the translated string.
        let cut = &bytes[..bytes.len() - 3];
        let err = mo::parse(cut, "cut.mo").unwrap_err();

        match err {
            InspectError::TruncatedCatalog { origin, what, end, size, .. } => {
                assert_eq!(origin, "cut.mo");
                assert_eq!(what, "translated string");
                assert!(end > size as u64);
            }
            other => panic!("expected TruncatedCatalog, got {:?}", other),
        }
    }

    #[test]
    fn test_descriptor_table_past_end_of_file() {
        let mut bytes = MoBuilder::new().entry("Open", "Öppna").build();
        // Claim a thousand strings; the descriptor tables no longer fit.
        bytes[8..12].copy_from_slice(&1000u32.to_le_bytes());
        let err = mo::parse(&bytes, "lying.mo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedCatalog);
    }

    #[test]
    fn test_offset_overflow_is_truncation() {
        let mut bytes = MoBuilder::new().entry("Open", "Öppna").build();
        // Original string offset near u32::MAX.
        bytes[32..36].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = mo::parse(&bytes, "overflow.mo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedCatalog);
    }
}

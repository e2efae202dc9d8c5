// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use langpack_inspector::core::mo::MAGIC;

pub const SAMPLE_PO: &str = include_str!("../fixtures/sample.po");
pub const SAMPLE_POT: &str = include_str!("../fixtures/sample.pot");
pub const SAMPLE_MO: &[u8] = include_bytes!("../fixtures/sample.mo");

/// Builds `.mo` byte streams in either byte order.
///
/// The string data follows both descriptor tables, originals first, each
/// string terminated by a NUL like msgfmt writes it.
#[derive(Debug, Clone, Default)]
pub struct MoBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    big_endian: bool,
    revision: u32,
}

impl MoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }

    /// Adds the metadata entry (empty msgid).
    pub fn header(self, text: &str) -> Self {
        self.raw_entry(b"", text.as_bytes())
    }

    pub fn entry(self, original: &str, translated: &str) -> Self {
        self.raw_entry(original.as_bytes(), translated.as_bytes())
    }

    pub fn context_entry(self, context: &str, original: &str, translated: &str) -> Self {
        self.entry(&format!("{}\u{4}{}", context, original), translated)
    }

    pub fn plural_entry(self, singular: &str, plural: &str, forms: &[&str]) -> Self {
        self.entry(&format!("{}\0{}", singular, plural), &forms.join("\0"))
    }

    pub fn raw_entry(mut self, original: &[u8], translated: &[u8]) -> Self {
        self.entries.push((original.to_vec(), translated.to_vec()));
        self
    }

    fn word(&self, value: u32) -> [u8; 4] {
        if self.big_endian {
            value.to_be_bytes()
        } else {
            value.to_le_bytes()
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let count = self.entries.len() as u32;
        let originals = 28u32;
        let translations = originals + 8 * count;
        let data_start = translations + 8 * count;

        let mut data = Vec::new();
        let mut original_descriptors = Vec::new();
        let mut translated_descriptors = Vec::new();
        for (original, _) in &self.entries {
            original_descriptors.push((original.len() as u32, data_start + data.len() as u32));
            data.extend_from_slice(original);
            data.push(0);
        }
        for (_, translated) in &self.entries {
            translated_descriptors.push((translated.len() as u32, data_start + data.len() as u32));
            data.extend_from_slice(translated);
            data.push(0);
        }

        let mut bytes = Vec::new();
        for value in [MAGIC, self.revision, count, originals, translations, 0, data_start] {
            bytes.extend_from_slice(&self.word(value));
        }
        for (len, offset) in original_descriptors.iter().chain(&translated_descriptors) {
            bytes.extend_from_slice(&self.word(*len));
            bytes.extend_from_slice(&self.word(*offset));
        }
        bytes.extend_from_slice(&data);
        bytes
    }
}

/// A header with a Swedish language tag and the given revision date.
pub fn swedish_header(revision_date: &str) -> String {
    format!(
        "Project-Id-Version: gedit 46.1\nPO-Revision-Date: {}\nLanguage: sv\nContent-Type: text/plain; charset=UTF-8\nPlural-Forms: nplurals=2; plural=(n != 1);\n",
        revision_date
    )
}

/// Creates `<root>/<locale>/LC_MESSAGES/<domain>.mo` and returns its path.
pub fn write_catalog(root: &Path, locale: &str, domain: &str, bytes: &[u8]) -> PathBuf {
    let dir = root.join(locale).join("LC_MESSAGES");
    fs::create_dir_all(&dir).expect("Failed to create LC_MESSAGES directory");
    let path = dir.join(format!("{}.mo", domain));
    fs::write(&path, bytes).expect("Failed to write catalog");
    path
}

/// A `.pot` text with the given creation date and msgids.
pub fn template_text(creation_date: &str, sources: &[&str]) -> String {
    let mut text = format!(
        "msgid \"\"\nmsgstr \"\"\n\"Project-Id-Version: gedit 47.0\\n\"\n\"POT-Creation-Date: {}\\n\"\n\n",
        creation_date
    );
    for source in sources {
        text.push_str(&format!("msgid \"{}\"\nmsgstr \"\"\n\n", source));
    }
    text
}

//! # MO Catalog Parser / MO 目录解析器
//!
//! Decodes compiled GNU gettext message catalogs (`.mo` files) from raw bytes.
//!
//! Layout of the stream (all words are 32-bit, in the byte order announced by
//! the magic number):
//!
//! ```text
//! 0   magic            0x950412de
//! 4   revision         major << 16 | minor
//! 8   N                number of strings
//! 12  O                offset of the original string descriptors
//! 16  T                offset of the translated string descriptors
//! 20  S                hash table size (ignored)
//! 24  H                hash table offset (ignored)
//! O + 8*i              (length, offset) of original string i
//! T + 8*i              (length, offset) of translated string i
//! ```
//!
//! The byte order is resolved once from the magic number and selects a
//! monomorphized decoder; nothing past that point branches on it.
//!
//! 从原始字节解码已编译的 GNU gettext 消息目录（`.mo` 文件）。
//! 字节序只根据魔数解析一次，并选择单态化的解码器。

use std::marker::PhantomData;

use crate::core::error::{InspectError, Result};
use crate::core::models::{Catalog, CatalogMetadata, Entry};

/// The magic number as it reads in the file's own byte order.
pub const MAGIC: u32 = 0x950412de;

const HEADER_LEN: u64 = 28;
const DESCRIPTOR_LEN: u64 = 8;
const CONTEXT_SEPARATOR: char = '\u{4}';
const PLURAL_SEPARATOR: char = '\0';

/// Byte order of a catalog, as announced by its magic number.
/// 目录的字节序，由其魔数确定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

/// Inspects the first four bytes and reports which byte order they announce.
/// 检查前四个字节并报告其表示的字节序。
pub fn detect(bytes: &[u8]) -> Option<Endianness> {
    let magic = *bytes.first_chunk::<4>()?;
    if u32::from_le_bytes(magic) == MAGIC {
        Some(Endianness::Little)
    } else if u32::from_be_bytes(magic) == MAGIC {
        Some(Endianness::Big)
    } else {
        None
    }
}

/// Parses a `.mo` byte stream into a [`Catalog`].
///
/// `origin` identifies the stream in errors and warnings; its file stem
/// becomes the catalog's domain.
///
/// # Errors
/// * `MalformedCatalog` - unknown magic number or unsupported revision
/// * `TruncatedCatalog` - the header, a descriptor table or a string runs past the end
///
/// 将 `.mo` 字节流解析为 [`Catalog`]。
pub fn parse(bytes: &[u8], origin: &str) -> Result<Catalog> {
    if bytes.len() < 4 {
        return Err(InspectError::malformed(
            origin,
            format!("{} bytes is too short to hold a magic number", bytes.len()),
        ));
    }
    match detect(bytes) {
        Some(Endianness::Little) => Decoder::<LittleEndian>::new(bytes, origin).decode(),
        Some(Endianness::Big) => Decoder::<BigEndian>::new(bytes, origin).decode(),
        None => Err(InspectError::malformed(
            origin,
            format!("unknown magic number {:02x?}", &bytes[..4]),
        )),
    }
}

trait ByteOrder {
    fn read_u32(word: [u8; 4]) -> u32;
}

enum LittleEndian {}
enum BigEndian {}

impl ByteOrder for LittleEndian {
    fn read_u32(word: [u8; 4]) -> u32 {
        u32::from_le_bytes(word)
    }
}

impl ByteOrder for BigEndian {
    fn read_u32(word: [u8; 4]) -> u32 {
        u32::from_be_bytes(word)
    }
}

#[derive(Debug)]
struct Header {
    revision: u32,
    count: u64,
    originals: u64,
    translations: u64,
}

struct Decoder<'a, O: ByteOrder> {
    bytes: &'a [u8],
    origin: &'a str,
    _order: PhantomData<O>,
}

impl<'a, O: ByteOrder> Decoder<'a, O> {
    fn new(bytes: &'a [u8], origin: &'a str) -> Self {
        Self {
            bytes,
            origin,
            _order: PhantomData,
        }
    }

    fn slice(&self, start: u64, len: u64, what: &str) -> Result<&'a [u8]> {
        let size = self.bytes.len();
        let end = start.checked_add(len);
        match end {
            Some(end) if end <= size as u64 => Ok(&self.bytes[start as usize..end as usize]),
            _ => Err(InspectError::TruncatedCatalog {
                origin: self.origin.to_string(),
                what: what.to_string(),
                start,
                end: end.unwrap_or(u64::MAX),
                size,
            }),
        }
    }

    fn word(&self, offset: u64, what: &str) -> Result<u32> {
        let mut word = [0u8; 4];
        word.copy_from_slice(self.slice(offset, 4, what)?);
        Ok(O::read_u32(word))
    }

    fn header(&self) -> Result<Header> {
        self.slice(0, HEADER_LEN, "header")?;
        let revision = self.word(4, "revision")?;
        if revision >> 16 > 1 {
            return Err(InspectError::malformed(
                self.origin,
                format!("unsupported format revision {}.{}", revision >> 16, revision & 0xffff),
            ));
        }
        Ok(Header {
            revision,
            count: u64::from(self.word(8, "string count")?),
            originals: u64::from(self.word(12, "original table offset")?),
            translations: u64::from(self.word(16, "translation table offset")?),
        })
    }

    /// Reads descriptor `index` of the table at `table` and returns the string bytes.
    fn string(&self, table: u64, index: u64, what: &str) -> Result<&'a [u8]> {
        let descriptor = table + index * DESCRIPTOR_LEN;
        let len = u64::from(self.word(descriptor, what)?);
        let offset = u64::from(self.word(descriptor + 4, what)?);
        self.slice(offset, len, what)
    }

    fn decode(self) -> Result<Catalog> {
        let header = self.header()?;
        let table_len = header.count * DESCRIPTOR_LEN;
        self.slice(header.originals, table_len, "original string table")?;
        self.slice(header.translations, table_len, "translation string table")?;

        let mut catalog = Catalog::new(self.origin);
        for index in 0..header.count {
            let original = self.string(header.originals, index, "original string")?;
            let translated = self.string(header.translations, index, "translated string")?;

            let (original, original_lossy) = decode_text(original);
            let (translated, translated_lossy) = decode_text(translated);
            let lossy = original_lossy || translated_lossy;
            if lossy {
                tracing::warn!(origin = self.origin, index, "invalid UTF-8 in catalog entry");
                catalog.record_decode_failure(index as usize);
            }

            if original.is_empty() {
                catalog.metadata = CatalogMetadata::from_header(&translated);
                continue;
            }
            let mut entry = split_entry(&original, translated);
            entry.decode_warning = lossy;
            catalog.insert(entry);
        }

        catalog.locale = catalog.metadata.language().map(str::to_string);
        catalog.last_modified = catalog.metadata.revision_date();
        tracing::debug!(
            origin = self.origin,
            revision = header.revision,
            entries = catalog.len(),
            "parsed mo catalog"
        );
        Ok(catalog)
    }
}

/// UTF-8 decode with a replacement-character fallback; the flag reports the fallback.
fn decode_text(bytes: &[u8]) -> (String, bool) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), true),
    }
}

/// Splits `context \x04 singular \0 plural` and the matching `\0`-joined translations.
fn split_entry(original: &str, translated: String) -> Entry {
    let (context, source) = match original.split_once(CONTEXT_SEPARATOR) {
        Some((context, source)) => (Some(context.to_string()), source),
        None => (None, original),
    };

    match source.split_once(PLURAL_SEPARATOR) {
        Some((singular, plural)) => {
            let forms: Vec<String> = translated
                .split(PLURAL_SEPARATOR)
                .map(str::to_string)
                .collect();
            Entry {
                context,
                source: singular.to_string(),
                source_plural: Some(plural.to_string()),
                translation: forms.first().cloned().unwrap_or_default(),
                plural_translations: forms,
                ..Entry::default()
            }
        }
        None => Entry {
            context,
            source: source.to_string(),
            translation: translated,
            ..Entry::default()
        },
    }
}

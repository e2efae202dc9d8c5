use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use langpack_inspector::core::aggregate::{CoverageRecord, aggregate};
use langpack_inspector::core::models::CoverageStats;
use langpack_inspector::core::{coverage, mo, po};

const SAMPLE_MO: &[u8] = include_bytes!("../tests/fixtures/sample.mo");
const SAMPLE_PO: &str = include_str!("../tests/fixtures/sample.po");

/// A little-endian catalog with `count` entries, laid out the way msgfmt writes it.
fn large_catalog(count: usize) -> Vec<u8> {
    let entries: Vec<(String, String)> = (0..count)
        .map(|i| (format!("Message number {}", i), format!("Meddelande nummer {}", i)))
        .collect();
    let count = entries.len() as u32;
    let originals = 28u32;
    let translations = originals + 8 * count;
    let data_start = translations + 8 * count;

    let mut data = Vec::new();
    let mut descriptors = Vec::new();
    for text in entries.iter().map(|(o, _)| o).chain(entries.iter().map(|(_, t)| t)) {
        descriptors.push((text.len() as u32, data_start + data.len() as u32));
        data.extend_from_slice(text.as_bytes());
        data.push(0);
    }

    let mut bytes = Vec::new();
    for word in [mo::MAGIC, 0, count, originals, translations, 0, data_start] {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    for (len, offset) in descriptors {
        bytes.extend_from_slice(&len.to_le_bytes());
        bytes.extend_from_slice(&offset.to_le_bytes());
    }
    bytes.extend_from_slice(&data);
    bytes
}

fn bench_parse(c: &mut Criterion) {
    let large = large_catalog(5_000);

    c.bench_function("parse_sample_mo", |b| {
        b.iter(|| mo::parse(black_box(SAMPLE_MO), "sample.mo"))
    });
    c.bench_function("parse_large_mo", |b| {
        b.iter(|| mo::parse(black_box(&large), "large.mo"))
    });
    c.bench_function("parse_sample_po", |b| {
        b.iter(|| po::parse_catalog(black_box(SAMPLE_PO), "sample.po"))
    });
}

fn bench_analyze(c: &mut Criterion) {
    let Ok(catalog) = mo::parse(&large_catalog(5_000), "large.mo") else {
        return;
    };
    c.bench_function("analyze_large_catalog", |b| {
        b.iter(|| coverage::analyze(black_box(&catalog), None))
    });

    let records: Vec<CoverageRecord> = (0..2_000)
        .map(|i| {
            CoverageRecord::new(None, if i % 2 == 0 { "sv" } else { "de" }, CoverageStats::new(i, 10, 1))
        })
        .collect();
    c.bench_function("aggregate_records", |b| b.iter(|| aggregate(black_box(&records))));
}

criterion_group!(benches, bench_parse, bench_analyze);
criterion_main!(benches);

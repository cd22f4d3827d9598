//! Benchmarks for chatweave tokenizing, enrichment and context building.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench pipeline -- context`

use std::path::Path;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatweave::config::{EnrichConfig, PipelineConfig};
use chatweave::core::output::to_csv;
use chatweave::core::{ContextBuilder, Enricher, Pipeline};
use chatweave::parsing::tokenize;

// =============================================================================
// Test Data Generators
// =============================================================================

fn generate_transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + 1);
    let mut minutes = 0usize;
    for i in 0..count {
        // Every seventh message follows a long pause.
        minutes += if i % 7 == 0 { 45 } else { 3 };
        let (day, hour, minute) = (1 + minutes / 1440, minutes / 60 % 24, minutes % 60);
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        let body = match i % 5 {
            0 => format!("Bild: photo {i} <a1b2c3d4-0000-4000-8000-{i:012}.jpg>"),
            1 => format!("see https://example.com/{i} & www.example.de"),
            2 => "Ort: Office <geo:52.52,13.405?z=15>".to_string(),
            3 => format!("Message number {i}\nsecond line"),
            _ => format!("a < b && c > d #{i}"),
        };
        lines.push(format!("[{day}.1.2024, {hour}:{minute:02}] {sender}: {body}"));
    }
    lines.join("\n")
}

const SIZES: [usize; 3] = [100, 1_000, 10_000];

// =============================================================================
// Stage Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in SIZES {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| tokenize(black_box(text)));
        });
    }

    group.finish();
}

fn bench_enrich(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich");
    let dir = Path::new("bench_chat");

    for size in SIZES {
        let raw = tokenize(&generate_transcript(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| {
                let mut enricher = Enricher::new(EnrichConfig::default()).unwrap();
                enricher.enrich_all(black_box(raw.clone()), dir)
            });
        });
    }

    group.finish();
}

fn bench_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("context");
    let dir = Path::new("bench_chat");
    let builder = ContextBuilder::default();

    for size in SIZES {
        let mut enricher = Enricher::new(EnrichConfig::default()).unwrap();
        let messages = enricher.enrich_all(tokenize(&generate_transcript(size)), dir);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("build_all", size), &messages, |b, msgs| {
            b.iter(|| builder.build_all(black_box(msgs)));
        });
        group.bench_with_input(BenchmarkId::new("context_for_each", size), &messages, |b, msgs| {
            b.iter(|| {
                (0..msgs.len())
                    .filter_map(|i| builder.context_for(black_box(msgs), i))
                    .count()
            });
        });
    }

    group.finish();
}

// =============================================================================
// Full Pipeline
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let dir = Path::new("bench_chat");

    for size in SIZES {
        let text = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| {
                let mut pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
                let transcript = pipeline.process_str(black_box(text), dir);
                to_csv(std::slice::from_ref(&transcript)).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_enrich,
    bench_context,
    bench_full_pipeline,
);
criterion_main!(benches);

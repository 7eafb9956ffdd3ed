//! Criterion benchmarks for the render pipeline.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure normalization of single payloads and full render
//! passes over pages of increasing size, with and without malformed blocks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value as JsonValue};

use page_blocks::catalog::{features, hero, standard_registry};
use page_blocks::core::BlockRecord;
use page_blocks::runtime::{normalize, CompositionEngine, EngineConfig};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn page_entry(i: usize) -> JsonValue {
    let key = format!("block-{}", i);
    match i % 5 {
        0 => json!({"_type": "hero", "_key": key, "title": format!("Headline {}", i), "subtitle": "Fresh daily",
                    "ctaLabel": "Order", "ctaHref": "/order", "alignment": "left"}),
        1 => json!({"_type": "text", "_key": key, "heading": "About", "body": "Open every day.\n\nClosed on holidays."}),
        2 => json!({"_type": "features", "_key": key, "columns": 3, "items": [
                        {"title": "Organic", "icon": "leaf"}, {"title": "Local"}, {"title": "Fresh"}]}),
        3 => json!({"_type": "faq", "_key": key, "items": [
                        {"question": "Do you deliver?", "answer": "Yes."}, {"question": "Vegan?", "answer": "Some."}]}),
        _ => json!({"_type": "cta", "_key": key, "heading": "Visit us", "style": "outline"}),
    }
}

fn page(size: usize) -> JsonValue {
    JsonValue::Array((0..size).map(page_entry).collect())
}

/// Every tenth block is broken in a way the guard or normalizer rejects
fn dirty_page(size: usize) -> JsonValue {
    JsonValue::Array(
        (0..size)
            .map(|i| match i % 10 {
                3 => json!({"_type": "carousel", "_key": format!("block-{}", i)}),
                7 => json!({"_type": "hero", "_key": format!("block-{}", i), "subtitle": "no title"}),
                _ => page_entry(i),
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Normalizer Benchmarks
// ---------------------------------------------------------------------------

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let config = EngineConfig::default();

    let hero_schema = hero::schema();
    let hero_record = BlockRecord::from_json(&page_entry(0), &config);
    group.bench_function("hero", |b| {
        b.iter(|| black_box(normalize(black_box(&hero_record), &hero_schema)))
    });

    let long_title = BlockRecord::from_json(
        &json!({"_type": "hero", "_key": "h", "title": "X".repeat(5_000)}),
        &config,
    );
    group.bench_function("hero_truncated", |b| {
        b.iter(|| black_box(normalize(black_box(&long_title), &hero_schema)))
    });

    let features_schema = features::schema();
    for count in [3usize, 12, 100] {
        let items: Vec<JsonValue> = (0..count)
            .map(|i| json!({"title": format!("Feature {}", i), "description": "Short text", "icon": "star"}))
            .collect();
        let record = BlockRecord::from_json(
            &json!({"_type": "features", "_key": "f", "items": items}),
            &config,
        );
        group.bench_with_input(BenchmarkId::new("features_items", count), &record, |b, record| {
            b.iter(|| black_box(normalize(black_box(record), &features_schema)))
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Render Pass Benchmarks
// ---------------------------------------------------------------------------

fn bench_render_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pass");
    let registry = standard_registry().unwrap();
    registry.freeze();
    let engine = CompositionEngine::new(&registry);

    for size in [10usize, 100, 1_000] {
        let clean = page(size);
        group.bench_with_input(BenchmarkId::new("clean", size), &clean, |b, page| {
            b.iter(|| black_box(engine.render_json(black_box(page)).output.len()))
        });

        let dirty = dirty_page(size);
        group.bench_with_input(BenchmarkId::new("dirty", size), &dirty, |b, page| {
            b.iter(|| black_box(engine.render_json(black_box(page)).diagnostics.len()))
        });
    }
    group.finish();
}

fn bench_registry_lookup(c: &mut Criterion) {
    let registry = standard_registry().unwrap();
    registry.freeze();
    let tags = registry.type_tags();

    c.bench_function("registry_lookup", |b| {
        b.iter(|| {
            for tag in &tags {
                black_box(registry.lookup(black_box(tag)).is_ok());
            }
        })
    });
}

criterion_group!(normalize_benches, bench_normalize);
criterion_group!(render_benches, bench_render_pass, bench_registry_lookup);

criterion_main!(normalize_benches, render_benches);

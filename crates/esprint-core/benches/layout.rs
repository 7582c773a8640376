//! Benchmarks for the rendering pipeline on a generated program
//!
//! Translation and layout are measured separately so a regression can be
//! pinned on one stage.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use esprint_core::{
    FormatOptions, attach_comments, format_tree, print_document, translate,
};
use esprint_test::{parse, sample_program};
use std::hint::black_box;

/// Whole pipeline: attach, translate, print
fn bench_format_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_tree");
    for units in [10, 100] {
        let source = sample_program(units);
        let (tree, comments) = parse(&source).unwrap();
        let options = FormatOptions::default();

        group.bench_with_input(BenchmarkId::from_parameter(units), &units, |b, _| {
            b.iter(|| format_tree(black_box(&tree), &comments, &source, &options).unwrap());
        });
    }
    group.finish();
}

/// Document construction only
fn bench_translate(c: &mut Criterion) {
    let source = sample_program(100);
    let (tree, comments) = parse(&source).unwrap();
    let options = FormatOptions::default();
    let map = attach_comments(&tree, &comments, &source, &options).unwrap();

    c.bench_function("translate_100_units", |b| {
        b.iter(|| translate(black_box(&tree), &map, &source, &options).unwrap());
    });
}

/// Layout pass only, at a narrow and a wide width
fn bench_layout(c: &mut Criterion) {
    let source = sample_program(100);
    let (tree, comments) = parse(&source).unwrap();
    let options = FormatOptions::default();
    let map = attach_comments(&tree, &comments, &source, &options).unwrap();
    let doc = translate(&tree, &map, &source, &options).unwrap();

    let mut group = c.benchmark_group("layout");
    for width in [40, 120] {
        let printer = FormatOptions {
            line_width: width,
            ..Default::default()
        }
        .validate()
        .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| print_document(black_box(&doc), printer));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_format_tree, bench_translate, bench_layout);
criterion_main!(benches);

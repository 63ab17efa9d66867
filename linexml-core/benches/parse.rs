//! Benchmarks for line-oriented XML parsing.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use linexml_core::LineParser;

/// A flat document: N self-closing siblings with attributes.
fn flat_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 0..n {
        doc.push_str(&format!("<entry id={i} kind='flat'/>\n"));
    }
    doc
}

/// A nested document: list blocks with single-line children.
fn nested_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 0..n {
        doc.push_str("<list>\n");
        doc.push_str(&format!("<item>{i}</item>\n"));
        doc.push_str(&format!("<item>{}</item>\n", i + 1));
        doc.push_str("</list>\n");
    }
    doc
}

/// A comment-heavy document: most lines are filtered before dispatch.
fn comment_doc(n: usize) -> String {
    let mut doc = String::new();
    for i in 0..n {
        doc.push_str("<!-- block comment:\nline one\nline two -->\n");
        doc.push_str(&format!("<entry>{i}</entry>\n"));
    }
    doc
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let flat = flat_doc(500);
    group.throughput(Throughput::Bytes(flat.len() as u64));
    group.bench_function("flat_500", |b| {
        let mut parser = LineParser::new();
        b.iter(|| parser.parse(black_box(&flat)))
    });

    let nested = nested_doc(250);
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("nested_250", |b| {
        let mut parser = LineParser::new();
        b.iter(|| parser.parse(black_box(&nested)))
    });

    let comments = comment_doc(250);
    group.throughput(Throughput::Bytes(comments.len() as u64));
    group.bench_function("comment_heavy_250", |b| {
        let mut parser = LineParser::new();
        b.iter(|| parser.parse(black_box(&comments)))
    });

    group.finish();
}

fn bench_parse_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_simple");

    group.bench_function("empty", |b| {
        let mut parser = LineParser::new();
        b.iter(|| parser.parse(black_box("")))
    });

    let one_liner = "<c x='1' y=2/>";
    group.throughput(Throughput::Bytes(one_liner.len() as u64));
    group.bench_function("one_liner", |b| {
        let mut parser = LineParser::new();
        b.iter(|| parser.parse(black_box(one_liner)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_parse_simple);
criterion_main!(benches);

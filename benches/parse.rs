use std::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};
use strict_json::{EscapeMode, ParserOptions};

// ~1MB of objects with every kind of value and a few escapes
fn document() -> String {
    let records: Vec<String> = (0..8_000)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "name": "user \"{i}\"", "score": {}.25e-1, "active": {}, "tags": ["a\\b", "c", null], "nested": {{"depth": [[{i}]]}}}}"#,
                i * 3,
                i % 2 == 0
            )
        })
        .collect();
    format!("[{}]", records.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let input = document();

    c.bench_function("tokenize", |b| {
        b.iter(|| strict_json::tokenize(black_box(&input)))
    });

    c.bench_function("parse", |b| {
        b.iter(|| strict_json::from_str(black_box(&input)))
    });

    let decode = ParserOptions::new().escapes(EscapeMode::Decode);
    c.bench_function("parse_decode", |b| {
        b.iter(|| strict_json::from_str_with(black_box(&input), &decode))
    });
}

criterion_group!(benches, bench_parse);
// this creates the main() we need for this binary
criterion_main!(benches);

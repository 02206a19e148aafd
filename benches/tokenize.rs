use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use csv_sift::infer::{InferenceOptions, infer_column_types};
use csv_sift::tokenizer::tokenize_line;

fn sample_line() -> String {
    "10234,\"Widget, large\",2024-05-06 14:30:00,19.99,\"says \"\"hi\"\"\",".to_string()
}

fn sample_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|idx| {
            vec![
                idx.to_string(),
                format!("item {idx}"),
                "2024-05-06".to_string(),
                format!("{}.25", idx),
                String::new(),
            ]
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let line = sample_line();
    c.bench_function("tokenize_line", |b| {
        b.iter(|| tokenize_line(black_box(&line)))
    });
}

fn bench_infer(c: &mut Criterion) {
    let rows = sample_rows(10_000);
    let options = InferenceOptions::default();
    c.bench_function("infer_10k_rows", |b| {
        b.iter(|| infer_column_types(false, black_box(&rows), &options).unwrap())
    });
}

criterion_group!(benches, bench_tokenize, bench_infer);
criterion_main!(benches);

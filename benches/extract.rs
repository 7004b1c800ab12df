use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsonish_rs::{coerce, extract_json, parse_value, TypeSchema};

const CLEAN: &str = r#"{"name": "Widget", "price": 19.99, "tags": ["a", "b"], "stock": 42}"#;

const FENCED: &str = "Here is the structured answer you asked for:\n\n```json\n{\"name\": \"Widget\", \"price\": 19.99, \"tags\": [\"a\", \"b\"], \"stock\": 42}\n```\n\nLet me know if you need anything else!";

const DIRTY: &str = "Sure! {name: 'Widget', // product name\n price: 19.99, tags: ['a', 'b',], stock: 42,} — hope that helps.";

const TRUNCATED: &str = "{\"name\": \"Widget\", \"tags\": [\"a\", \"b";

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract_clean_json", |b| {
        b.iter(|| extract_json(black_box(CLEAN), true).unwrap());
    });

    c.bench_function("extract_fenced_block", |b| {
        b.iter(|| extract_json(black_box(FENCED), true).unwrap());
    });

    c.bench_function("extract_dirty_candidate", |b| {
        b.iter(|| extract_json(black_box(DIRTY), true).unwrap());
    });

    c.bench_function("extract_partial_repair", |b| {
        b.iter(|| extract_json(black_box(TRUNCATED), false).unwrap());
    });
}

fn bench_coerce(c: &mut Criterion) {
    let schema = TypeSchema::Map(
        Box::new(TypeSchema::String),
        Box::new(TypeSchema::Union(vec![
            TypeSchema::Float,
            TypeSchema::List(Box::new(TypeSchema::String)),
            TypeSchema::Int,
            TypeSchema::String,
        ])),
    );
    let value = parse_value(CLEAN).unwrap();

    c.bench_function("coerce_union_map", |b| {
        b.iter(|| coerce(black_box(&value), black_box(&schema)).unwrap());
    });
}

criterion_group!(benches, bench_extract, bench_coerce);
criterion_main!(benches);

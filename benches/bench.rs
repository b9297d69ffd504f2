//! Criterion benchmarks for Penmark.
//!
//! Covers the three hot paths:
//! - Tokenization
//! - Training
//! - Classification, single and batch

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use penmark::analysis::Tokenizer;
use penmark::classifier::AuthorClassifier;
use penmark::document::Document;

const AUTHORS: &[&str] = &["Austen", "Dickens", "Melville", "Twain", "Woolf"];

/// Generate labeled documents whose word choice depends on the author.
fn generate_corpus(count: usize) -> Vec<Document> {
    let words = vec![
        "whale", "ship", "harpoon", "sea", "river", "raft", "island", "fog", "london", "street",
        "ballroom", "marriage", "estate", "letter", "lighthouse", "waves", "garden", "party",
        "captain", "deck", "orphan", "debt", "carriage", "fortune", "memory", "light",
    ];

    (0..count)
        .map(|i| {
            let author = i % AUTHORS.len();
            let doc_length = 200 + (i % 100);
            let text: Vec<&str> = (0..doc_length)
                .map(|j| {
                    // Each author favors its own slice of the word list.
                    let biased = author * 5 + (j * 7) % 6;
                    let spread = (i * 7 + j * 13) % words.len();
                    words[if j % 3 == 0 { spread } else { biased % words.len() }]
                })
                .collect();
            Document::labeled(text.join(" "), AUTHORS[author])
        })
        .collect()
}

fn bench_tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenization");

    let tokenizer = Tokenizer::default();
    let corpus = generate_corpus(100);
    let texts: Vec<String> = corpus
        .iter()
        .map(|doc| doc.text().unwrap().to_string())
        .collect();

    group.bench_function("tokenize_single_document", |b| {
        b.iter(|| black_box(tokenizer.terms(black_box(&texts[0]))))
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("tokenize_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(tokenizer.terms(black_box(text)));
            }
        })
    });

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(20);

    for size in [100, 1000] {
        let corpus = generate_corpus(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("train_{size}_documents"), |b| {
            b.iter(|| {
                let classifier = AuthorClassifier::default();
                classifier.train(black_box(&corpus)).unwrap();
                black_box(classifier)
            })
        });
    }

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    let classifier = AuthorClassifier::default();
    classifier.train(&generate_corpus(500)).unwrap();
    let queries: Vec<Document> = generate_corpus(200)
        .into_iter()
        .map(|doc| Document::new(doc.text().unwrap().to_string()))
        .collect();

    group.bench_function("classify_single_document", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&queries[0])).unwrap()))
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("classify_sequential", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(classifier.classify(query).unwrap());
            }
        })
    });

    group.bench_function("classify_batch_parallel", |b| {
        b.iter(|| black_box(classifier.classify_batch(black_box(&queries)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tokenization,
    bench_training,
    bench_classification
);
criterion_main!(benches);

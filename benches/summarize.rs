/*!
 * Benchmarks for the summarization pipeline.
 *
 * Measures performance of:
 * - Full summarization at several document sizes
 * - LexRank sentence ranking alone
 * - Keyphrase extraction per engine
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rapid_summary::nlp::segmenter::Segmenter;
use rapid_summary::phrase::rake::RakeExtractor;
use rapid_summary::phrase::textrank::TextRankExtractor;
use rapid_summary::pipeline::traits::{KeyphraseExtractor, SentenceRanker};
use rapid_summary::summarizer::lexrank::LexRankRanker;
use rapid_summary::Summarizer;

const TOPICS: [&str; 6] = [
    "solar panels", "battery storage", "grid operators", "wind turbines", "carbon pricing",
    "heat pumps",
];

/// Generate a document of `count` sentences with overlapping vocabulary.
fn generate_text(count: usize) -> String {
    (0..count)
        .map(|i| {
            let a = TOPICS[i % TOPICS.len()];
            let b = TOPICS[(i * 5 + 1) % TOPICS.len()];
            format!("Sentence {i} links {a} with {b} across regional markets.")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_summarize(c: &mut Criterion) {
    rapid_summary::warm_up();
    let summarizer = Summarizer::new();
    let mut group = c.benchmark_group("summarize");

    for size in [10, 100, 500] {
        let text = generate_text(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| summarizer.summarize(black_box(text), 3))
        });
    }

    group.finish();
}

fn bench_lexrank(c: &mut Criterion) {
    let ranker = LexRankRanker::default();
    let mut group = c.benchmark_group("lexrank");

    for size in [50, 200] {
        let document = Segmenter::default().segment(&generate_text(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, doc| {
            b.iter(|| ranker.rank(black_box(doc), 8))
        });
    }

    group.finish();
}

fn bench_keyphrases(c: &mut Criterion) {
    let text = generate_text(100);
    let engines: Vec<Box<dyn KeyphraseExtractor>> = vec![
        Box::new(RakeExtractor::new()),
        Box::new(TextRankExtractor::new()),
    ];
    let mut group = c.benchmark_group("keyphrases");

    for engine in &engines {
        group.bench_function(engine.name(), |b| b.iter(|| engine.extract(black_box(&text))));
    }

    group.finish();
}

criterion_group!(benches, bench_summarize, bench_lexrank, bench_keyphrases);
criterion_main!(benches);

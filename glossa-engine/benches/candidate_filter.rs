//! Benchmarks for the statistical front half of the pipeline
//!
//! Run with: cargo bench --bench candidate_filter

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glossa_engine::config::FilterConfig;
use glossa_engine::{
    SakursSentenceSplitter, SentenceSegmenter, StopwordList, TermCandidateExtractor, TermFilter,
    WordOccurrenceIndex,
};
use std::hint::black_box;

/// Generate contract-like text of roughly `size` bytes
fn generate_contract(size: usize) -> String {
    let clauses = [
        "Beagle Inc. (the \"Company\") agrees to supply the Products to the Buyer. ",
        "The Effective Date means the date on which this Agreement is signed. ",
        "Payment is due within thirty days of each Invoice. ",
        "Either Party may terminate this Agreement under Section 12. ",
        "the company shall notify the buyer of any delay in delivery. ",
    ];
    let mut text = String::with_capacity(size + 128);
    let mut i = 0;
    while text.len() < size {
        text.push_str(clauses[i % clauses.len()]);
        i += 1;
    }
    text
}

fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");
    let stopwords = StopwordList::new("en");
    let extractor = TermCandidateExtractor::new();

    for size in [10_240, 102_400, 1_024_000] {
        let text = generate_contract(size);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("extract", size), &text, |b, text| {
            b.iter(|| extractor.extract(black_box(text), &stopwords));
        });
        group.bench_with_input(BenchmarkId::new("word_index", size), &text, |b, text| {
            b.iter(|| WordOccurrenceIndex::build(black_box(text)));
        });
    }

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let stopwords = StopwordList::new("en");
    let splitter = SakursSentenceSplitter::default();
    let filter = TermFilter::new(FilterConfig::default());

    for size in [10_240, 102_400] {
        let text = generate_contract(size);
        let sentences = SentenceSegmenter::new(&splitter, 5).segment(&text);
        let terms = TermCandidateExtractor::new().extract(&text, &stopwords);
        let words = WordOccurrenceIndex::build(&text);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("score", size), &terms, |b, terms| {
            b.iter(|| {
                let mut terms = terms.clone();
                filter.filter(black_box(&mut terms), &words, &sentences)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_candidates, bench_filter);
criterion_main!(benches);

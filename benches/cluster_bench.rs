use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rhymecore::{analyze, AnalysisFlags};
use std::hint::black_box;

const SHORT_LYRICS: &str = "cat hat bat dog log fog car star bar";

const LONG_LYRICS: &str = "cat hat bat dog log fog car star bar \
    Mary Mack scary black attack track understand commander \
    tera mera kal kal काला गला राम नाम shyam";

fn benchmark_basic_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("basic_clustering");
    group.throughput(Throughput::Elements(SHORT_LYRICS.split_whitespace().count() as u64));

    group.bench_function("short_lyrics", |b| {
        b.iter(|| analyze(black_box(SHORT_LYRICS), black_box(AnalysisFlags::default())))
    });

    group.finish();
}

fn benchmark_multisyllable(c: &mut Criterion) {
    let mut group = c.benchmark_group("multisyllable_clustering");
    group.throughput(Throughput::Elements(LONG_LYRICS.split_whitespace().count() as u64));

    let flags = AnalysisFlags { multisyllable: true, ..Default::default() };
    group.bench_function("long_lyrics", |b| {
        b.iter(|| analyze(black_box(LONG_LYRICS), black_box(flags.clone())))
    });

    group.finish();
}

fn benchmark_multilingual_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("multilingual_routing");

    for (name, flags) in [
        ("off", AnalysisFlags::default()),
        ("on", AnalysisFlags { multilingual: true, ..Default::default() }),
    ] {
        group.bench_with_input(BenchmarkId::new("tera_mera_kaala_gala", name), &flags, |b, flags| {
            b.iter(|| analyze(black_box("tera mera काला गला"), black_box(flags.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_basic_only, benchmark_multisyllable, benchmark_multilingual_routing);
criterion_main!(benches);

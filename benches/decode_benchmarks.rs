use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gearset_codec::decoder::{decode, detect_modes, strip_comments};
use std::fs;
use std::hint::black_box;

/// Generate macro source with `sets` declarations in different styles
fn generate_macro_source(sets: usize, pattern: &str) -> String {
    let mut content = String::new();

    for i in 0..sets {
        match pattern {
            "plain_names" => content.push_str(&format!(
                "sets.idle.Variant{} = {{\n    main=\"Sword {}\",\n    sub=\"Shield\",\n    \
                 head=\"Hat {}\",\n    body=\"Mail\",\n    left_ring=\"Ring\",\n    feet=\"Boots\",\n}}\n\n",
                i, i, i
            )),
            "item_tables" => content.push_str(&format!(
                "sets.engaged.Variant{} = {{\n    head={{ name=\"Helm {}\", augments={{'Path: B',}}}},\n    \
                 back={{ name=\"Cape\", augments={{'DEX+20','Accuracy+20 Attack+20','Haste+{}',}}}},\n    \
                 right_ring={{ name=\"Ring\", path=\"A\", rank={} }},\n}}\n\n",
                i,
                i,
                i % 10,
                i % 16
            )),
            "comment_heavy" => content.push_str(&format!(
                "-- Set {} for layer {}\nsets.precast.WS['Blade {}'] = {{ -- weapon skill\n    \
                 neck=\"Gorget\", -- fotia\n    ear1=\"Moonshade Earring\",\n}}\n--[[ sets.old{} = {{ }} ]]\n\n",
                i,
                i / 10,
                i,
                i
            )),
            _ => content.push_str(&format!("sets.s{} = {{ main=\"X\" }}\n", i)),
        }
    }

    content
}

/// Benchmark whole-source decoding by declaration style and count
fn bench_decode(c: &mut Criterion) {
    let set_counts = vec![10, 100, 1_000];
    let patterns = vec!["plain_names", "item_tables", "comment_heavy"];

    let mut group = c.benchmark_group("decode");

    for &count in &set_counts {
        for pattern in &patterns {
            let content = generate_macro_source(count, pattern);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(*pattern, count),
                &content,
                |b, content| b.iter(|| black_box(decode(black_box(content)))),
            );
        }
    }

    group.finish();
}

/// Benchmark the comment stripping pre-pass on its own
fn bench_strip_comments(c: &mut Criterion) {
    let content = generate_macro_source(1_000, "comment_heavy");

    let mut group = c.benchmark_group("strip_comments");
    group.throughput(Throughput::Bytes(content.len() as u64));
    group.bench_function("comment_heavy_1000", |b| {
        b.iter(|| black_box(strip_comments(black_box(&content))))
    });
    group.finish();
}

/// Benchmark decoding and mode detection on the sample job file
fn bench_real_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("real_files");

    if let Ok(content) = fs::read_to_string("tests/fixtures/sample_job.lua") {
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decode", "sample_job.lua"),
            &content,
            |b, content| b.iter(|| black_box(decode(black_box(content)))),
        );
        group.bench_with_input(
            BenchmarkId::new("detect_modes", "sample_job.lua"),
            &content,
            |b, content| b.iter(|| black_box(detect_modes(black_box(content)))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_decode, bench_strip_comments, bench_real_files);
criterion_main!(benches);

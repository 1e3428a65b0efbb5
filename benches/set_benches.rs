use criterion::{black_box, criterion_group, criterion_main, Criterion};
use radix_set::RadixSet;

fn word_list(count: usize) -> Vec<String> {
    // Deterministic pseudo-words with heavy prefix sharing.
    let stems = ["al", "br", "ca", "de", "el", "fr", "gl", "ho", "in", "ju"];
    let suffixes = ["a", "an", "ane", "ard", "end", "ent", "ine", "ing", "ock", "ule"];

    (0..count)
        .map(|i| {
            format!(
                "{}{}{}",
                stems[i % stems.len()],
                suffixes[(i / stems.len()) % suffixes.len()],
                i / (stems.len() * suffixes.len())
            )
        })
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let words = word_list(1000);

    c.bench_function("add 1000 words", |b| {
        b.iter(|| {
            let set = RadixSet::new();
            for word in &words {
                set.add(black_box(word));
            }
            set
        })
    });
}

fn bench_contains(c: &mut Criterion) {
    let words = word_list(1000);
    let set: RadixSet = words.iter().collect();

    c.bench_function("contains hit", |b| {
        b.iter(|| {
            for word in &words {
                black_box(set.contains(black_box(word)));
            }
        })
    });

    c.bench_function("contains miss", |b| {
        b.iter(|| black_box(set.contains(black_box("zzz-not-present"))))
    });
}

fn bench_search(c: &mut Criterion) {
    let words = word_list(1000);
    let set: RadixSet = words.iter().collect();

    c.bench_function("search shared prefix", |b| {
        b.iter(|| black_box(set.search(black_box("al"))))
    });
}

fn bench_iterate(c: &mut Criterion) {
    let words = word_list(1000);
    let set: RadixSet = words.iter().collect();

    c.bench_function("iterate 1000 words", |b| {
        b.iter(|| set.iter().count())
    });
}

criterion_group!(benches, bench_add, bench_contains, bench_search, bench_iterate);
criterion_main!(benches);

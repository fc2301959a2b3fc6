//! Rope benchmark: edit and lookup cost on large documents.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use text_rope::Rope;

fn document(chars: usize) -> String {
    (0..chars).map(|i| (b'a' + (i % 26) as u8) as char).collect()
}

fn rope_build(c: &mut Criterion) {
    let text = document(1_000_000);

    c.bench_function("rope_build_1m", |b| {
        b.iter(|| Rope::new(black_box(&text)));
    });
}

fn rope_char_at(c: &mut Criterion) {
    let rope = Rope::new(&document(1_000_000));

    c.bench_function("rope_char_at_1m", |b| {
        b.iter(|| rope.char_at(black_box(654_321)));
    });
}

fn rope_insert_middle(c: &mut Criterion) {
    let rope = Rope::new(&document(1_000_000));

    c.bench_function("rope_insert_middle_1m", |b| {
        b.iter(|| rope.insert(black_box(500_000), black_box("hello")));
    });
}

fn rope_delete_range(c: &mut Criterion) {
    let rope = Rope::new(&document(1_000_000));

    c.bench_function("rope_delete_range_1m", |b| {
        b.iter(|| rope.delete(black_box(250_000), black_box(750_000)));
    });
}

fn rope_substring(c: &mut Criterion) {
    let rope = Rope::new(&document(1_000_000));

    c.bench_function("rope_substring_80", |b| {
        b.iter(|| rope.substring(black_box(400_000), black_box(400_080)));
    });
}

fn rope_typing_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("rope_typing");

    for keystrokes in [100, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::new("insert_at_cursor", keystrokes), &keystrokes, |b, &count| {
            b.iter(|| {
                let mut rope = Rope::new(&document(10_000));
                for i in 0..count {
                    rope = rope.insert(5_000 + i, "x").unwrap();
                }
                black_box(rope.depth())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    rope_build,
    rope_char_at,
    rope_insert_middle,
    rope_delete_range,
    rope_substring,
    rope_typing_scale,
);
criterion_main!(benches);

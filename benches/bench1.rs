use std::io::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use line_buffer::{Indexable, LineIndexedBuffer};
use rand::distributions::Uniform;
use rand::Rng;

fn test_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..20_000 {
        writeln!(file, "this is line number {} of the bench file", i).unwrap();
    }
    file.flush().unwrap();
    file
}

fn open_bench(c: &mut Criterion) {
    let file = test_file();

    c.bench_function("open and index", |b| {
        b.iter(|| LineIndexedBuffer::open(black_box(file.path())).unwrap())
    });
}

fn random_lines_bench(c: &mut Criterion) {
    let file = test_file();
    let buffer = LineIndexedBuffer::open(file.path()).unwrap();

    let lines: Vec<_> = rand::thread_rng()
        .sample_iter(Uniform::new_inclusive(1, buffer.total_lines()))
        .take(buffer.total_lines())
        .collect();

    c.bench_function("copy random lines", |b| {
        b.iter(|| {
            for line in &lines {
                buffer.get_line(black_box(*line)).unwrap();
            }
        })
    });
}

fn sequential_bench(c: &mut Criterion) {
    let file = test_file();
    let buffer = LineIndexedBuffer::open(file.path()).unwrap();

    c.bench_function("borrow sequential lines", |b| {
        b.iter(|| {
            for line in 1..=buffer.total_lines() {
                black_box(buffer.line(line).unwrap());
            }
        })
    });
}

criterion_group!(benches, open_bench, random_lines_bench, sequential_bench);
criterion_main!(benches);

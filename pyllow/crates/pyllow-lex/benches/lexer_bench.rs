//! Lexer throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pyllow_lex::lex;

fn sample_program(statements: usize) -> String {
    let mut source = String::from("# generated benchmark input\n");
    for i in 0..statements {
        source.push_str(&format!("x{i} = {i} + {i} * 2 ^ 3\n"));
        source.push_str(&format!("if x{i} >= {i} {{ y{i} = x{i} / 4 }}\n"));
    }
    source
}

fn bench_lex_small(c: &mut Criterion) {
    let source = sample_program(10);
    c.bench_function("lex_small", |b| {
        b.iter(|| lex(black_box(&source), "bench.plw"))
    });
}

fn bench_lex_large(c: &mut Criterion) {
    let source = sample_program(500);
    c.bench_function("lex_large", |b| {
        b.iter(|| lex(black_box(&source), "bench.plw"))
    });
}

criterion_group!(benches, bench_lex_small, bench_lex_large);
criterion_main!(benches);

//! Parser throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pyllow_lex::lex;
use pyllow_par::parse;

fn sample_program(statements: usize) -> String {
    let mut source = String::new();
    for i in 0..statements {
        source.push_str(&format!("x{i} = ({i} + 2) * 3 ^ 2 - {i} / 4\n"));
        source.push_str(&format!(
            "if x{i} > {i} {{ y{i} = x{i} }} else {{ y{i} = 0 }}\n"
        ));
    }
    source
}

fn bench_parse_expressions(c: &mut Criterion) {
    let tokens = lex("1 + 2 * 3 - 4 / 5 ^ 6 ^ 7 <= 8 & 9 | 10", "bench.plw");
    c.bench_function("parse_expression_chain", |b| {
        b.iter(|| parse(black_box(tokens.clone())))
    });
}

fn bench_parse_program(c: &mut Criterion) {
    let tokens = lex(&sample_program(200), "bench.plw");
    c.bench_function("parse_program", |b| {
        b.iter(|| parse(black_box(tokens.clone())))
    });
}

criterion_group!(benches, bench_parse_expressions, bench_parse_program);
criterion_main!(benches);

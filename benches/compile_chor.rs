//! Benchmark: compile a large generated script (parse + evaluate + sort) and
//! the same program as an already-structured statement list, to separate the
//! parser's share from the evaluator's.

use astag::ast::{ColorSpec, Statement};
use astag::symbols::{EarDirection, EarTarget, LedTarget};
use astag::Choregraphy;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn big_script(statements: usize) -> String {
    let mut src = String::new();
    for i in 0..statements {
        let t = i as f64 / 10.0;
        if i % 2 == 0 {
            src.push_str(&format!(
                "set all leds to rgb({},{},{}) at time {}\n",
                i % 256,
                (i * 7) % 256,
                (i * 13) % 256,
                t
            ));
        } else {
            src.push_str(&format!(
                "move both ears forward of degrees {} at time {}\n",
                i % 181,
                t
            ));
        }
    }
    src
}

fn big_statements(statements: usize) -> Vec<Statement> {
    let mut out = Vec::with_capacity(statements);
    for i in 0..statements {
        let t = i as f64 / 10.0;
        let stmt = if i % 2 == 0 {
            Statement::set(
                vec![LedTarget::All],
                ColorSpec::Rgb([(i % 256) as i64, ((i * 7) % 256) as i64, ((i * 13) % 256) as i64]),
            )
        } else {
            Statement::move_(EarTarget::Both, EarDirection::Forward, (i % 181) as i64)
        };
        out.push(Statement::at_block(t, vec![stmt]));
    }
    out
}

fn bench_compile(c: &mut Criterion) {
    let script = big_script(1_000);
    let statements = big_statements(1_000);
    eprintln!(
        "compile_chor: {} script bytes, {} statements (one warm-up pass: {} lines)",
        script.len(),
        statements.len(),
        Choregraphy::compile(script.as_str()).expect("compile").lines().len()
    );

    c.bench_function("compile_script_1000", |b| {
        b.iter(|| Choregraphy::compile(black_box(script.as_str())).expect("compile"))
    });

    c.bench_function("compile_statements_1000", |b| {
        b.iter(|| Choregraphy::compile(black_box(statements.clone())).expect("compile"))
    });
}

criterion_group!(benches, bench_compile);
criterion_main!(benches);

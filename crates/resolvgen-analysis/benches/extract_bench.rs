//! Schema benchmarks — normalize + extract over a synthetic query file.

use std::path::Path;

use criterion::{criterion_group, criterion_main, Criterion};
use resolvgen_analysis::schema::{extract_actions, normalize, ActionSource};
use resolvgen_core::types::{ModuleRef, OperationKind};

fn synthetic_schema(actions: usize) -> String {
    let mut schema = String::from("# generated for benchmarking\ntype Query {\n");
    for i in 0..actions {
        if i % 3 == 0 {
            schema.push_str(&format!("  \"\"\"\n  Action {i}.\n  \"\"\"\n  list{i}: List{i}Response!\n"));
        } else {
            schema.push_str(&format!(
                "  get{i}(id: ID!, filter: Filter{i}Input, ids: [ID!]!): Get{i}Response!\n"
            ));
        }
    }
    schema.push_str("}\n");
    schema
}

fn normalize_benchmark(c: &mut Criterion) {
    let schema = synthetic_schema(500);
    c.bench_function("normalize_500_actions", |b| {
        b.iter(|| std::hint::black_box(normalize(&schema)));
    });
}

fn extract_benchmark(c: &mut Criterion) {
    let normalized = normalize(&synthetic_schema(500)).unwrap_or_default();
    let module = ModuleRef {
        project: "bench".to_string(),
        package: "query".to_string(),
    };
    let source = ActionSource {
        path: Path::new("modules/bench/query/schemas/query.graphqls"),
        kind: OperationKind::Query,
        module: &module,
    };
    c.bench_function("extract_500_actions", |b| {
        b.iter(|| std::hint::black_box(extract_actions(&normalized, source)));
    });
}

criterion_group!(benches, normalize_benchmark, extract_benchmark);
criterion_main!(benches);

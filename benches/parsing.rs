use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use unitfile::{from_str, Document, Unit};

fn generate(sections: usize, options: usize) -> String {
    let mut text = String::from("# generated\n");
    for s in 0..sections {
        text.push_str(&format!("\n[section{}]\n", s));
        for o in 0..options {
            text.push_str(&format!("option{}=value {} {}\n", o, s, o));
            if o % 5 == 0 {
                text.push_str("; a comment line\n");
            }
        }
    }
    text
}

fn benchmark_parse_small(c: &mut Criterion) {
    let text = "# unit\n[Unit]\nDescription=Example\n\n[Service]\nType=simple\nExecStart=/bin/app \\\n  --flag\n";

    c.bench_function("parse_small_unit", |b| b.iter(|| from_str(black_box(text))));
}

fn benchmark_parse_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_unit");

    for sections in [1, 10, 50, 200].iter() {
        let text = generate(*sections, 20);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &text, |b, text| {
            b.iter(|| from_str(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_duplicate_merge(c: &mut Criterion) {
    let text: String = (0..500).map(|i| format!("k=v{}\n", i % 50)).collect();

    c.bench_function("merge_duplicate_options", |b| {
        b.iter(|| from_str(black_box(&text)))
    });
}

fn benchmark_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_unit");

    for sections in [10, 200].iter() {
        let unit: Unit = from_str(&generate(*sections, 20));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &unit, |b, unit| {
            b.iter(|| black_box(unit).render())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse_small,
    benchmark_parse_sizes,
    benchmark_duplicate_merge,
    benchmark_render
);
criterion_main!(benches);

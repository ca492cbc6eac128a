//! Benchmarks for binding and writing `pie_input` elements.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use xmile_bind::view::{EntityRef, PieInput, Plot};
use xmile_bind::xml::Element;

const FIXTURE: &str = include_str!("../tests/data/pie_input.xml");

fn pie_with_plots(count: usize) -> PieInput {
    let mut pie = PieInput::new("right");
    pie.width = Some(320.0);
    pie.transparent = Some(true);
    for idx in 0..count {
        pie.plot.push(Plot {
            index: Some(idx as u32),
            title: Some(format!("Series {}", idx)),
            entity: vec![EntityRef::new(format!("Share {}", idx))],
            ..Plot::default()
        });
    }
    pie
}

fn bench_parse_tree(c: &mut Criterion) {
    c.bench_function("parse_tree", |b| {
        b.iter(|| Element::parse_str(black_box(FIXTURE)))
    });
}

fn bench_bind_fixture(c: &mut Criterion) {
    c.bench_function("bind_fixture", |b| {
        b.iter(|| PieInput::from_xml_str(black_box(FIXTURE)))
    });
}

fn bench_write_fixture(c: &mut Criterion) {
    let pie = PieInput::from_xml_str(FIXTURE).expect("Failed to bind fixture");

    c.bench_function("write_fixture", |b| {
        b.iter(|| black_box(&pie).to_xml_string())
    });
}

fn bench_plot_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind_by_plot_count");
    for count in [1, 16, 256] {
        let xml = pie_with_plots(count)
            .to_xml_string()
            .expect("Failed to write benchmark input");
        group.bench_with_input(BenchmarkId::from_parameter(count), &xml, |b, xml| {
            b.iter(|| PieInput::from_xml_str(black_box(xml)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_tree,
    bench_bind_fixture,
    bench_write_fixture,
    bench_plot_count
);
criterion_main!(benches);

use bubble_chart::BubbleChart;
use bubble_chart::core::{
    Circle, Lcg, LeafRecord, PackLayout, SiblingPackLayout, Viewport, build_hierarchy,
    pack_siblings,
};
use bubble_chart::render::Document;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_records(count: usize) -> Vec<LeafRecord> {
    (0..count)
        .map(|i| {
            let value = 1.0 + ((i * 37) % 101) as f64;
            LeafRecord::new(i as i64, format!("leaf-{i}"), value)
        })
        .collect()
}

fn bench_pack_siblings_1k(c: &mut Criterion) {
    let circles: Vec<Circle> = (0..1_000)
        .map(|i| Circle::new(0.0, 0.0, 1.0 + ((i * 13) % 17) as f64))
        .collect();

    c.bench_function("pack_siblings_1k", |b| {
        b.iter(|| {
            let mut circles = circles.clone();
            let _ = pack_siblings(black_box(&mut circles), &mut Lcg::default())
                .expect("pack should succeed");
        })
    });
}

fn bench_padded_layout_1k(c: &mut Criterion) {
    let root = build_hierarchy(&generated_records(1_000)).expect("valid records");
    let layout = SiblingPackLayout::default();
    let size = Viewport::new(1920.0, 1080.0);

    c.bench_function("padded_layout_1k", |b| {
        b.iter(|| {
            let _ = layout
                .pack(black_box(&root), black_box(size), black_box(3.0))
                .expect("layout should succeed");
        })
    });
}

fn bench_chart_update_500(c: &mut Criterion) {
    let first = generated_records(500);
    let second: Vec<LeafRecord> = first
        .iter()
        .skip(50)
        .map(|record| LeafRecord::new(record.id.clone(), record.label.clone(), record.value * 2.0))
        .collect();
    let mut chart = BubbleChart::new(first.clone()).expect("chart init");
    let mut document = Document::new();
    let body = document.body();
    chart
        .render(&mut document, body, None)
        .expect("initial render");

    c.bench_function("chart_update_500", |b| {
        b.iter(|| {
            chart
                .update(&mut document, second.clone(), 800.0, 800.0, None)
                .expect("update should succeed");
            chart
                .update(&mut document, first.clone(), 800.0, 800.0, None)
                .expect("update should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_pack_siblings_1k,
    bench_padded_layout_1k,
    bench_chart_update_500
);
criterion_main!(benches);

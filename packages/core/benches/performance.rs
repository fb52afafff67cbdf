//! Performance benchmarks for the tree mutation core

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use idiampro_core::{
    bulk_indent, create_node, delete_node, move_node, outline_from_markdown, MovePosition,
    NodeType, Outline, Placement,
};

/// Outline with `width` siblings directly under the root
fn wide_outline(width: usize) -> Outline {
    let mut outline = Outline::new("Bench".to_string());
    let root_id = outline.root_node_id.clone();
    let mut anchor = root_id;
    let mut placement = Placement::FirstChild;
    for i in 0..width {
        anchor = outline
            .create_node(&anchor, placement, NodeType::Document, &format!("node {i}"))
            .unwrap();
        placement = Placement::SiblingAfter;
    }
    outline
}

fn markdown_document(sections: usize) -> String {
    let mut doc = String::from("# Benchmark Doc\n");
    for i in 0..sections {
        doc.push_str(&format!("## Section {i}\nbody text for section {i}\n"));
        doc.push_str(&format!("### Detail {i}\nnested body\n"));
    }
    doc
}

fn bench_create_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_node");
    for width in [100, 1_000] {
        let outline = wide_outline(width);
        let root = outline.root().unwrap();
        let last = root.children_ids.last().cloned().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                create_node(
                    &outline.nodes,
                    &last,
                    Placement::SiblingAfter,
                    NodeType::Document,
                    "new",
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_move_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_node");
    for width in [100, 1_000] {
        let outline = wide_outline(width);
        let root = outline.root().unwrap();
        let first = root.children_ids.first().cloned().unwrap();
        let last = root.children_ids.last().cloned().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| move_node(&outline.nodes, &first, &last, MovePosition::After).unwrap())
        });
    }
    group.finish();
}

fn bench_delete_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_node");
    for width in [100, 1_000] {
        let outline = wide_outline(width);
        let root = outline.root().unwrap();
        let first = root.children_ids.first().cloned().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| delete_node(&outline.nodes, &first).unwrap())
        });
    }
    group.finish();
}

fn bench_bulk_indent(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_indent");
    for width in [100, 500] {
        let outline = wide_outline(width);
        let selected = outline.root().unwrap().children_ids.clone();
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| bulk_indent(&outline.nodes, &selected).unwrap())
        });
    }
    group.finish();
}

fn bench_markdown_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_import");
    for sections in [50, 500] {
        let doc = markdown_document(sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &sections, |b, _| {
            b.iter(|| outline_from_markdown(&doc))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_create_node,
    bench_move_node,
    bench_delete_node,
    bench_bulk_indent,
    bench_markdown_import
);
criterion_main!(benches);

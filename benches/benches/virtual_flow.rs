// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Size;
use understory_virtual_flow::{LeafNode, NodeCell, VirtualFlow};

type Flow = VirtualFlow<f64, NodeCell<LeafNode>>;

fn flow_of(len: usize) -> Flow {
    let items: Vec<f64> = (0..len).map(|i| 16.0 + (i % 7) as f64).collect();
    let mut flow = VirtualFlow::vertical(items, |height: &f64| {
        NodeCell::new(LeafNode::new(Size::new(200.0, *height)))
    });
    flow.resize(Size::new(200.0, 800.0));
    flow.layout();
    flow
}

fn bench_first_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_flow/first_layout");

    // Hypothesis: the first layout only pays for the visible cells, so its
    // cost is flat in the number of items apart from building the prefix sums.
    for len in [1_000usize, 100_000, 1_000_000] {
        let items: Vec<f64> = vec![16.0; len];
        group.bench_with_input(BenchmarkId::from_parameter(len), &items, |b, items| {
            b.iter_batched(
                || items.clone(),
                |items| {
                    let mut flow = VirtualFlow::vertical(items, |height: &f64| {
                        NodeCell::new(LeafNode::new(Size::new(200.0, *height)))
                    });
                    flow.resize(Size::new(200.0, 800.0));
                    flow.layout();
                    black_box(flow.visible_indices());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_flow/scroll");

    for step in [4.0_f64, 64.0, 400.0] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("step", step as u32), &step, |b, &step| {
            let mut flow = flow_of(100_000);
            b.iter(|| {
                flow.scroll_y(step);
                flow.layout();
                black_box(flow.first_visible_index());
            });
        });
    }

    group.finish();
}

fn bench_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_flow/jump");

    // Jumps alternate between the two ends so every iteration crops the
    // viewport and materializes a fresh neighborhood.
    for len in [10_000usize, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut flow = flow_of(len);
            let mut far = false;
            b.iter(|| {
                far = !far;
                flow.show_as_first(if far { len - 100 } else { 50 });
                flow.layout();
                black_box(flow.first_visible_index());
            });
        });
    }

    group.finish();
}

fn bench_estimates(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_flow/estimates");

    group.bench_function("flush_after_splice", |b| {
        let mut flow = flow_of(100_000);
        b.iter(|| {
            flow.splice(500..501, [20.0]);
            flow.flush_estimates();
            black_box(flow.total_height_estimate());
        });
    });

    group.bench_function("set_estimated_scroll_y", |b| {
        let mut flow = flow_of(100_000);
        flow.flush_estimates();
        let total = flow.total_height_estimate();
        let mut offset = 0.0;
        b.iter(|| {
            offset = (offset + 12_345.0) % total;
            flow.set_estimated_scroll_y(offset);
            flow.layout();
            black_box(flow.first_visible_index());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_first_layout,
    bench_scroll,
    bench_jump,
    bench_estimates
);
criterion_main!(benches);

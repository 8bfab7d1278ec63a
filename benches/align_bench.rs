use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ctcalign::ctc::mocks::{mock_random_batch, mock_random_pair};
use ctcalign::ctc::{forward_backward, log_match_matrix};
use ctcalign::prelude::*;

fn criterion_benchmark(c: &mut Criterion) {
    let params = AlignParams::default();

    let (outputs, targets) = mock_random_pair::<f32>(200, 50, 32, 0);
    c.bench_function("align 200x50x32", |b| {
        b.iter(|| align_targets(black_box(&outputs.view()), black_box(&targets.view())))
    });

    let lmatch = log_match_matrix(&outputs.view(), &targets.view(), &params);
    c.bench_function("forward_backward 200x50", |b| {
        b.iter(|| forward_backward(black_box(&lmatch.view()), params.skip))
    });

    let mut group = c.benchmark_group("batch");
    let (outputs, targets) = mock_random_batch::<f32>(32, 200, 50, 32, 0);
    for (name, config) in [
        ("serial", BatchConfig::serial()),
        ("parallel", BatchConfig::parallel()),
    ]
    .iter()
    {
        group.bench_with_input(BenchmarkId::from_parameter(name), config, |b, config| {
            b.iter(|| align_targets_batch(&outputs.view(), &targets.view(), &params, config))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

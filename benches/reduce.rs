//! Benchmark: work-group reductions and histogram on the available backends.
//!
//! Sweeps dataset length and work-group size for the CPU backend, and runs
//! the same sizes on WebGPU when the `wgpu` feature is enabled and an
//! adapter exists.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wgstat::config::StatsConfig;
use wgstat::dataset::Dataset;
use wgstat::ops::{BinRange, HistogramOps, ReduceOp, ReduceOps, StatisticalOps};
use wgstat::runtime::Runtime;
use wgstat::runtime::cpu::{CpuDevice, CpuRuntime};

const LENGTHS: [usize; 3] = [1 << 12, 1 << 16, 1 << 20];

fn dataset(len: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    Dataset::from_scaled((0..len).map(|_| rng.random_range(-150..=350)).collect())
}

fn bench_cpu_reduce(c: &mut Criterion) {
    let client = CpuRuntime::default_client(&CpuDevice::new()).unwrap();
    let mut group = c.benchmark_group("cpu_reduce");

    for len in LENGTHS {
        let d = dataset(len);
        group.throughput(Throughput::Elements(len as u64));
        for wg in [32u32, 256] {
            for op in ReduceOp::ALL {
                group.bench_with_input(
                    BenchmarkId::new(format!("{op}_wg{wg}"), len),
                    &d,
                    |b, d| b.iter(|| client.reduce(d, op, wg).unwrap()),
                );
            }
        }
    }
    group.finish();
}

fn bench_cpu_histogram(c: &mut Criterion) {
    let client = CpuRuntime::default_client(&CpuDevice::new()).unwrap();
    let range = BinRange::new(-150, 350).unwrap();
    let mut group = c.benchmark_group("cpu_histogram");

    for len in LENGTHS {
        let d = dataset(len);
        group.throughput(Throughput::Elements(len as u64));
        for bins in [10usize, 1000] {
            group.bench_with_input(BenchmarkId::new(format!("bins{bins}"), len), &d, |b, d| {
                b.iter(|| client.histogram(d, range, bins, 32).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_cpu_summary(c: &mut Criterion) {
    let client = CpuRuntime::default_client(&CpuDevice::new()).unwrap();
    let config = StatsConfig::new(10);
    let d = dataset(1 << 20);

    c.bench_function("cpu_summary_1M", |b| {
        b.iter(|| client.summarize(&d, &config).unwrap())
    });
}

#[cfg(feature = "wgpu")]
fn bench_wgpu(c: &mut Criterion) {
    use wgstat::runtime::wgpu::{WgpuDevice, WgpuRuntime, is_wgpu_available};

    if !is_wgpu_available() {
        eprintln!("No WebGPU adapter available, skipping wgpu benchmarks");
        return;
    }
    let client = WgpuRuntime::default_client(&WgpuDevice::new(0)).unwrap();
    let range = BinRange::new(-150, 350).unwrap();
    let mut group = c.benchmark_group("wgpu");

    for len in LENGTHS {
        let d = dataset(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("sum_wg256", len), &d, |b, d| {
            b.iter(|| client.sum(d, 256).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("histogram_bins10", len), &d, |b, d| {
            b.iter(|| client.histogram(d, range, 10, 256).unwrap())
        });
    }
    group.finish();
}

#[cfg(not(feature = "wgpu"))]
fn bench_wgpu(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_cpu_reduce,
    bench_cpu_histogram,
    bench_cpu_summary,
    bench_wgpu
);
criterion_main!(benches);

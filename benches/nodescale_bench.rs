use criterion::{Criterion, criterion_group, criterion_main};
use std::process::Command;

fn benchmark_nodescale_list(c: &mut Criterion) {
    c.bench_function("nodescale list", |b| {
        b.iter(|| {
            Command::new("./target/release/nodescale")
                .arg("list")
                .output()
                .expect("Failed to execute nodescale list")
        })
    });
}

fn benchmark_nodescale_list_filtered(c: &mut Criterion) {
    c.bench_function("nodescale list --autoscale enabled", |b| {
        b.iter(|| {
            Command::new("./target/release/nodescale")
                .args(["list", "--autoscale", "enabled", "--search", "pool"])
                .output()
                .expect("Failed to execute nodescale list")
        })
    });
}

fn benchmark_nodescale_tree(c: &mut Criterion) {
    c.bench_function("nodescale tree", |b| {
        b.iter(|| {
            Command::new("./target/release/nodescale")
                .arg("tree")
                .output()
                .expect("Failed to execute nodescale tree")
        })
    });
}

fn benchmark_nodescale_schedules(c: &mut Criterion) {
    c.bench_function("nodescale schedules --json", |b| {
        b.iter(|| {
            Command::new("./target/release/nodescale")
                .args(["schedules", "--json"])
                .output()
                .expect("Failed to execute nodescale schedules")
        })
    });
}

criterion_group!(
    benches,
    benchmark_nodescale_list,
    benchmark_nodescale_list_filtered,
    benchmark_nodescale_tree,
    benchmark_nodescale_schedules
);
criterion_main!(benches);

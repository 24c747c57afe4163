use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use thread_dump_analyzer::analysis::{contended_locks, group_by_stack};
use thread_dump_analyzer::parse_thread_dump;

/// Generate a dump where threads cycle through a handful of distinct stacks
fn generate_dump(num_threads: usize) -> String {
    let mut text = String::new();
    for i in 0..num_threads {
        text.push_str(&format!("\"pool-{}\" nid=0x{:x}\n", i, i + 1));
        text.push_str("   java.lang.Thread.State: WAITING (parking)\n");
        text.push_str(&format!("\tat com.example.Task{}.run(Task.java:1)\n", i % 8));
        text.push_str(&format!(
            "\t- parking to wait for  <0x{:x}> (a java.util.concurrent.locks.AbstractQueuedSynchronizer$ConditionObject)\n",
            i % 16
        ));
        text.push_str("\tat java.lang.Thread.run(Thread.java:833)\n\n");
    }
    text
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");

    for size in [1_000, 10_000].iter() {
        let dump = parse_thread_dump(&generate_dump(*size), "");
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("group_by_stack", size), size, |b, _| {
            b.iter(|| group_by_stack(black_box(&dump)).len());
        });
        group.bench_with_input(BenchmarkId::new("contended_locks", size), size, |b, _| {
            b.iter(|| contended_locks(black_box(&dump)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);

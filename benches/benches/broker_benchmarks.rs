use std::{hint::black_box, thread};

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use fanout::{params, Broker, Params};

/// Количество публикаций на один поток издателя в параллельных замерах
const PUBLISHES_PER_THREAD: usize = 1_000;

fn broker_with(subscribers: usize) -> Broker {
    let broker = Broker::new();
    for _ in 0..subscribers {
        broker.subscribe(|_: &Params| Ok(()));
    }
    broker
}

fn bench_subscribe(c: &mut Criterion) {
    c.bench_function("broker_subscribe", |b| {
        b.iter_batched(
            || broker_with(16),
            |broker| {
                black_box(broker.subscribe(|_: &Params| Ok(())));
                broker
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_publish(c: &mut Criterion) {
    let mut group = c.benchmark_group("publish");
    let payload = params!["param"];

    for subs in [0usize, 1, 10, 100] {
        let broker = broker_with(subs);
        group.throughput(Throughput::Elements(subs.max(1) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(subs), &subs, |b, _| {
            b.iter(|| broker.publish(black_box(&payload)).unwrap())
        });
    }
    group.finish();
}

/// Несколько потоков издателей публикуют в общий брокер одновременно.
fn bench_parallel_publishers(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_publish");
    group.sample_size(20);

    for (publishers, subs) in [(4usize, 10usize), (4, 100), (16, 10), (16, 100)] {
        let broker = broker_with(subs);
        group.throughput(Throughput::Elements(
            (publishers * PUBLISHES_PER_THREAD) as u64,
        ));
        group.bench_function(
            BenchmarkId::new(format!("{publishers}_publishers"), subs),
            |b| {
                b.iter(|| {
                    thread::scope(|s| {
                        for _ in 0..publishers {
                            let broker = &broker;
                            s.spawn(move || {
                                let payload = params!["param"];
                                for _ in 0..PUBLISHES_PER_THREAD {
                                    broker.publish(&payload).unwrap();
                                }
                            });
                        }
                    })
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_subscribe,
    bench_publish,
    bench_parallel_publishers,
);
criterion_main!(benches);

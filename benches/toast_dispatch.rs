// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for toast store dispatch.
//!
//! Measures the performance of:
//! - Enqueue with eviction at the configured limit
//! - Dismiss-all fan-out to subscribers

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use toast_store::notifications::{Manager, RemoveDelay, ToastLimit, ToastPayload};

/// Benchmark enqueue on a full store.
///
/// Every call inserts at the head and evicts the tail.
fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_dispatch");

    let manager = Manager::with_limits(ToastLimit::new(5), RemoveDelay::default());
    group.bench_function("enqueue_at_limit", |b| {
        b.iter(|| {
            let handle = manager.enqueue(ToastPayload::titled("Message sent"));
            black_box(handle.id());
        });
    });

    group.finish();
}

/// Benchmark a dismiss/remove cycle with several subscribers attached.
///
/// Runs inside a current-thread runtime so removal timers are armed.
fn bench_dismiss_with_subscribers(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_dispatch");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let _guard = runtime.enter();

    let manager = Manager::with_limits(
        ToastLimit::new(10),
        RemoveDelay::from(Duration::from_secs(60)),
    );
    let subscriptions: Vec<_> = (0..8)
        .map(|_| manager.subscribe(|state| {
            black_box(state.len());
        }))
        .collect();

    group.bench_function("dismiss_all_then_clear", |b| {
        b.iter(|| {
            for _ in 0..10 {
                manager.enqueue(ToastPayload::titled("Copied"));
            }
            manager.dismiss(None);
            manager.remove(None);
        });
    });

    for subscription in &subscriptions {
        subscription.unsubscribe();
    }
    group.finish();
}

criterion_group!(benches, bench_enqueue, bench_dismiss_with_subscribers);
criterion_main!(benches);

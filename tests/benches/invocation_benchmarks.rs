//! # Entity Ledger Invocation Benchmarks
//!
//! | Path | Measured |
//! |------|----------|
//! | Dispatcher | parse + handler over a transaction scope |
//! | Peer | full invocation including invariant check and commit |
//! | Batch | sequential balance transfers at growing batch sizes |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use el_contract::adapters::TransactionScope;
use el_contract::service::EntityContract;
use el_peer::Peer;
use el_tests::fixtures::{args, balance_world, request, seeded_world};
use tokio::runtime::Runtime;

// ============================================================================
// DISPATCHER
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let contract = EntityContract::default();
    let world = seeded_world();

    let mut group = c.benchmark_group("dispatch");
    let cases = [
        ("query", args(&["alice"])),
        ("invoke", args(&["alice", "bob", "42", "Name=Alice"])),
        ("delete", args(&["alice"])),
        ("init", args(&["alice", "30", "bob", "Name=Bob"])),
    ];
    for (function, values) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(function), values, |b, values| {
            b.iter(|| {
                rt.block_on(async {
                    let scope = TransactionScope::new(&world);
                    let outcome = contract.dispatch(&scope, function, values).await;
                    black_box((outcome.is_success(), scope.len()))
                })
            });
        });
    }
    group.finish();
}

// ============================================================================
// PEER
// ============================================================================

fn bench_peer_invoke(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let peer = Peer::new(EntityContract::default(), balance_world(i64::MAX / 2, 0));

    c.bench_function("peer_transfer_balance_commit", |b| {
        b.iter(|| {
            let response = rt.block_on(peer.invoke(request(
                "bench",
                "transferBalance",
                &["alice", "bob", "1"],
            )));
            black_box(response.status)
        });
    });
}

fn bench_batches(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("peer_batch");

    for size in [10usize, 100, 1_000] {
        let requests: Vec<_> = (0..size)
            .map(|i| request(&format!("tx-{i}"), "transferBalance", &["alice", "bob", "1"]))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &requests, |b, requests| {
            b.iter(|| {
                let peer = Peer::new(EntityContract::default(), balance_world(1_000_000, 0));
                black_box(rt.block_on(peer.run_batch(requests.clone())).len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_peer_invoke, bench_batches);
criterion_main!(benches);

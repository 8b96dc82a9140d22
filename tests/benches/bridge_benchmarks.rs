//! # Webview Bridge Benchmarks
//!
//! | Group | What is measured |
//! |-------|------------------|
//! | wire | encode/decode of call and reply envelopes |
//! | correlation | dispatch + completion against an in-memory channel |
//! | loopback | full round trip through the host runtime |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use shared_wire::{CallId, HostReply, OutboundMessage};
use wb_01_script_bridge::{BridgeConfig, BridgeContext, ChannelError, FnChannel, ManualTimerScheduler};
use wb_02_host_runtime::{FunctionRegistry, HostConfig};
use wb_tests::Loopback;

fn bench_wire(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire");

    let message = OutboundMessage::request(
        "window.setSize",
        vec![json!(1280), json!(720)],
        CallId::new(42),
    );
    let encoded = message.to_json().unwrap();
    group.bench_function("encode_request", |b| {
        b.iter(|| black_box(message.to_json().unwrap()))
    });
    group.bench_function("decode_request", |b| {
        b.iter(|| black_box(OutboundMessage::from_json(&encoded).unwrap()))
    });

    let reply = HostReply::resolved(CallId::new(42), json!({"items": [1, 2, 3]})).to_json().unwrap();
    group.bench_function("decode_reply", |b| {
        b.iter(|| black_box(HostReply::from_json(&reply).unwrap()))
    });

    group.finish();
}

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    let scheduler = Arc::new(ManualTimerScheduler::new());
    let bridge = BridgeContext::new(BridgeConfig::default(), scheduler.clone())
        .with_channel(Arc::new(FnChannel::new(|_json: &str| Ok::<(), ChannelError>(()))));

    group.bench_function("call_then_complete", |b| {
        b.iter(|| {
            let reply = bridge.call("op", vec![json!(1)]);
            let id = reply.call_id().unwrap();
            black_box(bridge.complete_success(id, json!(2)));
        })
    });

    for outstanding in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(outstanding as u64));
        group.bench_with_input(
            BenchmarkId::new("settle_outstanding", outstanding),
            &outstanding,
            |b, &n| {
                b.iter(|| {
                    let ids: Vec<CallId> = (0..n)
                        .filter_map(|_| bridge.call("op", vec![]).call_id())
                        .collect();
                    for id in ids.into_iter().rev() {
                        bridge.complete_failure(id, "nope");
                    }
                })
            },
        );
    }

    group.bench_function("notify", |b| {
        b.iter(|| bridge.notify("console.log", vec![json!("tick")]))
    });

    group.finish();
}

fn bench_loopback(c: &mut Criterion) {
    let mut group = c.benchmark_group("loopback");
    group.measurement_time(Duration::from_secs(5));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();
    let lb = runtime.block_on(async {
        Loopback::start(
            Duration::from_secs(30),
            HostConfig::default(),
            |registry: &mut FunctionRegistry| {
                registry.register_fn("echo", |_ctx, args| Ok(serde_json::Value::Array(args)));
            },
        )
    });

    group.bench_function("round_trip", |b| {
        b.to_async(&runtime)
            .iter(|| async { black_box(lb.bridge.call("echo", vec![json!("x")]).await.unwrap()) })
    });

    group.finish();
    runtime.block_on(lb.shutdown());
}

criterion_group!(benches, bench_wire, bench_correlation, bench_loopback);
criterion_main!(benches);

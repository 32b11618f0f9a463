use std::time::{Duration, UNIX_EPOCH};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use corelib::{HealthPolicy, MemberState, MembershipSnapshot, Ring};
use replication::{ReplicationStrategy, TransitionAwareStrategy};

const NOW: i64 = 1_700_000_000;

/// Ring of `members` members with 512 evenly interleaved tokens each.
fn build_ring(members: u32) -> Ring {
    let tokens_per_member = 512u32;
    let step = u32::MAX / (members * tokens_per_member);
    let mut snapshot = MembershipSnapshot::new(1);
    for m in 0..members {
        let tokens = (0..tokens_per_member)
            .map(|t| (t * members + m) * step)
            .collect();
        let state = if m % 10 == 0 { MemberState::Leaving } else { MemberState::Active };
        snapshot.add_member(format!("gw-{m}"), format!("10.0.{}.{}", m / 256, m % 256), tokens, state, NOW);
    }
    Ring::from_snapshot(&snapshot).expect("tokens are unique")
}

fn bench_replicas(c: &mut Criterion) {
    let strategy = TransitionAwareStrategy::new(HealthPolicy::new(Duration::from_secs(60)));
    let now = UNIX_EPOCH + Duration::from_secs(NOW as u64);
    let mut group = c.benchmark_group("transition_aware_replicas");

    for members in [3u32, 30, 300] {
        let ring = build_ring(members);
        group.bench_with_input(BenchmarkId::from_parameter(members), &ring, |b, ring| {
            let mut hash = 0u32;
            b.iter(|| {
                hash = hash.wrapping_add(2_654_435_761);
                black_box(strategy.replicas(ring, hash, 3, now))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_replicas);
criterion_main!(benches);

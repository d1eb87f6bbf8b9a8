use criterion::{criterion_group, criterion_main, Criterion};
use pathogen_core::registry::ChunkAllocator;
use pathogen_core::{Catalog, EffectDef, Registry};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn wide_catalog() -> Catalog {
    Catalog {
        suppressants: (0..20).map(|i| format!("suppressant-{}", i)).collect(),
        carriers: (0..20).map(|i| format!("carrier-{}", i)).collect(),
        effects: (0..200)
            .map(|i| EffectDef::new(format!("effect-{}", i), (i % 5 + 1) as u8))
            .collect(),
    }
}

fn bench_allocation(c: &mut Criterion) {
    let catalog = wide_catalog();

    c.bench_function("begin_round_240_capabilities", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            let mut registry = Registry::new();
            registry.begin_round(&catalog, &mut rng);
        })
    });

    c.bench_function("assign_tier2_from_64_chunks", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(2);
            let mut allocator = ChunkAllocator::new();
            allocator.assign_tier(1, 64, &mut rng);
            allocator.assign_tier(2, 64, &mut rng)
        })
    });
}

criterion_group!(benches, bench_allocation);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use setsearch::cards::{is_set, is_set_branchless, is_set_reference, pack, Card, PACK_SIZE};
use setsearch::{CancelToken, IncrementalSearch, SetCount};

// Hand-rolled LCG so the sampled triples are deterministic.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }
    fn next_range(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn sample_triples(n: usize, seed: u64) -> Vec<(Card, Card, Card)> {
    let pack = pack();
    let mut rng = Lcg::new(seed);
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let i = rng.next_range(PACK_SIZE as u64) as usize;
        let j = rng.next_range(PACK_SIZE as u64) as usize;
        let k = rng.next_range(PACK_SIZE as u64) as usize;
        if i != j && j != k && i != k {
            out.push((pack[i], pack[j], pack[k]));
        }
    }
    out
}

fn bench_predicates(c: &mut Criterion) {
    let triples = sample_triples(1024, 42);

    c.bench_function("is_set_bitwise_1k", |b| {
        b.iter(|| {
            triples
                .iter()
                .filter(|&&(x, y, z)| is_set(black_box(x), y, z))
                .count()
        });
    });

    c.bench_function("is_set_branchless_1k", |b| {
        b.iter(|| {
            triples
                .iter()
                .filter(|&&(x, y, z)| is_set_branchless(black_box(x), y, z))
                .count()
        });
    });

    c.bench_function("is_set_reference_1k", |b| {
        b.iter(|| {
            triples
                .iter()
                .filter(|&&(x, y, z)| is_set_reference(black_box(x), y, z))
                .count()
        });
    });
}

fn bench_small_search(c: &mut Criterion) {
    // 27-card pack keeps one end-to-end run in the low milliseconds.
    let exclude: Vec<Card> = pack()
        .iter()
        .filter(|card| card.index() % 3 != 0)
        .copied()
        .collect();

    c.bench_function("incremental_27_cards_k4", |b| {
        b.iter(|| {
            IncrementalSearch::new(4, &[], black_box(&exclude), |_: &[Card], _: SetCount| {})
                .unwrap()
                .with_workers(2)
                .unwrap()
                .run(&CancelToken::new())
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_predicates, bench_small_search);
criterion_main!(benches);

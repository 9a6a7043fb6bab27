use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

use crate::config::BenchConfig;
use crate::container::{Container, Key, OpKind};
use crate::error::Error;
use crate::llrb::Llrb;
use crate::samples::SidSamples;
use crate::sid::SidBenchmark;
use crate::sorted_list::SortedList;

#[test]
fn test_small_scenario() {
    let config = BenchConfig::new(10, 2, 1, 4);
    let samples = SidSamples {
        search: vec![1, 4],
        insert: vec![3, 1, 4, 0, 9, 2, 6, 5, 8, 7],
        delete: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    };
    let bench = SidBenchmark::new(&config, &samples).unwrap();
    let mut set = RefSet::new();
    let result = bench.run(&mut set).unwrap();

    let sizes = |op| -> Vec<usize> { result.points(op).iter().map(|p| p.x).collect() };
    assert_eq!(sizes(OpKind::Search), vec![2, 6]);
    assert_eq!(sizes(OpKind::Insert), vec![2, 6]);
    assert_eq!(sizes(OpKind::Delete), vec![6, 2]);
    assert!(result.search.iter().all(|p| p.y >= 0.0));

    assert_eq!(set.searches(), 2);
    assert_eq!(set.inserts, 10);
    assert_eq!(set.deletes, 8);
    assert!(set.violations().is_empty());
    // delete cursor descends from index stop-1 down to bm_start.
    let left: Vec<Key> = set.keys.iter().cloned().collect();
    assert_eq!(left, vec![0, 1]);
}

#[test]
fn test_uneven_interval() {
    // growth points 2, 6, 10 and a truncated last step to 11.
    let config = BenchConfig::new(11, 2, 1, 4);
    let mut rng = SmallRng::seed_from_u64(11);
    let samples = SidSamples::random(&config, &mut rng).unwrap();
    let bench = SidBenchmark::new(&config, &samples).unwrap();
    let mut set = RefSet::new();
    let result = bench.run(&mut set).unwrap();

    let xs: Vec<usize> = result.insert.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![2, 6, 10]);
    let xs: Vec<usize> = result.delete.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![10, 6, 2]);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_huge_interval() {
    // single measurement point, growth runs straight on to stop.
    let config = BenchConfig::new(10, 2, 1, usize::MAX);
    let samples = SidSamples::sorted(&config).unwrap();
    assert_eq!(samples.search, vec![1]);
    let bench = SidBenchmark::new(&config, &samples).unwrap();
    let mut set = RefSet::new();
    let result = bench.run(&mut set).unwrap();

    let sizes = |op| -> Vec<usize> { result.points(op).iter().map(|p| p.x).collect() };
    assert_eq!(sizes(OpKind::Search), vec![2]);
    assert_eq!(sizes(OpKind::Insert), vec![2]);
    assert_eq!(sizes(OpKind::Delete), vec![2]);
    assert_eq!(set.inserts, 10);
    assert_eq!(set.deletes, 8);
    assert!(set.violations().is_empty());
}

#[test]
fn test_bundled_containers() {
    let config = BenchConfig::new(2_100, 1_000, 100, 200);
    let mut rng = SmallRng::seed_from_u64(3);
    let samples = SidSamples::random(&config, &mut rng).unwrap();
    let bench = SidBenchmark::new(&config, &samples).unwrap();

    let mut llrb = Llrb::new("llrb");
    let res1 = bench.run(&mut llrb).unwrap();
    assert_eq!(llrb.len(), 1_000);
    assert!(llrb.validate().is_ok());

    let mut list = SortedList::new();
    let res2 = bench.run(&mut list).unwrap();
    assert_eq!(list.len(), 1_000);

    let mut set: BTreeSet<Key> = BTreeSet::new();
    let res3 = bench.run(&mut set).unwrap();
    assert_eq!(Container::len(&set), 1_000);

    // all containers end up with the same keys.
    assert_eq!(llrb.keys(), list.as_slice().to_vec());
    assert_eq!(llrb.keys(), set.iter().cloned().collect::<Vec<Key>>());

    for op in OpKind::ALL.iter().cloned() {
        let xs = |r: &crate::sid::SidResult| -> Vec<usize> {
            r.points(op).iter().map(|p| p.x).collect()
        };
        assert_eq!(xs(&res1), xs(&res2));
        assert_eq!(xs(&res1), xs(&res3));
        assert_eq!(res1.points(op).len(), config.batches());
    }
}

#[test]
fn test_idempotent() {
    let config = BenchConfig::new(1_050, 100, 10, 100);
    let run = || {
        let mut rng = SmallRng::seed_from_u64(0xdead);
        let samples = SidSamples::random(&config, &mut rng).unwrap();
        let bench = SidBenchmark::new(&config, &samples).unwrap();
        let mut set = RefSet::new();
        let result = bench.run(&mut set).unwrap();
        let sizes: Vec<Vec<usize>> = OpKind::ALL
            .iter()
            .map(|op| result.points(*op).iter().map(|p| p.x).collect())
            .collect();
        (sizes, set.searches(), set.inserts, set.deletes, set.keys)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_validation_before_timing() {
    let config = BenchConfig::new(3_000, 1_000, 1_000, 1_000);
    let mut rng = SmallRng::seed_from_u64(5);
    let mut samples = SidSamples::random(&config, &mut rng).unwrap();
    samples.search.truncate(500);

    match SidBenchmark::new(&config, &samples) {
        Err(Error::InsufficientSamples {
            kind: OpKind::Search,
            required: 2_000,
            available: 500,
        }) => (),
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("expected insufficient samples"),
    }
}

#[test]
fn test_non_empty_container() {
    let config = BenchConfig::new(10, 2, 1, 4);
    let samples = SidSamples::sorted(&config).unwrap();
    let bench = SidBenchmark::new(&config, &samples).unwrap();

    let mut set = RefSet::new();
    set.insert(100);
    assert_eq!(bench.run(&mut set).err(), Some(Error::NonEmptyContainer(1)));
    assert_eq!(set.searches(), 0);
}

#[test]
fn test_contract_violation() {
    let config = BenchConfig::new(10, 2, 1, 4);
    let samples = SidSamples {
        search: vec![1, 4],
        insert: vec![3, 1, 4, 0, 9, 2, 6, 5, 8, 7],
        delete: vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    };
    let bench = SidBenchmark::new(&config, &samples).unwrap();

    // key 4 is lost by the container and later searched for.
    let mut set = LossySet {
        keys: BTreeSet::new(),
        lost: 4,
    };
    let err = Error::ContractViolation {
        op: OpKind::Search,
        key: 4,
    };
    assert_eq!(bench.run(&mut set).err(), Some(err));

    // key 8 is lost, nothing searches it, but the delete fails.
    let mut set = LossySet {
        keys: BTreeSet::new(),
        lost: 8,
    };
    let err = Error::SizeMismatch {
        expected: 10,
        found: 9,
    };
    assert_eq!(bench.run(&mut set).err(), Some(err));
}

#[test]
fn test_boxed_container() {
    let config = BenchConfig::new(10, 2, 1, 4);
    let samples = SidSamples::sorted(&config).unwrap();
    let bench = SidBenchmark::new(&config, &samples).unwrap();

    let mut boxed: Box<dyn Container> = Box::new(SortedList::new());
    let result = bench.run(&mut boxed).unwrap();
    assert_eq!(result.delete.len(), 2);
    assert_eq!(boxed.len(), 2);
}

fn config_strategy() -> impl Strategy<Value = BenchConfig> {
    (1usize..8, 0usize..4, 0usize..40, 0usize..8).prop_map(|(length, extra, span, slack)| {
        let interval = length + extra;
        let bm_start = length + slack;
        let stop = bm_start + span;
        let last = bm_start + ((span.max(1) - 1) / interval) * interval;
        // keep room for the last timed batch.
        let stop = stop.max(last + length);
        BenchConfig::new(stop, bm_start, length, interval)
    })
}

proptest! {
    #[test]
    fn test_sequencing_invariant(config in config_strategy(), seed in any::<u64>()) {
        prop_assume!(config.validate().is_ok());
        let mut rng = SmallRng::seed_from_u64(seed);
        let samples = SidSamples::random(&config, &mut rng).unwrap();
        let bench = SidBenchmark::new(&config, &samples).unwrap();
        let mut set = RefSet::new();
        let result = bench.run(&mut set).unwrap();

        prop_assert!(set.violations().is_empty());
        prop_assert_eq!(set.len(), config.bm_start);

        let batches = config.batches();
        prop_assert_eq!(result.search.len(), batches);
        prop_assert_eq!(result.insert.len(), batches);
        prop_assert_eq!(result.delete.len(), batches);
        prop_assert_eq!(set.searches(), batches * config.bm_length);
        prop_assert_eq!(set.inserts, config.stop);
        prop_assert_eq!(set.deletes, config.stop - config.bm_start);

        prop_assert!(result.insert.windows(2).all(|w| w[0].x <= w[1].x));
        prop_assert!(result.delete.windows(2).all(|w| w[0].x >= w[1].x));
        if let Some(last) = result.delete.last() {
            prop_assert_eq!(last.x, config.bm_start);
        }
    }
}

include!("./ref_test.rs");

use std::{cmp, collections::HashSet, hint::black_box, time::Instant};

use log::{debug, info};
use rand::{distributions::WeightedIndex, prelude::Distribution, seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::aggregate::Combine;
use crate::container::{Container, Key, OpKind};
use crate::error::{Error, Result};
use crate::plot::PlotPoint;

/// Legend of the simulated size series in mixed figures.
pub const SIZE_LEGEND: &str = "Data Structure Size";

/// One step of a mixed operation stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Search(Key),
    Insert(Key),
    Delete(Key),
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Search(_) => OpKind::Search,
            Operation::Insert(_) => OpKind::Insert,
            Operation::Delete(_) => OpKind::Delete,
        }
    }

    pub fn key(&self) -> Key {
        match self {
            Operation::Search(key) | Operation::Insert(key) | Operation::Delete(key) => *key,
        }
    }

    /// Change in container size caused by this operation.
    pub fn size_delta(&self) -> isize {
        match self {
            Operation::Search(_) => 0,
            Operation::Insert(_) => 1,
            Operation::Delete(_) => -1,
        }
    }

    #[inline]
    fn apply<C: Container + ?Sized>(&self, container: &mut C) -> bool {
        match self {
            Operation::Search(key) => black_box(container.search(key)),
            Operation::Insert(key) => container.insert(*key),
            Operation::Delete(key) => container.delete(key),
        }
    }
}

/// Relative frequency of each operation kind in a generated stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub search: u32,
    pub insert: u32,
    pub delete: u32,
}

impl Default for Weights {
    fn default() -> Weights {
        Weights {
            search: 1,
            insert: 1,
            delete: 1,
        }
    }
}

/// Generate a stream of `n` operations drawn with `weights`. The
/// stream never inserts a present key, and never searches or deletes
/// an absent one; when the simulated container is empty the next
/// operation is an insert.
pub fn random_operations<R: Rng + ?Sized>(
    n: usize,
    weights: Weights,
    rng: &mut R,
) -> Result<Vec<Operation>> {
    let kinds = [OpKind::Search, OpKind::Insert, OpKind::Delete];
    let dist = WeightedIndex::new(&[weights.search, weights.insert, weights.delete])
        .map_err(|err| Error::InvalidWeights(err.to_string()))?;
    if weights.insert == 0 {
        return Err(Error::InvalidWeights("insert weight is zero".to_string()));
    }

    // at most n inserts, fresh keys come from a permutation of [0, n).
    let mut fresh: Vec<Key> = (0..n as Key).collect();
    fresh.shuffle(rng);
    let mut present: Vec<Key> = Vec::with_capacity(n);
    let mut ops = Vec::with_capacity(n);
    for _ in 0..n {
        let kind = match present.is_empty() {
            true => OpKind::Insert,
            false => kinds[dist.sample(rng)],
        };
        let op = match kind {
            OpKind::Insert => match fresh.pop() {
                Some(key) => {
                    present.push(key);
                    Operation::Insert(key)
                }
                // n keys for at most n inserts, never taken.
                None => break,
            },
            OpKind::Search => Operation::Search(present[rng.gen_range(0..present.len())]),
            OpKind::Delete => {
                let off = rng.gen_range(0..present.len());
                Operation::Delete(present.swap_remove(off))
            }
        };
        ops.push(op);
    }
    Ok(ops)
}

/// Insert-only stream over `keys`, in order. Timing it with
/// [`MixedBenchmark`] measures inserts alone, at every `bm_interval`
/// keys.
pub fn insert_operations(keys: &[Key]) -> Vec<Operation> {
    keys.iter().cloned().map(Operation::Insert).collect()
}

/// Check that `ops`, applied to an empty container, never inserts a
/// present key nor searches or deletes an absent key.
pub fn validate_operations(ops: &[Operation]) -> Result<()> {
    let mut present: HashSet<Key> = HashSet::new();
    for op in ops.iter() {
        match op {
            Operation::Search(key) if !present.contains(key) => {
                return Err(Error::AbsentSearch(*key))
            }
            Operation::Insert(key) if !present.insert(*key) => {
                return Err(Error::DuplicateInsert(*key))
            }
            Operation::Delete(key) if !present.remove(key) => {
                return Err(Error::AbsentDelete(*key))
            }
            _ => (),
        }
    }
    Ok(())
}

/// Benchmark over a mixed operation stream. The first `bm_start`
/// operations are applied untimed, then `bm_length` operations are
/// timed every `bm_interval` operations until the stream runs out. The
/// last batch may be shorter than `bm_length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixedBenchmark {
    pub bm_start: usize,
    pub bm_length: usize,
    pub bm_interval: usize,
}

impl MixedBenchmark {
    pub fn new(bm_start: usize, bm_length: usize, bm_interval: usize) -> Result<MixedBenchmark> {
        if bm_length == 0 {
            return Err(Error::ZeroLength);
        }
        if bm_interval == 0 {
            return Err(Error::ZeroInterval);
        }
        if bm_length > bm_interval {
            return Err(Error::LengthExceedsInterval {
                bm_length,
                bm_interval,
            });
        }
        Ok(MixedBenchmark {
            bm_start,
            bm_length,
            bm_interval,
        })
    }

    pub(crate) fn check(&self, ops: &[Operation]) -> Result<()> {
        if self.bm_start > ops.len() {
            return Err(Error::StopBeforeStart {
                stop: ops.len(),
                bm_start: self.bm_start,
            });
        }
        validate_operations(ops)
    }

    /// Apply `ops` to `container`, which must be empty, returning one
    /// point per timed batch, keyed by the index of its first
    /// operation.
    pub fn run<C>(&self, container: &mut C, ops: &[Operation]) -> Result<Vec<PlotPoint>>
    where
        C: Container + ?Sized,
    {
        self.check(ops)?;
        if !container.is_empty() {
            return Err(Error::NonEmptyContainer(container.len()));
        }

        let name = container.name();
        info!("{}: applying {} mixed operations", name, ops.len());
        for op in ops[..self.bm_start].iter() {
            untimed(op, container)?;
        }

        let mut points = vec![];
        let mut p = self.bm_start;
        while p < ops.len() {
            let q = cmp::min(p.saturating_add(self.bm_length), ops.len());
            debug!("{}: mixed batch [{}, {})", name, p, q);

            let mut failed: Option<&Operation> = None;
            let start = Instant::now();
            for op in ops[p..q].iter() {
                if !op.apply(container) && failed.is_none() {
                    failed = Some(op);
                }
            }
            let elapsed = start.elapsed();
            if let Some(op) = failed {
                let (op, key) = (op.kind(), op.key());
                return Err(Error::ContractViolation { op, key });
            }
            points.push(PlotPoint::from_batch(p, elapsed, q - p));

            let next = cmp::min(p.saturating_add(self.bm_interval), ops.len());
            for op in ops[q..next].iter() {
                untimed(op, container)?;
            }
            p = next;
        }
        Ok(points)
    }

    /// Simulate `ops` and report, for every timed batch of
    /// [`MixedBenchmark::run`], the median container size over that
    /// batch.
    pub fn plot_sizes(&self, ops: &[Operation]) -> Result<Vec<PlotPoint>> {
        self.check(ops)?;

        let mut size: isize = ops[..self.bm_start].iter().map(Operation::size_delta).sum();
        let mut points = vec![];
        let mut p = self.bm_start;
        while p < ops.len() {
            let q = cmp::min(p.saturating_add(self.bm_length), ops.len());
            let next = cmp::min(p.saturating_add(self.bm_interval), ops.len());

            let mut sizes: Vec<f64> = Vec::with_capacity(q - p);
            for op in ops[p..q].iter() {
                size += op.size_delta();
                sizes.push(size as f64);
            }
            if let Some(median) = Combine::Median.combine(&sizes) {
                points.push(PlotPoint::new(p, median));
            }

            size += ops[q..next].iter().map(Operation::size_delta).sum::<isize>();
            p = next;
        }
        Ok(points)
    }
}

fn untimed<C: Container + ?Sized>(op: &Operation, container: &mut C) -> Result<()> {
    match op.apply(container) {
        true => Ok(()),
        false => Err(Error::ContractViolation {
            op: op.kind(),
            key: op.key(),
        }),
    }
}

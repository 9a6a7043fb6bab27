use std::{
    cmp,
    hint::black_box,
    time::{Duration, Instant},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::BenchConfig;
use crate::container::{Container, Key, OpKind};
use crate::error::{Error, Result};
use crate::plot::PlotPoint;
use crate::samples::SidSamples;

/// Plot points of one benchmark run, one vector per operation kind.
/// Search and insert points are in increasing order of size, delete
/// points in decreasing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SidResult {
    pub search: Vec<PlotPoint>,
    pub insert: Vec<PlotPoint>,
    pub delete: Vec<PlotPoint>,
}

impl SidResult {
    pub fn points(&self, op: OpKind) -> &[PlotPoint] {
        match op {
            OpKind::Search => &self.search,
            OpKind::Insert => &self.insert,
            OpKind::Delete => &self.delete,
        }
    }

    pub fn points_mut(&mut self, op: OpKind) -> &mut Vec<PlotPoint> {
        match op {
            OpKind::Search => &mut self.search,
            OpKind::Insert => &mut self.insert,
            OpKind::Delete => &mut self.delete,
        }
    }
}

/// Search, insert and delete benchmark over a single container.
///
/// Growth phase warms the container up to `bm_start` keys, then at
/// each measurement point times `bm_length` searches and `bm_length`
/// inserts before filling up to the next point, until `stop` keys are
/// held. Shrink phase deletes back down to `bm_start`, timing
/// `bm_length` deletes that end at each measurement point.
///
/// Configuration and samples are validated once, when the benchmark
/// is constructed, so that a run never fails half way for want of
/// samples.
pub struct SidBenchmark<'a> {
    config: &'a BenchConfig,
    samples: &'a SidSamples,
}

impl<'a> SidBenchmark<'a> {
    pub fn new(config: &'a BenchConfig, samples: &'a SidSamples) -> Result<SidBenchmark<'a>> {
        samples.validate(config)?;
        Ok(SidBenchmark { config, samples })
    }

    pub fn config(&self) -> &BenchConfig {
        self.config
    }

    /// Run the benchmark against `container`, which must be empty.
    /// A container that fails a pre-vetted operation aborts the run,
    /// its partial results are discarded.
    pub fn run<C>(&self, container: &mut C) -> Result<SidResult>
    where
        C: Container + ?Sized,
    {
        if !container.is_empty() {
            return Err(Error::NonEmptyContainer(container.len()));
        }

        let BenchConfig {
            stop,
            bm_start,
            bm_length,
            bm_interval,
        } = *self.config;
        let SidSamples {
            search,
            insert,
            delete,
        } = self.samples;
        let name = container.name();
        let mut result = SidResult::default();

        info!("{}: inserting up to {}", name, bm_start);
        for key in insert[..bm_start].iter() {
            untimed(container.insert(*key), OpKind::Insert, *key)?;
        }

        let (mut search_index, mut insert_index) = (0, bm_start);
        let (mut next_benchmark, mut last_benchmark) = (bm_start, bm_start);
        while insert_index < stop {
            last_benchmark = next_benchmark;
            next_benchmark = cmp::min(next_benchmark.saturating_add(bm_interval), stop);

            let keys = &search[search_index..search_index + bm_length];
            debug!("{}: search batch at size {}", name, insert_index);
            let elapsed = time_batch(keys.iter(), OpKind::Search, |key| {
                black_box(container.search(key))
            })?;
            result
                .search
                .push(PlotPoint::from_batch(insert_index, elapsed, bm_length));
            search_index += bm_length;

            let keys = &insert[insert_index..insert_index + bm_length];
            debug!("{}: insert batch at size {}", name, insert_index);
            let elapsed = time_batch(keys.iter(), OpKind::Insert, |key| container.insert(*key))?;
            result
                .insert
                .push(PlotPoint::from_batch(insert_index, elapsed, bm_length));
            insert_index += bm_length;

            for key in insert[insert_index..next_benchmark].iter() {
                untimed(container.insert(*key), OpKind::Insert, *key)?;
            }
            insert_index = next_benchmark;
        }
        check_size(container, stop)?;

        info!("{}: shrinking from {} down to {}", name, stop, bm_start);
        let (mut size, mut delete_index) = (stop, stop);
        next_benchmark = last_benchmark + bm_length;
        while size > bm_start {
            while size > next_benchmark {
                delete_index -= 1;
                let key = delete[delete_index];
                untimed(container.delete(&key), OpKind::Delete, key)?;
                size -= 1;
            }

            let keys = &delete[delete_index - bm_length..delete_index];
            debug!("{}: delete batch at size {}", name, size);
            let elapsed = time_batch(keys.iter().rev(), OpKind::Delete, |key| {
                container.delete(key)
            })?;
            delete_index -= bm_length;
            size -= bm_length;
            result
                .delete
                .push(PlotPoint::from_batch(size, elapsed, bm_length));

            next_benchmark = next_benchmark.saturating_sub(bm_interval);
        }
        check_size(container, bm_start)?;

        Ok(result)
    }
}

/// Time `op` over every key. Failures are noted inside the timed loop
/// and reported once the clock has stopped.
pub(crate) fn time_batch<'k, I, F>(keys: I, kind: OpKind, mut op: F) -> Result<Duration>
where
    I: Iterator<Item = &'k Key>,
    F: FnMut(&Key) -> bool,
{
    let mut failed: Option<Key> = None;
    let start = Instant::now();
    for key in keys {
        if !op(key) && failed.is_none() {
            failed = Some(*key);
        }
    }
    let elapsed = start.elapsed();

    match failed {
        Some(key) => Err(Error::ContractViolation { op: kind, key }),
        None => Ok(elapsed),
    }
}

#[inline]
fn untimed(ok: bool, op: OpKind, key: Key) -> Result<()> {
    match ok {
        true => Ok(()),
        false => Err(Error::ContractViolation { op, key }),
    }
}

fn check_size<C: Container + ?Sized>(container: &C, expected: usize) -> Result<()> {
    match container.len() {
        found if found == expected => Ok(()),
        found => Err(Error::SizeMismatch { expected, found }),
    }
}

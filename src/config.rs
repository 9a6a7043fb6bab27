use log::warn;
use serde::{Deserialize, Serialize};

use crate::aggregate::Combine;
use crate::error::{Error, Result};
use crate::figure::Scale;

/// Size at which the first measurements are taken.
pub const BENCHMARK_START: usize = 100_000;
/// Number of operations timed in one batch.
pub const BENCHMARK_LENGTH: usize = 1_000;
/// Growth in container size between two measurements.
pub const BENCHMARK_INTERVAL: usize = 20_000;
/// Final size of the container at the end of growth phase.
pub const STOP: usize = BENCHMARK_START * 10 + BENCHMARK_LENGTH;

/// Batches shorter than this are dominated by timer resolution.
pub const RECOMMENDED_LENGTH: usize = 1_000;
/// Container size, as a multiple of batch length, above which a timed
/// batch does not materially change the structure's shape.
pub const RECOMMENDED_SIZE_RATIO: usize = 100;

pub const XLABEL: &str = "Number of items in data structure";
pub const YLABEL: &str = "Running time (seconds)";

/// Parameters of one search/insert/delete benchmark run.
///
/// * `stop`, container size at the end of growth phase.
/// * `bm_start`, untimed warm-up inserts, also the size at which
///   shrink phase ends.
/// * `bm_length`, operations per timed batch.
/// * `bm_interval`, container size between two measurement points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub stop: usize,
    pub bm_start: usize,
    pub bm_length: usize,
    pub bm_interval: usize,
}

impl Default for BenchConfig {
    fn default() -> BenchConfig {
        BenchConfig {
            stop: STOP,
            bm_start: BENCHMARK_START,
            bm_length: BENCHMARK_LENGTH,
            bm_interval: BENCHMARK_INTERVAL,
        }
    }
}

impl BenchConfig {
    pub fn new(stop: usize, bm_start: usize, bm_length: usize, bm_interval: usize) -> BenchConfig {
        BenchConfig {
            stop,
            bm_start,
            bm_length,
            bm_interval,
        }
    }

    /// Check the parameters against each other. Must succeed before
    /// any timing begins.
    pub fn validate(&self) -> Result<()> {
        if self.bm_length == 0 {
            return Err(Error::ZeroLength);
        }
        if self.bm_interval == 0 {
            return Err(Error::ZeroInterval);
        }
        if self.stop < self.bm_start {
            return Err(Error::StopBeforeStart {
                stop: self.stop,
                bm_start: self.bm_start,
            });
        }
        let last = match self.last_point() {
            Some(last) => last,
            None => return Ok(()),
        };
        if self.bm_length > self.bm_interval {
            return Err(Error::LengthExceedsInterval {
                bm_length: self.bm_length,
                bm_interval: self.bm_interval,
            });
        }
        if self.bm_length > self.bm_start {
            return Err(Error::LengthExceedsStart {
                bm_length: self.bm_length,
                bm_start: self.bm_start,
            });
        }
        if last.saturating_add(self.bm_length) > self.stop {
            let err = format!("point {} length {} stop {}", last, self.bm_length, self.stop);
            return Err(Error::BatchOverrunsStop(err));
        }

        if self.bm_length < RECOMMENDED_LENGTH {
            warn!(
                "bm_length {} below {}, timer resolution may dominate",
                self.bm_length, RECOMMENDED_LENGTH
            );
        }
        if self.bm_start < self.bm_length.saturating_mul(RECOMMENDED_SIZE_RATIO) {
            warn!(
                "bm_start {} below {}x bm_length {}, batches may reshape the container",
                self.bm_start, RECOMMENDED_SIZE_RATIO, self.bm_length
            );
        }
        Ok(())
    }

    /// Number of measurement points in growth phase, which is also the
    /// number of points in shrink phase.
    pub fn batches(&self) -> usize {
        if self.bm_interval == 0 || self.stop <= self.bm_start {
            return 0;
        }
        let span = self.stop - self.bm_start;
        span / self.bm_interval + (span % self.bm_interval != 0) as usize
    }

    /// Container sizes at which growth phase times its batches, in
    /// increasing order. Shrink phase ends its batches at the same
    /// sizes, in decreasing order.
    pub fn schedule(&self) -> Vec<usize> {
        (0..self.batches())
            .map(|k| self.bm_start + k * self.bm_interval)
            .collect()
    }

    /// Last growth-phase measurement point.
    pub fn last_point(&self) -> Option<usize> {
        match self.batches() {
            0 => None,
            n => Some(self.bm_start + (n - 1) * self.bm_interval),
        }
    }

    /// Minimum length of the search sample set.
    pub fn searches_required(&self) -> usize {
        self.batches() * self.bm_length
    }

    /// Minimum length of the insert sample set.
    pub fn inserts_required(&self) -> usize {
        self.stop
    }

    /// Minimum length of the delete sample set, the delete cursor
    /// starts at `stop - 1` and descends.
    pub fn deletes_required(&self) -> usize {
        self.stop
    }
}

/// Parameters shared by every container collated into one figure set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollateConfig {
    pub bench: BenchConfig,
    /// Runs per container, combined per size bucket.
    pub repeat: usize,
    pub combine: Combine,
    pub title: String,
    /// Figure caption, pgfplots output is wrapped in a `figure`
    /// environment when set.
    pub caption: Option<String>,
    pub xlabel: String,
    pub ylabel: String,
    pub xscale: Scale,
    pub yscale: Scale,
}

impl Default for CollateConfig {
    fn default() -> CollateConfig {
        CollateConfig {
            bench: Default::default(),
            repeat: 1,
            combine: Combine::Median,
            title: String::default(),
            caption: None,
            xlabel: XLABEL.to_string(),
            ylabel: YLABEL.to_string(),
            xscale: Scale::Linear,
            yscale: Scale::Linear,
        }
    }
}

impl CollateConfig {
    pub fn new(bench: BenchConfig) -> CollateConfig {
        CollateConfig {
            bench,
            ..Default::default()
        }
    }
}

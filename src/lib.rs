mod aggregate;
mod collate;
mod config;
mod container;
mod error;
mod figure;
mod llrb;
mod mixed;
mod plot;
mod samples;
mod sid;
mod sorted_list;

pub use crate::aggregate::{aggregate, combine_points, Combine};
pub use crate::collate::{SidGraphSet, SidGraphs};
pub use crate::config::{BenchConfig, CollateConfig};
pub use crate::container::{Container, Key, OpKind};
pub use crate::error::{Error, Result};
pub use crate::figure::{Figure, Scale};
pub use crate::llrb::{Llrb, Node, Stats};
pub use crate::mixed::{insert_operations, random_operations, validate_operations};
pub use crate::mixed::{MixedBenchmark, Operation, Weights, SIZE_LEGEND};
pub use crate::plot::{PlotPoint, Series};
pub use crate::samples::{random_samples, shuffled, sorted_samples, SidSamples};
pub use crate::sid::{SidBenchmark, SidResult};
pub use crate::sorted_list::SortedList;

/// Default benchmark constants.
pub mod defaults {
    pub use crate::config::{BENCHMARK_INTERVAL, BENCHMARK_LENGTH, BENCHMARK_START, STOP};
    pub use crate::config::{RECOMMENDED_LENGTH, RECOMMENDED_SIZE_RATIO, XLABEL, YLABEL};
}

#[cfg(test)]
mod aggregate_test;
#[cfg(test)]
mod sid_test;

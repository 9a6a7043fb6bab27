use thiserror::Error;

use crate::container::{Key, OpKind};

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Configuration error, `bm_length` must be at least 1.
    #[error("bm_length must be greater than zero")]
    ZeroLength,
    /// Configuration error, `bm_interval` must be at least 1.
    #[error("bm_interval must be greater than zero")]
    ZeroInterval,
    /// Configuration error, `stop` is smaller than `bm_start`.
    #[error("stop {stop} is smaller than bm_start {bm_start}")]
    StopBeforeStart { stop: usize, bm_start: usize },
    /// Configuration error, timed inserts of one batch would run past
    /// the next measurement point.
    #[error("bm_length {bm_length} exceeds bm_interval {bm_interval}")]
    LengthExceedsInterval { bm_length: usize, bm_interval: usize },
    /// Configuration error, the first search batch needs at least
    /// `bm_length` keys in the container.
    #[error("bm_length {bm_length} exceeds bm_start {bm_start}")]
    LengthExceedsStart { bm_length: usize, bm_start: usize },
    /// Configuration error, the last growth batch would insert past
    /// `stop`. The String component carries the offending point.
    #[error("timed batch overruns stop: {0}")]
    BatchOverrunsStop(String),
    /// Configuration error, a sample set is too short for the
    /// operation counts implied by the configuration.
    #[error("insufficient {kind} samples, required {required} available {available}")]
    InsufficientSamples {
        kind: OpKind,
        required: usize,
        available: usize,
    },
    /// Sample error, key would be inserted while already present.
    #[error("duplicate insert of key {0}")]
    DuplicateInsert(Key),
    /// Sample error, key would be searched while absent.
    #[error("search for absent key {0}")]
    AbsentSearch(Key),
    /// Sample error, key would be deleted while absent.
    #[error("delete of absent key {0}")]
    AbsentDelete(Key),
    /// Fatal case, container did not honour a pre-vetted operation.
    #[error("container violated {op} contract on key {key}")]
    ContractViolation { op: OpKind, key: Key },
    /// Benchmarks must start with an empty container.
    #[error("container holds {0} keys before the run")]
    NonEmptyContainer(usize),
    /// Fatal case, container reports a size other than the number of
    /// keys the run has left in it.
    #[error("container size {found}, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },
    /// Operation weights for a mixed stream are unusable.
    #[error("invalid operation weights: {0}")]
    InvalidWeights(String),
    /// Fatal case, breaking one of the two LLRB rules.
    #[error("consecutive red links")]
    ConsecutiveReds,
    /// Fatal case, breaking one of the two LLRB rules. The String
    /// component of this variant can be used for debugging.
    #[error("unbalanced black links: {0}")]
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order.
    #[error("keys out of order: {0} {1}")]
    SortError(Key, Key),
    /// Sample generator was asked for a negative count.
    #[error("invalid sample count {0}")]
    InvalidSampleCount(i64),
    /// Aggregation was called without any run.
    #[error("no runs to aggregate")]
    NoRuns,
    /// Repeated runs disagree on their plot-point sizes.
    #[error("mismatched runs: {0}")]
    MismatchedRuns(String),
    /// Figure could not be serialized.
    #[error("json: {0}")]
    Json(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

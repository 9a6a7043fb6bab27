use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One measurement. `x` is the container size when the batch was
/// measured (operation index for mixed streams), `y` the mean time in
/// seconds of one operation in that batch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: usize,
    pub y: f64,
}

impl PlotPoint {
    pub fn new(x: usize, y: f64) -> PlotPoint {
        PlotPoint { x, y }
    }

    /// Point for a batch of `count` operations that took `elapsed`.
    pub fn from_batch(x: usize, elapsed: Duration, count: usize) -> PlotPoint {
        PlotPoint {
            x,
            y: elapsed.as_secs_f64() / count as f64,
        }
    }
}

/// Ordered points of one (container, operation) pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<PlotPoint>,
}

impl Series {
    pub fn new<S: AsRef<str>>(name: S, points: Vec<PlotPoint>) -> Series {
        Series {
            name: name.as_ref().to_string(),
            points,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// x-values of this series, in order.
    pub fn sizes(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.x).collect()
    }
}

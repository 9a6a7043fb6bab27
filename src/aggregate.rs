use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::container::OpKind;
use crate::error::{Error, Result};
use crate::plot::PlotPoint;
use crate::sid::SidResult;

/// How to fold the timings of repeated runs into one value per size
/// bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combine {
    Mean,
    Median,
}

impl Combine {
    /// Combine `values`, None if there are none.
    pub fn combine(&self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        match self {
            Combine::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            Combine::Median => {
                let mut values = values.to_vec();
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                match values.len() % 2 {
                    0 => Some((values[mid - 1] + values[mid]) / 2.0),
                    _ => Some(values[mid]),
                }
            }
        }
    }
}

impl fmt::Display for Combine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Combine::Mean => write!(f, "mean"),
            Combine::Median => write!(f, "median"),
        }
    }
}

impl FromStr for Combine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Combine, String> {
        match s {
            "mean" => Ok(Combine::Mean),
            "median" => Ok(Combine::Median),
            s => Err(format!("unknown combine method {:?}", s)),
        }
    }
}

/// Merge repeated runs of the same configuration. Runs must agree on
/// the size of every plot point, only timings are combined.
pub fn aggregate(runs: &[SidResult], combine: Combine) -> Result<SidResult> {
    let mut result = SidResult::default();
    for op in OpKind::ALL.iter().cloned() {
        let points: Vec<&[PlotPoint]> = runs.iter().map(|run| run.points(op)).collect();
        *result.points_mut(op) = combine_points(&points, combine).map_err(|err| match err {
            Error::MismatchedRuns(msg) => Error::MismatchedRuns(format!("{} {}", op, msg)),
            err => err,
        })?;
    }
    Ok(result)
}

/// Merge the points of repeated runs of one series, point by point.
pub fn combine_points(runs: &[&[PlotPoint]], combine: Combine) -> Result<Vec<PlotPoint>> {
    let template = match runs.first() {
        Some(first) => *first,
        None => return Err(Error::NoRuns),
    };
    for (i, run) in runs.iter().enumerate().skip(1) {
        let ok = run.len() == template.len()
            && run.iter().zip(template.iter()).all(|(a, b)| a.x == b.x);
        if !ok {
            let err = format!("points of run {} differ from run 0", i);
            return Err(Error::MismatchedRuns(err));
        }
    }

    let mut ys: Vec<f64> = Vec::with_capacity(runs.len());
    let mut points = Vec::with_capacity(template.len());
    for (j, point) in template.iter().enumerate() {
        ys.clear();
        ys.extend(runs.iter().map(|run| run[j].y));
        let y = combine.combine(&ys).ok_or(Error::NoRuns)?;
        points.push(PlotPoint::new(point.x, y));
    }
    Ok(points)
}

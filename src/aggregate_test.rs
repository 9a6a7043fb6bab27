use crate::aggregate::{aggregate, combine_points, Combine};
use crate::error::Error;
use crate::plot::PlotPoint;
use crate::sid::SidResult;

fn result(ys: &[f64]) -> SidResult {
    let points = |xs: &[usize]| -> Vec<PlotPoint> {
        xs.iter()
            .zip(ys.iter())
            .map(|(x, y)| PlotPoint::new(*x, *y))
            .collect()
    };
    SidResult {
        search: points(&[10, 20, 30]),
        insert: points(&[10, 20, 30]),
        delete: points(&[30, 20, 10]),
    }
}

#[test]
fn test_combine() {
    assert_eq!(Combine::Mean.combine(&[]), None);
    assert_eq!(Combine::Median.combine(&[]), None);
    assert_eq!(Combine::Mean.combine(&[1.0, 2.0, 6.0]), Some(3.0));
    assert_eq!(Combine::Median.combine(&[6.0, 1.0, 2.0]), Some(2.0));
    assert_eq!(Combine::Median.combine(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));

    assert_eq!("mean".parse::<Combine>(), Ok(Combine::Mean));
    assert_eq!("median".parse::<Combine>(), Ok(Combine::Median));
    assert!("mode".parse::<Combine>().is_err());
    assert_eq!(Combine::Median.to_string(), "median");
}

#[test]
fn test_aggregate() {
    let runs = vec![
        result(&[1.0, 2.0, 3.0]),
        result(&[3.0, 2.0, 1.0]),
        result(&[8.0, 8.0, 8.0]),
    ];

    let median = aggregate(&runs, Combine::Median).unwrap();
    let ys: Vec<f64> = median.search.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![3.0, 2.0, 3.0]);
    let xs: Vec<usize> = median.delete.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![30, 20, 10]);

    let mean = aggregate(&runs, Combine::Mean).unwrap();
    let ys: Vec<f64> = mean.insert.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![4.0, 4.0, 4.0]);

    // single run is returned as is.
    let single = aggregate(&runs[..1], Combine::Median).unwrap();
    assert_eq!(single, runs[0]);
}

#[test]
fn test_aggregate_errors() {
    assert_eq!(aggregate(&[], Combine::Mean), Err(Error::NoRuns));

    let mut other = result(&[1.0, 1.0, 1.0]);
    other.delete[1].x = 21;
    let runs = vec![result(&[1.0, 1.0, 1.0]), other];
    match aggregate(&runs, Combine::Mean) {
        Err(Error::MismatchedRuns(msg)) => assert!(msg.contains("delete"), "{}", msg),
        res => panic!("unexpected {:?}", res),
    }

    let mut short = result(&[1.0, 1.0, 1.0]);
    short.search.pop();
    let runs = vec![result(&[1.0, 1.0, 1.0]), short];
    assert!(aggregate(&runs, Combine::Median).is_err());
}

#[test]
fn test_combine_points() {
    let run = |ys: &[f64]| -> Vec<PlotPoint> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| PlotPoint::new(i * 100, *y))
            .collect()
    };
    let (a, b, c) = (run(&[1.0, 5.0]), run(&[2.0, 1.0]), run(&[9.0, 3.0]));
    let runs: Vec<&[PlotPoint]> = vec![a.as_slice(), b.as_slice(), c.as_slice()];
    let points = combine_points(&runs, Combine::Median).unwrap();
    assert_eq!(points, vec![PlotPoint::new(0, 2.0), PlotPoint::new(100, 3.0)]);

    assert_eq!(combine_points(&[], Combine::Mean), Err(Error::NoRuns));
    let short = run(&[1.0]);
    let runs: Vec<&[PlotPoint]> = vec![a.as_slice(), short.as_slice()];
    match combine_points(&runs, Combine::Mean) {
        Err(Error::MismatchedRuns(_)) => (),
        res => panic!("unexpected {:?}", res),
    }
}

// Search, insert and delete benchmarks over the bundled containers:
// * Llrb, left-leaning red-black tree.
// * SortedList, binary search over a sorted vector.
// * BTreeSet, from the standard library.
//
// For each data set:
// * Grow every container from bm_start to stop, timing bm_length
//   searches and inserts every bm_interval keys.
// * Shrink every container back to bm_start, timing bm_length deletes
//   at the same sizes.
// * Write search, insert and delete figures, as JSON and pgfplots.
//
// With --insert-only, time inserts alone over one key stream instead.
//
// Optionally time a mixed stream of operations over the same
// containers.

use std::{collections::BTreeSet, fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use sid_bench::{
    defaults, random_operations, random_samples, sorted_samples, BenchConfig, CollateConfig,
    Combine, Figure, Key, Llrb, MixedBenchmark, Scale, SidGraphSet, SidSamples, SortedList,
    Weights,
};

#[derive(Parser, Debug)]
#[command(about = "Search, insert and delete benchmarks for ordered containers")]
struct Args {
    /// Container size at the end of growth phase.
    #[arg(long, default_value_t = defaults::STOP)]
    stop: usize,
    /// Untimed warm-up inserts before the first measurement.
    #[arg(long, default_value_t = defaults::BENCHMARK_START)]
    bm_start: usize,
    /// Operations per timed batch.
    #[arg(long, default_value_t = defaults::BENCHMARK_LENGTH)]
    bm_length: usize,
    /// Container size between two measurements.
    #[arg(long, default_value_t = defaults::BENCHMARK_INTERVAL)]
    bm_interval: usize,
    /// Runs per container, combined per size bucket.
    #[arg(long, default_value_t = 1)]
    repeat: usize,
    /// mean or median.
    #[arg(long, default_value = "median")]
    combine: Combine,
    /// linear or log.
    #[arg(long, default_value = "linear")]
    yscale: Scale,
    /// Seed for sample generation, random if omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Use sorted, worst-case, samples.
    #[arg(long)]
    sorted: bool,
    /// Time inserts alone, one figure per data set.
    #[arg(long)]
    insert_only: bool,
    /// Number of figure sets to produce.
    #[arg(long, default_value_t = 3)]
    data_sets: usize,
    /// Also time a mixed stream of this many operations.
    #[arg(long)]
    mixed: Option<usize>,
    #[arg(long, default_value = "")]
    title: String,
    /// Caption, wraps pgfplots output in a figure environment.
    #[arg(long)]
    caption: Option<String>,
    /// Directory to write figures into.
    #[arg(long, default_value = "plots")]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let bench = BenchConfig::new(args.stop, args.bm_start, args.bm_length, args.bm_interval);
    let config = CollateConfig {
        repeat: args.repeat,
        combine: args.combine,
        title: args.title.clone(),
        caption: args.caption.clone(),
        yscale: args.yscale,
        ..CollateConfig::new(bench)
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut graph_set = SidGraphSet::new(config);
    graph_set
        .add(|| Llrb::new("LLRB"))
        .add(SortedList::new)
        .add(BTreeSet::<Key>::new);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let stream = MixedBenchmark::new(args.bm_start, args.bm_length, args.bm_interval)?;

    if args.insert_only {
        let keys = match args.sorted {
            true => sorted_samples(args.stop as i64)?,
            false => random_samples(args.stop as i64, &mut rng)?,
        };
        for n in 1..=args.data_sets {
            info!("insert data set {} of {}", n, args.data_sets);
            let figure = graph_set.run_inserts(&stream, &keys)?;
            write_figure(&args.out, &format!("insert_{}", n), &figure)?;
        }
        return Ok(());
    }

    let samples = match args.sorted {
        true => SidSamples::sorted(&bench)?,
        false => SidSamples::random(&bench, &mut rng)?,
    };
    for n in 1..=args.data_sets {
        info!("data set {} of {}", n, args.data_sets);
        let graphs = graph_set.run(&samples)?;
        write_figure(&args.out, &format!("search_{}", n), &graphs.search)?;
        write_figure(&args.out, &format!("insert_{}", n), &graphs.insert)?;
        write_figure(&args.out, &format!("delete_{}", n), &graphs.delete)?;
    }

    if let Some(n) = args.mixed {
        let ops = random_operations(n, Weights::default(), &mut rng)?;
        let figure = graph_set.run_mixed(&stream, &ops)?;
        write_figure(&args.out, "mixed", &figure)?;
    }
    Ok(())
}

fn write_figure(dir: &Path, stem: &str, figure: &Figure) -> Result<()> {
    let json = dir.join(format!("{}.json", stem));
    fs::write(&json, figure.to_json()?).with_context(|| format!("writing {}", json.display()))?;
    let tex = dir.join(format!("{}.tex", stem));
    fs::write(&tex, figure.to_pgfplots()).with_context(|| format!("writing {}", tex.display()))?;
    info!("wrote {} and {}", json.display(), tex.display());
    Ok(())
}

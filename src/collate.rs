use log::info;

use crate::aggregate::{aggregate, combine_points};
use crate::config::CollateConfig;
use crate::container::{Container, Key, OpKind};
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::mixed::{insert_operations, MixedBenchmark, Operation, SIZE_LEGEND};
use crate::plot::{PlotPoint, Series};
use crate::samples::SidSamples;
use crate::sid::{SidBenchmark, SidResult};

type Factory = Box<dyn Fn() -> Box<dyn Container>>;

/// Search, insert and delete figures of one collated run.
#[derive(Clone, Debug, PartialEq)]
pub struct SidGraphs {
    pub search: Figure,
    pub insert: Figure,
    pub delete: Figure,
}

impl SidGraphs {
    pub fn figure(&self, op: OpKind) -> &Figure {
        match op {
            OpKind::Search => &self.search,
            OpKind::Insert => &self.insert,
            OpKind::Delete => &self.delete,
        }
    }
}

/// Run the same search/insert/delete benchmark over several containers
/// and merge per-operation results into comparison figures, one series
/// per container.
///
/// Containers are added as factories, every run gets a fresh, empty
/// instance. Series are labelled with [`Container::name`].
pub struct SidGraphSet {
    config: CollateConfig,
    factories: Vec<Factory>,
}

impl SidGraphSet {
    pub fn new(config: CollateConfig) -> SidGraphSet {
        SidGraphSet {
            config,
            factories: vec![],
        }
    }

    pub fn config(&self) -> &CollateConfig {
        &self.config
    }

    /// Add a container to benchmark.
    pub fn add<F, C>(&mut self, factory: F) -> &mut SidGraphSet
    where
        F: Fn() -> C + 'static,
        C: Container + 'static,
    {
        self.factories
            .push(Box::new(move || Box::new(factory()) as Box<dyn Container>));
        self
    }

    /// Number of containers added.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Benchmark every container with `samples`, `repeat` times each,
    /// and build the three figures. Configuration and samples are
    /// validated before the first container is touched.
    pub fn run(&self, samples: &SidSamples) -> Result<SidGraphs> {
        let bench = SidBenchmark::new(&self.config.bench, samples)?;
        if self.config.repeat == 0 {
            return Err(Error::NoRuns);
        }

        let mut graphs = SidGraphs {
            search: self.new_figure(OpKind::Search),
            insert: self.new_figure(OpKind::Insert),
            delete: self.new_figure(OpKind::Delete),
        };
        for factory in self.factories.iter() {
            let (name, result) = self.run_one(&bench, factory)?;
            graphs
                .search
                .add_series(Series::new(&name, result.search));
            graphs
                .insert
                .add_series(Series::new(&name, result.insert));
            graphs
                .delete
                .add_series(Series::new(&name, result.delete));
        }
        Ok(graphs)
    }

    fn run_one(&self, bench: &SidBenchmark, factory: &Factory) -> Result<(String, SidResult)> {
        let mut runs = Vec::with_capacity(self.config.repeat);
        let mut name = String::default();
        for i in 0..self.config.repeat {
            let mut container = factory();
            name = container.name();
            info!("{}: run {} of {}", name, i + 1, self.config.repeat);
            runs.push(bench.run(&mut container)?);
        }
        Ok((name, aggregate(&runs, self.config.combine)?))
    }

    /// Benchmark every container over one mixed operation stream, in a
    /// single figure. A last series plots the median container size
    /// across every timed batch.
    pub fn run_mixed(&self, bench: &MixedBenchmark, ops: &[Operation]) -> Result<Figure> {
        let mut figure = self.new_figure_titled("Mixed");
        let sizes = bench.plot_sizes(ops)?;
        for factory in self.factories.iter() {
            let mut container = factory();
            let points = bench.run(&mut container, ops)?;
            figure.add_series(Series::new(container.name(), points));
        }
        figure.add_series(Series::new(SIZE_LEGEND, sizes));
        Ok(figure)
    }

    /// Benchmark inserts alone: every container takes `keys` in order,
    /// timing `bm_length` inserts every `bm_interval` keys, `repeat`
    /// times each. Keys are validated before the first container is
    /// touched.
    pub fn run_inserts(&self, bench: &MixedBenchmark, keys: &[Key]) -> Result<Figure> {
        let ops = insert_operations(keys);
        bench.check(&ops)?;
        if self.config.repeat == 0 {
            return Err(Error::NoRuns);
        }

        let mut figure = self.new_figure(OpKind::Insert);
        for factory in self.factories.iter() {
            let mut runs = Vec::with_capacity(self.config.repeat);
            let mut name = String::default();
            for i in 0..self.config.repeat {
                let mut container = factory();
                name = container.name();
                info!("{}: insert run {} of {}", name, i + 1, self.config.repeat);
                runs.push(bench.run(&mut container, &ops)?);
            }
            let slices: Vec<&[PlotPoint]> = runs.iter().map(|run| run.as_slice()).collect();
            let points = combine_points(&slices, self.config.combine)?;
            figure.add_series(Series::new(&name, points));
        }
        Ok(figure)
    }

    fn new_figure(&self, op: OpKind) -> Figure {
        let label = match op {
            OpKind::Search => "Search",
            OpKind::Insert => "Insert",
            OpKind::Delete => "Delete",
        };
        self.new_figure_titled(label)
    }

    fn new_figure_titled(&self, label: &str) -> Figure {
        let title = match self.config.title.as_str() {
            "" => label.to_string(),
            title => format!("{}: {}", label, title),
        };
        let config = &self.config;
        let (xlabel, ylabel) = (config.xlabel.as_str(), config.ylabel.as_str());
        let mut figure = Figure::new(title.as_str(), xlabel, ylabel);
        figure.set_scales(config.xscale, config.yscale);
        if let Some(caption) = &config.caption {
            figure.set_caption(caption);
        }
        figure
    }
}

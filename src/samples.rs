use std::collections::HashSet;

use log::info;
use rand::{
    seq::{index, SliceRandom},
    Rng,
};
use serde::{Deserialize, Serialize};

use crate::config::BenchConfig;
use crate::container::{Key, OpKind};
use crate::error::{Error, Result};

/// Return a uniformly random permutation of `[0, n)`.
pub fn random_samples<R: Rng + ?Sized>(n: i64, rng: &mut R) -> Result<Vec<Key>> {
    let mut samples = sorted_samples(n)?;
    samples.shuffle(rng);
    Ok(samples)
}

/// Return `[0, n)` in ascending order, for worst-case inputs.
pub fn sorted_samples(n: i64) -> Result<Vec<Key>> {
    if n < 0 {
        return Err(Error::InvalidSampleCount(n));
    }
    Ok((0..n as Key).collect())
}

/// Return a uniformly random permutation of `keys`.
pub fn shuffled<R: Rng + ?Sized>(keys: &[Key], rng: &mut R) -> Vec<Key> {
    let mut keys = keys.to_vec();
    keys.shuffle(rng);
    keys
}

/// The three sample sets consumed by one search/insert/delete run.
/// The same sets are shared by every container in a collated run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SidSamples {
    pub search: Vec<Key>,
    pub insert: Vec<Key>,
    pub delete: Vec<Key>,
}

impl SidSamples {
    /// Random sample sets for `config`:
    ///
    /// * insert, a permutation of `[0, stop)`.
    /// * search, for every growth batch, `bm_length` distinct keys
    ///   picked from the keys inserted before that batch.
    /// * delete, an independent permutation of the insert set.
    pub fn random<R: Rng + ?Sized>(config: &BenchConfig, rng: &mut R) -> Result<SidSamples> {
        config.validate()?;

        info!("generating random samples for stop {}", config.stop);
        let insert = random_samples(config.stop as i64, rng)?;
        let mut search = Vec::with_capacity(config.searches_required());
        for point in config.schedule() {
            let picks = index::sample(rng, point, config.bm_length);
            search.extend(picks.into_iter().map(|i| insert[i]));
        }
        let delete = shuffled(&insert, rng);

        Ok(SidSamples {
            search,
            insert,
            delete,
        })
    }

    /// Sorted, worst-case, sample sets for `config`. Inserts ascend,
    /// every search batch looks for the `bm_length` keys inserted last,
    /// deepest in a degenerate tree, and the descending delete cursor
    /// removes the largest keys first.
    pub fn sorted(config: &BenchConfig) -> Result<SidSamples> {
        config.validate()?;

        let insert = sorted_samples(config.stop as i64)?;
        let mut search = Vec::with_capacity(config.searches_required());
        for point in config.schedule() {
            search.extend_from_slice(&insert[point - config.bm_length..point]);
        }
        let delete = insert.clone();

        Ok(SidSamples {
            search,
            insert,
            delete,
        })
    }

    /// Check that these sets can drive a run configured by `config`:
    /// every set is long enough, and walking the run's cursors never
    /// inserts a present key nor searches or deletes an absent key.
    pub fn validate(&self, config: &BenchConfig) -> Result<()> {
        config.validate()?;

        let checks = [
            (OpKind::Search, config.searches_required(), self.search.len()),
            (OpKind::Insert, config.inserts_required(), self.insert.len()),
            (OpKind::Delete, config.deletes_required(), self.delete.len()),
        ];
        for (kind, required, available) in checks.iter().cloned() {
            if available < required {
                return Err(Error::InsufficientSamples {
                    kind,
                    required,
                    available,
                });
            }
        }

        let mut present: HashSet<Key> = HashSet::with_capacity(config.stop);
        for key in self.insert[..config.bm_start].iter() {
            insert(&mut present, *key)?;
        }
        let mut search_index = 0;
        for point in config.schedule() {
            let next = std::cmp::min(point.saturating_add(config.bm_interval), config.stop);
            let searches = &self.search[search_index..search_index + config.bm_length];
            if let Some(key) = searches.iter().find(|key| !present.contains(*key)) {
                return Err(Error::AbsentSearch(*key));
            }
            search_index += config.bm_length;
            for key in self.insert[point..next].iter() {
                insert(&mut present, *key)?;
            }
        }
        for key in self.delete[config.bm_start..config.stop].iter().rev() {
            if !present.remove(key) {
                return Err(Error::AbsentDelete(*key));
            }
        }
        Ok(())
    }
}

fn insert(present: &mut HashSet<Key>, key: Key) -> Result<()> {
    match present.insert(key) {
        true => Ok(()),
        false => Err(Error::DuplicateInsert(key)),
    }
}

//! Response Cache Module
//!
//! Shared, concurrency-safe cache over all regions.
//!
//! All regions live behind one lock so that `invalidate_all` is a single state
//! transition: no reader can see one region cleared and another still stale.
//! Computation happens outside that lock. Concurrent misses on one key share a
//! single in-flight computation and all receive its outcome, errors included.
//! A generation counter stops a computation that started before an
//! invalidation from storing its (now stale) result.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info};

use super::{CacheStats, CacheValue, CachedValue, Region, RegionStore};
use crate::config::Config;
use crate::error::Result;

type SlotKey = (Region, String);

/// Outcome published by the caller that ran the computation.
type Outcome = Option<Result<CachedValue>>;

#[derive(Debug)]
struct CacheState {
    /// Indexed by [`Region::index`]
    regions: Vec<RegionStore>,
    /// Bumped by every invalidation
    generation: u64,
    invalidations: u64,
}

impl CacheState {
    fn region_mut(&mut self, region: Region) -> &mut RegionStore {
        &mut self.regions[region.index()]
    }
}

/// Point-in-time statistics for every region.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub regions: Vec<(Region, CacheStats)>,
    pub invalidations: u64,
}

impl CacheSnapshot {
    pub fn region(&self, region: Region) -> Option<&CacheStats> {
        self.regions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, stats)| stats)
    }
}

enum Flight {
    /// This caller computes and publishes.
    Lead(watch::Sender<Outcome>),
    /// Another caller is computing; wait for its outcome.
    Join(watch::Receiver<Outcome>),
}

// == Response Cache ==
/// Memoizes read-operation results per region.
#[derive(Debug)]
pub struct ResponseCache {
    /// Hits reorder the LRU and bump stats, so every lookup takes the write
    /// lock. It is never held across a computation.
    state: RwLock<CacheState>,
    flights: Mutex<HashMap<SlotKey, watch::Receiver<Outcome>>>,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a cache where every region holds `max_entries` entries for `ttl`.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let regions = Region::ALL
            .iter()
            .map(|_| RegionStore::new(max_entries, ttl))
            .collect();
        Self {
            state: RwLock::new(CacheState {
                regions,
                generation: 0,
                invalidations: 0,
            }),
            flights: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_max_entries, config.cache_ttl())
    }

    // == Get Or Compute ==
    /// Returns the cached value for `region`/`key`, computing it on a miss.
    ///
    /// With `bypass` the lookup is skipped and `compute` always runs; the fresh
    /// result still refreshes the cache. Errors and empty results are never
    /// stored. Callers that miss while the same key is already being computed
    /// wait for that computation and get its result or its error.
    pub async fn get_or_compute<T, F, Fut>(
        &self,
        region: Region,
        key: &str,
        bypass: bool,
        compute: F,
    ) -> Result<T>
    where
        T: CacheValue,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if bypass {
            let generation = self.record_bypass(region, key).await;
            return self.compute_and_store(region, key, generation, compute).await;
        }

        let slot_key = (region, key.to_string());
        loop {
            if let Some(value) = self.lookup(region, key).await {
                return Ok(value);
            }

            match self.join_or_lead(&slot_key) {
                Flight::Lead(publisher) => {
                    let generation = self.state.read().await.generation;
                    let result = self.compute_and_store(region, key, generation, compute).await;
                    self.land(&slot_key, publisher, &result);
                    return result;
                }
                Flight::Join(mut outcome) => {
                    debug!("Joining in-flight compute for {}[{}]", region.name(), key);
                    let shared = match outcome.wait_for(Option::is_some).await {
                        Ok(published) => (*published).clone(),
                        // The computing caller was cancelled before publishing.
                        Err(_) => continue,
                    };
                    match shared {
                        Some(Ok(value)) => {
                            if let Some(value) = T::from_cached(value) {
                                return Ok(value);
                            }
                            return compute().await;
                        }
                        Some(Err(err)) => return Err(err),
                        None => continue,
                    }
                }
            }
        }
    }

    async fn lookup<T: CacheValue>(&self, region: Region, key: &str) -> Option<T> {
        let mut state = self.state.write().await;
        let hit = state.region_mut(region).get(key).and_then(T::from_cached);
        if hit.is_some() {
            debug!("Cache hit for {}[{}]", region.name(), key);
        } else {
            debug!("Cache miss for {}[{}]", region.name(), key);
        }
        hit
    }

    async fn record_bypass(&self, region: Region, key: &str) -> u64 {
        let mut state = self.state.write().await;
        state.region_mut(region).record_bypass();
        debug!("Cache bypass for {}[{}]", region.name(), key);
        state.generation
    }

    async fn compute_and_store<T, F, Fut>(
        &self,
        region: Region,
        key: &str,
        generation: u64,
        compute: F,
    ) -> Result<T>
    where
        T: CacheValue,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = compute().await?;

        if value.is_storable() {
            self.store(region, key, value.clone().into_cached(), generation)
                .await;
        }
        Ok(value)
    }

    async fn store(&self, region: Region, key: &str, value: CachedValue, generation: u64) {
        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(
                "Discarding {}[{}]: computed before the last invalidation",
                region.name(),
                key
            );
            return;
        }
        state.region_mut(region).insert(key, value);
    }

    // == Single Flight ==
    fn flights(&self) -> std::sync::MutexGuard<'_, HashMap<SlotKey, watch::Receiver<Outcome>>> {
        // The map is only touched in short non-async sections.
        self.flights
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn join_or_lead(&self, slot_key: &SlotKey) -> Flight {
        let mut flights = self.flights();
        if let Some(outcome) = flights.get(slot_key) {
            // A closed channel means the computing caller went away.
            if outcome.has_changed().is_ok() {
                return Flight::Join(outcome.clone());
            }
        }
        let (publisher, outcome) = watch::channel(None);
        flights.insert(slot_key.clone(), outcome);
        Flight::Lead(publisher)
    }

    fn land<T: CacheValue>(
        &self,
        slot_key: &SlotKey,
        publisher: watch::Sender<Outcome>,
        result: &Result<T>,
    ) {
        self.flights().remove(slot_key);
        if publisher.receiver_count() == 0 {
            return;
        }
        let shared = match result {
            Ok(value) => Ok(value.clone().into_cached()),
            Err(err) => Err(err.clone()),
        };
        let _ = publisher.send(Some(shared));
    }

    // == Invalidate All ==
    /// Clears every region in one step, returning the number of entries dropped.
    pub async fn invalidate_all(&self) -> usize {
        let mut state = self.state.write().await;
        let dropped: usize = state.regions.iter_mut().map(RegionStore::clear).sum();
        state.generation += 1;
        state.invalidations += 1;
        info!("Cache invalidated: dropped {} entries across all regions", dropped);
        dropped
    }

    // == Cleanup Expired ==
    /// Removes expired entries from every region, returning the number removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut state = self.state.write().await;
        state
            .regions
            .iter_mut()
            .map(RegionStore::cleanup_expired)
            .sum()
    }

    // == Introspection ==
    pub async fn snapshot(&self) -> CacheSnapshot {
        let state = self.state.read().await;
        CacheSnapshot {
            regions: Region::ALL
                .iter()
                .map(|r| (*r, state.regions[r.index()].stats()))
                .collect(),
            invalidations: state.invalidations,
        }
    }

    /// Number of entries currently held by `region`, expired ones included.
    pub async fn len(&self, region: Region) -> usize {
        self.state.read().await.regions[region.index()].len()
    }

    pub async fn is_empty(&self) -> bool {
        let state = self.state.read().await;
        state.regions.iter().all(RegionStore::is_empty)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(
            super::DEFAULT_MAX_ENTRIES,
            Duration::from_secs(super::DEFAULT_TTL_SECS),
        )
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Shared image fetch cache with request deduplication.
//!
//! Every preview instance resolves its image identifiers through one
//! process-wide cache, so concurrent consumers of the same identifier share
//! a single in-flight request and a single cached result.
//!
//! # Design
//!
//! - **Keyed by identifier**: one slot per [`ImageName`]
//! - **Deduplicating**: the first `acquire` of an unknown name yields a
//!   [`FetchTicket`]; later acquires join the existing slot
//! - **Reference-counted**: slots stay resident while any consumer holds a
//!   lease; released resolved slots move to an LRU idle pool
//! - **Memory-bounded**: the idle pool is evicted against a byte budget
//! - **Cancellable**: tickets are generation-stamped; [`ImageCache::apply`]
//!   discards results whose slot is gone or re-generated

use crate::domain::{ImageName, ImageResource};
use crate::error::{Error, Result};
use lru::LruCache;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default idle-pool budget in bytes (64 MB).
pub const DEFAULT_CACHE_BYTES: usize = 64 * 1024 * 1024;

/// Minimum idle-pool budget in bytes (8 MB).
pub const MIN_CACHE_BYTES: usize = 8 * 1024 * 1024;

/// Maximum idle-pool budget in bytes (256 MB).
pub const MAX_CACHE_BYTES: usize = 256 * 1024 * 1024;

/// Configuration for the image cache.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Byte budget for resolved images that no consumer currently leases.
    pub max_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_CACHE_BYTES,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the byte budget clamped to the
    /// supported range.
    #[must_use]
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_CACHE_BYTES, MAX_CACHE_BYTES),
        }
    }
}

/// Tri-state (plus idle) result of a keyed fetch.
///
/// `Idle` models "no image requested": no current value, not loading, not
/// errored. Each image identifier owns an independent outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchOutcome<T> {
    /// No identifier was supplied; no request was issued.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The fetch failed. Terminal for this slot; surfaced as "no image".
    Error,
    /// The fetch resolved.
    Success(T),
}

impl<T> FetchOutcome<T> {
    /// Whether no request was issued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchOutcome::Idle)
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchOutcome::Loading)
    }

    /// Whether the fetch failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, FetchOutcome::Error)
    }

    /// The resolved value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the resolved value if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Cancellation token for one fetch invocation.
///
/// `apply` only accepts a result whose ticket still matches the slot's
/// generation, so results arriving after teardown are discarded without
/// touching state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    name: ImageName,
    generation: u64,
}

impl FetchTicket {
    /// The identifier this ticket fetches.
    #[must_use]
    pub fn name(&self) -> &ImageName {
        &self.name
    }

    /// The generation stamped at acquisition time.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Statistics about cache behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Acquisitions that joined an existing slot.
    pub hits: u64,
    /// Acquisitions that created a slot and issued a request.
    pub misses: u64,
    /// Resolved images evicted from the idle pool.
    pub evictions: u64,
    /// Results accepted into the cache.
    pub insertions: u64,
    /// Results discarded because their slot was gone or re-generated.
    pub discarded: u64,
}

impl CacheStats {
    /// Returns the share of acquisitions served without a new request,
    /// as a percentage (0.0 - 100.0).
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

#[derive(Debug)]
struct Slot {
    outcome: FetchOutcome<ImageResource>,
    refcount: usize,
    generation: u64,
}

/// Process-wide, deduplicating, reference-counted image cache.
///
/// All access happens on the update loop; correctness rests on the
/// generation check in [`apply`](Self::apply) rather than on locks.
#[derive(Debug)]
pub struct ImageCache {
    slots: HashMap<ImageName, Slot>,
    /// Zero-reference resolved slots in eviction order.
    idle: LruCache<ImageName, ()>,
    config: CacheConfig,
    current_bytes: usize,
    next_generation: u64,
    stats: CacheStats,
}

impl ImageCache {
    /// Creates a cache with the given configuration.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            slots: HashMap::new(),
            idle: LruCache::unbounded(),
            config,
            current_bytes: 0,
            next_generation: 0,
            stats: CacheStats::default(),
        }
    }

    /// Creates a cache with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Takes (or joins) a lease on `name`.
    ///
    /// Returns the slot's current outcome and, when this acquisition created
    /// the slot, a [`FetchTicket`] the caller must hand to exactly one fetch
    /// task. Joining an existing slot never issues a second request.
    pub fn acquire(&mut self, name: &ImageName) -> (FetchOutcome<ImageResource>, Option<FetchTicket>) {
        if let Some(slot) = self.slots.get_mut(name) {
            if slot.refcount == 0 {
                self.idle.pop(name);
            }
            slot.refcount += 1;
            self.stats.hits += 1;
            return (slot.outcome.clone(), None);
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        self.slots.insert(
            name.clone(),
            Slot {
                outcome: FetchOutcome::Loading,
                refcount: 1,
                generation,
            },
        );
        self.stats.misses += 1;
        let ticket = FetchTicket {
            name: name.clone(),
            generation,
        };
        (FetchOutcome::Loading, Some(ticket))
    }

    /// Releases one lease on `name`.
    ///
    /// A resolved slot with no remaining leases moves to the idle pool; a
    /// still-loading slot is dropped outright, which retires its generation
    /// and discards the pending result on arrival.
    pub fn release(&mut self, name: &ImageName) {
        let Some(slot) = self.slots.get_mut(name) else {
            log::debug!("release of unknown image {name}");
            return;
        };

        slot.refcount = slot.refcount.saturating_sub(1);
        if slot.refcount > 0 {
            return;
        }

        if matches!(slot.outcome, FetchOutcome::Success(_)) {
            self.idle.put(name.clone(), ());
            self.evict_over_budget();
        } else {
            // Loading or errored with no consumers left: drop the slot, which
            // retires its generation and cancels any in-flight fetch.
            self.slots.remove(name);
        }
    }

    /// Applies a completed fetch.
    ///
    /// Returns `false` when the result was discarded: the slot no longer
    /// exists (all consumers released it mid-flight) or has been re-created
    /// under a newer generation.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<ImageResource>) -> bool {
        let Some(slot) = self.slots.get_mut(&ticket.name) else {
            self.stats.discarded += 1;
            return false;
        };
        if slot.generation != ticket.generation {
            self.stats.discarded += 1;
            return false;
        }

        match result {
            Ok(image) => {
                self.current_bytes += image.size_bytes();
                slot.outcome = FetchOutcome::Success(image);
                self.stats.insertions += 1;
            }
            Err(err) => {
                log::warn!("image fetch failed for {}: {err}", ticket.name);
                slot.outcome = FetchOutcome::Error;
            }
        }
        true
    }

    /// Current outcome for `name` without taking a lease.
    ///
    /// Unknown names report [`FetchOutcome::Idle`].
    #[must_use]
    pub fn outcome(&self, name: &ImageName) -> FetchOutcome<ImageResource> {
        self.slots
            .get(name)
            .map_or(FetchOutcome::Idle, |slot| slot.outcome.clone())
    }

    /// Whether a slot exists for `name`.
    #[must_use]
    pub fn contains(&self, name: &ImageName) -> bool {
        self.slots.contains_key(name)
    }

    /// Number of slots currently resident (leased or idle).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the cache holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bytes held by resolved images.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.current_bytes
    }

    /// Returns the current statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Evicts idle resolved slots, least recently released first, until the
    /// byte budget is met. Leased slots are never evicted.
    fn evict_over_budget(&mut self) {
        while self.current_bytes > self.config.max_bytes {
            let Some((name, ())) = self.idle.pop_lru() else {
                break;
            };
            if let Some(slot) = self.slots.remove(&name) {
                if let FetchOutcome::Success(image) = &slot.outcome {
                    self.current_bytes = self.current_bytes.saturating_sub(image.size_bytes());
                }
                self.stats.evictions += 1;
            }
        }
    }
}

/// Where image identifiers resolve from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A local gallery directory; files are stored under their identifier.
    Gallery(PathBuf),
    /// The image-generation backend, queried over HTTP.
    Backend {
        /// Base URL, e.g. `http://127.0.0.1:9090`.
        base_url: String,
    },
}

/// Resolves one image identifier.
///
/// This is the async function handed to the runtime for each ticket. The
/// ticket travels with the result so the caller can route it back through
/// [`ImageCache::apply`].
pub async fn fetch_image(
    source: ImageSource,
    ticket: FetchTicket,
) -> (FetchTicket, Result<ImageResource>) {
    let name = ticket.name().clone();
    let result = match source {
        ImageSource::Gallery(dir) => {
            let path = dir.join(name.as_str());
            tokio::task::spawn_blocking(move || load_from_disk(&path, name))
                .await
                .unwrap_or_else(|e| Err(Error::Io(format!("fetch task failed: {e}"))))
        }
        ImageSource::Backend { base_url } => fetch_from_backend(base_url, name).await,
    };

    (ticket, result)
}

/// Decodes an image file from the gallery directory.
fn load_from_disk(path: &Path, name: ImageName) -> Result<ImageResource> {
    let decoded = image_rs::open(path)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageResource::from_rgba(name, width, height, rgba.into_raw()))
}

/// Fetches and decodes an image from the backend.
async fn fetch_from_backend(base_url: String, name: ImageName) -> Result<ImageResource> {
    let url = format!(
        "{}/api/v1/images/i/{}/full",
        base_url.trim_end_matches('/'),
        name
    );
    let response = reqwest::get(&url).await?;
    let bytes = response.error_for_status()?.bytes().await?;

    tokio::task::spawn_blocking(move || -> Result<ImageResource> {
        let decoded = image_rs::load_from_memory(&bytes)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(ImageResource::from_rgba(name, width, height, rgba.into_raw()))
    })
    .await
    .unwrap_or_else(|e| Err(Error::Decode(format!("decode task failed: {e}"))))
}

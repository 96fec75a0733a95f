use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::Mutex;

use crate::classifier::{Classifier, Classify};
use crate::types::ConfigError;

/// Cache size used by [`CachedClassifier::with_default_capacity`].
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_CAPACITY) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// Hit and miss counters of a [`CachedClassifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache (0.0 when nothing was looked up).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Wraps a [`Classify`] implementation behind a bounded LRU cache keyed by
/// the raw input string.
///
/// Identical inputs are classified once and served from the cache until
/// evicted. The cache never changes the returned value, only the cost of
/// repeated calls. The lock is not held while the wrapped classifier runs,
/// so two threads missing on the same key may both compute it; the second
/// insert simply refreshes the entry.
///
/// ```
/// use uaclass::{CachedClassifier, ClassifierBuilder};
///
/// let classifier = ClassifierBuilder::new()
///     .user_agent_rule(|r| r.regex(r"(curl)/(\d+)"))
///     .build()
///     .unwrap();
/// let cached = CachedClassifier::new(classifier, 16).unwrap();
///
/// let first = cached.classify("curl/8").unwrap();
/// let second = cached.classify("curl/8").unwrap();
/// assert_eq!(first, second);
/// assert_eq!(cached.stats().hits, 1);
/// ```
pub struct CachedClassifier<C: Classify = Classifier> {
    inner: C,
    entries: Mutex<LruCache<String, C::Output>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<C: Classify> CachedClassifier<C> {
    /// Wrap `inner` with a cache holding at most `capacity` results.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(inner: C, capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(ConfigError::InvalidCapacity { capacity })?;
        Ok(Self::with_capacity(inner, capacity))
    }

    /// Wrap `inner` with a cache of [`DEFAULT_CACHE_CAPACITY`] entries.
    pub fn with_default_capacity(inner: C) -> Self {
        Self::with_capacity(inner, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(inner: C, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Classify `input`, consulting the cache first.
    ///
    /// Absent input returns `None` without touching the cache.
    pub fn classify<'a>(&self, input: impl Into<Option<&'a str>>) -> Option<C::Output> {
        let input = input.into()?;

        let cached = self.entries.lock().get(input).cloned();
        if let Some(hit) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(len = input.len(), "classification cache hit");
            return Some(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(len = input.len(), "classification cache miss");
        let computed = self.inner.classify_str(input);

        let evicted = self
            .entries
            .lock()
            .push(input.to_owned(), computed.clone());
        if let Some((key, _)) = evicted {
            if key != input {
                tracing::trace!(len = key.len(), "classification cache eviction");
            }
        }

        Some(computed)
    }

    /// Whether `input` is cached. Does not change its recency.
    #[must_use]
    pub fn contains(&self, input: &str) -> bool {
        self.entries.lock().contains(input)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every cached entry. Statistics are kept.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// The wrapped classifier.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[cfg(feature = "yaml")]
impl CachedClassifier<Classifier> {
    /// Load a YAML ruleset file and wrap the resulting classifier.
    ///
    /// # Errors
    ///
    /// Returns [`UaError`](crate::UaError) on I/O, YAML, or configuration
    /// failure, including a zero `capacity`.
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
        capacity: usize,
    ) -> Result<Self, crate::UaError> {
        let classifier = Classifier::from_file(path)?;
        Ok(Self::new(classifier, capacity)?)
    }

    /// Wrap the crate's [`BUNDLED_RULESET`](crate::BUNDLED_RULESET).
    ///
    /// # Errors
    ///
    /// Returns [`UaError`](crate::UaError) if `capacity` is zero or the
    /// bundled document fails to load.
    pub fn bundled(capacity: usize) -> Result<Self, crate::UaError> {
        Ok(Self::new(Classifier::bundled()?, capacity)?)
    }
}

impl<C: Classify> Classify for CachedClassifier<C> {
    type Output = C::Output;

    fn classify_str(&self, input: &str) -> C::Output {
        self.classify(input)
            .unwrap_or_else(|| self.inner.classify_str(input))
    }
}

impl<C: Classify> fmt::Debug for CachedClassifier<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedClassifier")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

//! Deep-link parse caching.
//!
//! This module provides [`DeepLinkCache`], an LRU cache from raw URL strings
//! to their parse result. Notification taps and widget links tend to repeat
//! the same handful of URLs, so the
//! [`TabCoordinator`](crate::tab::TabCoordinator) keeps one of these in front
//! of [`DeepLink::parse_with`]. It is gated behind the `cache` feature flag
//! and uses the [`lru`] crate internally.
//!
//! Rejections are cached as well as successes. A cache is only valid for one
//! [`DeepLinkConfig`]; callers clear it when their configuration changes.
//!
//! [`CacheStats`] tracks hits, misses, and invalidations so you can monitor
//! cache effectiveness at runtime.
//!
//! # Examples
//!
//! ```
//! use arrhub_navigator::cache::DeepLinkCache;
//! use arrhub_navigator::DeepLinkConfig;
//!
//! let config = DeepLinkConfig::default();
//! let mut cache = DeepLinkCache::new();
//!
//! assert!(cache.get_or_parse("arrhub://services/add", &config).is_ok());
//! assert!(cache.get_or_parse("arrhub://services/add", &config).is_ok());
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::deep_link::{DeepLink, DeepLinkConfig};
use crate::error::DeepLinkError;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: usize,
    /// Number of lookups that had to parse.
    pub misses: usize,
    /// Number of full cache invalidations (via [`DeepLinkCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of deep-link parse results, keyed by the raw URL.
#[derive(Debug)]
pub struct DeepLinkCache {
    entries: LruCache<String, Result<DeepLink, DeepLinkError>>,
    stats: CacheStats,
}

impl DeepLinkCache {
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a cache holding up to 64 URLs.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache with a custom capacity. Zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Return the cached result for `url`, parsing and caching it on a miss.
    pub fn get_or_parse(
        &mut self,
        url: &str,
        config: &DeepLinkConfig,
    ) -> Result<DeepLink, DeepLinkError> {
        if let Some(cached) = self.entries.get(url) {
            self.stats.hits += 1;
            trace_log!("Deep-link cache hit for '{}'", url);
            return cached.clone();
        }

        self.stats.misses += 1;
        trace_log!("Deep-link cache miss for '{}'", url);
        let parsed = DeepLink::parse_with(url, config);
        self.entries.push(url.to_string(), parsed.clone());
        parsed
    }

    /// Drop every entry and increment the invalidation counter.
    pub fn clear(&mut self) {
        let len = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Deep-link cache cleared: {} entries removed ({} invalidations, hit rate {:.1}%)",
            len,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for DeepLinkCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{DashboardRoute, ServicesRoute};

    #[test]
    fn test_cache_creation() {
        let cache = DeepLinkCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 64);
        assert_eq!(cache.stats(), &CacheStats::default());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        assert_eq!(DeepLinkCache::with_capacity(0).capacity(), 1);
    }

    #[test]
    fn test_miss_then_hit() {
        let config = DeepLinkConfig::default();
        let mut cache = DeepLinkCache::new();

        let first = cache.get_or_parse("arrhub://dashboard/service/radarr-1", &config);
        let second = cache.get_or_parse("arrhub://dashboard/service/radarr-1", &config);

        let expected = DeepLink::Dashboard(DashboardRoute::service_detail("radarr-1"));
        assert_eq!(first, Ok(expected.clone()));
        assert_eq!(second, Ok(expected));
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_rejections_are_cached() {
        let config = DeepLinkConfig::default();
        let mut cache = DeepLinkCache::new();

        let err = cache.get_or_parse("scheme://invalid/path", &config).unwrap_err();
        assert_eq!(
            err,
            DeepLinkError::UnknownSection {
                host: "invalid".into()
            }
        );
        assert!(cache.get_or_parse("scheme://invalid/path", &config).is_err());
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let config = DeepLinkConfig::default();
        let mut cache = DeepLinkCache::with_capacity(2);
        cache.get_or_parse("arrhub://services", &config).unwrap();
        cache.get_or_parse("arrhub://services/add", &config).unwrap();
        cache.get_or_parse("arrhub://settings", &config).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get_or_parse("arrhub://services", &config),
            Ok(DeepLink::Services(ServicesRoute::List))
        );
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_clear_and_hit_rate() {
        let config = DeepLinkConfig::default();
        let mut cache = DeepLinkCache::new();
        cache.get_or_parse("arrhub://a", &config).ok();
        cache.get_or_parse("arrhub://b", &config).ok();
        cache.get_or_parse("arrhub://a", &config).ok();
        cache.get_or_parse("arrhub://a", &config).ok();

        assert!((cache.stats().hit_rate() - 0.5).abs() < 0.001);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }
}

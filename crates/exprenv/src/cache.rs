//! Process-wide cache of helper bundles.
//!
//! Bundles are keyed first by conversion service identity, then by locale.
//! Both levels are `DashMap`s used with insert-if-absent semantics, and no
//! lock is held while a bundle is built: two threads missing on the same key
//! may both build it, and the first to publish wins. Since a bundle is a pure
//! function of its key, the loser's bundle is equal to the winner's.
//!
//! Entries are never evicted. The key space is the set of conversion services
//! and locales the host actually uses.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use icu_locale_core::Locale;
use tracing::{debug, trace};

use crate::conversion::ConversionServiceKey;
use crate::helpers::HelperBundle;

type BundlesByLocale = DashMap<Option<Locale>, HelperBundle>;

static BASE_OBJECTS: LazyLock<BaseObjectCache> = LazyLock::new(BaseObjectCache::new);

/// Get a private copy of the helper bundle for a conversion service and
/// locale from the process-wide cache.
///
/// An absent conversion service means the standard one.
pub fn base_objects(
    conversion: Option<&ConversionServiceKey>,
    locale: Option<&Locale>,
) -> HelperBundle {
    BASE_OBJECTS.bundle(conversion, locale)
}

/// Statistics for the process-wide cache.
pub fn base_objects_stats() -> CacheStats {
    BASE_OBJECTS.stats()
}

/// A two-level memoizing cache of helper bundles.
///
/// Most callers want the process-wide instance behind [`base_objects`];
/// separate instances are useful for isolation in tests.
#[derive(Debug, Default)]
pub struct BaseObjectCache {
    bundles: DashMap<ConversionServiceKey, Arc<BundlesByLocale>>,
}

/// Size of a [`BaseObjectCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Distinct conversion services seen.
    pub services: usize,
    /// Distinct (conversion service, locale) bundles built.
    pub bundles: usize,
}

impl BaseObjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a private copy of the bundle for `conversion` and `locale`,
    /// building and publishing it on first use.
    ///
    /// The returned bundle is a fresh shallow copy: callers may mutate it
    /// freely without affecting the cache or other callers, while the helper
    /// objects themselves are shared.
    pub fn bundle(
        &self,
        conversion: Option<&ConversionServiceKey>,
        locale: Option<&Locale>,
    ) -> HelperBundle {
        let conversion = ConversionServiceKey::resolve(conversion);
        let by_locale = self.bundles_for(&conversion);

        let locale_key = locale.cloned();
        if let Some(cached) = by_locale.get(&locale_key) {
            trace!(?locale_key, "helper bundle cache hit");
            return cached.value().clone();
        }

        debug!(?conversion, ?locale_key, "building helper bundle");
        let built = HelperBundle::build(&conversion, locale);
        by_locale.entry(locale_key).or_insert(built).value().clone()
    }

    /// Get or publish the per-locale map for a conversion service.
    fn bundles_for(&self, conversion: &ConversionServiceKey) -> Arc<BundlesByLocale> {
        if let Some(existing) = self.bundles.get(conversion) {
            return Arc::clone(&existing);
        }
        let entry = self.bundles.entry(conversion.clone()).or_default();
        Arc::clone(&entry)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            services: self.bundles.len(),
            bundles: self.bundles.iter().map(|entry| entry.value().len()).sum(),
        }
    }
}

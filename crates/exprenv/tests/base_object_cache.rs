//! Integration tests for the helper bundle cache.

use std::sync::Barrier;
use std::thread;

use exprenv::helpers::Helper;
use exprenv::{
    BaseObjectCache, CacheStats, ConversionServiceKey, HelperBundle, Locale,
    StandardConversionService, base_objects, names, parse_locale,
};

fn english() -> Locale {
    parse_locale("en").unwrap()
}

// =========================================================================
// Bundle Contents
// =========================================================================

#[test]
fn bundle_with_locale_has_every_helper() {
    let bundle = base_objects(None, Some(&english()));

    let mut expected: Vec<&str> = names::LOCALE_DEPENDENT_HELPERS
        .iter()
        .chain(names::LOCALE_INDEPENDENT_HELPERS)
        .copied()
        .collect();
    expected.sort_unstable();
    assert_eq!(bundle.names(), expected);
}

#[test]
fn bundle_without_locale_omits_locale_dependent_helpers() {
    let bundle = base_objects(None, None);

    for name in names::LOCALE_DEPENDENT_HELPERS {
        assert!(!bundle.contains(name), "{name} should be absent");
    }
    for name in names::LOCALE_INDEPENDENT_HELPERS {
        assert!(bundle.contains(name), "{name} should be present");
    }
}

#[test]
fn bundle_helpers_use_the_requested_locale() {
    let bundle = base_objects(None, Some(&parse_locale("tr").unwrap()));

    let strings = bundle.get(names::STRINGS).and_then(Helper::as_strings).unwrap();
    assert_eq!(strings.locale().to_string(), "tr");
    let dates = bundle.get(names::DATES).and_then(Helper::as_dates).unwrap();
    assert_eq!(dates.locale().to_string(), "tr");
}

#[test]
fn bundle_helpers_use_the_requested_conversion_service() {
    let service = ConversionServiceKey::new(StandardConversionService);
    let bundle = base_objects(Some(&service), Some(&english()));

    let bools = bundle.get(names::BOOLS).and_then(Helper::as_bools).unwrap();
    assert_eq!(bools.conversion(), &service);
    let dates = bundle.get(names::DATES).and_then(Helper::as_dates).unwrap();
    assert_eq!(dates.conversion(), &service);
}

// =========================================================================
// Copy Semantics
// =========================================================================

#[test]
fn repeated_lookups_share_helpers_but_not_the_map() {
    let cache = BaseObjectCache::new();
    let locale = english();

    let mut first = cache.bundle(None, Some(&locale));
    let second = cache.bundle(None, Some(&locale));
    assert_eq!(first, second);

    let dates_a = first.get(names::DATES).unwrap().clone();
    let dates_b = second.get(names::DATES).unwrap();
    assert!(dates_a.ptr_eq(dates_b));

    first.remove(names::DATES);
    assert!(!first.contains(names::DATES));
    assert!(second.contains(names::DATES));
    assert!(cache.bundle(None, Some(&locale)).contains(names::DATES));
}

#[test]
fn mutating_a_copy_does_not_affect_the_cache() {
    let cache = BaseObjectCache::new();
    let locale = english();

    let mut copy = cache.bundle(None, Some(&locale));
    let numbers = copy.get(names::NUMBERS).unwrap().clone();
    copy.remove(names::STRINGS);
    copy.insert(numbers);

    let fresh = cache.bundle(None, Some(&locale));
    let expected = names::LOCALE_DEPENDENT_HELPERS.len() + names::LOCALE_INDEPENDENT_HELPERS.len();
    assert_eq!(fresh.len(), expected);
    assert!(fresh.contains(names::STRINGS));
}

#[test]
fn cached_bundle_equals_a_freshly_built_one() {
    let cache = BaseObjectCache::new();
    let locale = parse_locale("fr").unwrap();
    let service = ConversionServiceKey::standard();

    let cached = cache.bundle(None, Some(&locale));
    assert_eq!(cached, HelperBundle::build(&service, Some(&locale)));
}

// =========================================================================
// Keys
// =========================================================================

#[test]
fn absent_service_means_the_standard_service() {
    let cache = BaseObjectCache::new();
    let locale = english();
    let standard = ConversionServiceKey::standard();

    let implicit = cache.bundle(None, Some(&locale));
    let explicit = cache.bundle(Some(&standard), Some(&locale));

    let a = implicit.get(names::BOOLS).unwrap();
    let b = explicit.get(names::BOOLS).unwrap();
    assert!(a.ptr_eq(b));
    assert_eq!(cache.stats(), CacheStats { services: 1, bundles: 1 });
}

#[test]
fn distinct_services_get_distinct_bundles() {
    let cache = BaseObjectCache::new();
    let locale = english();
    let first = ConversionServiceKey::new(StandardConversionService);
    let second = ConversionServiceKey::new(StandardConversionService);
    assert_ne!(first, second);

    let a = cache.bundle(Some(&first), Some(&locale));
    let b = cache.bundle(Some(&second), Some(&locale));

    assert!(!a.get(names::BOOLS).unwrap().ptr_eq(b.get(names::BOOLS).unwrap()));
    assert_eq!(cache.stats(), CacheStats { services: 2, bundles: 2 });
}

#[test]
fn absent_locale_is_its_own_key() {
    let cache = BaseObjectCache::new();

    let with_locale = cache.bundle(None, Some(&english()));
    let without_locale = cache.bundle(None, None);

    assert_ne!(with_locale.len(), without_locale.len());
    assert_eq!(cache.stats(), CacheStats { services: 1, bundles: 2 });
}

#[test]
fn locales_differing_only_in_region_are_distinct_keys() {
    let cache = BaseObjectCache::new();

    cache.bundle(None, Some(&parse_locale("en-US").unwrap()));
    cache.bundle(None, Some(&parse_locale("en-GB").unwrap()));
    cache.bundle(None, Some(&parse_locale("en-US").unwrap()));

    assert_eq!(cache.stats().bundles, 2);
}

#[test]
fn new_cache_is_empty() {
    assert_eq!(BaseObjectCache::new().stats(), CacheStats::default());
}

// =========================================================================
// Concurrency
// =========================================================================

#[test]
fn concurrent_first_lookups_agree() {
    const THREADS: usize = 8;

    let cache = BaseObjectCache::new();
    let locale = parse_locale("de").unwrap();
    let barrier = Barrier::new(THREADS);

    let bundles: Vec<HelperBundle> = thread::scope(|scope| {
        let (cache, locale, barrier) = (&cache, &locale, &barrier);
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    cache.bundle(None, Some(locale))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let published = cache.bundle(None, Some(&locale));
    for bundle in &bundles {
        assert_eq!(bundle, &published);
    }
    assert_eq!(cache.stats(), CacheStats { services: 1, bundles: 1 });
}

#[test]
fn concurrent_lookups_across_keys() {
    let cache = BaseObjectCache::new();
    let tags = ["en", "fr", "de", "ja", "tr", "es"];

    thread::scope(|scope| {
        for tag in tags {
            let cache = &cache;
            scope.spawn(move || {
                let locale = parse_locale(tag).unwrap();
                for _ in 0..50 {
                    let bundle = cache.bundle(None, Some(&locale));
                    assert!(bundle.contains(names::NUMBERS));
                }
            });
        }
    });

    assert_eq!(cache.stats().bundles, tags.len());
}

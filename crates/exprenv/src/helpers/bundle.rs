use std::collections::HashMap;
use std::collections::hash_map::IntoIter;
use std::sync::Arc;

use exprenv_semantics::names;
use icu_locale_core::Locale;

use crate::conversion::ConversionServiceKey;
use crate::helpers::{
    Aggregates, Arrays, Bools, Calendars, Dates, Lists, Maps, Numbers, Objects, Sets, Strings,
};

/// A cacheable helper object.
///
/// Stateful helpers are held behind `Arc`, so cloning a helper (and hence a
/// bundle) shares the helper object rather than copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Helper {
    Calendars(Arc<Calendars>),
    Dates(Arc<Dates>),
    Numbers(Arc<Numbers>),
    Strings(Arc<Strings>),
    Bools(Arc<Bools>),
    Objects(Objects),
    Arrays(Arrays),
    Lists(Lists),
    Sets(Sets),
    Maps(Maps),
    Aggregates(Aggregates),
}

impl Helper {
    /// The well-known variable name this helper is published under.
    pub fn name(&self) -> &'static str {
        match self {
            Helper::Calendars(_) => names::CALENDARS,
            Helper::Dates(_) => names::DATES,
            Helper::Numbers(_) => names::NUMBERS,
            Helper::Strings(_) => names::STRINGS,
            Helper::Bools(_) => names::BOOLS,
            Helper::Objects(_) => names::OBJECTS,
            Helper::Arrays(_) => names::ARRAYS,
            Helper::Lists(_) => names::LISTS,
            Helper::Sets(_) => names::SETS,
            Helper::Maps(_) => names::MAPS,
            Helper::Aggregates(_) => names::AGGREGATES,
        }
    }

    /// Returns true for helpers that exist only when a locale is known.
    pub fn is_locale_dependent(&self) -> bool {
        matches!(
            self,
            Helper::Calendars(_) | Helper::Dates(_) | Helper::Numbers(_) | Helper::Strings(_)
        )
    }

    pub fn as_calendars(&self) -> Option<&Calendars> {
        match self {
            Helper::Calendars(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_dates(&self) -> Option<&Dates> {
        match self {
            Helper::Dates(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&Numbers> {
        match self {
            Helper::Numbers(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&Strings> {
        match self {
            Helper::Strings(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_bools(&self) -> Option<&Bools> {
        match self {
            Helper::Bools(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_aggregates(&self) -> Option<&Aggregates> {
        match self {
            Helper::Aggregates(h) => Some(h),
            _ => None,
        }
    }

    /// Returns true if both helpers are the same shared object.
    ///
    /// Stateless helpers have no identity and are always shared.
    pub fn ptr_eq(&self, other: &Helper) -> bool {
        match (self, other) {
            (Helper::Calendars(a), Helper::Calendars(b)) => Arc::ptr_eq(a, b),
            (Helper::Dates(a), Helper::Dates(b)) => Arc::ptr_eq(a, b),
            (Helper::Numbers(a), Helper::Numbers(b)) => Arc::ptr_eq(a, b),
            (Helper::Strings(a), Helper::Strings(b)) => Arc::ptr_eq(a, b),
            (Helper::Bools(a), Helper::Bools(b)) => Arc::ptr_eq(a, b),
            (a, b) => a == b,
        }
    }
}

/// The named set of helpers for one (conversion service, locale) pair.
///
/// A bundle is a pure function of its key: building it twice for the same
/// key yields equal bundles. That is what makes it safe for the cache to
/// build a bundle more than once under contention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelperBundle {
    helpers: HashMap<&'static str, Helper>,
}

impl HelperBundle {
    /// Build the bundle for a conversion service and optional locale.
    ///
    /// Locale-dependent helpers are omitted when `locale` is `None`.
    pub fn build(conversion: &ConversionServiceKey, locale: Option<&Locale>) -> Self {
        let mut bundle = HelperBundle {
            helpers: HashMap::with_capacity(16),
        };

        if let Some(locale) = locale {
            bundle.insert(Helper::Calendars(Arc::new(Calendars::new(
                conversion.clone(),
                locale.clone(),
            ))));
            bundle.insert(Helper::Dates(Arc::new(Dates::new(
                conversion.clone(),
                locale.clone(),
            ))));
            bundle.insert(Helper::Numbers(Arc::new(Numbers::new(locale.clone()))));
            bundle.insert(Helper::Strings(Arc::new(Strings::new(locale.clone()))));
        }

        bundle.insert(Helper::Bools(Arc::new(Bools::new(conversion.clone()))));
        bundle.insert(Helper::Objects(Objects));
        bundle.insert(Helper::Arrays(Arrays));
        bundle.insert(Helper::Lists(Lists));
        bundle.insert(Helper::Sets(Sets));
        bundle.insert(Helper::Maps(Maps));
        bundle.insert(Helper::Aggregates(Aggregates));

        bundle
    }

    /// Add a helper under its well-known name, replacing any previous one.
    pub fn insert(&mut self, helper: Helper) -> Option<Helper> {
        self.helpers.insert(helper.name(), helper)
    }

    pub fn remove(&mut self, name: &str) -> Option<Helper> {
        self.helpers.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Helper names in sorted order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.helpers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl IntoIterator for HelperBundle {
    type Item = (&'static str, Helper);
    type IntoIter = IntoIter<&'static str, Helper>;

    fn into_iter(self) -> Self::IntoIter {
        self.helpers.into_iter()
    }
}

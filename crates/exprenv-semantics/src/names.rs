//! Well-known evaluation variable names.
//!
//! Template authors reference these literally (`#ctx`, `#dates`, ...), so
//! they are a public contract.

pub const CONTEXT: &str = "ctx";
pub const LOCALE: &str = "locale";
pub const ROOT: &str = "root";
/// Synonym of [`ROOT`].
pub const VARIABLES: &str = "vars";
pub const SELECTION: &str = "object";

pub const HTTP_SERVLET_REQUEST: &str = "httpServletRequest";
pub const HTTP_SESSION: &str = "httpSession";

pub const CALENDARS: &str = "calendars";
pub const DATES: &str = "dates";
pub const NUMBERS: &str = "numbers";
pub const STRINGS: &str = "strings";

pub const BOOLS: &str = "bools";
pub const OBJECTS: &str = "objects";
pub const ARRAYS: &str = "arrays";
pub const LISTS: &str = "lists";
pub const SETS: &str = "sets";
pub const MAPS: &str = "maps";
pub const AGGREGATES: &str = "aggregates";

pub const MESSAGES: &str = "messages";
pub const IDS: &str = "ids";

/// Execution attribute under which a configuration may carry a conversion
/// service.
pub const STANDARD_CONVERSION_SERVICE_ATTRIBUTE: &str = "StandardConversionService";

/// Helpers that are only present when a locale is known.
pub const LOCALE_DEPENDENT_HELPERS: &[&str] = &[CALENDARS, DATES, NUMBERS, STRINGS];

/// Helpers present in every bundle.
pub const LOCALE_INDEPENDENT_HELPERS: &[&str] =
    &[BOOLS, OBJECTS, ARRAYS, LISTS, SETS, MAPS, AGGREGATES];

/// Helpers scoped to a single template invocation.
pub const INVOCATION_HELPERS: &[&str] = &[MESSAGES, IDS];

/// Every name the evaluation context builder may define.
pub fn all() -> impl Iterator<Item = &'static str> {
    [
        CONTEXT,
        LOCALE,
        ROOT,
        VARIABLES,
        SELECTION,
        HTTP_SERVLET_REQUEST,
        HTTP_SESSION,
    ]
    .into_iter()
    .chain(LOCALE_DEPENDENT_HELPERS.iter().copied())
    .chain(LOCALE_INDEPENDENT_HELPERS.iter().copied())
    .chain(INVOCATION_HELPERS.iter().copied())
}

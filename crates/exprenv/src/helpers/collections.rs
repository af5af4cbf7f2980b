//! Locale-independent helpers over values and collections.
//!
//! These helpers are stateless; each is a unit struct so that bundles can
//! hold and compare them cheaply.

use std::cmp::Ordering;

use crate::helpers::HelperError;
use crate::types::Value;

/// Object utilities for `#objects`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Objects;

impl Objects {
    /// `value`, or `default` when `value` is null.
    pub fn null_safe(&self, value: &Value, default: &Value) -> Value {
        if value.is_null() {
            default.clone()
        } else {
            value.clone()
        }
    }
}

/// Array utilities for `#arrays`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arrays;

impl Arrays {
    pub fn length(&self, items: &[Value]) -> usize {
        items.len()
    }

    pub fn is_empty(&self, items: &[Value]) -> bool {
        items.is_empty()
    }

    pub fn contains(&self, items: &[Value], element: &Value) -> bool {
        items.contains(element)
    }

    pub fn contains_all(&self, items: &[Value], elements: &[Value]) -> bool {
        elements.iter().all(|element| items.contains(element))
    }
}

/// List utilities for `#lists`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lists;

impl Lists {
    pub fn size(&self, items: &[Value]) -> usize {
        items.len()
    }

    pub fn is_empty(&self, items: &[Value]) -> bool {
        items.is_empty()
    }

    pub fn contains(&self, items: &[Value], element: &Value) -> bool {
        items.contains(element)
    }

    pub fn contains_all(&self, items: &[Value], elements: &[Value]) -> bool {
        elements.iter().all(|element| items.contains(element))
    }

    /// A sorted copy of `items`.
    ///
    /// Fails if two elements have no defined order (e.g. a string and a
    /// number).
    pub fn sort(&self, items: &[Value]) -> Result<Vec<Value>, HelperError> {
        let mut failure = None;
        let mut sorted = items.to_vec();
        sorted.sort_by(|a, b| {
            a.compare(b).unwrap_or_else(|| {
                failure.get_or_insert(HelperError::Incomparable {
                    left: a.type_name(),
                    right: b.type_name(),
                });
                Ordering::Equal
            })
        });
        match failure {
            Some(error) => Err(error),
            None => Ok(sorted),
        }
    }
}

/// Set utilities for `#sets`. Sets are lists without duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sets;

impl Sets {
    pub fn size(&self, items: &[Value]) -> usize {
        self.to_set(items).len()
    }

    pub fn is_empty(&self, items: &[Value]) -> bool {
        items.is_empty()
    }

    pub fn contains(&self, items: &[Value], element: &Value) -> bool {
        items.contains(element)
    }

    pub fn contains_all(&self, items: &[Value], elements: &[Value]) -> bool {
        elements.iter().all(|element| items.contains(element))
    }

    /// Remove duplicates, keeping the first occurrence of each element.
    pub fn to_set(&self, items: &[Value]) -> Vec<Value> {
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(item) {
                unique.push(item.clone());
            }
        }
        unique
    }
}

/// Map utilities for `#maps`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Maps;

impl Maps {
    /// Number of entries, or zero for a non-map value.
    pub fn size(&self, map: &Value) -> usize {
        map.as_map().map_or(0, |map| map.len())
    }

    pub fn is_empty(&self, map: &Value) -> bool {
        self.size(map) == 0
    }

    pub fn contains_key(&self, map: &Value, key: &str) -> bool {
        map.as_map().is_some_and(|map| map.contains_key(key))
    }

    pub fn contains_all_keys(&self, map: &Value, keys: &[&str]) -> bool {
        keys.iter().all(|key| self.contains_key(map, key))
    }

    pub fn contains_value(&self, map: &Value, value: &Value) -> bool {
        map.as_map()
            .is_some_and(|map| map.values().any(|candidate| candidate == value))
    }
}

/// Numeric aggregation for `#aggregates`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregates;

impl Aggregates {
    /// Sum of the values: a number if all are integers and the total fits
    /// in an `i64`, otherwise a float.
    ///
    /// The sum of an empty slice is `0`.
    pub fn sum(&self, values: &[Value]) -> Result<Value, HelperError> {
        let mut integer_total = Some(0_i64);
        let mut float_total: f64 = 0.0;
        let mut all_integers = true;
        for (index, value) in values.iter().enumerate() {
            match value {
                Value::Number(n) => {
                    integer_total = integer_total.and_then(|total| total.checked_add(*n));
                    float_total += *n as f64;
                }
                Value::Float(f) => {
                    all_integers = false;
                    float_total += f;
                }
                other => {
                    return Err(HelperError::NotNumeric {
                        index,
                        type_name: other.type_name(),
                    });
                }
            }
        }
        match integer_total {
            Some(total) if all_integers => Ok(Value::Number(total)),
            _ => Ok(Value::Float(float_total)),
        }
    }

    /// Arithmetic mean of the values.
    pub fn avg(&self, values: &[Value]) -> Result<f64, HelperError> {
        if values.is_empty() {
            return Err(HelperError::EmptyAggregate);
        }
        let total = self
            .sum(values)?
            .as_float()
            .unwrap_or_default();
        Ok(total / values.len() as f64)
    }
}

use crate::conversion::ConversionServiceKey;
use crate::types::Value;

/// Boolean utilities for `#bools`, using the conversion service's truthiness.
#[derive(Debug, Clone, PartialEq)]
pub struct Bools {
    conversion: ConversionServiceKey,
}

impl Bools {
    pub fn new(conversion: ConversionServiceKey) -> Self {
        Self { conversion }
    }

    pub fn conversion(&self) -> &ConversionServiceKey {
        &self.conversion
    }

    pub fn is_true(&self, value: &Value) -> bool {
        self.conversion.service().to_bool(value)
    }

    pub fn is_false(&self, value: &Value) -> bool {
        !self.is_true(value)
    }

    /// Apply [`Bools::is_true`] to every element.
    pub fn array_is_true(&self, values: &[Value]) -> Vec<bool> {
        values.iter().map(|value| self.is_true(value)).collect()
    }

    /// True if every value is true; true for an empty slice.
    pub fn and(&self, values: &[Value]) -> bool {
        values.iter().all(|value| self.is_true(value))
    }

    /// True if any value is true; false for an empty slice.
    pub fn or(&self, values: &[Value]) -> bool {
        values.iter().any(|value| self.is_true(value))
    }

    pub fn not(&self, value: &Value) -> bool {
        self.is_false(value)
    }
}

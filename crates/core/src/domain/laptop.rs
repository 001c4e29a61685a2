use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Numeric catalog value (price, memory, storage).
///
/// Integral values serialize as JSON integers so catalog records pass back out
/// in the shape they were loaded in.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Deserialize)]
#[serde(transparent)]
pub struct Quantity(pub f64);

/// Largest magnitude an `f64` holds without losing integer precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Quantity {
    pub fn value(self) -> f64 {
        self.0
    }

    fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaptopRecord {
    pub name: String,
    pub price: Quantity,
    pub ram: Quantity,
    pub storage: Quantity,
    pub use_case: String,
    /// Descriptive fields (`cpu`, `gpu`, ...) the engine never looks at.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("field `{0}` must not be blank")]
    Blank(&'static str),
    #[error("field `{field}` must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: String },
}

impl LaptopRecord {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<Quantity>,
        ram: impl Into<Quantity>,
        storage: impl Into<Quantity>,
        use_case: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            ram: ram.into(),
            storage: storage.into(),
            use_case: use_case.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Checks the invariants ranking depends on. Price in particular must be
    /// strictly positive because the value score divides by it.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::Blank("name"));
        }
        if self.use_case.trim().is_empty() {
            return Err(RecordError::Blank("use_case"));
        }

        for (field, quantity) in
            [("price", self.price), ("ram", self.ram), ("storage", self.storage)]
        {
            if !quantity.is_positive() {
                return Err(RecordError::NotPositive { field, value: quantity.to_string() });
            }
        }

        Ok(())
    }

    pub fn matches_use_case(&self, normalized_use_case: &str) -> bool {
        self.use_case.to_lowercase() == normalized_use_case
    }
}

//! Per-epoch metric logs
//!
//! A training loop produces a fresh [`Logs`] mapping at every epoch boundary.
//! Values are loosely typed because host loops record whatever they have
//! (floats, counters, flags, preformatted text); consumers coerce the single
//! metric they care about with [`MetricValue::to_f64`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single logged metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// No value recorded this epoch (JSON `null`)
    Null,
    /// Boolean flag (coerces to 1.0 / 0.0)
    Bool(bool),
    /// Integer counter
    Int(i64),
    /// Floating-point metric
    Float(f64),
    /// Text, parsed on coercion
    Text(String),
}

impl MetricValue {
    /// Whether no value was recorded.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Coerce to `f64`.
    ///
    /// Text is trimmed and parsed, accepting forms like `"0.5"`, `"1e-3"`,
    /// `"nan"` and `"inf"`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MetricConversion` for `Null` or text that does not
    /// parse.
    pub fn to_f64(&self, metric: &str) -> Result<f64> {
        match self {
            Self::Null => Err(Error::MetricConversion {
                metric: metric.to_string(),
                value: "null".to_string(),
            }),
            Self::Float(v) => Ok(*v),
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => Ok(*v as f64),
            Self::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::MetricConversion {
                    metric: metric.to_string(),
                    value: s.clone(),
                }),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for MetricValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Metric name to latest value, produced once per epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Logs {
    values: HashMap<String, MetricValue>,
}

impl Logs {
    /// Create empty logs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a metric.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a metric by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.values.get(key)
    }

    /// Whether a metric is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no metrics were logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over metric names and values (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Logs
where
    K: Into<String>,
    V: Into<MetricValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut logs = Self::new();
        for (k, v) in iter {
            logs.insert(k, v);
        }
        logs
    }
}

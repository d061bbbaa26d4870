//! Criteria vocabulary: alternatives, weights, directions, fuzzy weights.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::McdaError;

/// Whether larger or smaller raw values are preferable for a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CriterionType {
    #[default]
    Benefit,
    Cost,
}

impl CriterionType {
    /// Parses a direction label, returning None for anything unrecognized.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "benefit" => Some(CriterionType::Benefit),
            "cost" => Some(CriterionType::Cost),
            _ => None,
        }
    }

    /// Returns the wire label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            CriterionType::Benefit => "benefit",
            CriterionType::Cost => "cost",
        }
    }
}

impl From<String> for CriterionType {
    /// Unrecognized labels fall back to `Benefit`.
    fn from(label: String) -> Self {
        Self::parse(&label).unwrap_or_else(|| {
            tracing::warn!(label = %label, "Unrecognized criterion type, treating as benefit");
            CriterionType::Benefit
        })
    }
}

impl fmt::Display for CriterionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Mapping from criterion name to direction. Absent names are benefits.
pub type CriteriaTypes = HashMap<String, CriterionType>;

/// Resolves one direction per criterion, defaulting to `Benefit`.
pub fn resolve_directions(criteria: &[String], types: &CriteriaTypes) -> Vec<CriterionType> {
    criteria
        .iter()
        .map(|name| types.get(name).copied().unwrap_or_default())
        .collect()
}

/// Insertion-ordered mapping keyed by criterion name.
///
/// Deserializing from a JSON object keeps document order, which fixes the
/// decision matrix column order.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionMap<V> {
    entries: Vec<(String, V)>,
}

/// Crisp weight per criterion. Need not sum to 1.
pub type CriteriaWeights = CriterionMap<f64>;

/// Triangular fuzzy weight per criterion.
pub type FuzzyWeights = CriterionMap<FuzzyWeight>;

impl<V> CriterionMap<V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a value, replacing any existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Gets the value for a criterion.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Returns true if the criterion is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Criterion names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of criteria.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no criteria.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for CriterionMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for CriterionMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for CriterionMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for CriterionMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = CriterionMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of criterion names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = CriterionMap::new();
                while let Some((name, value)) = access.next_entry::<String, V>()? {
                    if map.contains(&name) {
                        return Err(de::Error::custom(format!("duplicate criterion '{}'", name)));
                    }
                    map.entries.push((name, value));
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// A candidate being ranked (facility, technology configuration, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub id: String,
    pub name: String,
    pub criteria: CriterionMap<f64>,
}

impl Alternative {
    /// Creates an alternative with no criterion values.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            criteria: CriterionMap::new(),
        }
    }

    /// Adds a criterion value.
    pub fn with_value(mut self, criterion: impl Into<String>, value: f64) -> Self {
        self.criteria.insert(criterion, value);
        self
    }

    /// Gets the raw value for a criterion.
    pub fn value(&self, criterion: &str) -> Option<f64> {
        self.criteria.get(criterion).copied()
    }
}

/// Triangular fuzzy number `(low, medium, high)` expressing an uncertain weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct FuzzyWeight {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl FuzzyWeight {
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        Self { low, medium, high }
    }

    /// Centroid (defuzzified) value.
    pub fn centroid(&self) -> f64 {
        (self.low + self.medium + self.high) / 3.0
    }

    /// Checks `0 <= low <= medium <= high` with finite bounds.
    pub fn validate(&self, criterion: &str) -> Result<(), McdaError> {
        let finite = self.low.is_finite() && self.medium.is_finite() && self.high.is_finite();
        if !finite || self.low < 0.0 || self.low > self.medium || self.medium > self.high {
            return Err(McdaError::invalid_parameter(
                format!("fuzzy_weights.{}", criterion),
                format!(
                    "expected 0 <= low <= medium <= high, got ({}, {}, {})",
                    self.low, self.medium, self.high
                ),
            ));
        }
        Ok(())
    }
}

impl From<(f64, f64, f64)> for FuzzyWeight {
    fn from((low, medium, high): (f64, f64, f64)) -> Self {
        Self::new(low, medium, high)
    }
}

impl From<FuzzyWeight> for (f64, f64, f64) {
    fn from(w: FuzzyWeight) -> Self {
        (w.low, w.medium, w.high)
    }
}

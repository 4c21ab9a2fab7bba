use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key of the body-compression coefficient.
pub const BODY_COMPRESSION: &str = "k";
/// Key of the sliding-friction coefficient.
pub const SLIDING_FRICTION: &str = "ka";

/// Built-in physical constants, applied before any caller overrides.
pub const DEFAULT_CONDITIONS: [(&str, f64); 2] =
    [(BODY_COMPRESSION, 1.2e5), (SLIDING_FRICTION, 2.4e5)];

/// Named physical constants read by agent force laws.
///
/// Each environment owns its own copy. Defaults come from
/// [`DEFAULT_CONDITIONS`]; caller-supplied values override them by key and
/// may add new keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct Conditions {
    values: BTreeMap<String, f64>,
}

impl Default for Conditions {
    fn default() -> Self {
        let values = DEFAULT_CONDITIONS
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect();
        Self { values }
    }
}

impl Conditions {
    /// Defaults merged with `overrides`; overrides win on key collision.
    pub fn new<K: Into<String>>(overrides: impl IntoIterator<Item = (K, f64)>) -> Self {
        let mut conditions = Self::default();
        conditions.merge(overrides);
        conditions
    }

    /// Set or replace a single constant.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Merge `overrides` into this registry.
    pub fn merge<K: Into<String>>(&mut self, overrides: impl IntoIterator<Item = (K, f64)>) {
        for (key, value) in overrides {
            self.values.insert(key.into(), value);
        }
    }

    /// Look up a constant by name.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Body-compression coefficient `k`.
    pub fn k(&self) -> f64 {
        self.get(BODY_COMPRESSION).unwrap_or(DEFAULT_CONDITIONS[0].1)
    }

    /// Sliding-friction coefficient `ka`.
    pub fn ka(&self) -> f64 {
        self.get(SLIDING_FRICTION).unwrap_or(DEFAULT_CONDITIONS[1].1)
    }

    /// Iterate constants in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of registered constants.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` if no constants are registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, f64>> for Conditions {
    fn from(overrides: BTreeMap<String, f64>) -> Self {
        Self::new(overrides)
    }
}

impl From<Conditions> for BTreeMap<String, f64> {
    fn from(conditions: Conditions) -> Self {
        conditions.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::btree_map;
    use proptest::prelude::*;

    #[test]
    fn defaults_present() {
        let c = Conditions::default();
        assert!((c.k() - 1.2e5).abs() < f64::EPSILON);
        assert!((c.ka() - 2.4e5).abs() < f64::EPSILON);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn overrides_win_and_extend() {
        let c = Conditions::new([("k", 5.0), ("tau", 0.5)]);
        assert!((c.k() - 5.0).abs() < f64::EPSILON);
        assert!((c.ka() - 2.4e5).abs() < f64::EPSILON);
        assert_eq!(c.get("tau"), Some(0.5));
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn instances_do_not_share_state() {
        let a = Conditions::new([("k", 1.0)]);
        let b = Conditions::default();
        assert!((a.k() - 1.0).abs() < f64::EPSILON);
        assert!((b.k() - 1.2e5).abs() < f64::EPSILON);
        assert!((Conditions::default().k() - 1.2e5).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_sets_single_key() {
        let c = Conditions::default().with("ka", 7.0).with("A", 2000.0);
        assert!((c.ka() - 7.0).abs() < f64::EPSILON);
        assert_eq!(c.get("A"), Some(2000.0));
        assert_eq!(c.get("missing"), None);
    }

    #[test]
    fn deserialized_map_is_merged_with_defaults() {
        let c: Conditions = serde_json::from_str(r#"{"ka": 1.0}"#).unwrap();
        assert!((c.k() - 1.2e5).abs() < f64::EPSILON);
        assert!((c.ka() - 1.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn merge_keeps_every_override_and_untouched_defaults(
            overrides in btree_map("[a-z]{1,3}", -1.0e6f64..1.0e6, 0..6),
        ) {
            let c = Conditions::new(overrides.clone());
            for (key, value) in &overrides {
                prop_assert_eq!(c.get(key), Some(*value));
            }
            for (key, value) in DEFAULT_CONDITIONS {
                if !overrides.contains_key(key) {
                    prop_assert_eq!(c.get(key), Some(value));
                }
            }
            let extra = DEFAULT_CONDITIONS
                .iter()
                .filter(|(key, _)| !overrides.contains_key(*key))
                .count();
            prop_assert_eq!(c.len(), overrides.len() + extra);
        }
    }
}

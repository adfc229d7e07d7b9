use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PreferenceError, PreferenceKey, PreferenceType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl PreferenceValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => bool::KIND,
            Self::Int(_) => i64::KIND,
            Self::String(_) => String::KIND,
        }
    }
}

/// Snapshot of every entry in one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences {
    values: BTreeMap<String, PreferenceValue>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a typed entry. An absent key is `Ok(None)`; a key holding a
    /// value of another type is an error rather than a silent default.
    pub fn get<T: PreferenceType>(
        &self,
        key: &PreferenceKey<T>,
    ) -> Result<Option<T>, PreferenceError> {
        match self.values.get(key.name()) {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                PreferenceError::TypeMismatch {
                    key: key.name().to_string(),
                    expected: T::KIND,
                    found: value.kind(),
                }
            }),
        }
    }

    pub fn set<T: PreferenceType>(&mut self, key: &PreferenceKey<T>, value: T) {
        self.values
            .insert(key.name().to_string(), value.into_value());
    }

    pub fn remove<T>(&mut self, key: &PreferenceKey<T>) -> Option<PreferenceValue> {
        self.values.remove(key.name())
    }

    pub fn contains<T>(&self, key: &PreferenceKey<T>) -> bool {
        self.values.contains_key(key.name())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAG: PreferenceKey<bool> = PreferenceKey::new("flag");
    const NAME: PreferenceKey<String> = PreferenceKey::new("name");
    const COUNT: PreferenceKey<i64> = PreferenceKey::new("count");

    #[test]
    fn test_absent_key_reads_none() {
        let prefs = Preferences::new();
        assert_eq!(prefs.get(&FLAG).unwrap(), None);
    }

    #[test]
    fn test_set_and_get_each_type() {
        let mut prefs = Preferences::new();
        prefs.set(&FLAG, true);
        prefs.set(&NAME, "comtam".to_string());
        prefs.set(&COUNT, 3);

        assert_eq!(prefs.get(&FLAG).unwrap(), Some(true));
        assert_eq!(prefs.get(&NAME).unwrap(), Some("comtam".to_string()));
        assert_eq!(prefs.get(&COUNT).unwrap(), Some(3));
        assert_eq!(prefs.len(), 3);
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let mut prefs = Preferences::new();
        prefs.set(&NAME, "yes".to_string());

        let mistyped: PreferenceKey<bool> = PreferenceKey::new("name");
        let err = prefs.get(&mistyped).unwrap_err();

        assert!(matches!(
            err,
            PreferenceError::TypeMismatch {
                expected: "bool",
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_json_shape_is_flat_object() {
        let mut prefs = Preferences::new();
        prefs.set(&FLAG, false);
        prefs.set(&NAME, "x".to_string());

        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json, serde_json::json!({"flag": false, "name": "x"}));

        let decoded: Preferences = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, prefs);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut prefs = Preferences::new();
        prefs.set(&FLAG, true);
        prefs.set(&COUNT, 1);

        assert!(prefs.remove(&FLAG).is_some());
        assert!(!prefs.contains(&FLAG));

        prefs.clear();
        assert!(prefs.is_empty());
    }
}

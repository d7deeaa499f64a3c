//! Loosely typed key/value bag used for item data and item parameters.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// An ordered JSON object with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Vars {
    inner: Map<String, Value>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, converting it into JSON.
    pub fn set<V: Into<Value>>(
        &mut self,
        key: &str,
        value: V,
    ) {
        self.inner.insert(key.to_string(), value.into());
    }

    /// Builder-style variant of [`Vars::set`].
    pub fn with<V: Into<Value>>(
        mut self,
        key: &str,
        value: V,
    ) -> Self {
        self.set(key, value);
        self
    }

    /// Get a value and deserialize it into `T`.
    ///
    /// Returns `None` when the key is missing or the value has another shape.
    pub fn get<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Option<T> {
        self.inner.get(key).and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Borrow the raw JSON value.
    pub fn get_value(
        &self,
        key: &str,
    ) -> Option<&Value> {
        self.inner.get(key)
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.inner.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<Map<String, Value>> for Vars {
    fn from(inner: Map<String, Value>) -> Self {
        Self {
            inner,
        }
    }
}

impl TryFrom<Value> for Vars {
    type Error = crate::AligoError;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into()),
            Value::Null => Ok(Vars::new()),
            other => Err(crate::AligoError::Convert(format!("expected a JSON object, got {}", other))),
        }
    }
}

impl From<Vars> for Value {
    fn from(vars: Vars) -> Self {
        Value::Object(vars.inner)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::Vars;

    #[test]
    fn test_vars_typed_get() {
        let vars = Vars::new().with("page", 2).with("sender", "01012345678");
        assert_eq!(vars.get::<u64>("page"), Some(2));
        assert_eq!(vars.get::<String>("sender").as_deref(), Some("01012345678"));
        assert_eq!(vars.get::<u64>("sender"), None);
        assert_eq!(vars.get::<String>("missing"), None);
    }

    #[test]
    fn test_vars_from_json() {
        let vars = Vars::try_from(json!({"mid": "123"})).unwrap();
        assert!(vars.contains_key("mid"));
        assert!(Vars::try_from(json!(null)).unwrap().is_empty());
        assert!(Vars::try_from(json!([1, 2])).is_err());
    }
}

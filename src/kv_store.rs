use crate::error::{CacheError, Result};
use log::{debug, trace};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

static KV: Lazy<KVStore> = Lazy::new(|| {
    debug!("kv store instance created");
    KVStore::new()
});

/// Thread-safe string-keyed store of [`Value`]s.
///
/// Clones share the same map. Reads take the lock shared, writes take it
/// exclusively; values are cloned out so nothing borrowed from the map
/// outlives the guard.
#[derive(Clone, Default)]
pub struct KVStore {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl KVStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The process-wide store, built on first call.
    pub fn instance() -> &'static KVStore {
        &KV
    }

    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        self.inner.write().insert(key.to_string(), value);
        trace!("kv set {}", key);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let value = self.inner.read().get(key).cloned();
        trace!("kv get {} hit={}", key, value.is_some());
        value
    }

    pub fn delete(&self, key: &str) {
        let removed = self.inner.write().remove(key);
        if removed.is_some() {
            trace!("kv delete {}", key);
        }
    }

    /// Swaps in an empty map; the old entries are dropped after the lock is
    /// released.
    pub fn clear(&self) {
        let dropped = std::mem::take(&mut *self.inner.write());
        debug!("kv store cleared ({} entries dropped)", dropped.len());
    }

    /// Looks up `key` and deserializes it into `T`.
    ///
    /// `Ok(None)` when the key is absent, [`CacheError::ConversionType`] when
    /// the stored value doesn't fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|_| CacheError::ConversionType),
            None => Ok(None),
        }
    }

    /// Serializes `value` and stores it. Nothing is written if `T` has no
    /// [`Value`] representation.
    pub fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|_| CacheError::ConversionType)?;
        self.set(key, value);
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Snapshot of the current keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().keys().cloned().collect()
    }
}

pub fn get_instance() -> &'static KVStore {
    KVStore::instance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Customer {
        id: String,
        email: String,
    }

    #[test]
    fn set_then_get_returns_value() {
        let kv = KVStore::new();
        kv.set("a", 1);
        kv.set("b", "hello");
        assert_eq!(kv.get("a"), Some(json!(1)));
        assert_eq!(kv.get("b"), Some(json!("hello")));
    }

    #[test]
    fn set_overwrites() {
        let kv = KVStore::new();
        kv.set("k", 1);
        kv.set("k", json!({"nested": [1, 2]}));
        assert_eq!(kv.get("k"), Some(json!({"nested": [1, 2]})));
        assert_eq!(kv.len(), 1);
    }

    #[test]
    fn missing_key_is_none() {
        let kv = KVStore::new();
        assert_eq!(kv.get("nope"), None);
    }

    #[test]
    fn empty_key_and_null_value_are_stored() {
        let kv = KVStore::new();
        kv.set("", Value::Null);
        assert_eq!(kv.get(""), Some(Value::Null));
        assert!(kv.contains_key(""));
    }

    #[test]
    fn delete_removes_and_is_idempotent() {
        let kv = KVStore::new();
        kv.set("a", 1);
        kv.set("b", 2);
        kv.delete("a");
        assert_eq!(kv.get("a"), None);
        kv.delete("a");
        kv.delete("never-set");
        assert_eq!(kv.keys(), vec!["b".to_string()]);
    }

    #[test]
    fn clear_empties_but_store_stays_usable() {
        let kv = KVStore::new();
        kv.set("a", 1);
        kv.set("b", "hello");
        kv.clear();
        assert!(kv.is_empty());
        assert_eq!(kv.get("b"), None);
        kv.set("c", true);
        assert_eq!(kv.get("c"), Some(json!(true)));
    }

    #[test]
    fn clones_share_the_map() {
        let kv = KVStore::new();
        let other = kv.clone();
        other.set("shared", 7);
        assert_eq!(kv.get("shared"), Some(json!(7)));
        kv.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn separate_stores_are_independent() {
        let one = KVStore::new();
        let two = KVStore::default();
        one.set("x", 1);
        assert_eq!(two.get("x"), None);
    }

    #[test]
    fn typed_round_trip() {
        let kv = KVStore::new();
        let customer = Customer {
            id: "cus_123".to_string(),
            email: "a@b.c".to_string(),
        };
        kv.set_as("stripe:user:1", &customer).unwrap();
        let back: Option<Customer> = kv.get_as("stripe:user:1").unwrap();
        assert_eq!(back, Some(customer));
    }

    #[test]
    fn typed_get_absent_is_ok_none() {
        let kv = KVStore::new();
        assert_eq!(kv.get_as::<u64>("missing"), Ok(None));
    }

    #[test]
    fn typed_get_wrong_type_is_conversion_error() {
        let kv = KVStore::new();
        kv.set("b", "hello");
        assert_eq!(kv.get_as::<i64>("b"), Err(CacheError::ConversionType));
        assert!(kv.get_as::<Customer>("b").is_err());
    }

    #[test]
    fn typed_set_unrepresentable_stores_nothing() {
        let kv = KVStore::new();
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], "v");
        assert_eq!(kv.set_as("bad", &bad), Err(CacheError::ConversionType));
        assert!(!kv.contains_key("bad"));
    }
}

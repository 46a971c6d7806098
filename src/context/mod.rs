//! Execution Context
//!
//! A caller-owned key-value store that survives process restarts. Readers
//! record their position here at checkpoint time and look it up again on
//! open. The context never owns its persistence: the caller serializes it
//! (it round-trips through serde) and passes it back in on the next run.
//!
//! Keys are namespaced per stream with [`scoped_key`] so many readers can
//! share one context without collisions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key suffix under which a reader stores its item count.
///
/// The full key is `scoped_key(stream_name, READ_COUNT_KEY)`, i.e.
/// `"<streamName>.read.count"`. This is the only key the reader writes.
pub const READ_COUNT_KEY: &str = "read.count";

/// Format a namespaced context key: `"<name>.<key>"`.
pub fn scoped_key(name: &str, key: &str) -> String {
    format!("{}.{}", name, key)
}

/// A primitive value stored in an [`ExecutionContext`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContextValue {
    /// Integer value (item counts, offsets)
    Long(i64),
    /// String value
    Text(String),
}

/// String-keyed map of primitive values, owned by the caller and passed by
/// reference at every lifecycle call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    entries: HashMap<String, ContextValue>,
}

impl ExecutionContext {
    /// Create an empty context
    pub fn new() -> Self {
        ExecutionContext {
            entries: HashMap::new(),
        }
    }

    /// Store an integer value
    pub fn put_long(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), ContextValue::Long(value));
    }

    /// Get an integer value, or None if absent or not an integer
    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(ContextValue::Long(v)) => Some(*v),
            _ => None,
        }
    }

    /// Store a string value
    pub fn put_text(&mut self, key: &str, value: &str) {
        self.entries
            .insert(key.to_string(), ContextValue::Text(value.to_string()));
    }

    /// Get a string value, or None if absent or not a string
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(ContextValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.entries.remove(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_key_format() {
        assert_eq!(scoped_key("orders", READ_COUNT_KEY), "orders.read.count");
        assert_eq!(scoped_key("a", "b"), "a.b");
    }

    #[test]
    fn test_put_get_long() {
        let mut ctx = ExecutionContext::new();
        assert_eq!(ctx.get_long("count"), None);

        ctx.put_long("count", 42);
        assert_eq!(ctx.get_long("count"), Some(42));
        assert!(ctx.contains_key("count"));
    }

    #[test]
    fn test_get_long_wrong_type() {
        let mut ctx = ExecutionContext::new();
        ctx.put_text("count", "not a number");
        assert_eq!(ctx.get_long("count"), None);
        assert_eq!(ctx.get_text("count"), Some("not a number"));
    }

    #[test]
    fn test_overwrite() {
        let mut ctx = ExecutionContext::new();
        ctx.put_long("k", 1);
        ctx.put_long("k", 2);
        assert_eq!(ctx.get_long("k"), Some(2));
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut ctx = ExecutionContext::new();
        ctx.put_long("k", 7);
        assert_eq!(ctx.remove("k"), Some(ContextValue::Long(7)));
        assert!(ctx.is_empty());
        assert_eq!(ctx.remove("k"), None);
    }

    #[test]
    fn test_namespacing_no_collision() {
        let mut ctx = ExecutionContext::new();
        ctx.put_long(&scoped_key("orders", READ_COUNT_KEY), 10);
        ctx.put_long(&scoped_key("invoices", READ_COUNT_KEY), 3);

        assert_eq!(ctx.get_long("orders.read.count"), Some(10));
        assert_eq!(ctx.get_long("invoices.read.count"), Some(3));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut ctx = ExecutionContext::new();
        ctx.put_long("orders.read.count", 5);
        ctx.put_text("orders.resource", "/data/orders.csv");

        let json = serde_json::to_string(&ctx).unwrap();
        let parsed: ExecutionContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, parsed);
        assert_eq!(parsed.get_long("orders.read.count"), Some(5));
    }
}

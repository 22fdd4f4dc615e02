//! Tagged values for diagnostic context.
//!
//! Context handed to the redactor is an arbitrary graph: objects can be
//! shared and can reference themselves. [`ContextObject`] is a shared handle
//! with identity, so the traversal can detect revisits by pointer.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keys never copied out of a context graph.
pub const DANGEROUS_KEYS: &[&str] = &["__proto__", "constructor", "prototype"];

/// Nesting depth beyond which values are replaced by a placeholder.
pub const MAX_DEPTH: usize = 32;

/// A diagnostic value of any kind.
#[derive(Debug, Clone)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Integer outside the `i64` range.
    BigInt(i128),
    Float(f64),
    Str(String),
    Array(Vec<ContextValue>),
    Object(ContextObject),
    /// Callable, by name when known.
    Function(Option<String>),
    /// Unique token, by description when known.
    Symbol(Option<String>),
    /// Regular expression source.
    Pattern(String),
    Date(DateTime<Utc>),
    Bytes(Vec<u8>),
}

impl ContextValue {
    /// Placeholder text for kinds with no JSON equivalent.
    pub fn describe(&self) -> Option<String> {
        let text = match self {
            ContextValue::BigInt(n) => format!("[BigInt: {}]", n),
            ContextValue::Float(f) if f.is_nan() => "[Number: NaN]".to_string(),
            ContextValue::Float(f) if f.is_infinite() => {
                format!("[Number: {}Infinity]", if *f < 0.0 { "-" } else { "" })
            }
            ContextValue::Function(name) => {
                format!("[Function: {}]", name.as_deref().unwrap_or("anonymous"))
            }
            ContextValue::Symbol(desc) => format!("[Symbol: {}]", desc.as_deref().unwrap_or("")),
            ContextValue::Pattern(source) => format!("[RegExp: /{}/]", source),
            ContextValue::Date(d) => d.to_rfc3339_opts(SecondsFormat::Millis, true),
            ContextValue::Bytes(b) => format!("[Buffer: {} bytes]", b.len()),
            _ => return None,
        };
        Some(text)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn object(entries: impl IntoIterator<Item = (String, ContextValue)>) -> Self {
        ContextValue::Object(entries.into_iter().collect())
    }
}

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        ContextValue::Str(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        ContextValue::Str(s)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        ContextValue::Bool(b)
    }
}

impl From<i64> for ContextValue {
    fn from(n: i64) -> Self {
        ContextValue::Int(n)
    }
}

impl From<f64> for ContextValue {
    fn from(f: f64) -> Self {
        ContextValue::Float(f)
    }
}

impl From<ContextObject> for ContextValue {
    fn from(o: ContextObject) -> Self {
        ContextValue::Object(o)
    }
}

impl From<Value> for ContextValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ContextValue::Null,
            Value::Bool(b) => ContextValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ContextValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ContextValue::BigInt(i128::from(u))
                } else {
                    ContextValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ContextValue::Str(s),
            Value::Array(items) => {
                ContextValue::Array(items.into_iter().map(ContextValue::from).collect())
            }
            Value::Object(map) => ContextValue::object(
                map.into_iter().map(|(k, v)| (k, ContextValue::from(v))),
            ),
        }
    }
}

/// Shared, mutable object with pointer identity.
///
/// Cloning shares the underlying entries. Entries keep insertion order.
#[derive(Clone, Default)]
pub struct ContextObject(Arc<RwLock<Vec<(String, ContextValue)>>>);

impl ContextObject {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<(String, ContextValue)>> {
        self.0.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<(String, ContextValue)>> {
        self.0.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert or replace `key`.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<ContextValue>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.write();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<ContextValue> {
        self.read()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Snapshot of the entries; nested objects stay shared.
    pub fn entries(&self) -> Vec<(String, ContextValue)> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Identity of the shared allocation.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &ContextObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ContextObject {
    // Entries are not printed: the graph may be cyclic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextObject")
            .field("id", &format_args!("{:#x}", self.id()))
            .field("len", &self.len())
            .finish()
    }
}

impl FromIterator<(String, ContextValue)> for ContextObject {
    fn from_iter<I: IntoIterator<Item = (String, ContextValue)>>(iter: I) -> Self {
        let object = ContextObject::new();
        for (k, v) in iter {
            object.insert(k, v);
        }
        object
    }
}

/// Converts a context graph into an acyclic JSON tree.
///
/// Dangerous keys are dropped, every object is visited at most once, exotic
/// kinds become placeholder strings. Anything dropped or replaced is
/// reported through `warnings`.
#[derive(Debug, Default)]
pub struct SafeSerializer {
    visited: HashSet<usize>,
    pub warnings: Vec<String>,
    /// Paths of dropped dangerous keys.
    pub removed: Vec<String>,
    /// Paths where a revisited object was replaced.
    pub cycles: Vec<String>,
}

impl SafeSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize_object(&mut self, object: &ContextObject, path: &str) -> Map<String, Value> {
        self.object_to_map(object, path, 0)
    }

    pub fn serialize(&mut self, value: &ContextValue, path: &str) -> Value {
        self.to_json(value, path, 0)
    }

    fn to_json(&mut self, value: &ContextValue, path: &str, depth: usize) -> Value {
        if let Some(text) = value.describe() {
            return Value::String(text);
        }
        match value {
            ContextValue::Null => Value::Null,
            ContextValue::Bool(b) => Value::Bool(*b),
            ContextValue::Int(n) => Value::Number((*n).into()),
            ContextValue::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String("[Number]".to_string())),
            ContextValue::Str(s) => Value::String(s.clone()),
            ContextValue::Array(items) => {
                if depth >= MAX_DEPTH {
                    return self.too_deep(path);
                }
                Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| self.to_json(item, &format!("{}[{}]", path, i), depth + 1))
                        .collect(),
                )
            }
            ContextValue::Object(object) => {
                if depth >= MAX_DEPTH {
                    return self.too_deep(path);
                }
                Value::Object(self.object_to_map(object, path, depth))
            }
            // Handled by describe().
            ContextValue::BigInt(_)
            | ContextValue::Function(_)
            | ContextValue::Symbol(_)
            | ContextValue::Pattern(_)
            | ContextValue::Date(_)
            | ContextValue::Bytes(_) => Value::Null,
        }
    }

    fn object_to_map(&mut self, object: &ContextObject, path: &str, depth: usize) -> Map<String, Value> {
        if !self.visited.insert(object.id()) {
            self.warnings.push(format!(
                "Circular reference at {} replaced with empty object",
                display_path(path)
            ));
            self.cycles.push(path.to_string());
            return Map::new();
        }

        let mut map = Map::new();
        for (key, value) in object.entries() {
            let child_path = join_path(path, &key);
            if DANGEROUS_KEYS.contains(&key.as_str()) {
                self.removed.push(child_path);
                continue;
            }
            let json = self.to_json(&value, &child_path, depth + 1);
            map.insert(key, json);
        }
        map
    }

    fn too_deep(&mut self, path: &str) -> Value {
        self.warnings.push(format!(
            "Nesting deeper than {} levels truncated at {}",
            MAX_DEPTH,
            display_path(path)
        ));
        Value::String("[Max depth exceeded]".to_string())
    }
}

pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

pub(crate) fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_exotic_values_described() {
        assert_eq!(
            ContextValue::BigInt(1i128 << 70).describe().unwrap(),
            format!("[BigInt: {}]", 1i128 << 70)
        );
        assert_eq!(
            ContextValue::Function(Some("handler".into())).describe().unwrap(),
            "[Function: handler]"
        );
        assert_eq!(ContextValue::Function(None).describe().unwrap(), "[Function: anonymous]");
        assert_eq!(ContextValue::Symbol(Some("id".into())).describe().unwrap(), "[Symbol: id]");
        assert_eq!(ContextValue::Pattern("a+b".into()).describe().unwrap(), "[RegExp: /a+b/]");
        assert_eq!(ContextValue::Bytes(vec![0; 16]).describe().unwrap(), "[Buffer: 16 bytes]");
        assert_eq!(ContextValue::Float(f64::NAN).describe().unwrap(), "[Number: NaN]");
        assert_eq!(
            ContextValue::Float(f64::NEG_INFINITY).describe().unwrap(),
            "[Number: -Infinity]"
        );
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(ContextValue::Date(date).describe().unwrap(), "2024-05-01T12:00:00.000Z");
        assert!(ContextValue::Int(3).describe().is_none());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let object = ContextObject::new();
        object.insert("a", 1i64);
        object.insert("a", 2i64);
        assert_eq!(object.len(), 1);
        assert!(matches!(object.get("a"), Some(ContextValue::Int(2))));
    }

    #[test]
    fn test_clone_shares_identity() {
        let a = ContextObject::new();
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
        assert!(!a.ptr_eq(&ContextObject::new()));
    }

    #[test]
    fn test_self_reference_becomes_empty_map() {
        let root = ContextObject::new();
        root.insert("name", "loop");
        root.insert("me", root.clone());

        let mut serializer = SafeSerializer::new();
        let map = serializer.serialize_object(&root, "");
        assert_eq!(map["name"], "loop");
        assert_eq!(map["me"], Value::Object(Map::new()));
        assert_eq!(serializer.warnings.len(), 1);
        assert!(serializer.warnings[0].contains("me"));
        assert_eq!(serializer.cycles, vec!["me"]);
        // Break the cycle so the test does not leak.
        root.insert("me", ContextValue::Null);
    }

    #[test]
    fn test_dangerous_keys_removed_recursively() {
        let inner = ContextObject::new();
        inner.insert("__proto__", "x");
        inner.insert("ok", true);
        let root = ContextObject::new();
        root.insert("constructor", "y");
        root.insert("inner", inner);
        root.insert("list", ContextValue::Array(vec![ContextValue::object(vec![(
            "prototype".to_string(),
            ContextValue::Null,
        )])]));

        let mut serializer = SafeSerializer::new();
        let json = Value::Object(serializer.serialize_object(&root, ""));
        let text = json.to_string();
        for key in DANGEROUS_KEYS {
            assert!(!text.contains(key), "{} survived: {}", key, text);
        }
        assert_eq!(json["inner"]["ok"], true);
        assert_eq!(serializer.removed, vec!["constructor", "inner.__proto__", "list[0].prototype"]);
    }

    #[test]
    fn test_depth_cap() {
        let mut value = ContextValue::Str("leaf".into());
        for _ in 0..(MAX_DEPTH + 5) {
            value = ContextValue::Array(vec![value]);
        }
        let mut serializer = SafeSerializer::new();
        let json = serializer.serialize(&value, "deep");
        assert!(json.to_string().contains("[Max depth exceeded]"));
        assert_eq!(serializer.warnings.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let value = ContextValue::from(serde_json::json!({"a": [1, "x", null], "b": 1.5, "c": u64::MAX}));
        let ContextValue::Object(object) = value else {
            panic!("expected object");
        };
        assert!(matches!(object.get("b"), Some(ContextValue::Float(f)) if f == 1.5));
        assert!(matches!(object.get("c"), Some(ContextValue::BigInt(_))));
        assert!(matches!(object.get("a"), Some(ContextValue::Array(items)) if items.len() == 3));
    }
}

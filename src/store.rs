//! Flat key-value persistence used for presets and the last session.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Backends that keep everything as text (e.g. INI files) hand back strings; they are
    /// parsed on access.
    Text(String),
}

impl Value {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 =>
                Some(*value as i64),
            Self::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Int(0) => Some(false),
            Self::Int(1) => Some(true),
            Self::Text(text) => match text.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Value::Bool(value) }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Value::Int(value) }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self { Value::Int(value as i64) }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self { Value::Float(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::Text(value.to_owned()) }
}

/// A store of values under `/`-separated key paths such as `"Sweep/Start"`.
///
/// Reading never fails: a missing key, or a value of the wrong type, yields the default passed
/// by the caller.
pub trait SettingsStore {
    fn value(&self, key: &str) -> Option<Value>;
    fn set_value(&mut self, key: &str, value: Value);

    fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.value(key).and_then(|value| value.to_f64()).unwrap_or(default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.value(key).and_then(|value| value.to_i64()).unwrap_or(default)
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.value(key).and_then(|value| value.to_bool()).unwrap_or(default)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,
}

impl MemorySettings {
    pub fn new() -> MemorySettings {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }
}

impl SettingsStore for MemorySettings {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set_value(&mut self, key: &str, value: Value) {
        log::trace!("set_value({:?}, {:?})", key, value);
        self.values.insert(key.to_owned(), value);
    }
}

//! Raw key/value game events
//!
//! Hosts hand events over as a name plus a bag of typed fields, mirroring the
//! engine's IGameEvent accessors. Missing or mistyped keys fall back to the
//! caller-supplied default, exactly like the engine does.

use std::collections::HashMap;

/// A single event field value
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    /// Boolean field
    Bool(bool),
    /// Integer field (user ids, teams, reasons)
    Int(i32),
    /// 64-bit unsigned field (SteamIDs)
    Uint64(u64),
    /// Float field
    Float(f32),
    /// String field
    String(String),
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for EventValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for EventValue {
    fn from(value: u64) -> Self {
        Self::Uint64(value)
    }
}

impl From<f32> for EventValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// An untyped game event: a name and its fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEvent {
    name: String,
    fields: HashMap<String, EventValue>,
}

impl RawEvent {
    /// Create an empty event with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, key: &str, value: impl Into<EventValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field
    pub fn set(&mut self, key: &str, value: impl Into<EventValue>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Get the event name
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Check whether a field is present
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get a bool field, accepting integers as 0/non-zero
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.fields.get(key) {
            Some(EventValue::Bool(v)) => *v,
            Some(EventValue::Int(v)) => *v != 0,
            _ => default,
        }
    }

    /// Get an integer field
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.fields.get(key) {
            Some(EventValue::Int(v)) => *v,
            Some(EventValue::Bool(v)) => i32::from(*v),
            _ => default,
        }
    }

    /// Get a 64-bit unsigned field
    pub fn get_uint64(&self, key: &str, default: u64) -> u64 {
        match self.fields.get(key) {
            Some(EventValue::Uint64(v)) => *v,
            Some(EventValue::Int(v)) => u64::try_from(*v).unwrap_or(default),
            _ => default,
        }
    }

    /// Get a float field
    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.fields.get(key) {
            Some(EventValue::Float(v)) => *v,
            Some(EventValue::Int(v)) => *v as f32,
            _ => default,
        }
    }

    /// Get a string field
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.fields.get(key) {
            Some(EventValue::String(v)) => v.clone(),
            _ => default.to_string(),
        }
    }
}

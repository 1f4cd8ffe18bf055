//! In-process path-addressable key/value store.
//!
//! This module provides the persistence layer for the ticket service: a
//! schema-less nested mapping from string keys to JSON values, addressed by
//! dotted paths (e.g. `"requests"` or `"a.b.c"`). It has no domain knowledge;
//! the request lifecycle is layered on top of it by the manager.
//!
//! Contents live behind a reader/writer lock, so every `set` is a serialized
//! read-modify-write and a cloned `PathStore` handle can be shared across
//! HTTP handlers.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::{Result, TicketdError};

/// Shared handle to an in-memory nested value store.
///
/// Cloning is cheap and clones share the same underlying data. Callers that
/// need isolation (tests, mostly) construct their own instance.
#[derive(Debug, Clone)]
pub struct PathStore {
    // Invariant: always Value::Object.
    data: Arc<RwLock<Value>>,
}

impl PathStore {
    /// Create a store seeded with `initial` data.
    ///
    /// `initial` must be a JSON object (or `Value::Null`, which behaves like
    /// `None`); numbers, strings, booleans and arrays are rejected. The store
    /// takes a snapshot of the data, so later mutation through the store does
    /// not alias the caller's value.
    ///
    /// # Errors
    /// `InvalidArgument` if `initial` has a non-object shape.
    pub fn new(initial: Option<Value>) -> Result<Self> {
        let data = match initial {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(TicketdError::InvalidArgument(
                    "Initial data should be an object".to_string(),
                ));
            }
        };

        Ok(Self {
            data: Arc::new(RwLock::new(Value::Object(data))),
        })
    }

    /// Snapshot of the entire store contents.
    ///
    /// The returned value is a deep copy; mutating it does not touch the
    /// store.
    pub fn get(&self) -> Value {
        self.data.read().clone()
    }

    /// Ordered top-level key names. Empty for an empty store.
    pub fn keys(&self) -> Vec<String> {
        match &*self.data.read() {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Resolve a dotted path, descending through objects by key and arrays
    /// by numeric index.
    ///
    /// Absence is a normal outcome: any missing segment yields `Ok(None)`,
    /// never an error.
    ///
    /// # Errors
    /// `InvalidArgument` if `path` is empty.
    pub fn get_path(&self, path: &str) -> Result<Option<Value>> {
        validate_path(path)?;

        let data = self.data.read();
        let mut current: &Value = &*data;
        for segment in path.split('.') {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            };
            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }

        Ok(Some(current.clone()))
    }

    /// Write `value` at a dotted path, creating intermediate objects for
    /// missing segments.
    ///
    /// Numeric segments index into existing arrays, extending them with
    /// nulls when the index is past the end. A non-object, non-array value
    /// sitting in the middle of the path is replaced by a fresh object
    /// (lodash `_.set` semantics).
    ///
    /// # Errors
    /// `InvalidArgument` if `path` is empty.
    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        validate_path(path)?;

        let mut data = self.data.write();
        let mut slot: &mut Value = &mut *data;
        for segment in path.split('.') {
            slot = descend(slot, segment);
        }
        *slot = value;

        Ok(())
    }
}

impl Default for PathStore {
    fn default() -> Self {
        Self {
            data: Arc::new(RwLock::new(Value::Object(Map::new()))),
        }
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TicketdError::InvalidArgument(
            "Path should be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Step one segment deeper, creating structure on demand.
fn descend<'a>(current: &'a mut Value, segment: &str) -> &'a mut Value {
    // Numeric segments address array elements, growing the array with
    // nulls when the index is past the end (lodash `_.set` semantics).
    let index = match (&*current, segment.parse::<usize>()) {
        (Value::Array(_), Ok(index)) => Some(index),
        _ => None,
    };

    match (index, current) {
        (Some(index), Value::Array(items)) => {
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            &mut items[index]
        }
        (_, slot) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                _ => unreachable!("slot was just replaced with an object"),
            }
        }
    }
}

/*!
 * Shell Variables
 * Bounded name to value store backing `set`, `print` and `$VAR` expansion
 */

use crate::core::limits::VARIABLE_CAPACITY;
use crate::core::types::InlineString;
use ahash::HashMap;
use tracing::warn;

#[derive(Debug)]
pub struct VariableStore {
    values: HashMap<InlineString, String>,
    capacity: usize,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::with_capacity(VARIABLE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::default(),
            capacity,
        }
    }

    /// Assign `value` to `name`, overwriting any previous value
    ///
    /// Returns false when the store is full and `name` is new.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value.to_string();
            return true;
        }
        if self.values.len() >= self.capacity {
            warn!(name, capacity = self.capacity, "Variable store full");
            return false;
        }
        self.values.insert(name.into(), value.to_string());
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Resolve a `$NAME` token to its value; any other token stands for itself
    pub fn expand<'a>(&'a self, token: &'a str) -> Option<&'a str> {
        match token.strip_prefix('$') {
            Some(name) => self.get(name),
            None => Some(token),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::new()
    }
}

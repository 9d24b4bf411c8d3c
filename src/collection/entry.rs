use crate::core::Value;
use std::fmt;

/// A single `(key, value)` pair. Keys are not unique within a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Value,
    pub value: Value,
}

impl Entry {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &Value {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_pair(self) -> (Value, Value) {
        (self.key, self.value)
    }

    pub(crate) fn component(&self, part: Component) -> &Value {
        match part {
            Component::Key => &self.key,
            Component::Value => &self.value,
        }
    }
}

/// Which half of an entry a search or filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Component {
    Key,
    Value,
}

impl<K: Into<Value>, V: Into<Value>> From<(K, V)> for Entry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.value)
    }
}

use super::array_collection::ArrayCollection;
use super::entry::{Component, Entry};
use crate::core::{CollectionError, Result, Value};
use log::debug;

/// Which matching entries a removal affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveMode {
    All,
    First,
    Last,
}

impl ArrayCollection {
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Removes entries whose key is strictly equal to `key`.
    ///
    /// The modes do not behave alike:
    /// - [`RemoveMode::All`] leaves `self` untouched and returns a new
    ///   collection without any matching entry.
    /// - [`RemoveMode::First`] and [`RemoveMode::Last`] excise one matching
    ///   entry from `self` and return a copy of the shortened collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use tuplebag::{ArrayCollection, Entry, RemoveMode, Value};
    ///
    /// let mut bag = ArrayCollection::new();
    /// bag.put("a", 1);
    /// bag.put("b", 2);
    /// bag.put("a", 3);
    ///
    /// let without_a = bag.remove_by_key(&Value::from("a"), RemoveMode::All);
    /// assert_eq!(without_a.all(), &[Entry::new("b", 2)]);
    /// assert_eq!(bag.count(), 3);
    ///
    /// bag.remove_by_key(&Value::from("a"), RemoveMode::Last);
    /// assert_eq!(bag.all(), &[Entry::new("a", 1), Entry::new("b", 2)]);
    /// ```
    pub fn remove_by_key(&mut self, key: &Value, mode: RemoveMode) -> ArrayCollection {
        self.remove_by(Component::Key, key, mode)
    }

    /// Same contract as [`remove_by_key`](Self::remove_by_key), matching on
    /// the value half of each entry.
    pub fn remove_by_value(&mut self, value: &Value, mode: RemoveMode) -> ArrayCollection {
        self.remove_by(Component::Value, value, mode)
    }

    fn remove_by(&mut self, part: Component, target: &Value, mode: RemoveMode) -> ArrayCollection {
        match mode {
            RemoveMode::All => ArrayCollection::from_storage(
                self.storage
                    .filtered(|entry| !entry.component(part).strict_eq(target)),
            ),
            RemoveMode::First | RemoveMode::Last => {
                self.excise_one(part, target, mode == RemoveMode::Last);
                ArrayCollection::from_storage(self.storage.detached())
            }
        }
    }

    /// Removes the first (or last) strict match in place.
    pub(crate) fn excise_one(&mut self, part: Component, target: &Value, from_end: bool) -> Option<Entry> {
        let index = self.index_of(part, target, from_end)?;
        let removed = self.storage.remove_at(index);
        debug!("excised {:?} match {} at index {}", part, target, index);
        removed
    }

    /// Entries whose key is not in `keys`, in order.
    ///
    /// `keys` must be a [`Value::Array`]; anything else fails with
    /// [`CollectionError::InvalidArgument`].
    pub fn all_except_by_keys(&self, keys: &Value) -> Result<ArrayCollection> {
        let keys = list_argument(keys, "keys")?;
        Ok(self.all_except(Component::Key, keys))
    }

    /// Entries whose value is not in `values`, in order.
    pub fn all_except_by_values(&self, values: &Value) -> Result<ArrayCollection> {
        let values = list_argument(values, "values")?;
        Ok(self.all_except(Component::Value, values))
    }

    fn all_except(&self, part: Component, excluded: &[Value]) -> ArrayCollection {
        ArrayCollection::from_storage(self.storage.filtered(|entry| {
            let candidate = entry.component(part);
            !excluded.iter().any(|ex| ex.strict_eq(candidate))
        }))
    }

    /// Collapses every entry keyed by `key` into a single `(key, value)`
    /// entry carrying the value of the last match. Empty when nothing
    /// matches.
    pub fn consolidate(&self, key: &Value) -> ArrayCollection {
        match self.last(Some(key)) {
            Some(last) => {
                debug!(
                    "consolidated {} entries under key {}",
                    self.count_keys_of(key),
                    key
                );
                ArrayCollection::from_entries(vec![Entry::new(key.clone(), last.value.clone())])
            }
            None => ArrayCollection::new(),
        }
    }
}

fn list_argument<'a>(arg: &'a Value, name: &str) -> Result<&'a [Value]> {
    arg.as_array().ok_or_else(|| {
        CollectionError::InvalidArgument(format!(
            "{} argument must be a list, got {}",
            name,
            arg.type_name()
        ))
    })
}

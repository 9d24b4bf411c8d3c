use super::entry::{Component, Entry};
use super::storage::EntryStorage;
use crate::core::{EqualityMode, Value};

/// Insertion-ordered multimap of dynamically typed `(key, value)` entries.
///
/// Keys and values may repeat freely. Every lookup is a linear scan over the
/// entries in insertion order. Key lookups (`get`, `has`, `first`, `last`,
/// `count_keys_of`) use strict equality; `find_keys_of` and
/// `find_values_of` take an explicit [`EqualityMode`].
///
/// # Examples
///
/// ```
/// use tuplebag::{ArrayCollection, Entry, Value};
///
/// let mut bag = ArrayCollection::new();
/// bag.put("a", 1);
/// bag.put("b", 2);
/// bag.put("a", 3);
///
/// let a = Value::from("a");
/// assert_eq!(bag.count_keys_of(&a), 2);
/// assert_eq!(bag.first(Some(&a)), Some(&Entry::new("a", 1)));
/// assert_eq!(bag.last(Some(&a)), Some(&Entry::new("a", 3)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArrayCollection {
    pub(crate) storage: EntryStorage,
}

impl ArrayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps entries that are already well formed, keeping their order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self::from_storage(EntryStorage::from_entries(entries))
    }

    pub(crate) fn from_storage(storage: EntryStorage) -> Self {
        Self { storage }
    }

    /// Every entry whose key is strictly equal to `key`, in insertion order.
    pub fn get(&self, key: &Value) -> Vec<&Entry> {
        self.matching(Component::Key, key, EqualityMode::Strict)
            .collect()
    }

    pub fn has(&self, key: &Value) -> bool {
        self.matching(Component::Key, key, EqualityMode::Strict)
            .next()
            .is_some()
    }

    /// Appends `(key, value)`. Never checks for duplicates.
    pub fn put(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        self.storage.push(Entry::new(key, value));
    }

    pub fn all(&self) -> &[Entry] {
        self.storage.entries()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.storage.entries().iter()
    }

    /// First entry overall, or the first entry whose key matches `key`.
    pub fn first(&self, key: Option<&Value>) -> Option<&Entry> {
        match key {
            None => self.storage.entries().first(),
            Some(key) => self
                .matching(Component::Key, key, EqualityMode::Strict)
                .next(),
        }
    }

    /// Last entry overall, or the last entry whose key matches `key`.
    pub fn last(&self, key: Option<&Value>) -> Option<&Entry> {
        match key {
            None => self.storage.entries().last(),
            Some(key) => self
                .matching(Component::Key, key, EqualityMode::Strict)
                .last(),
        }
    }

    pub fn count(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn count_keys_of(&self, key: &Value) -> usize {
        self.matching(Component::Key, key, EqualityMode::Strict)
            .count()
    }

    pub fn count_values_of(&self, value: &Value) -> usize {
        self.matching(Component::Value, value, EqualityMode::Strict)
            .count()
    }

    /// Projects the keys of entries whose **key** equals `value`.
    ///
    /// The result holds one `(key, Null)` entry per match, positions
    /// renumbered from zero. Pass `true`/`false` or an [`EqualityMode`].
    pub fn find_keys_of(&self, value: &Value, mode: impl Into<EqualityMode>) -> ArrayCollection {
        self.project(Component::Key, value, mode.into())
    }

    /// Projects the values of entries whose value equals `value`, as
    /// `(value, Null)` entries.
    pub fn find_values_of(&self, value: &Value, mode: impl Into<EqualityMode>) -> ArrayCollection {
        self.project(Component::Value, value, mode.into())
    }

    fn project(&self, part: Component, target: &Value, mode: EqualityMode) -> ArrayCollection {
        self.matching(part, target, mode)
            .map(|entry| Entry::new(entry.component(part).clone(), Value::Null))
            .collect()
    }

    pub(crate) fn matching<'a, 'b>(
        &'a self,
        part: Component,
        target: &'b Value,
        mode: EqualityMode,
    ) -> impl DoubleEndedIterator<Item = &'a Entry> + 'b
    where
        'a: 'b,
    {
        self.storage
            .entries()
            .iter()
            .filter(move |entry| entry.component(part).equals(target, mode))
    }

    /// Arena index of the first (or last) strict match on `part`.
    pub(crate) fn index_of(&self, part: Component, target: &Value, from_end: bool) -> Option<usize> {
        let mut hits = self
            .storage
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.component(part).strict_eq(target))
            .map(|(index, _)| index);
        if from_end { hits.next_back() } else { hits.next() }
    }
}

impl PartialEq for ArrayCollection {
    fn eq(&self, other: &Self) -> bool {
        self.all() == other.all()
    }
}

impl FromIterator<Entry> for ArrayCollection {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl Extend<Entry> for ArrayCollection {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        for entry in iter {
            self.storage.push(entry);
        }
    }
}

impl<'a> IntoIterator for &'a ArrayCollection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

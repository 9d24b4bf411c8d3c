//! Capability traits implemented by [`ArrayCollection`](crate::ArrayCollection).
//!
//! Each trait is a narrow contract that can be consumed on its own, e.g. a
//! function that only needs subscript-style access can take
//! `impl Indexable`.

use crate::collection::Entry;
use crate::core::{Result, Value};

/// Subscript-style access keyed by an entry's key.
pub trait Indexable {
    /// True when at least one entry has this key.
    fn exists(&self, key: &Value) -> bool;

    /// All entries with this key, in order.
    fn read(&self, key: &Value) -> Vec<&Entry>;

    /// Appends a new entry.
    fn write(&mut self, key: Value, value: Value);

    /// Removes the first entry with this key, if any.
    fn unset(&mut self, key: &Value);
}

pub trait Countable {
    /// Number of entries.
    fn count(&self) -> usize;

    /// True when there are no entries.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Opaque blob round trip plus a one-way JSON projection.
pub trait Serializable: Sized {
    /// Encodes every entry into an opaque blob.
    fn serialize(&self) -> Result<Vec<u8>>;

    /// Rebuilds a collection from a blob produced by `serialize`.
    fn deserialize(blob: &[u8]) -> Result<Self>;

    /// Renders the entries as a JSON array of `[key, value]` pairs.
    fn to_json(&self) -> Result<String>;
}

/// Explicit external cursor over the entries.
///
/// The cursor is independent of every query operation and survives
/// removals: excising an earlier entry keeps it on the same entry, excising
/// the current one moves it to the successor.
pub trait Cursor {
    /// Moves the cursor to the first entry.
    fn rewind(&mut self);

    /// Entry under the cursor, `None` once past the end.
    fn current(&self) -> Option<&Entry>;

    /// Position token of the slot under the cursor. This is not the entry's
    /// key; it stays stable while other entries are removed.
    fn key(&self) -> Option<usize>;

    /// Advances by one slot.
    fn next(&mut self);

    fn valid(&self) -> bool {
        self.current().is_some()
    }
}

use super::entry::Entry;
use log::trace;

/// Dense entry arena with a parallel list of position tokens.
///
/// A position is handed out once per `push` and survives filtering, so it
/// identifies a slot even after earlier entries have been excised. Removal
/// compacts the arena; the cursor is shifted so it keeps pointing at the
/// same entry, or at the one that followed a removed entry.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntryStorage {
    entries: Vec<Entry>,
    positions: Vec<usize>,
    next_position: usize,
    cursor: usize,
}

impl EntryStorage {
    /// Fresh storage with dense positions `0..n`.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let positions: Vec<usize> = (0..entries.len()).collect();
        Self {
            next_position: entries.len(),
            entries,
            positions,
            cursor: 0,
        }
    }

    /// Caller guarantees `entries` and `positions` have the same length and
    /// that every position is below `next_position`.
    pub fn from_parts(entries: Vec<Entry>, positions: Vec<usize>, next_position: usize) -> Self {
        debug_assert_eq!(entries.len(), positions.len());
        Self {
            entries,
            positions,
            next_position,
            cursor: 0,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn next_position(&self) -> usize {
        self.next_position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: Entry) -> usize {
        let position = self.next_position;
        self.next_position += 1;
        self.entries.push(entry);
        self.positions.push(position);
        position
    }

    /// Excises the entry at `index`, keeping every survivor in order.
    pub fn remove_at(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entries.len() {
            return None;
        }
        let position = self.positions.remove(index);
        let entry = self.entries.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        trace!("removed slot {} at index {}, cursor now {}", position, index, self.cursor);
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
        self.next_position = 0;
        self.cursor = 0;
    }

    /// New storage holding clones of the entries that satisfy `keep`, with
    /// their original positions.
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Entry) -> bool,
    {
        let mut entries = Vec::new();
        let mut positions = Vec::new();
        for (entry, position) in self.entries.iter().zip(&self.positions) {
            if keep(entry) {
                entries.push(entry.clone());
                positions.push(*position);
            }
        }
        Self::from_parts(entries, positions, self.next_position)
    }

    /// Same contents with the cursor rewound.
    pub fn detached(&self) -> Self {
        Self::from_parts(self.entries.clone(), self.positions.clone(), self.next_position)
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn advance(&mut self) {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_entry(&self) -> Option<&Entry> {
        self.entries.get(self.cursor)
    }

    pub fn cursor_position(&self) -> Option<usize> {
        self.positions.get(self.cursor).copied()
    }
}

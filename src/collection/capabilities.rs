use super::array_collection::ArrayCollection;
use super::entry::{Component, Entry};
use crate::codec::{self, CodecConfig};
use crate::core::{Result, Value};
use crate::interface::{Countable, Cursor, Indexable, Serializable};

impl Indexable for ArrayCollection {
    fn exists(&self, key: &Value) -> bool {
        self.has(key)
    }

    fn read(&self, key: &Value) -> Vec<&Entry> {
        self.get(key)
    }

    fn write(&mut self, key: Value, value: Value) {
        self.put(key, value);
    }

    fn unset(&mut self, key: &Value) {
        self.excise_one(Component::Key, key, false);
    }
}

impl Countable for ArrayCollection {
    fn count(&self) -> usize {
        self.storage.len()
    }
}

impl Serializable for ArrayCollection {
    fn serialize(&self) -> Result<Vec<u8>> {
        self.serialize_with(&CodecConfig::default())
    }

    fn deserialize(blob: &[u8]) -> Result<Self> {
        Self::deserialize_with(blob, &CodecConfig::default())
    }

    fn to_json(&self) -> Result<String> {
        self.to_json_with(&CodecConfig::default())
    }
}

impl ArrayCollection {
    pub fn serialize_with(&self, config: &CodecConfig) -> Result<Vec<u8>> {
        codec::encode_blob(&self.storage, config)
    }

    pub fn deserialize_with(blob: &[u8], config: &CodecConfig) -> Result<Self> {
        codec::decode_blob(blob, config).map(Self::from_storage)
    }

    pub fn to_json_with(&self, config: &CodecConfig) -> Result<String> {
        codec::entries_to_json(self.storage.entries(), config)
    }
}

impl Cursor for ArrayCollection {
    fn rewind(&mut self) {
        self.storage.rewind();
    }

    fn current(&self) -> Option<&Entry> {
        self.storage.cursor_entry()
    }

    fn key(&self) -> Option<usize> {
        self.storage.cursor_position()
    }

    fn next(&mut self) {
        self.storage.advance();
    }
}

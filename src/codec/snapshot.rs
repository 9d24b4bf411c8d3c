//! Versioned MessagePack snapshot of a collection's entry storage

use super::config::CodecConfig;
use crate::collection::Entry;
use crate::collection::storage::EntryStorage;
use crate::core::{CollectionError, Result, Value};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const BLOB_VERSION: u32 = 1;

/// Largest `next_position` a blob may carry, leaving room for later `put`s.
pub const MAX_NEXT_POSITION: usize = u32::MAX as usize;

#[derive(Debug, Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    next_position: usize,
    slots: Vec<SlotRef<'a>>,
}

#[derive(Debug, Serialize)]
struct SlotRef<'a> {
    position: usize,
    key: &'a Value,
    value: &'a Value,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    version: u32,
    next_position: usize,
    slots: Vec<Slot>,
}

#[derive(Debug, Deserialize)]
struct Slot {
    position: usize,
    key: Value,
    value: Value,
}

pub(crate) fn encode_blob(storage: &EntryStorage, config: &CodecConfig) -> Result<Vec<u8>> {
    let snapshot = SnapshotRef {
        version: BLOB_VERSION,
        next_position: storage.next_position(),
        slots: storage
            .entries()
            .iter()
            .zip(storage.positions())
            .map(|(entry, position)| SlotRef {
                position: *position,
                key: &entry.key,
                value: &entry.value,
            })
            .collect(),
    };

    let encoded = if config.named_fields {
        rmp_serde::to_vec_named(&snapshot)
    } else {
        rmp_serde::to_vec(&snapshot)
    };
    let blob = encoded.map_err(|e| {
        CollectionError::SerializationError(format!("Failed to encode collection: {}", e))
    })?;

    debug!("encoded {} entries into {} bytes", storage.len(), blob.len());
    Ok(blob)
}

pub(crate) fn decode_blob(blob: &[u8], config: &CodecConfig) -> Result<EntryStorage> {
    if let Some(limit) = config.max_blob_bytes
        && blob.len() > limit
    {
        warn!("rejecting {} byte blob, limit is {}", blob.len(), limit);
        return Err(CollectionError::DeserializationError(format!(
            "Blob of {} bytes exceeds limit of {} bytes",
            blob.len(),
            limit
        )));
    }

    let mut deserializer = rmp_serde::Deserializer::from_read_ref(blob);
    deserializer.set_max_depth(config.max_depth);
    let snapshot = Snapshot::deserialize(&mut deserializer).map_err(|e| {
        warn!("failed to decode collection blob: {}", e);
        CollectionError::DeserializationError(format!("Failed to decode collection: {}", e))
    })?;

    if snapshot.version != BLOB_VERSION {
        return Err(CollectionError::DeserializationError(format!(
            "Unsupported blob version {} (expected {})",
            snapshot.version, BLOB_VERSION
        )));
    }

    if snapshot.next_position > MAX_NEXT_POSITION {
        return Err(CollectionError::DeserializationError(format!(
            "Next position {} exceeds limit of {}",
            snapshot.next_position, MAX_NEXT_POSITION
        )));
    }

    let mut entries = Vec::with_capacity(snapshot.slots.len());
    let mut positions = Vec::with_capacity(snapshot.slots.len());
    for slot in snapshot.slots {
        // positions are strictly increasing and below next_position
        if positions.last().is_some_and(|prev| slot.position <= *prev)
            || slot.position >= snapshot.next_position
        {
            return Err(CollectionError::DeserializationError(format!(
                "Slot position {} is out of order",
                slot.position
            )));
        }
        positions.push(slot.position);
        entries.push(Entry {
            key: slot.key,
            value: slot.value,
        });
    }

    debug!("decoded {} entries from {} bytes", entries.len(), blob.len());
    Ok(EntryStorage::from_parts(entries, positions, snapshot.next_position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> EntryStorage {
        let mut storage = EntryStorage::default();
        storage.push(Entry::new("a", 1));
        storage.push(Entry::new("b", vec![Value::Float(2.5), Value::Null]));
        storage.push(Entry::new(true, "x"));
        storage.remove_at(0);
        storage
    }

    #[test]
    fn test_round_trip_keeps_positions() {
        let original = storage();
        let blob = encode_blob(&original, &CodecConfig::default()).unwrap();
        let decoded = decode_blob(&blob, &CodecConfig::default()).unwrap();
        assert_eq!(decoded.entries(), original.entries());
        assert_eq!(decoded.positions(), &[1, 2]);
        assert_eq!(decoded.next_position(), 3);
    }

    #[test]
    fn test_named_fields_decode_with_default_config() {
        let original = storage();
        let blob = encode_blob(&original, &CodecConfig::new().named_fields(true)).unwrap();
        let decoded = decode_blob(&blob, &CodecConfig::default()).unwrap();
        assert_eq!(decoded.entries(), original.entries());
    }

    #[test]
    fn test_garbage_rejected() {
        let err = decode_blob(b"not a blob", &CodecConfig::default()).unwrap_err();
        assert!(matches!(err, CollectionError::DeserializationError(_)));
        assert!(decode_blob(&[], &CodecConfig::default()).is_err());
    }

    #[test]
    fn test_size_limit() {
        let blob = encode_blob(&storage(), &CodecConfig::default()).unwrap();
        let config = CodecConfig::new().max_blob_bytes(Some(4));
        assert!(matches!(
            decode_blob(&blob, &config),
            Err(CollectionError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let snapshot = SnapshotRef {
            version: BLOB_VERSION + 1,
            next_position: 0,
            slots: Vec::new(),
        };
        let blob = rmp_serde::to_vec(&snapshot).unwrap();
        assert!(decode_blob(&blob, &CodecConfig::default()).is_err());
    }

    #[test]
    fn test_out_of_order_positions_rejected() {
        let key = Value::from("k");
        let value = Value::Null;
        let snapshot = SnapshotRef {
            version: BLOB_VERSION,
            next_position: 5,
            slots: vec![
                SlotRef { position: 3, key: &key, value: &value },
                SlotRef { position: 1, key: &key, value: &value },
            ],
        };
        let blob = rmp_serde::to_vec(&snapshot).unwrap();
        assert!(decode_blob(&blob, &CodecConfig::default()).is_err());
    }

    #[test]
    fn test_exhausted_next_position_rejected() {
        let snapshot = SnapshotRef {
            version: BLOB_VERSION,
            next_position: usize::MAX,
            slots: Vec::new(),
        };
        let blob = rmp_serde::to_vec(&snapshot).unwrap();
        assert!(matches!(
            decode_blob(&blob, &CodecConfig::default()),
            Err(CollectionError::DeserializationError(_))
        ));

        let snapshot = SnapshotRef {
            version: BLOB_VERSION,
            next_position: MAX_NEXT_POSITION,
            slots: Vec::new(),
        };
        let blob = rmp_serde::to_vec(&snapshot).unwrap();
        let mut decoded = decode_blob(&blob, &CodecConfig::default()).unwrap();
        assert_eq!(decoded.push(Entry::new("a", 1)), MAX_NEXT_POSITION);
    }

    fn nested(levels: usize) -> Value {
        let mut value = Value::Integer(0);
        for _ in 0..levels {
            value = Value::Array(vec![value]);
        }
        value
    }

    fn blob_with_value(value: &Value) -> Vec<u8> {
        let key = Value::from("k");
        let snapshot = SnapshotRef {
            version: BLOB_VERSION,
            next_position: 1,
            slots: vec![SlotRef { position: 0, key: &key, value }],
        };
        rmp_serde::to_vec(&snapshot).unwrap()
    }

    #[test]
    fn test_nesting_beyond_max_depth_rejected() {
        let blob = blob_with_value(&nested(300));
        assert!(matches!(
            decode_blob(&blob, &CodecConfig::default()),
            Err(CollectionError::DeserializationError(_))
        ));

        let shallow = blob_with_value(&nested(20));
        assert!(decode_blob(&shallow, &CodecConfig::default()).is_ok());
        assert!(decode_blob(&shallow, &CodecConfig::new().max_depth(16)).is_err());
    }
}

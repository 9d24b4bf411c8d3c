//! Blob and JSON encoding for collections.
//!
//! - `config.rs` - encoding options (`CodecConfig`)
//! - `snapshot.rs` - versioned MessagePack snapshot of the entry storage
//! - `json.rs` - one-way JSON projection

mod config;
mod json;
mod snapshot;

pub use config::{CodecConfig, DEFAULT_MAX_BLOB_BYTES, DEFAULT_MAX_DEPTH};
pub(crate) use json::entries_to_json;
pub(crate) use snapshot::{decode_blob, encode_blob};
pub use snapshot::BLOB_VERSION;

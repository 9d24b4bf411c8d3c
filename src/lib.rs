// ============================================================================
// tuplebag Library
// ============================================================================

pub mod core;
pub mod collection;
pub mod codec;
pub mod interface;

// Re-export main types for convenience
pub use collection::{ArrayCollection, Entry, RemoveMode};
pub use crate::core::{CollectionError, EqualityMode, ObjectRef, Result, Value};
pub use codec::CodecConfig;
pub use interface::{Countable, Cursor, Indexable, Serializable};

//! The ordered multimap container.
//!
//! - `entry.rs` - `(key, value)` pairs
//! - `storage.rs` - entry arena with stable position tokens and the cursor
//! - `array_collection.rs` - the container and its query operations
//! - `removal.rs` - removal policies, exclusion filters, consolidation
//! - `factory.rs` - normalization of loosely shaped input
//! - `capabilities.rs` - capability trait implementations

mod array_collection;
mod capabilities;
mod entry;
mod factory;
mod removal;
pub(crate) mod storage;

pub use array_collection::ArrayCollection;
pub use entry::Entry;
pub use removal::RemoveMode;

pub mod error;
pub mod value;

pub use error::{CollectionError, Result};
pub use value::{EqualityMode, ObjectRef, Value};

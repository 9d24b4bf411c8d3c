/// Default ceiling for blobs accepted by `deserialize`.
pub const DEFAULT_MAX_BLOB_BYTES: usize = 64 * 1024 * 1024;

/// Default MessagePack nesting limit for `deserialize`. Every nested
/// `Value::Array` costs two levels (variant tag and array).
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Encoding options for blobs and JSON output
///
/// Built the same way as other configuration types in this crate:
/// start from `new()`/`default()` and chain setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Encode snapshot structs as MessagePack maps with field names
    /// instead of compact arrays
    pub named_fields: bool,

    /// Indent JSON output
    pub pretty_json: bool,

    /// Reject blobs larger than this many bytes
    pub max_blob_bytes: Option<usize>,

    /// Maximum MessagePack nesting depth accepted while decoding
    pub max_depth: usize,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self {
            named_fields: false,
            pretty_json: false,
            max_blob_bytes: Some(DEFAULT_MAX_BLOB_BYTES),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set whether blobs carry field names
    pub fn named_fields(mut self, named: bool) -> Self {
        self.named_fields = named;
        self
    }

    /// Set whether JSON output is indented
    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Set the blob size limit (`None` disables it)
    pub fn max_blob_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_blob_bytes = limit;
        self
    }

    /// Set the decoder nesting limit
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}

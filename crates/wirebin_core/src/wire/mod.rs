mod allowlist;
mod buffer;
mod bytes;
mod decode;
pub mod defaults;
mod encode;
mod error;
mod fallback;
mod hooks;
mod options;
mod tag;
mod value;

/// Complex-object allow-list gate.
pub use allowlist::{AllowList, DECIMAL_DESCRIPTOR};
/// Growable output buffer.
pub use buffer::OutBuf;
/// Bounds-checked input cursor.
pub use bytes::Cursor;
/// Decoding entry points.
pub use decode::{decode, decode_with};
/// Encoding entry points.
pub use encode::{encode, encode_with};
/// Error and result aliases.
pub use error::{BoxError, Result, WireError};
/// Fallback codec seam for values without a native wire shape.
pub use fallback::{FallbackCodec, NativeObject, object_eq};
/// Per-call hooks: fallback codec and progress callback.
pub use hooks::{Hooks, Progress};
/// Per-call configuration.
pub use options::{DecodeOptions, DoubleOrder, EncodeOptions, TextMode};
/// Wire tags, field sizes and default limits.
pub use tag::{COUNT_SIZE, DEFAULT_MAX_DEPTH, DEFAULT_PROGRESS_STRIDE, INIT_BUFFER_LEN, TAG_SIZE, Tag, bigint_byte_len};
/// In-memory value tree.
pub use value::{Map, Value};

/// Arbitrary-precision integer type carried by [`Value::BigInt`].
pub use num_bigint::{BigInt, Sign};

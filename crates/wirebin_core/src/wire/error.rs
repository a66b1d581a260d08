use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, WireError>;

/// Boxed error returned by progress callbacks and fallback codecs.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while encoding or decoding wire records.
///
/// Every error aborts the whole call: no partial output or partially built tree
/// is ever returned alongside one.
#[derive(Debug, Error)]
pub enum WireError {
	/// Not enough bytes remained for a fixed-size field.
	#[error("truncated input at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// A count/length field claimed more data than the input holds.
	#[error("unreasonable element size {size} at offset {at}, remaining {rem}")]
	UnreasonableSize {
		/// Offset of the 4-byte count field.
		at: usize,
		/// Declared element or byte count.
		size: usize,
		/// Bytes remaining after the count field.
		rem: usize,
	},
	/// Record tag is not part of the wire format.
	#[error("unknown type tag {tag} at offset {at}")]
	UnknownType {
		/// Raw tag value.
		tag: u16,
		/// Offset of the tag.
		at: usize,
	},
	/// Value has no native wire shape and may not be delegated to the fallback codec.
	#[error("unsupported type: <{type_name}>")]
	UnsupportedType {
		/// Descriptor of the offending value.
		type_name: String,
	},
	/// Container nesting exceeded the configured ceiling.
	#[error("max recursion depth <{max_depth}> exceeded")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Output or container allocation failed.
	#[error("allocation failure growing to {requested} bytes")]
	OutOfMemory {
		/// Size of the allocation that failed.
		requested: usize,
	},
	/// Progress callback signalled failure.
	#[error("progress callback failed at offset {offset}")]
	CallbackFailed {
		/// Stream offset passed to the callback.
		offset: usize,
		/// Failure returned by the callback.
		source: BoxError,
	},
	/// Fallback codec failed to encode or decode an opaque payload.
	#[error("fallback codec failed at offset {offset}")]
	FallbackCodec {
		/// Stream offset of the opaque record.
		offset: usize,
		/// Failure returned by the codec.
		source: BoxError,
	},
	/// Opaque record found but no fallback codec was supplied.
	#[error("opaque record at offset {at} but no fallback codec is available")]
	FallbackUnavailable {
		/// Offset of the opaque record tag.
		at: usize,
	},
	/// Text payload is not valid UTF-8.
	#[error("invalid utf-8 text payload at offset {at}")]
	InvalidUtf8 {
		/// Offset of the text payload.
		at: usize,
	},
	/// Length does not fit the 4-byte count field.
	#[error("record length {len} does not fit the count field")]
	RecordTooLarge {
		/// Offending byte or element count.
		len: usize,
	},
	/// Strict decoding found bytes after the root record.
	#[error("{leftover} trailing bytes after root record")]
	TrailingBytes {
		/// Unconsumed bytes.
		leftover: usize,
	},
}

impl WireError {
	/// Whether the error was caused by malformed or adversarial input bytes.
	pub fn is_malformed_input(&self) -> bool {
		matches!(
			self,
			Self::TruncatedInput { .. } | Self::UnreasonableSize { .. } | Self::UnknownType { .. } | Self::InvalidUtf8 { .. } | Self::TrailingBytes { .. }
		)
	}
}

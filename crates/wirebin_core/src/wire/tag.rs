/// Size of the big-endian type tag leading every record.
pub const TAG_SIZE: usize = 2;
/// Size of the big-endian count field following variable-length tags.
pub const COUNT_SIZE: usize = 4;
/// Initial output buffer capacity.
pub const INIT_BUFFER_LEN: usize = 0x1000;
/// Default container nesting ceiling.
pub const DEFAULT_MAX_DEPTH: u32 = 0x1000;
/// Default number of bytes between progress callback invocations.
pub const DEFAULT_PROGRESS_STRIDE: usize = 0x8000;

/// Record type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Tag {
	/// Absence of value.
	Null = 0,
	/// 4-byte two's-complement integer.
	Int32 = 1,
	/// Raw byte string.
	Bytes = 2,
	/// Ordered mutable sequence.
	List = 4,
	/// Key/value association.
	Map = 5,
	/// 8-byte two's-complement integer.
	Int64 = 6,
	/// UTF-8 text.
	Text = 7,
	/// IEEE-754 binary64.
	Double = 8,
	/// Ordered fixed-arity sequence.
	Tuple = 9,
	/// Two's-complement integer of arbitrary width.
	BigInt = 10,
	/// Payload produced by the fallback codec.
	Opaque = 11,
}

impl Tag {
	/// Every tag in wire-code order.
	pub const ALL: [Tag; 11] = [
		Tag::Null,
		Tag::Int32,
		Tag::Bytes,
		Tag::List,
		Tag::Map,
		Tag::Int64,
		Tag::Text,
		Tag::Double,
		Tag::Tuple,
		Tag::BigInt,
		Tag::Opaque,
	];

	/// Map a raw wire code to a tag.
	pub fn from_u16(raw: u16) -> Option<Self> {
		Self::ALL.into_iter().find(|tag| tag.code() == raw)
	}

	/// Raw wire code.
	pub fn code(self) -> u16 {
		self as u16
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Int32 => "int32",
			Self::Bytes => "bytes",
			Self::List => "list",
			Self::Map => "map",
			Self::Int64 => "int64",
			Self::Text => "text",
			Self::Double => "double",
			Self::Tuple => "tuple",
			Self::BigInt => "bigint",
			Self::Opaque => "opaque",
		}
	}

	/// Whether a 4-byte count field follows the tag.
	pub fn has_count(self) -> bool {
		matches!(self, Self::Bytes | Self::Text | Self::List | Self::Tuple | Self::Map | Self::BigInt | Self::Opaque)
	}

	/// Payload size of fixed-width records, excluding the tag.
	pub fn fixed_payload(self) -> Option<usize> {
		match self {
			Self::Null => Some(0),
			Self::Int32 => Some(4),
			Self::Int64 | Self::Double => Some(8),
			_ => None,
		}
	}
}

/// Byte count of a two's-complement BigInt payload whose magnitude is `bits` wide.
///
/// One extra bit is reserved for the sign before rounding up to whole bytes.
pub fn bigint_byte_len(bits: u64) -> usize {
	(bits + 1).div_ceil(8) as usize
}

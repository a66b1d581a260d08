use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::wire::NativeObject;

/// Key/value association carried by [`Value::Map`]. Iteration order is not significant.
pub type Map = HashMap<Value, Value>;

/// Dynamically typed value tree.
///
/// Integers compare numerically across [`Int32`](Self::Int32),
/// [`Int64`](Self::Int64) and [`BigInt`](Self::BigInt); the encoder always
/// picks the narrowest of the three on the wire. Doubles compare by bit
/// pattern, so `NaN` equals itself and `0.0` differs from `-0.0`.
///
/// The tree owns all of its children, so it cannot contain cycles.
#[derive(Debug, Clone)]
pub enum Value {
	/// Absence of value.
	Null,
	/// Integer fitting 32 bits.
	Int32(i32),
	/// Integer fitting a 64-bit machine word.
	Int64(i64),
	/// Integer of arbitrary width.
	BigInt(BigInt),
	/// Raw byte string.
	Bytes(Vec<u8>),
	/// Unicode text.
	Text(String),
	/// IEEE-754 binary64.
	Double(f64),
	/// Ordered mutable sequence.
	List(Vec<Value>),
	/// Ordered fixed-arity sequence, kept apart from `List` for round-trip fidelity.
	Tuple(Vec<Value>),
	/// Key/value association.
	Map(Map),
	/// Complex object delegated to the fallback codec.
	Opaque(Arc<dyn NativeObject>),
}

#[derive(PartialEq, Eq, Hash)]
enum IntRepr<'a> {
	Word(i64),
	Wide(&'a BigInt),
}

impl Value {
	/// Integer value using the narrowest native variant.
	pub fn int(value: i64) -> Self {
		match i32::try_from(value) {
			Ok(small) => Self::Int32(small),
			Err(_) => Self::Int64(value),
		}
	}

	/// Arbitrary-precision integer using the narrowest variant that holds it.
	pub fn big(value: BigInt) -> Self {
		match value.to_i64() {
			Some(word) => Self::int(word),
			None => Self::BigInt(value),
		}
	}

	/// Text value.
	pub fn text(value: impl Into<String>) -> Self {
		Self::Text(value.into())
	}

	/// Byte-string value.
	pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
		Self::Bytes(value.into())
	}

	/// Opaque value wrapping a complex object.
	pub fn opaque(object: impl NativeObject) -> Self {
		Self::Opaque(Arc::new(object))
	}

	/// Map built from key/value pairs; later duplicates replace earlier ones.
	pub fn map_from<I>(entries: I) -> Self
	where
		I: IntoIterator<Item = (Value, Value)>,
	{
		Self::Map(entries.into_iter().collect())
	}

	/// Stable lowercase label of the variant.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Int32(_) => "int32",
			Self::Int64(_) => "int64",
			Self::BigInt(_) => "bigint",
			Self::Bytes(_) => "bytes",
			Self::Text(_) => "text",
			Self::Double(_) => "double",
			Self::List(_) => "list",
			Self::Tuple(_) => "tuple",
			Self::Map(_) => "map",
			Self::Opaque(_) => "opaque",
		}
	}

	/// Whether this is one of the three integer variants.
	pub fn is_integer(&self) -> bool {
		matches!(self, Self::Int32(_) | Self::Int64(_) | Self::BigInt(_))
	}

	/// Integer value if it fits an `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self.int_repr()? {
			IntRepr::Word(word) => Some(word),
			IntRepr::Wide(_) => None,
		}
	}

	/// Integer value widened to a `BigInt`.
	pub fn to_bigint(&self) -> Option<BigInt> {
		match self.int_repr()? {
			IntRepr::Word(word) => Some(BigInt::from(word)),
			IntRepr::Wide(wide) => Some(wide.clone()),
		}
	}

	/// Borrow text content.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Borrow list or tuple elements.
	pub fn as_seq(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) | Self::Tuple(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow map entries.
	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Look up a Text key in a map value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map()?.get(&Value::text(key))
	}

	fn int_repr(&self) -> Option<IntRepr<'_>> {
		match self {
			Self::Int32(value) => Some(IntRepr::Word(i64::from(*value))),
			Self::Int64(value) => Some(IntRepr::Word(*value)),
			Self::BigInt(value) => Some(match value.to_i64() {
				Some(word) => IntRepr::Word(word),
				None => IntRepr::Wide(value),
			}),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self.int_repr(), other.int_repr()) {
			(Some(a), Some(b)) => return a == b,
			(Some(_), None) | (None, Some(_)) => return false,
			(None, None) => {}
		}

		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bytes(a), Self::Bytes(b)) => a == b,
			(Self::Text(a), Self::Text(b)) => a == b,
			(Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
			(Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
			(Self::Map(a), Self::Map(b)) => a == b,
			(Self::Opaque(a), Self::Opaque(b)) => a.descriptor() == b.descriptor() && a.eq_object(b.as_ref()),
			_ => false,
		}
	}
}

impl Eq for Value {}

impl Hash for Value {
	fn hash<H: Hasher>(&self, state: &mut H) {
		if let Some(repr) = self.int_repr() {
			1_u8.hash(state);
			repr.hash(state);
			return;
		}

		match self {
			Self::Null => 0_u8.hash(state),
			Self::Bytes(bytes) => {
				2_u8.hash(state);
				bytes.hash(state);
			}
			Self::Text(text) => {
				7_u8.hash(state);
				text.hash(state);
			}
			Self::Double(value) => {
				8_u8.hash(state);
				value.to_bits().hash(state);
			}
			Self::List(items) => {
				4_u8.hash(state);
				items.hash(state);
			}
			Self::Tuple(items) => {
				9_u8.hash(state);
				items.hash(state);
			}
			Self::Map(map) => {
				// order-independent: sum of per-entry hashes
				5_u8.hash(state);
				map.len().hash(state);
				let mut acc = 0_u64;
				for (key, value) in map {
					let mut entry = DefaultHasher::new();
					key.hash(&mut entry);
					value.hash(&mut entry);
					acc = acc.wrapping_add(entry.finish());
				}
				acc.hash(state);
			}
			Self::Opaque(object) => {
				11_u8.hash(state);
				object.descriptor().hash(state);
			}
			Self::Int32(_) | Self::Int64(_) | Self::BigInt(_) => {}
		}
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int32(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::int(value)
	}
}

impl From<BigInt> for Value {
	fn from(value: BigInt) -> Self {
		Self::big(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Double(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::List(items)
	}
}

impl From<Map> for Value {
	fn from(map: Map) -> Self {
		Self::Map(map)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

#[cfg(test)]
mod tests;

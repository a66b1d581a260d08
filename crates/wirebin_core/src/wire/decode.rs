use std::mem;

use num_bigint::BigInt;
use tracing::debug;

use crate::wire::{Cursor, DecodeOptions, Hooks, Map, Result, TAG_SIZE, Tag, Value, WireError};

/// Decode one value tree without fallback codec or progress callback.
pub fn decode(bytes: &[u8], opt: &DecodeOptions) -> Result<Value> {
	decode_with(bytes, opt, &mut Hooks::default())
}

/// Decode one value tree, consulting `hooks` for Opaque records and progress reporting.
///
/// The returned tree owns copies of every payload; nothing borrows from `bytes`.
/// Containers are tracked on a heap stack, so nesting depth is bounded only by
/// `opt.max_depth` and never by the calling thread's stack size.
pub fn decode_with(bytes: &[u8], opt: &DecodeOptions, hooks: &mut Hooks<'_>) -> Result<Value> {
	hooks.begin();
	let mut decoder = Decoder {
		cursor: Cursor::new(bytes),
		opt,
		hooks,
	};
	let value = decoder.decode_root()?;

	let leftover = decoder.cursor.remaining();
	if leftover > 0 {
		if opt.strict_trailing {
			return Err(WireError::TrailingBytes { leftover });
		}
		debug!(leftover, "ignoring trailing bytes after root record");
	}

	debug!(bytes = decoder.cursor.pos(), root = value.kind(), "decoded value tree");
	Ok(value)
}

/// Container whose header was read but whose children are still arriving.
enum Open {
	Seq { tuple: bool, left: usize, items: Vec<Value> },
	Map { left: usize, map: Map, key: Option<Value> },
}

impl Open {
	/// Add one finished child, returning the container once its last child arrived.
	fn accept(&mut self, child: Value) -> Option<Value> {
		match self {
			Self::Seq { tuple, left, items } => {
				items.push(child);
				*left -= 1;
				if *left > 0 {
					return None;
				}
				let items = mem::take(items);
				Some(if *tuple { Value::Tuple(items) } else { Value::List(items) })
			}
			Self::Map { left, map, key } => {
				let Some(entry_key) = key.take() else {
					*key = Some(child);
					return None;
				};
				// duplicate keys: last one wins
				map.insert(entry_key, child);
				*left -= 1;
				if *left > 0 {
					return None;
				}
				Some(Value::Map(mem::take(map)))
			}
		}
	}
}

enum Record {
	Done(Value),
	Open(Open),
}

struct Decoder<'a, 'e, 'h> {
	cursor: Cursor<'a>,
	opt: &'e DecodeOptions,
	hooks: &'e mut Hooks<'h>,
}

impl Decoder<'_, '_, '_> {
	fn decode_root(&mut self) -> Result<Value> {
		// innermost container last; its length is the depth of the next record
		let mut open: Vec<Open> = Vec::new();

		loop {
			let depth = u32::try_from(open.len()).unwrap_or(u32::MAX);
			if depth > self.opt.max_depth {
				return Err(WireError::DepthExceeded { max_depth: self.opt.max_depth });
			}

			let mut finished = match self.read_record()? {
				Record::Done(value) => value,
				Record::Open(container) => {
					open.push(container);
					continue;
				}
			};

			loop {
				let Some(mut parent) = open.pop() else {
					return Ok(finished);
				};
				match parent.accept(finished) {
					Some(value) => finished = value,
					None => {
						open.push(parent);
						break;
					}
				}
			}
		}
	}

	fn read_record(&mut self) -> Result<Record> {
		let at = self.cursor.pos();
		let raw = self.cursor.read_u16_be()?;
		let tag = Tag::from_u16(raw).ok_or(WireError::UnknownType { tag: raw, at })?;

		let value = match tag {
			Tag::Null => Value::Null,
			Tag::Int32 => Value::Int32(self.cursor.read_i32_be()?),
			Tag::Int64 => Value::Int64(self.cursor.read_i64_be()?),
			Tag::BigInt => Value::BigInt(BigInt::from_signed_bytes_be(self.cursor.read_payload()?)),
			Tag::Double => Value::Double(self.cursor.read_f64(self.opt.double_order)?),
			Tag::Bytes => Value::Bytes(self.cursor.read_payload()?.to_vec()),
			Tag::Text => {
				let raw = self.cursor.read_payload()?;
				let text = std::str::from_utf8(raw).map_err(|_| WireError::InvalidUtf8 {
					at: self.cursor.pos() - raw.len(),
				})?;
				Value::Text(text.to_owned())
			}
			Tag::List | Tag::Tuple => return self.open_seq(tag == Tag::Tuple),
			Tag::Map => return self.open_map(),
			Tag::Opaque => self.decode_opaque(at)?,
		};

		self.hooks.check_progress(self.cursor.pos())?;
		Ok(Record::Done(value))
	}

	fn open_seq(&mut self, tuple: bool) -> Result<Record> {
		let count = self.cursor.read_count()?;
		self.hooks.check_progress(self.cursor.pos())?;

		let mut items = Vec::new();
		let hint = self.capacity_hint(count);
		items.try_reserve_exact(hint).map_err(|_| WireError::OutOfMemory { requested: hint })?;
		if count == 0 {
			return Ok(Record::Done(if tuple { Value::Tuple(items) } else { Value::List(items) }));
		}
		Ok(Record::Open(Open::Seq {
			tuple,
			left: count,
			items,
		}))
	}

	fn open_map(&mut self) -> Result<Record> {
		let count = self.cursor.read_count()?;
		self.hooks.check_progress(self.cursor.pos())?;

		let mut map = Map::new();
		let hint = self.capacity_hint(count);
		map.try_reserve(hint).map_err(|_| WireError::OutOfMemory { requested: hint })?;
		if count == 0 {
			return Ok(Record::Done(Value::Map(map)));
		}
		Ok(Record::Open(Open::Map {
			left: count,
			map,
			key: None,
		}))
	}

	fn decode_opaque(&mut self, at: usize) -> Result<Value> {
		let payload = self.cursor.read_payload()?;
		let codec = self.hooks.fallback.ok_or(WireError::FallbackUnavailable { at })?;
		let object = codec.decode_opaque(payload).map_err(|source| WireError::FallbackCodec { offset: at, source })?;
		Ok(Value::Opaque(object))
	}

	// every element occupies at least a tag, so never reserve beyond what the input can hold
	fn capacity_hint(&self, count: usize) -> usize {
		count.min(self.cursor.remaining() / TAG_SIZE)
	}
}

use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;
use tracing::{debug, warn};

use crate::wire::{
	COUNT_SIZE, EncodeOptions, Hooks, NativeObject, OutBuf, Result, TAG_SIZE, Tag, TextMode, Value, WireError, bigint_byte_len,
};

/// Encode a value tree without fallback codec or progress callback.
pub fn encode(value: &Value, opt: &EncodeOptions) -> Result<Vec<u8>> {
	encode_with(value, opt, &mut Hooks::default())
}

/// Encode a value tree, consulting `hooks` for Opaque values and progress reporting.
pub fn encode_with(value: &Value, opt: &EncodeOptions, hooks: &mut Hooks<'_>) -> Result<Vec<u8>> {
	hooks.begin();
	let mut encoder = Encoder {
		out: OutBuf::new()?,
		opt,
		hooks,
	};
	encoder.encode_value(value, 0)?;

	debug!(bytes = encoder.out.len(), root = value.kind(), "encoded value tree");
	Ok(encoder.out.into_vec())
}

struct Encoder<'e, 'h> {
	out: OutBuf,
	opt: &'e EncodeOptions,
	hooks: &'e mut Hooks<'h>,
}

impl Encoder<'_, '_> {
	fn encode_value(&mut self, value: &Value, depth: u32) -> Result<()> {
		if depth > self.opt.max_depth {
			return Err(WireError::DepthExceeded { max_depth: self.opt.max_depth });
		}

		match value {
			Value::Null => {
				self.out.put_tag(Tag::Null)?;
			}
			Value::Int32(item) => self.put_int32(*item)?,
			Value::Int64(item) => self.put_word(*item)?,
			Value::BigInt(item) => self.put_bigint(item)?,
			Value::Double(item) => {
				self.out.reserve(TAG_SIZE + 8)?;
				self.out.put_tag(Tag::Double)?;
				self.out.put_f64(*item, self.opt.double_order)?;
			}
			Value::Bytes(item) => self.put_blob(Tag::Bytes, item)?,
			Value::Text(item) => {
				let tag = match self.opt.text_mode {
					TextMode::Utf8 => Tag::Text,
					TextMode::Bytes => Tag::Bytes,
				};
				self.put_blob(tag, item.as_bytes())?;
			}
			Value::List(items) => return self.encode_seq(Tag::List, items, depth),
			Value::Tuple(items) => return self.encode_seq(Tag::Tuple, items, depth),
			Value::Map(map) => {
				self.put_header(Tag::Map, map.len())?;
				self.hooks.check_progress(self.out.len())?;
				for (key, item) in map {
					self.encode_value(key, depth + 1)?;
					self.encode_value(item, depth + 1)?;
				}
				return Ok(());
			}
			Value::Opaque(object) => self.put_opaque(object.as_ref())?,
		}

		self.hooks.check_progress(self.out.len())
	}

	fn encode_seq(&mut self, tag: Tag, items: &[Value], depth: u32) -> Result<()> {
		self.put_header(tag, items.len())?;
		self.hooks.check_progress(self.out.len())?;
		for item in items {
			self.encode_value(item, depth + 1)?;
		}
		Ok(())
	}

	fn put_header(&mut self, tag: Tag, count: usize) -> Result<()> {
		self.out.reserve(TAG_SIZE + COUNT_SIZE)?;
		self.out.put_tag(tag)?;
		self.out.put_count(count)
	}

	fn put_int32(&mut self, item: i32) -> Result<()> {
		self.out.reserve(TAG_SIZE + 4)?;
		self.out.put_tag(Tag::Int32)?;
		self.out.put_i32_be(item)
	}

	fn put_word(&mut self, item: i64) -> Result<()> {
		if let Ok(small) = i32::try_from(item) {
			return self.put_int32(small);
		}

		self.out.reserve(TAG_SIZE + 8)?;
		self.out.put_tag(Tag::Int64)?;
		self.out.put_i64_be(item)
	}

	fn put_bigint(&mut self, item: &BigInt) -> Result<()> {
		if let Some(word) = item.to_i64() {
			return self.put_word(word);
		}

		let len = bigint_byte_len(item.bits());
		let raw = item.to_signed_bytes_be();
		let fill = if item.sign() == Sign::Minus { 0xFF } else { 0x00 };

		self.out.reserve(TAG_SIZE + COUNT_SIZE + len)?;
		self.out.put_tag(Tag::BigInt)?;
		self.out.put_count(len)?;
		self.out.put_fill(fill, len.saturating_sub(raw.len()))?;
		self.out.put_slice(&raw)
	}

	fn put_blob(&mut self, tag: Tag, bytes: &[u8]) -> Result<()> {
		self.out.reserve(TAG_SIZE + COUNT_SIZE + bytes.len())?;
		self.out.put_tag(tag)?;
		self.out.put_count(bytes.len())?;
		self.out.put_slice(bytes)
	}

	fn put_opaque(&mut self, object: &dyn NativeObject) -> Result<()> {
		let descriptor = object.descriptor();
		if !self.opt.allowlist.is_allowed(descriptor) {
			warn!(descriptor, "allow-list rejected complex object");
			return Err(WireError::UnsupportedType {
				type_name: descriptor.to_owned(),
			});
		}

		let Some(codec) = self.hooks.fallback else {
			warn!(descriptor, "no fallback codec for complex object");
			return Err(WireError::UnsupportedType {
				type_name: descriptor.to_owned(),
			});
		};

		let offset = self.out.len();
		let payload = codec.encode_opaque(object).map_err(|source| WireError::FallbackCodec { offset, source })?;
		self.put_blob(Tag::Opaque, &payload)
	}
}

#[cfg(test)]
mod tests;

use tracing::warn;

use crate::wire::{DoubleOrder, Result, WireError};

/// Simple bounded cursor over an immutable byte slice.
///
/// Reads never wrap or seek backward; every read is bounds-checked first.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(WireError::TruncatedInput {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a big-endian `u16`.
	pub fn read_u16_be(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u32`.
	pub fn read_u32_be(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian two's-complement `i32`.
	pub fn read_i32_be(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian two's-complement `i64`.
	pub fn read_i64_be(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_array()?))
	}

	/// Read an `f64` using the selected byte order.
	pub fn read_f64(&mut self, order: DoubleOrder) -> Result<f64> {
		let raw = self.read_array()?;
		Ok(match order {
			DoubleOrder::Big => f64::from_be_bytes(raw),
			DoubleOrder::Native => f64::from_ne_bytes(raw),
		})
	}

	/// Read a 4-byte count field and check it against the remaining input.
	///
	/// A count larger than what is left cannot be honest: every element and
	/// payload byte occupies at least one input byte.
	pub fn read_count(&mut self) -> Result<usize> {
		let at = self.pos;
		let size = self.read_u32_be()? as usize;
		let rem = self.remaining();
		if size > rem {
			warn!(at, size, rem, "rejecting unreasonable element size");
			return Err(WireError::UnreasonableSize { at, size, rem });
		}
		Ok(size)
	}

	/// Read a count-prefixed payload.
	pub fn read_payload(&mut self) -> Result<&'a [u8]> {
		let len = self.read_count()?;
		self.read_exact(len)
	}
}

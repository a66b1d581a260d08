use tracing::trace;

use crate::wire::{DoubleOrder, INIT_BUFFER_LEN, Result, Tag, WireError};

/// Append-only output buffer that doubles its capacity when a write would not fit.
#[derive(Debug)]
pub struct OutBuf {
	buf: Vec<u8>,
}

impl OutBuf {
	/// Allocate a buffer with the default initial capacity.
	pub fn new() -> Result<Self> {
		Self::with_capacity(INIT_BUFFER_LEN)
	}

	/// Allocate a buffer with `capacity` bytes reserved.
	pub fn with_capacity(capacity: usize) -> Result<Self> {
		let mut buf = Vec::new();
		buf.try_reserve_exact(capacity).map_err(|_| WireError::OutOfMemory { requested: capacity })?;
		Ok(Self { buf })
	}

	/// Bytes written so far.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Whether nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Currently reserved capacity.
	pub fn capacity(&self) -> usize {
		self.buf.capacity()
	}

	/// Ensure `additional` more bytes fit, doubling capacity as often as needed.
	pub fn reserve(&mut self, additional: usize) -> Result<()> {
		let need = self.buf.len().checked_add(additional).ok_or(WireError::OutOfMemory { requested: usize::MAX })?;
		let current = self.buf.capacity();
		if need <= current {
			return Ok(());
		}

		let mut target = current.max(1);
		while target < need {
			target = target.checked_mul(2).ok_or(WireError::OutOfMemory { requested: usize::MAX })?;
		}

		self.buf
			.try_reserve_exact(target - self.buf.len())
			.map_err(|_| WireError::OutOfMemory { requested: target })?;
		trace!(from = current, to = target, "grew output buffer");
		Ok(())
	}

	/// Append raw bytes.
	pub fn put_slice(&mut self, bytes: &[u8]) -> Result<()> {
		self.reserve(bytes.len())?;
		self.buf.extend_from_slice(bytes);
		Ok(())
	}

	/// Append `count` copies of `byte`.
	pub fn put_fill(&mut self, byte: u8, count: usize) -> Result<()> {
		self.reserve(count)?;
		self.buf.resize(self.buf.len() + count, byte);
		Ok(())
	}

	/// Append a record tag.
	pub fn put_tag(&mut self, tag: Tag) -> Result<()> {
		self.put_slice(&tag.code().to_be_bytes())
	}

	/// Append a 4-byte big-endian count field.
	pub fn put_count(&mut self, len: usize) -> Result<()> {
		let raw = u32::try_from(len).map_err(|_| WireError::RecordTooLarge { len })?;
		self.put_slice(&raw.to_be_bytes())
	}

	/// Append a big-endian `i32`.
	pub fn put_i32_be(&mut self, value: i32) -> Result<()> {
		self.put_slice(&value.to_be_bytes())
	}

	/// Append a big-endian `i64`.
	pub fn put_i64_be(&mut self, value: i64) -> Result<()> {
		self.put_slice(&value.to_be_bytes())
	}

	/// Append an `f64` using the selected byte order.
	pub fn put_f64(&mut self, value: f64, order: DoubleOrder) -> Result<()> {
		match order {
			DoubleOrder::Big => self.put_slice(&value.to_be_bytes()),
			DoubleOrder::Native => self.put_slice(&value.to_ne_bytes()),
		}
	}

	/// Borrow the written bytes.
	pub fn as_slice(&self) -> &[u8] {
		&self.buf
	}

	/// Consume the buffer, returning exactly the written bytes.
	pub fn into_vec(self) -> Vec<u8> {
		self.buf
	}
}

use std::fmt;

use tracing::trace;

use crate::wire::{BoxError, DEFAULT_PROGRESS_STRIDE, FallbackCodec, Result, WireError};

type ProgressFn<'a> = dyn FnMut(usize) -> std::result::Result<(), BoxError> + 'a;

/// Periodic progress callback.
///
/// After every record is written or read, the callback runs once for each
/// multiple of `stride` the stream offset has passed since the previous check,
/// receiving that multiple. A stream of `N` bytes therefore produces exactly
/// `N / stride` calls with strictly increasing offsets, even when one record
/// spans several strides. Returning an error aborts the call with
/// [`WireError::CallbackFailed`]. Extra callback arguments are captured by the
/// closure.
pub struct Progress<'a> {
	stride: usize,
	last: usize,
	callback: Box<ProgressFn<'a>>,
}

impl<'a> Progress<'a> {
	/// Wrap a callback with the default stride.
	pub fn new<F>(callback: F) -> Self
	where
		F: FnMut(usize) -> std::result::Result<(), BoxError> + 'a,
	{
		Self {
			stride: DEFAULT_PROGRESS_STRIDE,
			last: 0,
			callback: Box::new(callback),
		}
	}

	/// Set the number of bytes between invocations (minimum 1).
	pub fn with_stride(mut self, stride: usize) -> Self {
		self.stride = stride.max(1);
		self
	}

	/// Bytes between invocations.
	pub fn stride(&self) -> usize {
		self.stride
	}

	pub(crate) fn reset(&mut self) {
		self.last = 0;
	}

	pub(crate) fn check(&mut self, offset: usize) -> Result<()> {
		// `last` only ever lands on stride multiples
		while offset.saturating_sub(self.last) >= self.stride {
			self.last += self.stride;
			let mark = self.last;
			trace!(mark, offset, stride = self.stride, "progress callback");
			(self.callback)(mark).map_err(|source| WireError::CallbackFailed { offset: mark, source })?;
		}
		Ok(())
	}
}

impl fmt::Debug for Progress<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Progress").field("stride", &self.stride).field("last", &self.last).finish_non_exhaustive()
	}
}

/// Caller-supplied collaborators for one encode or decode call.
#[derive(Default)]
pub struct Hooks<'a> {
	/// Codec for Opaque records.
	pub fallback: Option<&'a dyn FallbackCodec>,
	/// Periodic progress callback.
	pub progress: Option<Progress<'a>>,
}

impl<'a> Hooks<'a> {
	/// Hooks with nothing attached.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attach a fallback codec.
	pub fn with_fallback(mut self, codec: &'a dyn FallbackCodec) -> Self {
		self.fallback = Some(codec);
		self
	}

	/// Attach a progress callback.
	pub fn with_progress(mut self, progress: Progress<'a>) -> Self {
		self.progress = Some(progress);
		self
	}

	pub(crate) fn begin(&mut self) {
		if let Some(progress) = self.progress.as_mut() {
			progress.reset();
		}
	}

	pub(crate) fn check_progress(&mut self, offset: usize) -> Result<()> {
		match self.progress.as_mut() {
			Some(progress) => progress.check(offset),
			None => Ok(()),
		}
	}
}

impl fmt::Debug for Hooks<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Hooks")
			.field("fallback", &self.fallback.is_some())
			.field("progress", &self.progress)
			.finish()
	}
}

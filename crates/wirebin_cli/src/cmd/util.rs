use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use wirebin::wire::{BoxError, DecodeOptions, DoubleOrder, FallbackCodec, NativeObject, Progress, object_eq};

use crate::error::{CliError, Result};

/// Decoder flags shared by commands that read wire streams.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DecodeFlags {
	/// Maximum container nesting depth.
	#[arg(long)]
	pub max_depth: Option<u32>,
	/// Read Double payloads in host byte order.
	#[arg(long)]
	pub native_doubles: bool,
	/// Fail when bytes remain after the root record.
	#[arg(long)]
	pub strict: bool,
	/// Log progress every N bytes consumed.
	#[arg(long)]
	pub progress_stride: Option<usize>,
}

impl DecodeFlags {
	/// Resolve flags against the process defaults.
	pub fn options(&self) -> DecodeOptions {
		let mut opt = DecodeOptions::from_process_defaults();
		if let Some(max_depth) = self.max_depth {
			opt.max_depth = max_depth;
		}
		if self.native_doubles {
			opt.double_order = DoubleOrder::Native;
		}
		opt.strict_trailing = self.strict;
		opt
	}
}

/// Progress callback that logs each offset at debug level.
pub(crate) fn log_progress(stride: Option<usize>, phase: &'static str) -> Option<Progress<'static>> {
	stride.map(|stride| {
		Progress::new(move |offset| {
			debug!(phase, offset, "progress");
			Ok(())
		})
		.with_stride(stride)
	})
}

/// Read a whole file.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
	std::fs::read(path).map_err(|source| CliError::io(path, source))
}

/// Write a whole file.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
	std::fs::write(path, bytes).map_err(|source| CliError::io(path, source))
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to render json: {err}"),
	}
}

/// Opaque payload kept as raw bytes for inspection.
///
/// The descriptor is the payload prefix up to the first NUL byte when that
/// prefix is non-empty UTF-8, otherwise `opaque`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
	descriptor: String,
	payload: Vec<u8>,
}

impl RawObject {
	/// Wrap an opaque payload.
	pub fn new(payload: &[u8]) -> Self {
		let descriptor = payload
			.iter()
			.position(|byte| *byte == 0)
			.and_then(|split| std::str::from_utf8(&payload[..split]).ok())
			.filter(|prefix| !prefix.is_empty())
			.unwrap_or("opaque")
			.to_owned();
		Self {
			descriptor,
			payload: payload.to_vec(),
		}
	}
}

impl NativeObject for RawObject {
	fn descriptor(&self) -> &str {
		&self.descriptor
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_object(&self, other: &dyn NativeObject) -> bool {
		object_eq(self, other)
	}
}

/// Fallback codec that never interprets opaque payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct InspectCodec;

impl FallbackCodec for InspectCodec {
	fn encode_opaque(&self, object: &dyn NativeObject) -> std::result::Result<Vec<u8>, BoxError> {
		match object.as_any().downcast_ref::<RawObject>() {
			Some(raw) => Ok(raw.payload.clone()),
			None => Err(format!("cannot re-encode {}", object.descriptor()).into()),
		}
	}

	fn decode_opaque(&self, bytes: &[u8]) -> std::result::Result<Arc<dyn NativeObject>, BoxError> {
		Ok(Arc::new(RawObject::new(bytes)))
	}
}

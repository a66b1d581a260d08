use crate::wire::{AllowList, DEFAULT_MAX_DEPTH, defaults};

/// How Unicode text is tagged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
	/// Emit text under the Text tag.
	#[default]
	Utf8,
	/// Emit the UTF-8 bytes under the Bytes tag, for decoders without Text support.
	Bytes,
}

impl TextMode {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Utf8 => "utf8",
			Self::Bytes => "bytes",
		}
	}
}

/// Byte order of Double payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleOrder {
	/// Big-endian, like every other multi-byte field.
	#[default]
	Big,
	/// Host byte order, bit-compatible with legacy single-architecture streams.
	Native,
}

impl DoubleOrder {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Big => "big",
			Self::Native => "native",
		}
	}
}

/// Per-call encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
	/// Maximum container nesting depth; the root value sits at depth 0.
	pub max_depth: u32,
	/// Tag used for Unicode text.
	pub text_mode: TextMode,
	/// Byte order of Double payloads.
	pub double_order: DoubleOrder,
	/// Gate deciding which complex objects reach the fallback codec.
	pub allowlist: AllowList,
}

impl Default for EncodeOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			text_mode: TextMode::Utf8,
			double_order: DoubleOrder::Big,
			allowlist: AllowList::default(),
		}
	}
}

impl EncodeOptions {
	/// Preset producing streams readable by legacy decoders.
	pub fn legacy() -> Self {
		Self {
			text_mode: TextMode::Bytes,
			double_order: DoubleOrder::Native,
			..Self::default()
		}
	}

	/// Snapshot the process-wide defaults.
	pub fn from_process_defaults() -> Self {
		Self {
			max_depth: defaults::max_depth(),
			text_mode: if defaults::text_mode() { TextMode::Utf8 } else { TextMode::Bytes },
			double_order: DoubleOrder::Big,
			allowlist: defaults::allowlist(),
		}
	}
}

/// Per-call decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
	/// Maximum container nesting depth; the root value sits at depth 0.
	pub max_depth: u32,
	/// Byte order of Double payloads.
	pub double_order: DoubleOrder,
	/// Error when bytes remain after the root record.
	pub strict_trailing: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			double_order: DoubleOrder::Big,
			strict_trailing: false,
		}
	}
}

impl DecodeOptions {
	/// Preset reading streams written by legacy encoders.
	pub fn legacy() -> Self {
		Self {
			double_order: DoubleOrder::Native,
			..Self::default()
		}
	}

	/// Snapshot the process-wide defaults.
	pub fn from_process_defaults() -> Self {
		Self {
			max_depth: defaults::max_depth(),
			..Self::default()
		}
	}
}

use std::path::PathBuf;

use wirebin::wire::{DoubleOrder, EncodeOptions, Hooks, TextMode, encode_with};

use crate::cmd::json::to_value;
use crate::cmd::util::{emit_json, log_progress, read_file, write_file};
use crate::error::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	/// JSON document to encode.
	pub input: PathBuf,
	/// Output wire stream path.
	#[arg(short, long)]
	pub output: PathBuf,
	/// Maximum container nesting depth.
	#[arg(long)]
	pub max_depth: Option<u32>,
	/// Emit text under the Bytes tag for decoders without Text support.
	#[arg(long)]
	pub legacy_text: bool,
	/// Write Double payloads in host byte order.
	#[arg(long)]
	pub native_doubles: bool,
	/// Log progress every N bytes produced.
	#[arg(long)]
	pub progress_stride: Option<usize>,
	/// Print a JSON summary instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Encode a JSON document into a wire stream file.
pub fn run(args: Args) -> Result<()> {
	let raw = read_file(&args.input)?;
	let document: serde_json::Value = serde_json::from_slice(&raw).map_err(|source| CliError::Json {
		path: args.input.clone(),
		source,
	})?;
	let value = to_value(&document)?;

	let mut opt = EncodeOptions::from_process_defaults();
	if let Some(max_depth) = args.max_depth {
		opt.max_depth = max_depth;
	}
	if args.legacy_text {
		opt.text_mode = TextMode::Bytes;
	}
	if args.native_doubles {
		opt.double_order = DoubleOrder::Native;
	}

	let mut hooks = Hooks {
		fallback: None,
		progress: log_progress(args.progress_stride, "encode"),
	};
	let bytes = encode_with(&value, &opt, &mut hooks)?;
	write_file(&args.output, &bytes)?;

	if args.json {
		emit_json(&EncodeJson {
			input: args.input.display().to_string(),
			output: args.output.display().to_string(),
			bytes: bytes.len(),
			root: value.kind(),
			text_mode: opt.text_mode.as_str(),
			double_order: opt.double_order.as_str(),
		});
		return Ok(());
	}

	println!("input: {}", args.input.display());
	println!("output: {}", args.output.display());
	println!("bytes: {}", bytes.len());
	println!("root: {}", value.kind());
	println!("text_mode: {}", opt.text_mode.as_str());
	println!("double_order: {}", opt.double_order.as_str());
	Ok(())
}

#[derive(serde::Serialize)]
struct EncodeJson {
	input: String,
	output: String,
	bytes: usize,
	root: &'static str,
	text_mode: &'static str,
	double_order: &'static str,
}

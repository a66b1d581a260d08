use std::path::PathBuf;

use tracing::info;
use wirebin::wire::{DecodeOptions, EncodeOptions, Hooks, TextMode, decode_with, encode_with};

use crate::cmd::util::{DecodeFlags, InspectCodec, emit_json, log_progress, read_file, write_file};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	/// Wire stream to rewrite.
	pub input: PathBuf,
	/// Output wire stream path.
	#[arg(short, long)]
	pub output: PathBuf,
	#[command(flatten)]
	pub flags: DecodeFlags,
	/// Emit text under the Bytes tag for decoders without Text support.
	#[arg(long)]
	pub legacy_text: bool,
	/// Admit opaque records with this descriptor (repeatable).
	#[arg(long = "allow", value_name = "DESCRIPTOR")]
	pub allow: Vec<String>,
	/// Print a JSON summary instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Result of rewriting one stream.
#[derive(Debug)]
pub struct Recoded {
	/// Kind of the root value.
	pub root: &'static str,
	/// Rewritten stream.
	pub bytes: Vec<u8>,
}

/// Decode `bytes` with `decode` and write the tree back with `encode`.
///
/// Opaque payloads are carried through unchanged; they still have to pass the
/// allow-list in `encode`.
pub fn recode(bytes: &[u8], decode: &DecodeOptions, encode: &EncodeOptions, progress_stride: Option<usize>) -> wirebin::wire::Result<Recoded> {
	let codec = InspectCodec;
	let mut hooks = Hooks::new().with_fallback(&codec);
	hooks.progress = log_progress(progress_stride, "recode");

	let value = decode_with(bytes, decode, &mut hooks)?;
	let out = encode_with(&value, encode, &mut hooks)?;
	Ok(Recoded {
		root: value.kind(),
		bytes: out,
	})
}

/// Rewrite a wire stream with big-endian doubles and the requested text mode.
pub fn run(args: Args) -> Result<()> {
	let bytes = read_file(&args.input)?;
	let decode = args.flags.options();

	let mut encode = EncodeOptions::from_process_defaults();
	encode.max_depth = decode.max_depth;
	if args.legacy_text {
		encode.text_mode = TextMode::Bytes;
	}
	for descriptor in args.allow {
		encode.allowlist.register(descriptor);
	}

	let recoded = recode(&bytes, &decode, &encode, args.flags.progress_stride)?;
	write_file(&args.output, &recoded.bytes)?;
	info!(read = bytes.len(), written = recoded.bytes.len(), "recoded stream");

	if args.json {
		emit_json(&RecodeJson {
			input: args.input.display().to_string(),
			output: args.output.display().to_string(),
			read: bytes.len(),
			written: recoded.bytes.len(),
			root: recoded.root,
			text_mode: encode.text_mode.as_str(),
		});
		return Ok(());
	}

	println!("input: {}", args.input.display());
	println!("output: {}", args.output.display());
	println!("read: {}", bytes.len());
	println!("written: {}", recoded.bytes.len());
	println!("root: {}", recoded.root);
	println!("text_mode: {}", encode.text_mode.as_str());
	Ok(())
}

#[derive(serde::Serialize)]
struct RecodeJson {
	input: String,
	output: String,
	read: usize,
	written: usize,
	root: &'static str,
	text_mode: &'static str,
}

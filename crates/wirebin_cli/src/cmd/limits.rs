use wirebin::wire::{DEFAULT_PROGRESS_STRIDE, DecodeOptions, EncodeOptions, INIT_BUFFER_LEN, defaults};

use crate::cmd::util::emit_json;
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	/// Print the report as JSON.
	#[arg(long)]
	pub json: bool,
}

/// Print representable integer bounds and the effective default options.
pub fn run(args: Args) -> Result<()> {
	let encode = EncodeOptions::from_process_defaults();
	let decode = DecodeOptions::from_process_defaults();
	let allowlist: Vec<String> = encode.allowlist.descriptors().map(str::to_owned).collect();

	if args.json {
		emit_json(&LimitsJson {
			min_int: defaults::min_representable_int(),
			max_int: defaults::max_representable_int(),
			max_depth: encode.max_depth,
			progress_stride: DEFAULT_PROGRESS_STRIDE,
			init_buffer_len: INIT_BUFFER_LEN,
			text_mode: encode.text_mode.as_str(),
			double_order: encode.double_order.as_str(),
			strict_trailing: decode.strict_trailing,
			allowlist_enforced: encode.allowlist.is_enforced(),
			allowlist,
		});
		return Ok(());
	}

	println!("min_int: {}", defaults::min_representable_int());
	println!("max_int: {}", defaults::max_representable_int());
	println!("max_depth: {}", encode.max_depth);
	println!("progress_stride: {DEFAULT_PROGRESS_STRIDE}");
	println!("init_buffer_len: {INIT_BUFFER_LEN}");
	println!("text_mode: {}", encode.text_mode.as_str());
	println!("double_order: {}", encode.double_order.as_str());
	println!("strict_trailing: {}", decode.strict_trailing);
	println!("allowlist_enforced: {}", encode.allowlist.is_enforced());
	println!("allowlist:");
	for descriptor in allowlist {
		println!("  {descriptor}");
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct LimitsJson {
	min_int: i64,
	max_int: i64,
	max_depth: u32,
	progress_stride: usize,
	init_buffer_len: usize,
	text_mode: &'static str,
	double_order: &'static str,
	strict_trailing: bool,
	allowlist_enforced: bool,
	allowlist: Vec<String>,
}

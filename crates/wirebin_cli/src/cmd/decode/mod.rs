use std::path::PathBuf;

use wirebin::wire::{Hooks, Value, decode_with};

use crate::cmd::json::from_value;
use crate::cmd::util::{DecodeFlags, InspectCodec, emit_json, log_progress, read_file};
use crate::error::Result;

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single map.
	pub max_map_entries: usize,
	/// Maximum number of Unicode scalar values printed for text.
	pub max_string_len: usize,
	/// Maximum number of elements printed for lists and tuples.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_map_entries: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	/// Wire stream to decode.
	pub path: PathBuf,
	#[command(flatten)]
	pub flags: DecodeFlags,
	/// Print the decoded tree as JSON.
	#[arg(long)]
	pub json: bool,
	/// Elements printed per list or tuple.
	#[arg(long, default_value_t = 16)]
	pub max_items: usize,
	/// Nesting levels printed before collapsing.
	#[arg(long, default_value_t = 6)]
	pub print_depth: u32,
}

/// Decode a wire stream and print the value tree.
pub fn run(args: Args) -> Result<()> {
	let bytes = read_file(&args.path)?;
	let opt = args.flags.options();

	let codec = InspectCodec;
	let mut hooks = Hooks::new().with_fallback(&codec);
	hooks.progress = log_progress(args.flags.progress_stride, "decode");
	let value = decode_with(&bytes, &opt, &mut hooks)?;

	if args.json {
		emit_json(&DecodeJson {
			path: args.path.display().to_string(),
			bytes: bytes.len(),
			root: value.kind(),
			value: from_value(&value),
		});
		return Ok(());
	}

	let print_options = PrintOptions {
		max_array_items: args.max_items,
		max_print_depth: args.print_depth,
		..PrintOptions::default()
	};

	println!("path: {}", args.path.display());
	println!("bytes: {}", bytes.len());
	println!("root: {}", value.kind());
	println!("decoded:");
	print_value(&value, 0, 0, print_options);
	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	bytes: usize,
	root: &'static str,
	value: serde_json::Value,
}

fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::List(items) | Value::Tuple(items) => {
			let (open, close) = if matches!(value, Value::Tuple(_)) { ("(", ")") } else { ("[", "]") };
			if depth >= options.max_print_depth {
				println!("{}{open}... {} items{close}", pad, items.len());
				return;
			}
			println!("{}{open}", pad);
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{}  ... {} more", pad, items.len() - options.max_array_items);
			}
			println!("{}{close}", pad);
		}
		Value::Map(map) => {
			if depth >= options.max_print_depth {
				println!("{}{{ ... {} entries }}", pad, map.len());
				return;
			}
			let mut entries: Vec<_> = map.iter().map(|(key, item)| (render_scalar(key, options), item)).collect();
			entries.sort_by(|left, right| left.0.cmp(&right.0));

			println!("{}{{", pad);
			for (key, item) in entries.iter().take(options.max_map_entries) {
				print!("{}  {} = ", pad, key);
				if matches!(item, Value::List(_) | Value::Tuple(_) | Value::Map(_)) {
					println!();
					print_value(item, indent + 4, depth + 1, options);
				} else {
					print_value(item, 0, depth + 1, options);
				}
			}
			if entries.len() > options.max_map_entries {
				println!("{}  ... {} more entries", pad, entries.len() - options.max_map_entries);
			}
			println!("{}}}", pad);
		}
		scalar => println!("{}{}", pad, render_scalar(scalar, options)),
	}
}

/// One-line rendering; containers collapse to their size.
fn render_scalar(value: &Value, options: PrintOptions) -> String {
	match value {
		Value::Null => "null".to_owned(),
		Value::Int32(item) => item.to_string(),
		Value::Int64(item) => format!("{item}i64"),
		Value::BigInt(item) => format!("{item}n"),
		Value::Double(item) => format!("{item:?}"),
		Value::Bytes(raw) => format!("bytes[{}]", raw.len()),
		Value::Text(text) => format!("\"{}\"", truncate(text, options.max_string_len)),
		Value::List(items) => format!("list[{}]", items.len()),
		Value::Tuple(items) => format!("tuple[{}]", items.len()),
		Value::Map(map) => format!("map[{}]", map.len()),
		Value::Opaque(object) => format!("opaque<{}>", object.descriptor()),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

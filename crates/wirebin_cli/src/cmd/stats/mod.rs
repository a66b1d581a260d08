use std::path::PathBuf;

use tracing::debug;
use wirebin::wire::{Cursor, Tag, WireError};

use crate::cmd::util::{DecodeFlags, emit_json, read_file};
use crate::error::Result;

#[derive(clap::Args)]
pub struct Args {
	/// Wire stream to scan.
	pub path: PathBuf,
	#[command(flatten)]
	pub flags: DecodeFlags,
	/// Print a JSON summary instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Record counts gathered by [`scan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
	/// Records per tag, indexed like [`Tag::ALL`].
	pub counts: [usize; Tag::ALL.len()],
	/// Total records, including container headers.
	pub records: usize,
	/// Deepest nesting level reached; the root sits at 0.
	pub max_depth: u32,
	/// Bytes consumed by the root record.
	pub consumed: usize,
	/// Bytes left after the root record.
	pub trailing: usize,
}

impl StreamStats {
	/// Count for one tag.
	pub fn count(&self, tag: Tag) -> usize {
		Tag::ALL.iter().position(|item| *item == tag).map_or(0, |idx| self.counts[idx])
	}
}

/// Walk one root record without materializing values.
///
/// Applies the same bounds, size and depth checks as the decoder, but never
/// calls a fallback codec, so streams with opaque records can be inspected.
pub fn scan(bytes: &[u8], max_depth: u32) -> wirebin::wire::Result<StreamStats> {
	let mut cursor = Cursor::new(bytes);
	let mut stats = StreamStats::default();
	// children still expected by each open container
	let mut pending: Vec<usize> = Vec::new();

	loop {
		let depth = u32::try_from(pending.len()).map_err(|_| WireError::DepthExceeded { max_depth })?;
		if depth > max_depth {
			return Err(WireError::DepthExceeded { max_depth });
		}

		let at = cursor.pos();
		let raw = cursor.read_u16_be()?;
		let tag = Tag::from_u16(raw).ok_or(WireError::UnknownType { tag: raw, at })?;
		stats.records += 1;
		stats.max_depth = stats.max_depth.max(depth);
		if let Some(idx) = Tag::ALL.iter().position(|item| *item == tag) {
			stats.counts[idx] += 1;
		}

		let children = match tag {
			Tag::List | Tag::Tuple => cursor.read_count()?,
			Tag::Map => {
				let count = cursor.read_count()?;
				count.checked_mul(2).ok_or(WireError::UnreasonableSize {
					at: at + 2,
					size: count,
					rem: cursor.remaining(),
				})?
			}
			_ => {
				match tag.fixed_payload() {
					Some(len) => {
						cursor.read_exact(len)?;
					}
					None => {
						cursor.read_payload()?;
					}
				}
				0
			}
		};

		if children > 0 {
			pending.push(children);
			continue;
		}

		while let Some(left) = pending.last_mut() {
			*left -= 1;
			if *left > 0 {
				break;
			}
			pending.pop();
		}
		if pending.is_empty() {
			break;
		}
	}

	stats.consumed = cursor.pos();
	stats.trailing = cursor.remaining();
	debug!(records = stats.records, max_depth = stats.max_depth, "scanned stream");
	Ok(stats)
}

/// Print per-tag record statistics.
pub fn run(args: Args) -> Result<()> {
	let bytes = read_file(&args.path)?;
	let opt = args.flags.options();
	let stats = scan(&bytes, opt.max_depth)?;
	if opt.strict_trailing && stats.trailing > 0 {
		return Err(WireError::TrailingBytes { leftover: stats.trailing }.into());
	}

	let tags: Vec<_> = Tag::ALL
		.into_iter()
		.map(|tag| (tag, stats.count(tag)))
		.filter(|(_, count)| *count > 0)
		.map(|(tag, count)| TagCountJson {
			tag: tag.as_str(),
			code: tag.code(),
			count,
		})
		.collect();

	if args.json {
		emit_json(&StatsJson {
			path: args.path.display().to_string(),
			bytes: bytes.len(),
			records: stats.records,
			max_depth: stats.max_depth,
			consumed: stats.consumed,
			trailing: stats.trailing,
			tags,
		});
		return Ok(());
	}

	println!("path: {}", args.path.display());
	println!("bytes: {}", bytes.len());
	println!("records: {}", stats.records);
	println!("max_depth: {}", stats.max_depth);
	println!("consumed: {}", stats.consumed);
	println!("trailing: {}", stats.trailing);
	println!("tags:");
	for item in tags {
		println!("  {} ({}): {}", item.tag, item.code, item.count);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct TagCountJson {
	tag: &'static str,
	code: u16,
	count: usize,
}

#[derive(serde::Serialize)]
struct StatsJson {
	path: String,
	bytes: usize,
	records: usize,
	max_depth: u32,
	consumed: usize,
	trailing: usize,
	tags: Vec<TagCountJson>,
}

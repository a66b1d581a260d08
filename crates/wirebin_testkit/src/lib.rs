//! Shared test helpers for workspace crates.

use std::any::Any;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::sync::Arc;

use wirebin::wire::{BigInt, BoxError, DECIMAL_DESCRIPTOR, FallbackCodec, NativeObject, Value, object_eq};

/// Descriptor of the [`Fraction`] sample object. Not registered by default.
pub const FRACTION_DESCRIPTOR: &str = "fractions.Fraction";

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Render a path as a command-line argument.
pub fn path_arg(path: &Path) -> String {
	path.display().to_string()
}

/// Captured outcome of one command-line invocation.
#[derive(Debug)]
pub struct CliRun {
	/// Exit status.
	pub status: ExitStatus,
	/// Raw standard output.
	pub stdout: Vec<u8>,
	/// Standard error, lossily decoded.
	pub stderr: String,
}

impl CliRun {
	/// Whether the command exited successfully.
	pub fn success(&self) -> bool {
		self.status.success()
	}

	/// Standard output, lossily decoded.
	pub fn stdout_text(&self) -> String {
		String::from_utf8_lossy(&self.stdout).into_owned()
	}

	/// Parse standard output as JSON; panics with stderr when the command failed.
	pub fn json(&self) -> serde_json::Value {
		assert!(self.success(), "command failed with status={}: {}", self.status, self.stderr);
		serde_json::from_slice(&self.stdout).expect("stdout should be valid json")
	}

	/// Standard error of a command expected to fail.
	pub fn failure(&self) -> &str {
		assert!(!self.success(), "command unexpectedly succeeded: {}", self.stdout_text());
		&self.stderr
	}
}

/// Run `bin` with `args` and capture its output.
pub fn run_cli(bin: &Path, args: &[&str]) -> CliRun {
	let output = Command::new(bin).args(args).output().expect("command executes");
	CliRun {
		status: output.status,
		stdout: output.stdout,
		stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
	}
}

/// Sample decimal number kept as its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal(pub String);

impl Decimal {
	/// Wrap a decimal literal.
	pub fn new(literal: impl Into<String>) -> Self {
		Self(literal.into())
	}
}

impl NativeObject for Decimal {
	fn descriptor(&self) -> &str {
		DECIMAL_DESCRIPTOR
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_object(&self, other: &dyn NativeObject) -> bool {
		object_eq(self, other)
	}
}

/// Sample rational number whose descriptor is absent from the default allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fraction {
	/// Numerator.
	pub num: i64,
	/// Denominator.
	pub den: i64,
}

impl NativeObject for Fraction {
	fn descriptor(&self) -> &str {
		FRACTION_DESCRIPTOR
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_object(&self, other: &dyn NativeObject) -> bool {
		object_eq(self, other)
	}
}

/// Fallback codec for [`Decimal`] and [`Fraction`].
///
/// Payload layout: descriptor bytes, a NUL byte, then the textual body.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleCodec;

impl FallbackCodec for SampleCodec {
	fn encode_opaque(&self, object: &dyn NativeObject) -> Result<Vec<u8>, BoxError> {
		let body = if let Some(decimal) = object.as_any().downcast_ref::<Decimal>() {
			decimal.0.clone()
		} else if let Some(fraction) = object.as_any().downcast_ref::<Fraction>() {
			format!("{}/{}", fraction.num, fraction.den)
		} else {
			return Err(format!("sample codec cannot encode {}", object.descriptor()).into());
		};

		let mut out = Vec::with_capacity(object.descriptor().len() + 1 + body.len());
		out.extend_from_slice(object.descriptor().as_bytes());
		out.push(0);
		out.extend_from_slice(body.as_bytes());
		Ok(out)
	}

	fn decode_opaque(&self, bytes: &[u8]) -> Result<Arc<dyn NativeObject>, BoxError> {
		let split = bytes.iter().position(|byte| *byte == 0).ok_or("missing descriptor separator")?;
		let descriptor = std::str::from_utf8(&bytes[..split])?;
		let body = std::str::from_utf8(&bytes[split + 1..])?;

		match descriptor {
			DECIMAL_DESCRIPTOR => Ok(Arc::new(Decimal::new(body))),
			FRACTION_DESCRIPTOR => {
				let (num, den) = body.split_once('/').ok_or("fraction body needs num/den")?;
				Ok(Arc::new(Fraction {
					num: num.parse()?,
					den: den.parse()?,
				}))
			}
			other => Err(format!("sample codec cannot decode {other}").into()),
		}
	}
}

/// `depth` singleton lists wrapped around a Null, built without recursion.
pub fn nested_lists(depth: u32) -> Value {
	let mut value = Value::Null;
	for _ in 0..depth {
		value = Value::List(vec![value]);
	}
	value
}

/// Iteratively release a deep tree so dropping it never recurses past the stack.
pub fn drop_deep(value: Value) {
	let mut stack = vec![value];
	while let Some(value) = stack.pop() {
		match value {
			Value::List(items) | Value::Tuple(items) => stack.extend(items),
			Value::Map(map) => {
				for (key, item) in map {
					stack.push(key);
					stack.push(item);
				}
			}
			_ => {}
		}
	}
}

/// Tree touching every native variant once.
pub fn sample_tree() -> Value {
	Value::map_from([
		(Value::text("null"), Value::Null),
		(Value::text("small"), Value::int(-7)),
		(Value::text("word"), Value::int(1 << 40)),
		(Value::text("wide"), Value::big(BigInt::from(u64::MAX) * 3_u32)),
		(Value::text("ratio"), Value::Double(0.25)),
		(Value::text("raw"), Value::bytes(vec![0, 1, 0xFE, 0xFF])),
		(Value::text("name"), Value::text("wirebin ✓")),
		(Value::text("items"), Value::List(vec![Value::int(1), Value::text("two"), Value::List(Vec::new())])),
		(Value::text("pair"), Value::Tuple(vec![Value::int(3), Value::Null])),
		(Value::int(42), Value::text("non-text key")),
	])
}

/// Canonical `{"a": 1, "b": [2, 3]}` tree.
pub fn scenario_map() -> Value {
	Value::map_from([
		(Value::text("a"), Value::int(1)),
		(Value::text("b"), Value::List(vec![Value::int(2), Value::int(3)])),
	])
}

use std::path::PathBuf;

use thiserror::Error;
use wirebin::wire::WireError;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `wirebin` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Codec failure.
	#[error(transparent)]
	Wire(#[from] WireError),
	/// Reading or writing a file failed.
	#[error("io error on {path}: {source}")]
	Io {
		/// File being accessed.
		path: PathBuf,
		/// Underlying failure.
		source: std::io::Error,
	},
	/// Input file is not valid JSON.
	#[error("invalid json in {path}: {source}")]
	Json {
		/// Input file.
		path: PathBuf,
		/// Parser failure.
		source: serde_json::Error,
	},
	/// JSON document uses a shape that has no value-tree counterpart.
	#[error("unsupported json at {pointer}: {reason}")]
	JsonShape {
		/// JSON pointer to the offending node.
		pointer: String,
		/// What was wrong with it.
		reason: String,
	},
}

impl CliError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}

	pub(crate) fn shape(pointer: &str, reason: impl Into<String>) -> Self {
		Self::JsonShape {
			pointer: if pointer.is_empty() { "/".to_owned() } else { pointer.to_owned() },
			reason: reason.into(),
		}
	}
}

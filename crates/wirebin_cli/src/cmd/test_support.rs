//! Runs the `wirebin` binary from unit tests, where cargo does not export its path.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

use wirebin_testkit::{CliRun, run_cli, target_dir};

pub(crate) use wirebin_testkit::{fixture_path, path_arg};

static BINARY: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn wirebin(args: &[&str]) -> CliRun {
	run_cli(binary(), args)
}

fn binary() -> &'static Path {
	BINARY.get_or_init(|| {
		if let Some(path) = std::env::var_os("CARGO_BIN_EXE_wirebin") {
			return PathBuf::from(path);
		}

		// cargo only exports the binary path to integration tests
		let status = Command::new(env!("CARGO"))
			.current_dir(env!("CARGO_MANIFEST_DIR"))
			.args(["build", "--quiet", "--bin", "wirebin"])
			.status()
			.expect("cargo build executes");
		assert!(status.success(), "building the wirebin binary failed");
		target_dir().join("debug").join(format!("wirebin{}", std::env::consts::EXE_SUFFIX))
	})
}

#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod error;

#[derive(Parser)]
#[command(name = "wirebin", about = "Inspect and convert wirebin binary streams")]
struct Cli {
	/// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a JSON document into a wire stream.
	Encode(cmd::encode::Args),
	/// Decode a wire stream and print its value tree.
	Decode(cmd::decode::Args),
	/// Rewrite a wire stream with current options, keeping opaque payloads.
	Recode(cmd::recode::Args),
	/// Count records per tag without building a value tree.
	Stats(cmd::stats::Args),
	/// Print representable integer bounds and default options.
	Limits(cmd::limits::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> error::Result<()> {
	match command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Recode(args) => cmd::recode::run(args),
		Commands::Stats(args) => cmd::stats::run(args),
		Commands::Limits(args) => cmd::limits::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(match verbose {
			0 => "warn",
			1 => "info",
			2 => "debug",
			_ => "trace",
		})
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

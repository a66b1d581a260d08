/// Wire stream decode and tree print command.
pub mod decode;
/// JSON document encode command.
pub mod encode;
/// JSON mapping for value trees.
pub mod json;
/// Limits and defaults report command.
pub mod limits;
/// Stream rewrite command.
pub mod recode;
/// Per-tag record statistics command.
pub mod stats;
/// Shared command helpers.
pub mod util;

#[cfg(test)]
mod test_support;

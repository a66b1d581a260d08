//! Process-wide defaults.
//!
//! These toggles only seed [`EncodeOptions::from_process_defaults`] and
//! [`DecodeOptions::from_process_defaults`]. Each call works on its own snapshot,
//! so changing a toggle never affects an encode or decode already in flight.
//!
//! [`EncodeOptions::from_process_defaults`]: crate::wire::EncodeOptions::from_process_defaults
//! [`DecodeOptions::from_process_defaults`]: crate::wire::DecodeOptions::from_process_defaults

use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use crate::wire::{AllowList, DEFAULT_MAX_DEPTH};

static TEXT_MODE: AtomicBool = AtomicBool::new(true);
static MAX_DEPTH: AtomicU32 = AtomicU32::new(DEFAULT_MAX_DEPTH);
static ALLOWLIST: LazyLock<RwLock<AllowList>> = LazyLock::new(|| RwLock::new(AllowList::default()));

/// Emit Unicode text under the Text tag (`true`, default) or the Bytes tag.
pub fn set_text_mode(enabled: bool) {
	debug!(enabled, "set process text mode");
	TEXT_MODE.store(enabled, Ordering::SeqCst);
}

/// Whether Unicode text is emitted under the Text tag.
pub fn text_mode() -> bool {
	TEXT_MODE.load(Ordering::SeqCst)
}

/// Turn allow-list enforcement on (default) or off.
pub fn set_allowlist_enforcement(enabled: bool) {
	debug!(enabled, "set process allow-list enforcement");
	ALLOWLIST.write().set_enforced(enabled);
}

/// Whether allow-list enforcement is on.
pub fn allowlist_enforcement() -> bool {
	ALLOWLIST.read().is_enforced()
}

/// Register a complex-object descriptor. Returns `false` if already registered.
pub fn register(descriptor: impl Into<Box<str>>) -> bool {
	ALLOWLIST.write().register(descriptor)
}

/// Remove a complex-object descriptor. Returns `false` if it was not registered.
pub fn unregister(descriptor: &str) -> bool {
	ALLOWLIST.write().unregister(descriptor)
}

/// Snapshot of the process allow-list.
pub fn allowlist() -> AllowList {
	ALLOWLIST.read().clone()
}

/// Set the default nesting ceiling.
pub fn set_max_depth(max_depth: u32) {
	MAX_DEPTH.store(max_depth, Ordering::SeqCst);
}

/// Default nesting ceiling.
pub fn max_depth() -> u32 {
	MAX_DEPTH.load(Ordering::SeqCst)
}

/// Smallest integer carried by a native-word record.
pub fn min_representable_int() -> i64 {
	i64::MIN
}

/// Largest integer carried by a native-word record.
pub fn max_representable_int() -> i64 {
	i64::MAX
}

#[cfg(test)]
mod tests;

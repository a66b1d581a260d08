use parking_lot::Mutex;

use crate::wire::{DEFAULT_MAX_DEPTH, DecodeOptions, DoubleOrder, EncodeOptions, TextMode, defaults};

// process-wide state: serialize the tests that touch it
static GUARD: Mutex<()> = Mutex::new(());

#[test]
fn text_mode_toggle_flows_into_snapshot() {
	let _guard = GUARD.lock();
	assert!(defaults::text_mode());
	assert_eq!(EncodeOptions::from_process_defaults().text_mode, TextMode::Utf8);

	defaults::set_text_mode(false);
	let snapshot = EncodeOptions::from_process_defaults();
	defaults::set_text_mode(true);

	assert_eq!(snapshot.text_mode, TextMode::Bytes);
	assert!(defaults::text_mode());
}

#[test]
fn enforcement_toggle_flows_into_snapshot() {
	let _guard = GUARD.lock();
	assert!(defaults::allowlist_enforcement());

	defaults::set_allowlist_enforcement(false);
	let snapshot = EncodeOptions::from_process_defaults();
	defaults::set_allowlist_enforcement(true);

	assert!(!snapshot.allowlist.is_enforced());
	assert!(snapshot.allowlist.is_allowed("anything.At.All"));
	assert!(defaults::allowlist_enforcement());
}

#[test]
fn registered_descriptor_is_visible_until_removed() {
	let _guard = GUARD.lock();
	assert!(defaults::register("uuid.UUID"));
	assert!(EncodeOptions::from_process_defaults().allowlist.is_allowed("uuid.UUID"));
	assert!(defaults::unregister("uuid.UUID"));
	assert!(!defaults::allowlist().contains("uuid.UUID"));
}

#[test]
fn snapshot_is_not_affected_by_later_changes() {
	let _guard = GUARD.lock();
	let snapshot = EncodeOptions::from_process_defaults();
	defaults::set_max_depth(3);
	let decode = DecodeOptions::from_process_defaults();
	defaults::set_max_depth(DEFAULT_MAX_DEPTH);

	assert_eq!(snapshot.max_depth, DEFAULT_MAX_DEPTH);
	assert_eq!(decode.max_depth, 3);
	assert_eq!(decode.double_order, DoubleOrder::Big);
}

#[test]
fn representable_bounds_are_machine_word() {
	assert_eq!(defaults::min_representable_int(), i64::MIN);
	assert_eq!(defaults::max_representable_int(), i64::MAX);
}

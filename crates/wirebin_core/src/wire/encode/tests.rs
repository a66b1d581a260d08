use std::any::Any;
use std::sync::Arc;

use crate::wire::{
	AllowList, BigInt, BoxError, DoubleOrder, EncodeOptions, FallbackCodec, Hooks, NativeObject, Progress, TextMode, Value, WireError, encode,
	encode_with, object_eq,
};

#[derive(Debug, PartialEq)]
struct Money(String);

impl NativeObject for Money {
	fn descriptor(&self) -> &str {
		"decimal.Decimal"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_object(&self, other: &dyn NativeObject) -> bool {
		object_eq(self, other)
	}
}

#[derive(Debug, PartialEq)]
struct Socket;

impl NativeObject for Socket {
	fn descriptor(&self) -> &str {
		"socket.socket"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_object(&self, other: &dyn NativeObject) -> bool {
		object_eq(self, other)
	}
}

struct DescriptorCodec;

impl FallbackCodec for DescriptorCodec {
	fn encode_opaque(&self, object: &dyn NativeObject) -> Result<Vec<u8>, BoxError> {
		Ok(object.descriptor().as_bytes().to_vec())
	}

	fn decode_opaque(&self, _bytes: &[u8]) -> Result<Arc<dyn NativeObject>, BoxError> {
		Err("not used".into())
	}
}

struct FailingCodec;

impl FallbackCodec for FailingCodec {
	fn encode_opaque(&self, _object: &dyn NativeObject) -> Result<Vec<u8>, BoxError> {
		Err("codec refused".into())
	}

	fn decode_opaque(&self, _bytes: &[u8]) -> Result<Arc<dyn NativeObject>, BoxError> {
		Err("codec refused".into())
	}
}

fn encode_default(value: &Value) -> Vec<u8> {
	encode(value, &EncodeOptions::default()).expect("encode")
}

fn nested_lists(depth: u32) -> Value {
	let mut value = Value::Null;
	for _ in 0..depth {
		value = Value::List(vec![value]);
	}
	value
}

#[test]
fn encodes_null() {
	assert_eq!(encode_default(&Value::Null), [0x00, 0x00]);
}

#[test]
fn int32_boundary_stays_narrow() {
	assert_eq!(encode_default(&Value::int(2_147_483_647)), [0x00, 0x01, 0x7F, 0xFF, 0xFF, 0xFF]);
	assert_eq!(encode_default(&Value::int(-2_147_483_648)), [0x00, 0x01, 0x80, 0x00, 0x00, 0x00]);
}

#[test]
fn int64_past_int32_range() {
	assert_eq!(encode_default(&Value::int(2_147_483_648)), [0x00, 0x06, 0, 0, 0, 0, 0x80, 0, 0, 0]);
	assert_eq!(encode_default(&Value::Int64(-1)), [0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn small_bigint_uses_native_word() {
	assert_eq!(encode_default(&Value::BigInt(BigInt::from(7))), [0x00, 0x01, 0, 0, 0, 7]);
	assert_eq!(
		encode_default(&Value::BigInt(BigInt::from(i64::MIN))),
		[0x00, 0x06, 0x80, 0, 0, 0, 0, 0, 0, 0]
	);
}

#[test]
fn bigint_past_machine_word() {
	let two_64 = BigInt::from(1_u8) << 64_u32;
	let bytes = encode_default(&Value::big(two_64.clone()));
	assert_eq!(&bytes[..6], [0x00, 0x0A, 0x00, 0x00, 0x00, 0x09]);
	assert_eq!(&bytes[6..], [0x01, 0, 0, 0, 0, 0, 0, 0, 0]);

	let bytes = encode_default(&Value::big(-two_64));
	assert_eq!(&bytes[..6], [0x00, 0x0A, 0x00, 0x00, 0x00, 0x09]);
	assert_eq!(&bytes[6..], [0xFF, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn negative_bigint_is_sign_extended() {
	// magnitude takes 128 bits; one more for the sign rounds up to 17 bytes
	let value = -(BigInt::from(1_u8) << 127_u32);
	let bytes = encode_default(&Value::big(value));
	assert_eq!(&bytes[..6], [0x00, 0x0A, 0x00, 0x00, 0x00, 0x11]);
	assert_eq!(bytes[6], 0xFF);
	assert_eq!(bytes[7], 0x80);
	assert!(bytes[8..].iter().all(|byte| *byte == 0));
}

#[test]
fn text_mode_selects_tag() {
	let value = Value::text("hé");
	assert_eq!(encode_default(&value), [0x00, 0x07, 0, 0, 0, 3, b'h', 0xC3, 0xA9]);

	let opt = EncodeOptions {
		text_mode: TextMode::Bytes,
		..EncodeOptions::default()
	};
	assert_eq!(encode(&value, &opt).expect("encode"), [0x00, 0x02, 0, 0, 0, 3, b'h', 0xC3, 0xA9]);
}

#[test]
fn empty_text_is_legal() {
	assert_eq!(encode_default(&Value::text("")), [0x00, 0x07, 0, 0, 0, 0]);
}

#[test]
fn double_order_selects_payload_layout() {
	let value = Value::Double(1.5);
	let mut big = vec![0x00, 0x08];
	big.extend_from_slice(&1.5_f64.to_be_bytes());
	assert_eq!(encode_default(&value), big);

	let opt = EncodeOptions {
		double_order: DoubleOrder::Native,
		..EncodeOptions::default()
	};
	let mut native = vec![0x00, 0x08];
	native.extend_from_slice(&1.5_f64.to_ne_bytes());
	assert_eq!(encode(&value, &opt).expect("encode"), native);
}

#[test]
fn list_and_tuple_use_their_own_tags() {
	let items = vec![Value::Int32(2), Value::Int32(3)];
	let list = encode_default(&Value::List(items.clone()));
	let tuple = encode_default(&Value::Tuple(items));
	assert_eq!(&list[..6], [0x00, 0x04, 0, 0, 0, 2]);
	assert_eq!(&tuple[..6], [0x00, 0x09, 0, 0, 0, 2]);
	assert_eq!(list[6..], tuple[6..]);
}

#[test]
fn single_entry_map_layout() {
	let value = Value::map_from([(Value::text("a"), Value::Int32(1))]);
	assert_eq!(
		encode_default(&value),
		[0x00, 0x05, 0, 0, 0, 1, 0x00, 0x07, 0, 0, 0, 1, b'a', 0x00, 0x01, 0, 0, 0, 1]
	);
}

#[test]
fn depth_ceiling_is_inclusive() {
	let opt = EncodeOptions {
		max_depth: 3,
		..EncodeOptions::default()
	};
	encode(&nested_lists(3), &opt).expect("depth 3 fits");

	let err = encode(&nested_lists(4), &opt).expect_err("depth 4 exceeds");
	assert!(matches!(err, WireError::DepthExceeded { max_depth: 3 }));
}

#[test]
fn zero_depth_admits_scalars_only() {
	let opt = EncodeOptions {
		max_depth: 0,
		..EncodeOptions::default()
	};
	encode(&Value::Int32(1), &opt).expect("scalar root");
	encode(&Value::List(Vec::new()), &opt).expect("empty container root");
	let err = encode(&nested_lists(1), &opt).expect_err("child exceeds");
	assert!(matches!(err, WireError::DepthExceeded { .. }));
}

#[test]
fn opaque_without_codec_is_unsupported() {
	let err = encode(&Value::opaque(Money("1.5".into())), &EncodeOptions::default()).expect_err("no codec");
	let WireError::UnsupportedType { type_name } = err else {
		panic!("expected UnsupportedType");
	};
	assert_eq!(type_name, "decimal.Decimal");
}

#[test]
fn allowlist_rejects_unregistered_descriptor() {
	let codec = DescriptorCodec;
	let mut hooks = Hooks::new().with_fallback(&codec);
	let err = encode_with(&Value::opaque(Socket), &EncodeOptions::default(), &mut hooks).expect_err("gated");
	let WireError::UnsupportedType { type_name } = err else {
		panic!("expected UnsupportedType");
	};
	assert_eq!(type_name, "socket.socket");
}

#[test]
fn allowlist_admits_registered_descriptor() {
	let codec = DescriptorCodec;
	let mut hooks = Hooks::new().with_fallback(&codec);
	let bytes = encode_with(&Value::opaque(Money("2".into())), &EncodeOptions::default(), &mut hooks).expect("admitted");
	assert_eq!(&bytes[..6], [0x00, 0x0B, 0, 0, 0, 15]);
	assert_eq!(&bytes[6..], b"decimal.Decimal");
}

#[test]
fn permissive_allowlist_admits_anything() {
	let codec = DescriptorCodec;
	let opt = EncodeOptions {
		allowlist: AllowList::permissive(),
		..EncodeOptions::default()
	};
	let bytes = encode_with(&Value::opaque(Socket), &opt, &mut Hooks::new().with_fallback(&codec)).expect("admitted");
	assert_eq!(&bytes[6..], b"socket.socket");
}

#[test]
fn codec_failure_is_reported_with_offset() {
	let codec = FailingCodec;
	let value = Value::List(vec![Value::Null, Value::opaque(Money("3".into()))]);
	let err = encode_with(&value, &EncodeOptions::default(), &mut Hooks::new().with_fallback(&codec)).expect_err("codec fails");
	let WireError::FallbackCodec { offset, source } = err else {
		panic!("expected FallbackCodec");
	};
	assert_eq!(offset, 8);
	assert_eq!(source.to_string(), "codec refused");
}

#[test]
fn progress_reports_increasing_offsets() {
	let value = Value::List(vec![Value::Null; 200]);
	let mut seen = Vec::new();
	let bytes = {
		let mut hooks = Hooks::new().with_progress(
			Progress::new(|offset| {
				seen.push(offset);
				Ok(())
			})
			.with_stride(64),
		);
		encode_with(&value, &EncodeOptions::default(), &mut hooks).expect("encode")
	};

	assert_eq!(bytes.len(), 406);
	assert_eq!(seen, vec![64, 128, 192, 256, 320, 384]);
}

#[test]
fn progress_failure_aborts_encode() {
	let value = Value::List(vec![Value::Null; 10]);
	let mut hooks = Hooks::new().with_progress(Progress::new(|_| Err("cancelled".into())).with_stride(4));
	let err = encode_with(&value, &EncodeOptions::default(), &mut hooks).expect_err("cancelled");
	let WireError::CallbackFailed { offset, .. } = err else {
		panic!("expected CallbackFailed");
	};
	// the 6-byte list header already passes the first stride mark
	assert_eq!(offset, 4);
}

#[test]
fn progress_count_is_exact_for_uneven_records() {
	// 7-byte records never divide the stride
	let value = Value::List(vec![Value::bytes([1]); 1000]);
	let mut seen = Vec::new();
	let bytes = {
		let mut hooks = Hooks::new().with_progress(
			Progress::new(|offset| {
				seen.push(offset);
				Ok(())
			})
			.with_stride(8),
		);
		encode_with(&value, &EncodeOptions::default(), &mut hooks).expect("encode")
	};

	assert_eq!(bytes.len(), 7006);
	assert_eq!(seen.len(), 7006 / 8);
	assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
	assert_eq!(seen.last(), Some(&7000));
}

#[test]
fn progress_covers_a_single_long_record() {
	let value = Value::bytes(vec![0xAB; 100_000]);
	let mut seen = Vec::new();
	let bytes = {
		let mut hooks = Hooks::new().with_progress(Progress::new(|offset| {
			seen.push(offset);
			Ok(())
		}));
		encode_with(&value, &EncodeOptions::default(), &mut hooks).expect("encode")
	};

	assert_eq!(bytes.len(), 100_006);
	assert_eq!(seen, vec![32_768, 65_536, 98_304]);
}

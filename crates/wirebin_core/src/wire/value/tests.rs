use std::any::Any;
use std::collections::HashSet;

use crate::wire::{BigInt, Map, NativeObject, Value, object_eq};

#[derive(Debug, PartialEq)]
struct Point(i32, i32);

impl NativeObject for Point {
	fn descriptor(&self) -> &str {
		"geometry.Point"
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn eq_object(&self, other: &dyn NativeObject) -> bool {
		object_eq(self, other)
	}
}

#[test]
fn int_picks_narrowest_variant() {
	assert!(matches!(Value::int(i64::from(i32::MAX)), Value::Int32(i32::MAX)));
	assert!(matches!(Value::int(i64::from(i32::MAX) + 1), Value::Int64(_)));
	assert!(matches!(Value::int(i64::from(i32::MIN)), Value::Int32(i32::MIN)));
	assert!(matches!(Value::int(i64::from(i32::MIN) - 1), Value::Int64(_)));
	assert!(matches!(Value::big(BigInt::from(7)), Value::Int32(7)));
	assert!(matches!(Value::big(BigInt::from(i64::MAX) + 1), Value::BigInt(_)));
}

#[test]
fn integers_compare_numerically_across_variants() {
	assert_eq!(Value::Int32(5), Value::Int64(5));
	assert_eq!(Value::Int64(5), Value::BigInt(BigInt::from(5)));
	assert_ne!(Value::Int32(5), Value::Double(5.0));

	let mut set = HashSet::new();
	set.insert(Value::Int32(5));
	assert!(set.contains(&Value::BigInt(BigInt::from(5))));
}

#[test]
fn list_and_tuple_are_distinct() {
	let items = vec![Value::Int32(1), Value::Int32(2)];
	assert_ne!(Value::List(items.clone()), Value::Tuple(items.clone()));
	assert_eq!(Value::Tuple(items.clone()), Value::Tuple(items));
}

#[test]
fn text_and_bytes_are_distinct() {
	assert_ne!(Value::text("a"), Value::bytes(b"a".to_vec()));
}

#[test]
fn doubles_compare_by_bits() {
	assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
	assert_ne!(Value::Double(0.0), Value::Double(-0.0));
}

#[test]
fn maps_compare_regardless_of_insertion_order() {
	let a = Value::map_from([(Value::text("x"), Value::Int32(1)), (Value::text("y"), Value::Null)]);
	let b = Value::map_from([(Value::text("y"), Value::Null), (Value::text("x"), Value::Int32(1))]);
	assert_eq!(a, b);

	let mut set = HashSet::new();
	set.insert(a);
	assert!(set.contains(&b));
}

#[test]
fn map_from_keeps_last_duplicate() {
	let map = Value::map_from([(Value::text("k"), Value::Int32(1)), (Value::text("k"), Value::Int32(2))]);
	assert_eq!(map.as_map().map(Map::len), Some(1));
	assert_eq!(map.get("k"), Some(&Value::Int32(2)));
}

#[test]
fn opaque_compares_through_object() {
	assert_eq!(Value::opaque(Point(1, 2)), Value::opaque(Point(1, 2)));
	assert_ne!(Value::opaque(Point(1, 2)), Value::opaque(Point(2, 1)));
	assert_eq!(Value::opaque(Point(0, 0)).kind(), "opaque");
}

#[test]
fn option_converts_to_null() {
	assert_eq!(Value::from(None::<i64>), Value::Null);
	assert_eq!(Value::from(Some("hi")), Value::text("hi"));
}

#[test]
fn integer_accessors() {
	let wide = BigInt::from(i64::MAX) * 4_i32;
	assert_eq!(Value::Int32(-3).as_i64(), Some(-3));
	assert_eq!(Value::BigInt(wide.clone()).as_i64(), None);
	assert_eq!(Value::BigInt(wide.clone()).to_bigint(), Some(wide));
	assert_eq!(Value::text("1").to_bigint(), None);
}

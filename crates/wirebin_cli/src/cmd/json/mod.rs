//! Mapping between JSON documents and value trees.
//!
//! Plain JSON maps onto the natural variants. Shapes JSON has no syntax for use
//! a single-key object whose key starts with `$`:
//!
//! - `{"$bytes": "<hex>"}` byte string
//! - `{"$tuple": [...]}` tuple
//! - `{"$bigint": "<decimal>"}` integer of any width
//! - `{"$map": [[key, value], ...]}` map with non-text keys
//! - `{"$opaque": "<descriptor>"}` opaque record, dump only
//!
//! Booleans encode as Int32 `0`/`1` and therefore dump back as numbers.

use std::str::FromStr;

use serde_json::{Map as JsonMap, Number, Value as Json};
use wirebin::wire::{BigInt, Value};

use crate::error::{CliError, Result};

const BYTES_KEY: &str = "$bytes";
const TUPLE_KEY: &str = "$tuple";
const BIGINT_KEY: &str = "$bigint";
const MAP_KEY: &str = "$map";
const OPAQUE_KEY: &str = "$opaque";

/// Convert a JSON document into a value tree.
pub fn to_value(json: &Json) -> Result<Value> {
	convert(json, "")
}

fn convert(json: &Json, pointer: &str) -> Result<Value> {
	Ok(match json {
		Json::Null => Value::Null,
		Json::Bool(flag) => Value::Int32(i32::from(*flag)),
		Json::Number(number) => number_value(number, pointer)?,
		Json::String(text) => Value::text(text.as_str()),
		Json::Array(items) => Value::List(convert_items(items, pointer)?),
		Json::Object(object) => {
			if let Some(value) = tagged(object, pointer)? {
				return Ok(value);
			}
			let mut entries = Vec::with_capacity(object.len());
			for (key, item) in object {
				entries.push((Value::text(key.as_str()), convert(item, &child(pointer, key))?));
			}
			Value::map_from(entries)
		}
	})
}

fn convert_items(items: &[Json], pointer: &str) -> Result<Vec<Value>> {
	items
		.iter()
		.enumerate()
		.map(|(idx, item)| convert(item, &child(pointer, &idx.to_string())))
		.collect()
}

fn number_value(number: &Number, pointer: &str) -> Result<Value> {
	if let Some(item) = number.as_i64() {
		return Ok(Value::int(item));
	}
	if let Some(item) = number.as_u64() {
		return Ok(Value::big(BigInt::from(item)));
	}
	number
		.as_f64()
		.map(Value::Double)
		.ok_or_else(|| CliError::shape(pointer, format!("number {number} is not representable")))
}

fn tagged(object: &JsonMap<String, Json>, pointer: &str) -> Result<Option<Value>> {
	let mut entries = object.iter();
	let (Some((key, body)), None) = (entries.next(), entries.next()) else {
		return Ok(None);
	};
	let pointer = child(pointer, key);

	let value = match key.as_str() {
		BYTES_KEY => {
			let text = body.as_str().ok_or_else(|| CliError::shape(&pointer, "expected a hex string"))?;
			let raw = hex::decode(text).map_err(|err| CliError::shape(&pointer, err.to_string()))?;
			Value::Bytes(raw)
		}
		TUPLE_KEY => {
			let items = body.as_array().ok_or_else(|| CliError::shape(&pointer, "expected an array"))?;
			Value::Tuple(convert_items(items, &pointer)?)
		}
		BIGINT_KEY => {
			let text = body.as_str().ok_or_else(|| CliError::shape(&pointer, "expected a decimal string"))?;
			let item = BigInt::from_str(text).map_err(|err| CliError::shape(&pointer, err.to_string()))?;
			Value::big(item)
		}
		MAP_KEY => {
			let pairs = body.as_array().ok_or_else(|| CliError::shape(&pointer, "expected an array of pairs"))?;
			let mut entries = Vec::with_capacity(pairs.len());
			for (idx, pair) in pairs.iter().enumerate() {
				let pair_pointer = child(&pointer, &idx.to_string());
				let [key, item] = pair.as_array().map(Vec::as_slice).unwrap_or_default() else {
					return Err(CliError::shape(&pair_pointer, "expected a [key, value] pair"));
				};
				entries.push((convert(key, &child(&pair_pointer, "0"))?, convert(item, &child(&pair_pointer, "1"))?));
			}
			Value::map_from(entries)
		}
		OPAQUE_KEY => return Err(CliError::shape(&pointer, "opaque values cannot be encoded from json")),
		_ => return Ok(None),
	};
	Ok(Some(value))
}

fn child(pointer: &str, key: &str) -> String {
	format!("{pointer}/{}", key.replace('~', "~0").replace('/', "~1"))
}

/// Render a value tree as JSON.
pub fn from_value(value: &Value) -> Json {
	match value {
		Value::Null => Json::Null,
		Value::Int32(item) => Json::from(*item),
		Value::Int64(item) => Json::from(*item),
		Value::BigInt(item) => match value.as_i64() {
			Some(word) => Json::from(word),
			None => tag(BIGINT_KEY, Json::String(item.to_string())),
		},
		Value::Double(item) => Number::from_f64(*item).map_or(Json::Null, Json::Number),
		Value::Bytes(raw) => tag(BYTES_KEY, Json::String(hex::encode(raw))),
		Value::Text(text) => Json::String(text.clone()),
		Value::List(items) => Json::Array(items.iter().map(from_value).collect()),
		Value::Tuple(items) => tag(TUPLE_KEY, Json::Array(items.iter().map(from_value).collect())),
		Value::Map(map) => {
			// a lone `$`-prefixed text key would read back as a tagged shape
			let plain = map.keys().all(|key| key.as_text().is_some())
				&& !(map.len() == 1 && map.keys().any(|key| key.as_text().is_some_and(|text| text.starts_with('$'))));
			if plain {
				let object = map
					.iter()
					.filter_map(|(key, item)| Some((key.as_text()?.to_owned(), from_value(item))))
					.collect();
				return Json::Object(object);
			}

			let mut pairs: Vec<(String, Json)> = map
				.iter()
				.map(|(key, item)| {
					let key = from_value(key);
					(key.to_string(), Json::Array(vec![key, from_value(item)]))
				})
				.collect();
			pairs.sort_by(|left, right| left.0.cmp(&right.0));
			tag(MAP_KEY, Json::Array(pairs.into_iter().map(|(_, pair)| pair).collect()))
		}
		Value::Opaque(object) => tag(OPAQUE_KEY, Json::String(object.descriptor().to_owned())),
	}
}

fn tag(key: &str, body: Json) -> Json {
	let mut object = JsonMap::new();
	object.insert(key.to_owned(), body);
	Json::Object(object)
}

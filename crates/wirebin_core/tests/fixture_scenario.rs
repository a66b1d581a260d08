#![allow(missing_docs)]

use wirebin::wire::{DecodeOptions, EncodeOptions, Hooks, Progress, Value, decode, encode, encode_with};
use wirebin_testkit::{SampleCodec, fixture_path, sample_tree, scenario_map};

#[test]
fn scenario_fixture_decodes_to_expected_map() {
	let bytes = std::fs::read(fixture_path("scenario_map.wbin")).expect("read fixture");
	let value = decode(&bytes, &DecodeOptions::default()).expect("decode");

	assert_eq!(value, scenario_map());
	assert_eq!(value.get("a"), Some(&Value::int(1)));
	assert_eq!(value.get("b").and_then(Value::as_seq).map(<[Value]>::len), Some(2));
}

#[test]
fn scenario_map_encodes_to_fixture_length() {
	let fixture = std::fs::read(fixture_path("scenario_map.wbin")).expect("read fixture");
	let bytes = encode(&scenario_map(), &EncodeOptions::default()).expect("encode");

	assert_eq!(bytes.len(), 44);
	assert_eq!(bytes.len(), fixture.len());
	assert_eq!(&bytes[..6], &fixture[..6], "map header");
	assert_eq!(decode(&bytes, &DecodeOptions::default()).expect("decode"), scenario_map());
}

#[test]
fn sample_tree_round_trips_with_codec_hooks() {
	let codec = SampleCodec;
	let value = sample_tree();
	let bytes = encode_with(&value, &EncodeOptions::default(), &mut Hooks::new().with_fallback(&codec)).expect("encode");
	assert_eq!(decode(&bytes, &DecodeOptions::default()).expect("decode"), value);
}

#[test]
fn default_stride_fires_once_per_32k() {
	let value = Value::List(vec![Value::Null; 20_000]);
	let mut offsets = Vec::new();
	let bytes = {
		let mut hooks = Hooks::new().with_progress(Progress::new(|offset| {
			offsets.push(offset);
			Ok(())
		}));
		encode_with(&value, &EncodeOptions::default(), &mut hooks).expect("encode")
	};

	assert_eq!(bytes.len(), 40_006);
	assert_eq!(offsets, vec![32_768]);
}

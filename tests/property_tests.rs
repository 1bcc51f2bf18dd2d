//! Property-based tests for levelcodec
//!
//! These tests use randomized inputs to verify the round-trip guarantees of
//! every codec and that decoders reject arbitrary data without panicking.

use levelcodec::level::{encode_level, GoalTable, GoalTemplate};
use levelcodec::map::{FieldSpec, Layer, MapObject, ObjectType};
use levelcodec::tables::CHARACTER_CODES;
use levelcodec::{
    bytes_to_map, compress_pixels, decode_levels, decode_palettes, decode_text,
    decompress_pixels, encode_levels, encode_text, load_level_from_data, map_to_bytes,
    GameSchema, Goal, Level, LevelMap, ObjectTypeTable, WireType, WireValue,
};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn object_table() -> ObjectTypeTable {
    ObjectTypeTable::new(vec![
        ObjectType::new(
            "block",
            vec![
                FieldSpec::new(WireType::Uint16, "x"),
                FieldSpec::new(WireType::Uint16, "y"),
                FieldSpec::new(WireType::Uint8, "width"),
            ],
        ),
        ObjectType::new(
            "enemy",
            vec![
                FieldSpec::new(WireType::Uint16, "x"),
                FieldSpec::new(WireType::Uint16, "y"),
                FieldSpec::new(WireType::Int8, "direction"),
                FieldSpec::new(WireType::Float32, "speed"),
            ],
        ),
        ObjectType::new("checkpoint", vec![]),
    ])
    .unwrap()
}

fn schema() -> GameSchema {
    GameSchema {
        objects: object_table(),
        goals: GoalTable::new(vec![
            GoalTemplate::new("exit", vec![]),
            GoalTemplate::new(
                "timed exit",
                vec![
                    FieldSpec::new(WireType::Uint16, "time"),
                    FieldSpec::new(WireType::Uint8, "coins"),
                ],
            ),
        ])
        .unwrap(),
    }
}

fn text_strategy(max_len: usize) -> impl Strategy<Value = String> {
    let alphabet: Vec<char> = CHARACTER_CODES.iter().map(|(symbol, _)| *symbol).collect();
    prop::collection::vec(prop::sample::select(alphabet), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn object_strategy() -> impl Strategy<Value = MapObject> {
    prop_oneof![
        (any::<u16>(), any::<u16>(), any::<u8>()).prop_map(|(x, y, width)| {
            MapObject::new(
                0,
                BTreeMap::from([
                    ("x".to_string(), WireValue::U16(x)),
                    ("y".to_string(), WireValue::U16(y)),
                    ("width".to_string(), WireValue::U8(width)),
                ]),
            )
        }),
        (any::<u16>(), any::<u16>(), any::<i8>(), -4000i32..4000).prop_map(
            |(x, y, direction, speed)| {
                MapObject::new(
                    1,
                    BTreeMap::from([
                        ("x".to_string(), WireValue::U16(x)),
                        ("y".to_string(), WireValue::U16(y)),
                        ("direction".to_string(), WireValue::I8(direction)),
                        ("speed".to_string(), WireValue::F32(speed as f32 / 8.0)),
                    ]),
                )
            }
        ),
        Just(MapObject::new(2, BTreeMap::new())),
    ]
}

fn map_strategy() -> impl Strategy<Value = LevelMap> {
    let layer = (
        -64i32..64,
        prop::collection::vec(object_strategy(), 0..12),
    )
        .prop_map(|(scroll, objects)| Layer::with_objects(scroll as f32 / 4.0, objects));
    (
        any::<u16>(),
        any::<u16>(),
        prop::collection::vec(layer, 0..5),
    )
        .prop_map(|(width, height, layers)| LevelMap::with_layers(width, height, layers))
}

fn level_strategy() -> impl Strategy<Value = Level> {
    let goal = prop_oneof![
        Just(Goal::new(0)),
        (any::<u16>(), any::<u8>()).prop_map(|(time, coins)| {
            Goal::new(1)
                .with_option("time", &time.to_string())
                .with_option("coins", &coins.to_string())
        }),
    ];
    (
        text_strategy(16),
        goal,
        prop::collection::vec(map_strategy(), 0..3),
    )
        .prop_map(|(name, goal, maps)| {
            Level::from_maps(&name, goal, &maps, &object_table()).unwrap()
        })
}

proptest! {
    #[test]
    fn test_text_round_trip(text in text_strategy(64)) {
        let bytes = encode_text(&text)?;
        let decoded = decode_text(&bytes)?;
        prop_assert_eq!(decoded.text, text.to_uppercase());
        prop_assert_eq!(decoded.bytes_used, bytes.len());
        prop_assert!(decoded.remaining.is_empty());
    }
}

proptest! {
    #[test]
    fn test_text_leaves_trailing_bytes(
        text in text_strategy(32),
        trailing in prop::collection::vec(any::<u8>(), 0..16)
    ) {
        let encoded = encode_text(&text)?;
        let mut data = encoded.clone();
        data.extend(&trailing);

        let decoded = decode_text(&data)?;
        prop_assert_eq!(decoded.bytes_used, encoded.len());
        prop_assert_eq!(decoded.remaining, &trailing[..]);
    }
}

proptest! {
    #[test]
    fn test_pixel_round_trip(
        pixels in (0usize..64).prop_flat_map(|groups| prop::collection::vec(0u8..8, groups * 8))
    ) {
        let bytes = compress_pixels(&pixels)?;
        prop_assert_eq!(bytes.len(), pixels.len() * 3 / 8);
        prop_assert_eq!(decompress_pixels(&bytes)?, pixels);
    }
}

proptest! {
    #[test]
    fn test_map_round_trip(map in map_strategy()) {
        let table = object_table();
        let bytes = map_to_bytes(&map, &table)?;
        prop_assert_eq!(bytes_to_map(&bytes, &table)?, map);
    }
}

proptest! {
    #[test]
    fn test_level_list_round_trip(levels in prop::collection::vec(level_strategy(), 0..6)) {
        let schema = schema();
        let bytes = encode_levels(&levels, &schema)?;
        prop_assert_eq!(decode_levels(&bytes, &schema)?, levels);
    }
}

proptest! {
    #[test]
    fn test_level_encoding_is_idempotent(level in level_strategy()) {
        let schema = schema();
        let first = encode_level(&level, &schema)?;
        let (decoded, rest) = load_level_from_data(&first, &schema)?;
        prop_assert!(rest.is_empty());
        prop_assert_eq!(encode_level(&decoded, &schema)?, first);
    }
}

fn option_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<u16>().prop_map(|value| value.to_string()),
        any::<i32>().prop_map(|value| value.to_string()),
        "[0-9]{1,4}",
        "[ +]?[0-9a-z]{0,3}",
    ]
}

proptest! {
    #[test]
    fn test_goal_options_round_trip_or_fail(
        id in 0u8..2,
        options in prop::collection::btree_map(
            prop::sample::select(vec!["time", "coins", "lives"]).prop_map(String::from),
            option_value_strategy(),
            0..4,
        )
    ) {
        // Arbitrary options either encode losslessly or are rejected
        let schema = schema();
        let level = Level::new("Goal", Goal::with_options(id, options), vec![])?;
        if let Ok(bytes) = encode_level(&level, &schema) {
            let (decoded, rest) = load_level_from_data(&bytes, &schema)?;
            prop_assert!(rest.is_empty());
            prop_assert_eq!(decoded, level);
        }
    }
}

proptest! {
    #[test]
    fn test_decoding_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        // Arbitrary data may be rejected, but only with an error
        let schema = schema();
        let _ = decode_text(&data);
        let _ = decompress_pixels(&data);
        let _ = bytes_to_map(&data, &schema.objects);
        let _ = decode_levels(&data, &schema);
        let _ = decode_palettes(&data);
    }
}

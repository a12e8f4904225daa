mod common;

use common::BitWriter;
use en1545::{
    datetime::Timestamp,
    errors::ReadError,
    field::Field,
    names::*,
    parsed::{Parsed, Value},
    schema::Schema,
};
use time::{Month, UtcOffset, macros::offset};

fn contract_list() -> Schema {
    let entry = Field::bitmap([
        Field::int(CONTRACTS_PROVIDER, 8),
        Field::int(CONTRACTS_TARIFF, 16),
        Field::int(CONTRACTS_POINTER, 5),
    ]);

    Schema::compile(Field::repeat(4, entry)).unwrap()
}

#[test]
fn contract_list_skips_absent_fields() {
    let data = BitWriter::new()
        // Entry 0: everything present.
        .push(0b111, 3)
        .push(1, 8)
        .push(0x1234, 16)
        .push(3, 5)
        // Entry 1: tariff only.
        .push(0b010, 3)
        .push(0x4321, 16)
        // Entry 2: empty.
        .push(0b000, 3)
        // Entry 3: provider and pointer.
        .push(0b101, 3)
        .push(2, 8)
        .push(7, 5)
        .finish();

    let parsed = contract_list().decode(&data).unwrap();

    assert_eq!(parsed.len(), 6);
    assert_eq!(parsed.get_int_at(CONTRACTS_PROVIDER, &[0]), Some(1));
    assert_eq!(parsed.get_int_at(CONTRACTS_TARIFF, &[0]), Some(0x1234));
    assert_eq!(parsed.get_int_at(CONTRACTS_POINTER, &[0]), Some(3));
    assert_eq!(parsed.get_int("/1/ContractsTariff"), Some(0x4321));
    assert!(!parsed.contains_at(CONTRACTS_PROVIDER, &[1]));
    assert!(!parsed.contains_at(CONTRACTS_TARIFF, &[2]));
    assert_eq!(parsed.get_int_at(CONTRACTS_PROVIDER, &[3]), Some(2));
    assert_eq!(parsed.get_int_at(CONTRACTS_POINTER, &[3]), Some(7));
    assert_eq!(parsed.get_int_or_zero_at(CONTRACTS_TARIFF, &[3]), 0);
}

#[test]
fn contract_list_too_short_fails() {
    let data = BitWriter::new().push(0b111, 3).push(1, 8).finish();

    let err = contract_list().decode(&data).unwrap_err();
    assert!(matches!(err, ReadError::OutOfBounds { bit_pos: 11, len: 16, .. }));
}

#[test]
fn event_with_local_date_and_time() {
    let schema = Schema::compile(Field::container([
        Field::date(EVENT),
        Field::time_local(EVENT),
        Field::int(EVENT_ROUTE_NUMBER, 16),
    ]))
    .unwrap();
    let data = BitWriter::new()
        .push(100, 14)
        .push(600, 11)
        .push(42, 16)
        .finish();

    let parsed = schema.decode(&data).unwrap();
    assert_eq!(parsed.get_int(EVENT_ROUTE_NUMBER), Some(42));
    assert!(parsed.timestamp_has_time(EVENT));

    let Some(Timestamp::Full(when)) = parsed.get_timestamp(EVENT, &offset!(+2)) else {
        panic!("expected a full timestamp");
    };
    assert_eq!(when.year(), 1997);
    assert_eq!(when.month(), Month::April);
    assert_eq!(when.day(), 11);
    assert_eq!(when.hour(), 10);
    assert_eq!(when.offset(), offset!(+2));
    assert_eq!(when.to_offset(UtcOffset::UTC).hour(), 8);
}

#[test]
fn packed_date_and_time() {
    let schema = Schema::compile(Field::container([
        Field::date_packed(EVENT_FIRST_STAMP),
        Field::time_packed11_local(EVENT_FIRST_STAMP),
    ]))
    .unwrap();
    let data = BitWriter::new()
        .push((19 << 9) | (3 << 5) | 14, 14)
        .push((13 << 6) | 45, 11)
        .finish();

    let parsed = schema.decode(&data).unwrap();
    assert_eq!(
        parsed.time_string(EVENT_FIRST_STAMP, &offset!(+1)).as_deref(),
        Some("2019-03-14 13:45")
    );
}

#[test]
fn holder_record_with_bcd_birth_date() {
    let schema = Schema::compile(Field::container([
        Field::date_bcd(HOLDER_BIRTH),
        Field::alpha_string("HolderName", 25),
        Field::hex(ENV_CARD_SERIAL, 36),
    ]))
    .unwrap();
    let data = BitWriter::new()
        .push(0x1985_0612, 32)
        // "ANNA "
        .push(1, 5)
        .push(14, 5)
        .push(14, 5)
        .push(1, 5)
        .push(0, 5)
        .push(0x1_2345_6789, 36)
        .finish();

    let parsed = schema.decode(&data).unwrap();

    let birth = parsed.get_timestamp(HOLDER_BIRTH, &UtcOffset::UTC).unwrap();
    assert!(!birth.has_time());
    assert_eq!(birth.to_string(), "1985-06-12");
    assert_eq!(parsed.string("HolderName"), Ok("ANNA"));
    assert_eq!(parsed.hex(ENV_CARD_SERIAL).unwrap().to_string(), "123456789");
}

#[test]
fn append_merges_records() {
    let environment = Field::container([
        Field::int(ENV_NETWORK_ID, 24),
        Field::int(ENV_VERSION_NUMBER, 6),
    ]);
    let event = Field::container([Field::date(EVENT), Field::int(EVENT_SERVICE_PROVIDER, 8)]);

    let env_data = BitWriter::new().push(0x250_502, 24).push(3, 6).finish();
    let event_data = BitWriter::new().push(9000, 14).push(2, 8).finish();

    let mut parsed = Parsed::new();
    parsed
        .append(&env_data, &environment)
        .unwrap()
        .append(&event_data, &event)
        .unwrap();

    assert_eq!(parsed.get_int(ENV_NETWORK_ID), Some(0x250_502));
    assert_eq!(parsed.get_int(EVENT_SERVICE_PROVIDER), Some(2));
    assert_eq!(
        parsed.get_timestamp(EVENT, &UtcOffset::UTC),
        Some(Timestamp::Day(time::macros::date!(2021-08-23)))
    );
    assert_eq!(parsed.len(), 4);
}

#[test]
fn failed_append_keeps_previous_entries() {
    let mut parsed = Parsed::new();
    parsed.append(&[0xAB], &Field::int("A", 8)).unwrap();
    let before = parsed.clone();

    let tree = Field::container([Field::int("B", 4), Field::int("C", 12)]);
    assert!(parsed.append(&[0xFF], &tree).is_err());
    assert_eq!(parsed, before);

    // The result stays usable after a failure.
    parsed.append(&[0xFF, 0xFF], &tree).unwrap();
    assert_eq!(parsed.get_int("C"), Some(0xFFF));
}

#[test]
fn lookups_report_missing_and_mismatched() {
    let mut parsed = Parsed::new();
    parsed.insert(CONTRACT_TARIFF, Value::U64(0));
    parsed.insert("Label", Value::Str("X".to_string()));

    assert_eq!(parsed.get_int_or_zero(CONTRACT_TARIFF), 0);
    assert_eq!(parsed.get_int_or_zero(CONTRACT_PROVIDER), 0);
    assert_eq!(parsed.int(CONTRACT_TARIFF), Ok(0));
    assert!(parsed.int(CONTRACT_PROVIDER).is_err());
    assert!(parsed.int("Label").is_err());
    assert_eq!(parsed.get_int("Label"), None);
}

#[test]
fn dump_lists_entries() {
    let schema = Schema::compile(Field::container([
        Field::int(CONTRACT_PROVIDER, 8),
        Field::string("Label", 16),
    ]))
    .unwrap();
    let parsed = schema.decode(b"\x1fOK").unwrap();

    assert_eq!(parsed.to_string(), "[ContractProvider = 0x1f, Label = \"OK\", ]");
    assert_eq!(
        parsed.info(&["Label"]),
        vec![("ContractProvider".to_string(), "0x1f".to_string())]
    );
}

#[test]
fn fully_present_tree_consumes_its_full_width() {
    let tree = Field::container([
        Field::int(EVENT_CODE, 8),
        Field::bitmap([
            Field::container([
                Field::int(EVENT_LOCATION_ID, 16),
                Field::int(EVENT_DEVICE, 16),
                Field::int(EVENT_JOURNEY_RUN, 4),
            ]),
            Field::repeat(2, Field::hex(EVENT_UNKNOWN_A, 6)),
        ]),
    ]);
    let width = tree.full_width_bits();
    assert_eq!(width, 8 + 2 + 36 + 12);

    let mut writer = BitWriter::new();
    writer.push(0xAA, 8).push(0b11, 2).push(u64::MAX, 48);
    assert_eq!(writer.bit_len(), width);

    let mut parsed = Parsed::new();
    let consumed = parsed
        .append_with(&writer.finish(), &tree, Default::default())
        .unwrap();

    assert_eq!(consumed, width);
    assert_eq!(parsed.len(), tree.full_leaf_count());
}

#[test]
fn skipped_container_consumes_only_its_presence_bit() {
    let tree = Field::container([
        Field::bitmap([
            Field::container([
                Field::int(EVENT_LOCATION_ID, 16),
                Field::int(EVENT_DEVICE, 16),
                Field::int(EVENT_JOURNEY_RUN, 4),
            ]),
            Field::int(EVENT_RESULT, 4),
        ]),
        Field::int(EVENT_CODE, 8),
    ]);
    let data = BitWriter::new().push(0b01, 2).push(5, 4).push(0x3C, 8).finish();

    let mut parsed = Parsed::new();
    let consumed = parsed.append_with(&data, &tree, Default::default()).unwrap();

    assert_eq!(consumed, 14);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed.get_int(EVENT_RESULT), Some(5));
    assert_eq!(parsed.get_int(EVENT_CODE), Some(0x3C));
    for name in [EVENT_LOCATION_ID, EVENT_DEVICE, EVENT_JOURNEY_RUN] {
        // Absent and zero read the same through the lenient accessor.
        assert_eq!(parsed.get_int(name), None);
        assert_eq!(parsed.get_int_or_zero(name), 0);
    }
}

#[test]
fn oversized_packed_time_gives_no_timestamp() {
    let schema = Schema::compile(Field::container([
        Field::date(EVENT),
        Field::semantic(EVENT, en1545::field::IntKind::TimePacked16, 63),
    ]))
    .unwrap();
    let data = BitWriter::new().push(1, 14).push(u64::MAX, 63).finish();

    let parsed = schema.decode(&data).unwrap();
    assert_eq!(parsed.get_int("EventTimePacked16"), Some(i64::MAX));
    assert_eq!(parsed.get_timestamp(EVENT, &UtcOffset::UTC), None);
}

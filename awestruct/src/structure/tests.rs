use super::*;
use crate::cursor::ReadCursor;
use crate::resolve::Param;
use crate::types::{TypeExt, array, buffer, cond, int8, skip, string, uint8};

fn registry() -> Registry {
    Registry::new()
}

#[test]
fn test_primitive_fields() {
    let reg = registry();
    let s = Struct::from_fields(&reg, [("int8", "int8"), ("int16", "int16"), ("int32", "int32")])
        .unwrap();

    let record = s
        .decode(&[0xFF, 0x39, 0x05, 0x00, 0xCA, 0x9A, 0x3B])
        .unwrap();
    assert_eq!(record.get("int8"), Some(&Value::Int(-1)));
    assert_eq!(record.get("int16"), Some(&Value::Int(1337)));
    assert_eq!(record.get("int32"), Some(&Value::Int(1_000_000_000)));
    assert_eq!(record.keys().collect::<Vec<_>>(), ["int8", "int16", "int32"]);
}

#[test]
fn test_duplicate_field_rejected() {
    let reg = registry();
    let err = reg
        .define()
        .field("a", "int8")
        .unwrap()
        .field("a", "uint8")
        .unwrap_err();
    assert_eq!(err, StructError::DuplicateField("a".to_string()));
}

#[test]
fn test_unknown_type_name_fails_at_construction() {
    let reg = registry();
    let err = reg.define().field("a", "int24").unwrap_err();
    assert_eq!(err, StructError::NoSuchType("int24".to_string()));
}

#[test]
fn test_extend_existing_struct() {
    let reg = registry();
    let head = reg.define().field("a", "uint8").unwrap().build();
    let full = head
        .clone()
        .extend(&reg)
        .field("b", "uint8")
        .unwrap()
        .build();

    assert_eq!(head.len(), 1);
    assert_eq!(full.field_names().collect::<Vec<_>>(), ["a", "b"]);
    assert!(full.field_type("b").is_some());
}

#[test]
fn test_decode_from_leaves_cursor_after_record() {
    let reg = registry();
    let s = reg.define().field("a", "uint16be").unwrap().build();

    let buf = [0x00, 0x01, 0x00, 0x02];
    let mut cursor = ReadCursor::new(&buf);
    let first = s.decode_from(&mut cursor).unwrap();
    let second = s.decode_from(&mut cursor).unwrap();

    assert_eq!(first.get("a"), Some(&Value::Int(1)));
    assert_eq!(second.get("a"), Some(&Value::Int(2)));
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn test_absent_values_not_stored() {
    let reg = registry();
    let s = reg
        .define()
        .field("flag", "uint8")
        .unwrap()
        .field("pad", skip(2))
        .unwrap()
        .field("extra", cond("flag", int8()))
        .unwrap()
        .build();

    let record = s.decode(&[0, 0xAA, 0xBB]).unwrap();
    assert_eq!(record.len(), 1);
    assert!(!record.contains_key("pad"));
    assert!(!record.contains_key("extra"));

    assert_eq!(s.encode(&record).unwrap(), [0, 0, 0]);
}

#[test]
fn test_nested_struct_reads_parent() {
    let reg = registry();
    let inner = reg
        .define()
        .field("name", string("../size"))
        .unwrap()
        .build();
    let outer = reg
        .define()
        .field("size", "uint8")
        .unwrap()
        .field("inner", inner)
        .unwrap()
        .build();

    let bytes = [3, b'a', b'b', b'c'];
    let record = outer.decode(&bytes).unwrap();
    let nested = record.get("inner").unwrap().as_record().unwrap();
    assert_eq!(nested.get("name"), Some(&Value::from("abc")));

    // The same ancestor path resolves while encoding.
    assert_eq!(outer.encoded_size(&record).unwrap(), 4);
    assert_eq!(outer.encode(&record).unwrap(), bytes);
}

#[test]
fn test_parent_of_top_level_struct() {
    let reg = registry();
    let s = reg
        .define()
        .field("data", buffer("../len"))
        .unwrap()
        .build();
    assert_eq!(s.decode(&[1, 2]).unwrap_err(), StructError::NoParent);
}

#[test]
fn test_array_of_structs_sees_enclosing_record() {
    let reg = registry();
    let entry = reg
        .define()
        .field("tag", buffer("../width"))
        .unwrap()
        .build()
        .into_ref();
    let table = reg
        .define()
        .field("width", "uint8")
        .unwrap()
        .field("count", "uint8")
        .unwrap()
        .field("entries", array("count", entry))
        .unwrap()
        .build();

    let bytes = [2, 2, 0xA, 0xB, 0xC, 0xD];
    let record = table.decode(&bytes).unwrap();
    let entries = record.get("entries").unwrap().as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[1].as_record().unwrap().get("tag"),
        Some(&Value::Bytes(vec![0xC, 0xD]))
    );
    assert_eq!(table.encode(&record).unwrap(), bytes);
}

#[test]
fn test_computed_length() {
    let reg = registry();
    let s = reg
        .define()
        .field("len", "uint8")
        .unwrap()
        .field("len2", "uint8")
        .unwrap()
        .field(
            "rest",
            buffer(Param::computed(|s| Ok(Value::Int(s.int("len")? - s.int("len2")?)))),
        )
        .unwrap()
        .build();

    let record = s.decode(&[5, 3, 1, 2, 9]).unwrap();
    assert_eq!(record.get("rest"), Some(&Value::Bytes(vec![1, 2])));
}

#[test]
fn test_negative_computed_length() {
    let reg = registry();
    let s = reg
        .define()
        .field("len", "uint8")
        .unwrap()
        .field("data", buffer(Param::computed(|s| Ok(Value::Int(s.int("len")? - 10)))))
        .unwrap()
        .build();

    assert!(matches!(
        s.decode(&[1, 0]),
        Err(StructError::InvalidLength(_))
    ));
}

#[test]
fn test_truncated_input() {
    let reg = registry();
    let s = reg
        .define()
        .field("len", "uint8")
        .unwrap()
        .field("data", buffer("len"))
        .unwrap()
        .build();
    assert!(matches!(
        s.decode(&[4, 1, 2]),
        Err(StructError::OutOfBounds { needed: 4, .. })
    ));
}

#[test]
fn test_missing_field_on_encode() {
    let reg = registry();
    let s = reg.define().field("a", "uint8").unwrap().build();
    assert_eq!(
        s.encode(&Record::new()),
        Err(StructError::TypeMismatch {
            expected: "int",
            found: "absent"
        })
    );
}

#[test]
fn test_custom_size_lie_is_caught() {
    let liar = crate::types::Custom::new(
        |cursor, _| Ok(Value::Int(i64::from(cursor.take(1)?[0]))),
        |_, _, _| Ok(()),
        |_, _| Ok(1),
    )
    .into_ref();
    let reg = registry();
    let s = reg.define().field("x", liar).unwrap().build();

    assert_eq!(
        s.encode(&Record::new().with("x", 1)),
        Err(StructError::SizeMismatch {
            expected: 1,
            actual: 0
        })
    );
}

#[test]
fn test_struct_used_as_type() {
    let reg = registry();
    let pair = reg
        .define()
        .field("a", "uint8")
        .unwrap()
        .field("b", uint8().transform(|v| Ok(Value::Int(v.as_i64()? * 2))))
        .unwrap()
        .build()
        .into_ref();

    let value = pair.decode_value(&[1, 2]).unwrap();
    assert_eq!(
        value,
        Value::Record(Record::new().with("a", 1).with("b", 4))
    );
    assert!(pair.encode_value(&Value::Int(1)).is_err());
}

#[test]
fn test_chained_conditions_over_untaken_field() {
    let reg = registry();
    let s = reg
        .define()
        .field("flag", "int8")
        .unwrap()
        .field("a", cond("flag", int8()))
        .unwrap()
        .field("b", cond("a", int8()))
        .unwrap()
        .field("next", "int8")
        .unwrap()
        .build();

    let record = s.decode(&[0, 9]).unwrap();
    assert_eq!(record, Record::new().with("flag", 0).with("next", 9));
    assert_eq!(s.encode(&record).unwrap(), [0, 9]);

    let taken = s.decode(&[1, 2, 3, 4]).unwrap();
    assert_eq!(taken.get("b"), Some(&Value::Int(3)));
    assert_eq!(taken.get("next"), Some(&Value::Int(4)));
}

#[test]
fn test_with_field_appends_resolved_type() {
    let s = Struct::new()
        .with_field("a", uint8())
        .unwrap()
        .with_field("b", int8())
        .unwrap();
    assert_eq!(
        s.decode(&[1, 0xFF]).unwrap(),
        Record::new().with("a", 1).with("b", -1)
    );
    assert_eq!(
        s.with_field("a", uint8()).unwrap_err(),
        StructError::DuplicateField("a".to_string())
    );
}

#[test]
fn test_computed_length_from_ancestor() {
    let reg = registry();
    let inner = reg
        .define()
        .field("used", "uint8")
        .unwrap()
        .field(
            "rest",
            buffer(Param::computed(|s| {
                Ok(Value::Int(s.lookup("../size")?.as_i64()? - s.int("used")?))
            })),
        )
        .unwrap()
        .build();
    let outer = reg
        .define()
        .field("size", "uint8")
        .unwrap()
        .field("inner", inner)
        .unwrap()
        .build();

    let bytes = [4, 1, 0xA, 0xB, 0xC];
    let record = outer.decode(&bytes).unwrap();
    let nested = record.get("inner").unwrap().as_record().unwrap();
    assert_eq!(nested.get("rest"), Some(&Value::Bytes(vec![0xA, 0xB, 0xC])));
    assert_eq!(outer.encode(&record).unwrap(), bytes);
}

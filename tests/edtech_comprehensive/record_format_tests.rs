//! Persisted record format and polymorphic decoding

use edtech_ledger::{
    Course, EdTechEntity, Entity, ErrorKind, LedgerKey, Limits, Namespace, RecordEnvelope, Store,
    User,
};
use serde_json::{json, Value};

use crate::test_utils::*;

#[test]
fn stored_user_record_layout() {
    let cc = chaincode();
    create_user(&cc, "1234", "Aakash");

    let key = "\u{0}org.upgrad-network.edtech.participants.userlist\u{0}1234\u{0}";
    let bytes = cc.store().get(key).unwrap().expect("record stored under composite key");
    let record: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(record["class"], "org.upgrad-network.edtech.participants.user");
    assert_eq!(record["schema"], 1);
    assert_eq!(record["key"], json!(["1234"]));

    let data = record["data"].as_object().unwrap();
    let fields: Vec<&str> = data.keys().map(String::as_str).collect();
    assert_eq!(
        fields,
        vec![
            "badges",
            "courses",
            "createdAt",
            "currentState",
            "email",
            "fname",
            "gyan",
            "lname",
            "owner",
            "scholarships",
            "updatedAt",
            "userId",
        ]
    );
}

#[test]
fn response_equals_stored_bytes() {
    let cc = chaincode();
    let response = cc
        .submit(tx("client-a"), "createCourse", &["c1", "T", "D", "t1", "x"])
        .unwrap();

    let stored = cc
        .store()
        .get(&Course::make_key(["c1"]).unwrap().encode())
        .unwrap()
        .unwrap();
    assert_eq!(response, stored);
}

#[test]
fn top_level_keys_are_sorted() {
    let cc = chaincode();
    let bytes = cc
        .submit(tx("client-a"), "createUser", &["u1", "A", "B", "a@b.c"])
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();

    let positions: Vec<usize> = ["\"class\"", "\"data\"", "\"key\"", "\"schema\""]
        .iter()
        .map(|k| text.find(k).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn decoders_dispatch_on_class() {
    let cc = chaincode();
    let user = create_user(&cc, "u1", "A");
    let course = create_course(&cc, "c1");

    let limits = Limits::default();
    assert_eq!(
        EdTechEntity::from_bytes(&user.to_bytes(&limits).unwrap()).unwrap(),
        EdTechEntity::User(user)
    );
    assert_eq!(
        EdTechEntity::from_bytes(&course.to_bytes(&limits).unwrap()).unwrap(),
        EdTechEntity::Course(course)
    );
}

#[test]
fn malformed_records_are_serialization_errors() {
    let cases: [&[u8]; 5] = [
        b"",
        b"{}",
        br#"{"class":"org.upgrad-network.edtech.assets.course","key":["c1"],"schema":1}"#,
        br#"{"class":"org.upgrad-network.edtech.assets.lesson","data":{},"key":["l1"],"schema":1}"#,
        br#"["not","an","object"]"#,
    ];
    for bytes in cases {
        assert_eq!(
            EdTechEntity::from_bytes(bytes).unwrap_err().kind(),
            ErrorKind::Serialization,
            "{}",
            String::from_utf8_lossy(bytes)
        );
    }
}

#[test]
fn envelope_reports_class_before_decoding() {
    let cc = chaincode();
    let bytes = cc
        .submit(tx("client-a"), "createUser", &["u1", "A", "B", "a@b.c"])
        .unwrap();

    let envelope = RecordEnvelope::parse(&bytes).unwrap();
    assert_eq!(envelope.class(), User::CLASS_ID);
    assert_eq!(envelope.key(), ["u1".to_string()]);
    assert!(envelope.into_entity::<Course>().is_err());
}

#[test]
fn key_decode_roundtrip() {
    let key = User::make_key(["u1"]).unwrap();
    let decoded = LedgerKey::decode(&key.encode()).unwrap();
    assert_eq!(decoded, key);
    assert_eq!(
        decoded.namespace(),
        &Namespace::new("org.upgrad-network.edtech.participants.userlist").unwrap()
    );
}

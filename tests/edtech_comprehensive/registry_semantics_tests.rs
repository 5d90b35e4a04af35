//! Registry invariants: no silent overwrite, no silent creation, key scoping

use edtech_ledger::{
    Course, Entity, EntityList, Error, ErrorKind, Limits, MemoryStore, NewCourse, NewUser, Store,
    User,
};
use proptest::prelude::*;

use crate::test_utils::*;

fn user(id: &str, fname: &str) -> User {
    User::create_instance(
        NewUser {
            user_id: id.to_string(),
            fname: fname.to_string(),
            lname: "L".to_string(),
            email: "e@x.y".to_string(),
        },
        "client-a",
        base_time(),
    )
    .unwrap()
}

fn course(id: &str) -> Course {
    Course::create_instance(
        NewCourse {
            course_id: id.to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            teacher_id: "t1".to_string(),
            topics: "x".to_string(),
        },
        "client-a",
        base_time(),
    )
    .unwrap()
}

#[test]
fn get_absent_is_not_found() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();

    let err = users.get(["nobody"]).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("participants.userlist:nobody"));
}

#[test]
fn failed_add_leaves_value_bytes_unchanged() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();
    users.add(&user("1", "First")).unwrap();
    let key = User::make_key(["1"]).unwrap().encode();
    let before = store.get_versioned(&key).unwrap();

    assert!(users.add(&user("1", "Second")).is_err());

    let after = store.get_versioned(&key).unwrap();
    assert_eq!(before.value(), after.value());
    assert_eq!(before.version(), after.version());
}

#[test]
fn same_id_in_different_classes_does_not_collide() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();
    let courses: EntityList<Course, _> = EntityList::new(&store).unwrap();

    users.add(&user("1234", "A")).unwrap();
    courses.add(&course("1234")).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(users.get(["1234"]).unwrap().fname, "A");
    assert_eq!(courses.get(["1234"]).unwrap().course_id(), "1234");
}

#[test]
fn user_record_under_course_key_is_rejected() {
    let store = MemoryStore::new();
    let courses: EntityList<Course, _> = EntityList::new(&store).unwrap();
    let bytes = user("c1", "A").to_bytes(&Limits::default()).unwrap();
    store
        .put(&Course::make_key(["c1"]).unwrap().encode(), bytes)
        .unwrap();

    let err = courses.get(["c1"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[test]
fn reserved_characters_rejected_in_key_parts() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();

    for bad in ["a\u{0}b", "a\u{10FFFF}b", ""] {
        let err = users.add(&user_unchecked(bad)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey, "{bad:?}");
    }
    assert!(store.is_empty());
}

// `create_instance` refuses an empty id, so build the record via the codec
fn user_unchecked(id: &str) -> User {
    let mut value: serde_json::Value = serde_json::from_slice(
        &user("placeholder", "A").to_bytes(&Limits::default()).unwrap(),
    )
    .unwrap();
    value["data"]["userId"] = serde_json::Value::String(id.to_string());
    serde_json::from_value(value["data"].clone()).unwrap()
}

#[test]
fn limits_error_kinds() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> =
        EntityList::with_limits(&store, Limits::with_small_limits()).unwrap();

    let mut big = user("u1", "A");
    big.email = "e".repeat(3000);
    assert!(matches!(users.add(&big), Err(Error::LimitExceeded(_))));

    let long_id = "i".repeat(40);
    assert_eq!(
        users.get([long_id.as_str()]).unwrap_err().kind(),
        ErrorKind::InvalidKey
    );
}

proptest! {
    #[test]
    fn prop_add_then_get_roundtrips(id in "[a-z0-9]{1,12}", fname in "\\PC{0,20}") {
        let store = MemoryStore::new();
        let users: EntityList<User, _> = EntityList::new(&store).unwrap();
        let u = user(&id, &fname);

        users.add(&u).unwrap();
        prop_assert_eq!(users.get([id.as_str()]).unwrap(), u);
    }

    #[test]
    fn prop_second_add_always_rejected(id in "[a-z0-9]{1,12}") {
        let store = MemoryStore::new();
        let users: EntityList<User, _> = EntityList::new(&store).unwrap();
        users.add(&user(&id, "first")).unwrap();

        let err = users.add(&user(&id, "second")).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        prop_assert_eq!(users.get([id.as_str()]).unwrap().fname, "first");
    }

    #[test]
    fn prop_update_never_creates(id in "[a-z0-9]{1,12}") {
        let store = MemoryStore::new();
        let courses: EntityList<Course, _> = EntityList::new(&store).unwrap();

        let err = courses.update(&course(&id)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::NotFoundOnUpdate);
        prop_assert!(store.is_empty());
    }
}

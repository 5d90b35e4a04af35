//! Reference scenarios
//!
//! A: add then get
//! B: duplicate add keeps the first record
//! C: update of a never-added course
//! D: mutate the courses map and update

use std::collections::BTreeMap;

use edtech_ledger::{
    Course, EdTechContext, EdTechContract, Enrollment, EntityList, ErrorKind, MemoryStore,
    NewCourse, NewUser, User,
};

use crate::test_utils::*;

fn aakash(id: &str) -> User {
    User::create_instance(
        NewUser {
            user_id: id.to_string(),
            fname: "Aakash".to_string(),
            lname: "Bansal".to_string(),
            email: "connect@aakashbansal.com".to_string(),
        },
        "client-a",
        base_time(),
    )
    .unwrap()
}

#[test]
fn scenario_a_add_then_get() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();

    users.add(&aakash("1234")).unwrap();

    let loaded = users.get(["1234"]).unwrap();
    assert_eq!(loaded.fname, "Aakash");
    assert_eq!(loaded, aakash("1234"));
}

#[test]
fn scenario_b_duplicate_add() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();
    users.add(&aakash("1234")).unwrap();

    let mut impostor = aakash("1234");
    impostor.fname = "Someone".to_string();
    let err = users.add(&impostor).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    assert_eq!(users.get(["1234"]).unwrap().fname, "Aakash");
}

#[test]
fn scenario_c_update_missing_course() {
    let store = MemoryStore::new();
    let courses: EntityList<Course, _> = EntityList::new(&store).unwrap();
    let course = Course::create_instance(
        NewCourse {
            course_id: "c1".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            teacher_id: "t1".to_string(),
            topics: String::new(),
        },
        "client-a",
        base_time(),
    )
    .unwrap();

    let err = courses.update(&course).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFoundOnUpdate);
    assert!(store.is_empty());
}

#[test]
fn scenario_d_update_courses_map() {
    let store = MemoryStore::new();
    let users: EntityList<User, _> = EntityList::new(&store).unwrap();
    users.add(&aakash("u1")).unwrap();

    let mut user = users.get(["u1"]).unwrap();
    user.courses.insert(
        "c1".to_string(),
        Enrollment::new(base_time(), "client-b"),
    );
    users.update(&user).unwrap();

    let loaded = users.get(["u1"]).unwrap();
    let expected: BTreeMap<_, _> =
        BTreeMap::from([("c1".to_string(), Enrollment::new(base_time(), "client-b"))]);
    assert_eq!(loaded.courses, expected);

    // Everything else is unchanged
    let original = aakash("u1");
    assert_eq!(loaded.fname, original.fname);
    assert_eq!(loaded.lname, original.lname);
    assert_eq!(loaded.email, original.email);
    assert_eq!(loaded.owner, original.owner);
    assert_eq!(loaded.gyan, original.gyan);
    assert_eq!(loaded.created_at, original.created_at);
}

#[test]
fn scenarios_through_the_contract() {
    let store = MemoryStore::new();
    let contract = EdTechContract::default();
    let ctx = EdTechContext::new(&store, tx("client-a"), contract.limits()).unwrap();

    contract
        .invoke(&ctx, "createUser", &["1234", "Aakash", "Bansal", "a@b.com"])
        .unwrap();
    assert_eq!(ctx.users.get(["1234"]).unwrap().fname, "Aakash");

    let err = contract
        .invoke(&ctx, "createUser", &["1234", "Other", "X", "x@y.z"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    assert_eq!(ctx.users.get(["1234"]).unwrap().fname, "Aakash");
}

#[test]
fn full_flow_on_chaincode() {
    let cc = chaincode();
    create_user(&cc, "u1", "Aakash");
    let course = create_course(&cc, "c1");
    assert_eq!(course.topics, vec!["fabric", "rust"]);

    cc.submit(tx("client-b"), "joinCourse", &["u1", "c1"]).unwrap();

    let user = stored_user(&cc, "u1").unwrap();
    assert_eq!(user.courses["c1"].joined_from, "client-b");
    assert_eq!(user.owner, "client-a");
    assert!(user.updated_at > user.created_at);
    assert_eq!(stored_course(&cc, "c1").unwrap(), course);
}

#[test]
fn rejoin_replaces_enrollment() {
    let cc = chaincode();
    create_user(&cc, "u1", "Aakash");
    create_course(&cc, "c1");

    cc.submit(tx("client-a"), "joinCourse", &["u1", "c1"]).unwrap();
    let first = stored_user(&cc, "u1").unwrap().courses["c1"].join_date;
    cc.submit(tx("client-b"), "joinCourse", &["u1", "c1"]).unwrap();

    let user = stored_user(&cc, "u1").unwrap();
    assert_eq!(user.courses.len(), 1);
    assert_eq!(user.courses["c1"].joined_from, "client-b");
    assert!(user.courses["c1"].join_date > first);
}

//! Invocation atomicity and concurrent submits

use std::sync::{Arc, Barrier};
use std::thread;

use edtech_ledger::{
    Chaincode, ContractConfig, EdTechContext, EdTechContract, ErrorKind, MemoryStore,
    TransactionManager, TransactionStatus,
};

use crate::test_utils::*;

#[test]
fn scenario_e_concurrent_create_has_one_winner() {
    init_tracing();
    let cc = Arc::new(Chaincode::new(ContractConfig::default()));

    // Both invocations read the key as absent before either commits
    let manager = TransactionManager::new(Arc::clone(cc.store()));
    let contract = EdTechContract::default();
    let t1 = manager.begin();
    let t2 = manager.begin();
    let ctx1 = EdTechContext::new(&t1, tx("client-a"), contract.limits()).unwrap();
    let ctx2 = EdTechContext::new(&t2, tx("client-b"), contract.limits()).unwrap();

    contract
        .invoke(&ctx1, "createUser", &["u1", "First", "L", "a@b.c"])
        .unwrap();
    contract
        .invoke(&ctx2, "createUser", &["u1", "Second", "L", "a@b.c"])
        .unwrap();

    manager.commit(&t1).unwrap();
    let err = manager.commit(&t2).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(matches!(t2.status(), TransactionStatus::Aborted { .. }));
    assert_eq!(stored_user(&cc, "u1").unwrap().fname, "First");
    assert_eq!(cc.store().len(), 1);
}

#[test]
fn scenario_e_threaded() {
    let cc = Arc::new(chaincode());
    let n = 6;
    let barrier = Arc::new(Barrier::new(n));

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let cc = Arc::clone(&cc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let fname = format!("N{i}");
                barrier.wait();
                cc.submit(tx("client-a"), "createUser", &["u1", fname.as_str(), "L", "a@b.c"])
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().filter_map(|r| r.as_ref().err()).all(|e| matches!(
        e.kind(),
        ErrorKind::Conflict | ErrorKind::DuplicateKey
    )));
    assert_eq!(cc.store().len(), 1);
}

#[test]
fn scenario_f_failure_after_put_commits_nothing() {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let manager = TransactionManager::new(Arc::clone(&store));
    let contract = EdTechContract::default();

    let txn = manager.begin();
    let ctx = EdTechContext::new(&txn, tx("client-a"), contract.limits()).unwrap();
    contract
        .invoke(&ctx, "createCourse", &["c1", "T", "D", "t1", "x"])
        .unwrap();
    let err = contract
        .invoke(&ctx, "createCourse", &["c1", "T", "D", "t1", "x"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateKey);

    manager.abort(&txn, err.to_string()).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.current_version(), 0);
}

#[test]
fn failed_submit_leaves_world_state_untouched() {
    let cc = chaincode();
    create_user(&cc, "u1", "A");
    let before = cc.store().snapshot();

    let err = cc
        .submit(tx("client-a"), "joinCourse", &["u1", "missing"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let after = cc.store().snapshot();
    assert_eq!(before.len(), after.len());
    for (key, value) in &before {
        assert_eq!(value.value(), after[key].value());
        assert_eq!(value.version(), after[key].version());
    }
}

#[test]
fn evaluate_never_changes_world_state() {
    let cc = chaincode();
    create_user(&cc, "u1", "A");
    create_course(&cc, "c1");
    let version = cc.store().current_version();

    let response = cc
        .evaluate(tx("client-a"), "joinCourse", &["u1", "c1"])
        .unwrap();
    assert!(!response.is_empty());

    assert_eq!(cc.store().current_version(), version);
    assert!(stored_user(&cc, "u1").unwrap().courses.is_empty());

    let none: [&str; 0] = [];
    cc.evaluate(tx("client-a"), "instantiate", &none).unwrap();
    assert_eq!(cc.store().current_version(), version);
}

#[test]
fn committed_invocation_writes_share_one_version() {
    let cc = chaincode();
    create_user(&cc, "u1", "A");
    create_course(&cc, "c1");
    let before = cc.store().current_version();

    cc.submit(tx("client-a"), "joinCourse", &["u1", "c1"]).unwrap();
    assert_eq!(cc.store().current_version(), before + 1);
}

//! Protocol-level scenarios.

use nestkv_core::Database;
use nestkv_testkit::{run_script, transcript};

#[test]
fn end_to_end_scenario() {
    let out = run_script(
        "SET a 10
GET a
SET b 10
NUMEQUALTO 10
UNSET a
NUMEQUALTO 10
BEGIN
SET b 30
NUMEQUALTO 10
ROLLBACK
GET b
END",
    );
    assert_eq!(out, vec!["10", "2", "1", "0", "10"]);
}

#[test]
fn nesting_law() {
    let out = run_script("BEGIN\nSET k v1\nBEGIN\nSET k v2\nROLLBACK\nGET k\n");
    assert_eq!(out, vec!["v1"]);
}

#[test]
fn commit_flattening() {
    let out = run_script("BEGIN\nSET a 1\nBEGIN\nSET b 2\nCOMMIT\nGET a\nGET b\nROLLBACK\n");
    assert_eq!(out, vec!["1", "2", "NO TRANSACTION"]);
}

#[test]
fn no_transaction_guard() {
    let db = Database::new();
    let out = transcript(&db, "SET a 1\nROLLBACK\nCOMMIT\nGET a\n");
    assert_eq!(out, vec!["NO TRANSACTION", "NO TRANSACTION", "1"]);
    assert_eq!(db.depth(), 0);
}

#[test]
fn unset_inside_nested_transactions() {
    let out = run_script(
        "SET a 10
BEGIN
NUMEQUALTO 10
BEGIN
UNSET a
NUMEQUALTO 10
ROLLBACK
NUMEQUALTO 10
COMMIT
GET a",
    );
    assert_eq!(out, vec!["1", "0", "1", "10"]);
}

#[test]
fn rollback_of_fresh_key_forgets_it() {
    let out = run_script("BEGIN\nSET a 10\nSET a 20\nNUMEQUALTO 10\nROLLBACK\nGET a\nNUMEQUALTO 20\n");
    assert_eq!(out, vec!["0", "NULL", "0"]);
}

#[test]
fn malformed_lines_change_nothing() {
    let db = Database::new();
    let out = transcript(&db, "SET a\nSET a 1 2\nUNSET\nBEGIN x\nGET a\nNUMEQUALTO\n");
    assert_eq!(out, vec!["NULL"]);
    assert_eq!(db.depth(), 0);
    assert_eq!(db.stats().writes, 0);
}

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn audit(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("audit").unwrap();
    cmd.env("AUDIT_DB", db);
    cmd
}

fn seed_demo(db: &Path) {
    audit(db).arg("demo").assert().success();
}

#[test]
fn test_demo_then_reconcile_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .arg("reconcile")
        .assert()
        .success()
        .stdout(predicate::str::contains("reconcile."));
}

#[test]
fn test_import_and_browse_journal() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    let csv = dir.path().join("journal.csv");
    std::fs::write(
        &csv,
        "date,voucher_id,account_code,account_name,aux_dimension,memo,debit,credit,quantity,foreign_amount\n\
         2024-03-01,JE-001,6001,Rent Expense,,march rent,500,0,,\n\
         2024-03-01,JE-001,1002,Bank,,march rent,0,500,,\n",
    )
    .unwrap();

    audit(&db)
        .args(["import", "journal"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows into journal"));

    audit(&db)
        .args(["browse", "journal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("march rent"))
        .stdout(predicate::str::contains("2 of 2 journal rows loaded"));
}

#[test]
fn test_filter_chain_and_undo() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .args(["filter", "journal", "memo=rent", "account_name=bank"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memo=rent: 2 rows"))
        .stdout(predicate::str::contains("account_name=bank: 1 rows"));

    audit(&db)
        .args(["filter", "journal", "memo=rent", "account_name=bank", "--undo", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("back to 2 rows"));
}

#[test]
fn test_filter_unknown_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .args(["filter", "journal", "amount=5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column 'amount'"));
}

#[test]
fn test_undo_past_first_filter_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .args(["filter", "journal", "memo=rent", "--undo", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No earlier filter"));
}

#[test]
fn test_voucher_balances() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .args(["voucher", "JE-003", "--date", "2024-03-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTAL"))
        .stdout(predicate::str::contains("Service Revenue【Client A】"))
        .stdout(predicate::str::contains("Voucher balances."));
}

#[test]
fn test_voucher_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .args(["voucher", "JE-999", "--date", "2024-03-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No journal rows for voucher"));
}

#[test]
fn test_drill_down_empty_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    audit(&db)
        .args(["drill", "9999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal rows for account 9999."));

    audit(&db)
        .args(["drill", "1002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 journal rows for account 1002"));
}

#[test]
fn test_export_round_trips_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    let out = dir.path().join("journal-export.csv");
    audit(&db)
        .args(["export", "journal"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 8 rows"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("date,voucher_id,account_code"));
    assert!(content.contains("March office rent"));
}

#[test]
fn test_reconcile_reports_discrepancy() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("audit.db");
    seed_demo(&db);

    // Re-import a balance table that is off by 1 for one account.
    let csv = dir.path().join("balance.csv");
    std::fs::write(
        &csv,
        "account_code,account_name,opening_debit,opening_credit,period_debit,period_credit,closing_debit,closing_credit\n\
         6601,Rent Expense,0,0,8001,0,8001,0\n",
    )
    .unwrap();
    audit(&db)
        .args(["import", "balance"])
        .arg(&csv)
        .assert()
        .success();

    audit(&db)
        .arg("reconcile")
        .assert()
        .success()
        .stdout(predicate::str::contains("do not reconcile"))
        .stdout(predicate::str::contains("6601"))
        .stdout(predicate::str::contains("1.00"));
}

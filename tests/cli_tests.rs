use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::Path;

mod common;
use common::{hrc, init_db, setup_test_db, temp_out};

fn punch(db_path: &str, cmd: &str, employee: &str, at: &str) {
    hrc()
        .args(["--db", db_path, cmd, "--employee", employee, "--at", at])
        .assert()
        .success();
}

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    hrc()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(fs::metadata(&db_path).is_ok());
}

#[test]
fn test_clock_in_and_out_prints_total() {
    let db_path = setup_test_db("cli_in_out");
    init_db(&db_path);

    hrc()
        .args(["--db", &db_path, "in", "--employee", "1", "--at", "2025-09-01 09:00"])
        .assert()
        .success()
        .stdout(contains("clocked in"));

    hrc()
        .args(["--db", &db_path, "status", "--all"])
        .assert()
        .success()
        .stdout(contains("Open sessions"));

    hrc()
        .args(["--db", &db_path, "out", "--employee", "1", "--at", "2025-09-01 17:30"])
        .assert()
        .success()
        .stdout(contains("8.50h").and(contains("8h 30m")));

    hrc()
        .args(["--db", &db_path, "status", "--employee", "1"])
        .assert()
        .success()
        .stdout(contains("No open sessions"));
}

#[test]
fn test_double_clock_in_fails() {
    let db_path = setup_test_db("cli_double_in");
    init_db(&db_path);

    punch(&db_path, "in", "2", "2025-09-01 09:00");

    hrc()
        .args(["--db", &db_path, "in", "--employee", "2", "--at", "2025-09-01 09:05"])
        .assert()
        .failure()
        .stderr(contains("already clocked in"));
}

#[test]
fn test_clock_out_without_session_fails() {
    let db_path = setup_test_db("cli_out_no_session");
    init_db(&db_path);

    hrc()
        .args(["--db", &db_path, "out", "--employee", "9"])
        .assert()
        .failure()
        .stderr(contains("not clocked in"));
}

#[test]
fn test_week_and_list_json() {
    let db_path = setup_test_db("cli_week");
    init_db(&db_path);

    punch(&db_path, "in", "1", "2025-09-01 09:00");
    punch(&db_path, "out", "1", "2025-09-01 17:00");
    punch(&db_path, "in", "1", "2025-09-03 09:00");
    punch(&db_path, "out", "1", "2025-09-03 16:30");

    hrc()
        .args(["--db", &db_path, "week", "--employee", "1", "--start", "2025-09-01", "--json"])
        .assert()
        .success()
        .stdout(contains("\"totalHours\": 15.5").and(contains("\"weekEnd\": \"2025-09-07\"")));

    hrc()
        .args(["--db", &db_path, "list", "--period", "2025-09", "--json"])
        .assert()
        .success()
        .stdout(contains("\"employeeId\": 1").and(contains("\"totalHours\": 7.5")));

    hrc()
        .args(["--db", &db_path, "list", "--period", "2025-09"])
        .assert()
        .success()
        .stdout(contains("15.50h"));
}

#[test]
fn test_list_today_empty() {
    let db_path = setup_test_db("cli_today_empty");
    init_db(&db_path);

    hrc()
        .args(["--db", &db_path, "list", "--today"])
        .assert()
        .success()
        .stdout(contains("No time entries found"));
}

#[test]
fn test_edit_and_delete_entry() {
    let db_path = setup_test_db("cli_edit_del");
    init_db(&db_path);

    punch(&db_path, "in", "1", "2025-09-02 09:00");
    punch(&db_path, "out", "1", "2025-09-02 17:00");

    hrc()
        .args(["--db", &db_path, "edit", "1", "--out", "13:00"])
        .assert()
        .success()
        .stdout(contains("4.00h"));

    hrc()
        .args(["--db", &db_path, "edit", "1", "--in", "14:00"])
        .assert()
        .failure();

    hrc()
        .args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    hrc()
        .args(["--db", &db_path, "del", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_leave_workflow() {
    let db_path = setup_test_db("cli_leave");
    init_db(&db_path);

    hrc()
        .args([
            "--db",
            &db_path,
            "leave",
            "request",
            "--employee",
            "Ada Lovelace",
            "--type",
            "vacation",
            "--from",
            "2099-07-01",
            "--to",
            "2099-07-05",
            "--reason",
            "Summer holiday with family",
        ])
        .assert()
        .success()
        .stdout(contains("5 day(s)"));

    hrc()
        .args(["--db", &db_path, "leave", "approve", "1", "--by", "Alice"])
        .assert()
        .success()
        .stdout(contains("approved by Alice"));

    hrc()
        .args(["--db", &db_path, "leave", "deny", "1"])
        .assert()
        .failure()
        .stderr(contains("already been approved"));

    hrc()
        .args(["--db", &db_path, "leave", "list"])
        .assert()
        .success()
        .stdout(contains("0 pending, 1 approved, 0 denied"));
}

#[test]
fn test_leave_request_validation() {
    let db_path = setup_test_db("cli_leave_invalid");
    init_db(&db_path);

    hrc()
        .args([
            "--db",
            &db_path,
            "leave",
            "request",
            "--employee",
            "Ada",
            "--from",
            "2099-07-05",
            "--to",
            "2099-07-01",
            "--reason",
            "short",
        ])
        .assert()
        .failure()
        .stderr(
            contains("Leave type is required")
                .and(contains("End date must be after start date"))
                .and(contains("at least 10 characters")),
        );
}

#[test]
fn test_export_csv_and_json() {
    let db_path = setup_test_db("cli_export");
    let csv_out = temp_out("cli_export", "csv");
    let json_out = temp_out("cli_export", "json");
    init_db(&db_path);

    punch(&db_path, "in", "1", "2025-09-01 09:00");
    punch(&db_path, "out", "1", "2025-09-01 17:30");

    hrc()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &csv_out, "--range", "2025-09"])
        .assert()
        .success();
    let csv = fs::read_to_string(&csv_out).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("8.5"));

    hrc()
        .args(["--db", &db_path, "export", "--format", "json", "--file", &json_out, "--force"])
        .assert()
        .success();
    let json = fs::read_to_string(&json_out).unwrap();
    assert!(json.contains("\"employeeId\": 1"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("cli_backup");
    let out = temp_out("cli_backup", "sqlite");
    init_db(&db_path);

    hrc()
        .args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success();

    let zipped = Path::new(&out).with_extension("zip");
    assert!(zipped.exists());
    assert!(!Path::new(&out).exists());
    fs::remove_file(zipped).ok();
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db(&db_path);

    punch(&db_path, "in", "1", "2025-09-01 09:00");
    punch(&db_path, "out", "1", "2025-09-01 10:00");

    hrc()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("init")
                .and(contains("clock_in"))
                .and(contains("clock_out"))
                .and(contains("migration_applied")),
        );
}

fn add_employee(db_path: &str, first: &str, last: &str, role: &str, department: &str, extra: &[&str]) {
    let email = format!("{}@example.com", first.to_lowercase());
    let mut args = vec![
        "--db",
        db_path,
        "employee",
        "add",
        "--first",
        first,
        "--last",
        last,
        "--email",
        email.as_str(),
        "--phone",
        "555-0100",
        "--role",
        role,
        "--department",
        department,
        "--hired",
        "2024-03-01",
    ];
    args.extend_from_slice(extra);
    hrc().args(&args).assert().success().stdout(contains("added"));
}

#[test]
fn test_employee_directory_and_stats() {
    let db_path = setup_test_db("cli_directory");
    init_db(&db_path);

    hrc()
        .args(["--db", &db_path, "dept", "add", "Engineering", "--description", "R&D"])
        .assert()
        .success()
        .stdout(contains("Department #1 created"));

    add_employee(&db_path, "Ada", "Lovelace", "Engineer", "Engineering", &[]);
    add_employee(&db_path, "Grace", "Hopper", "Admiral", "Navy", &["--status", "on-leave"]);

    hrc()
        .args(["--db", &db_path, "employee", "list", "--search", "engineer"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace").and(contains("Grace Hopper").not()));

    hrc()
        .args(["--db", &db_path, "employee", "list", "--status", "on-leave", "--json"])
        .assert()
        .success()
        .stdout(contains("\"firstName\": \"Grace\"").and(contains("\"status\": \"on-leave\"")));

    hrc()
        .args(["--db", &db_path, "dept", "list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"employeeCount\": 1"));

    hrc()
        .args(["--db", &db_path, "employee", "update", "2", "--status", "active"])
        .assert()
        .success();

    hrc()
        .args(["--db", &db_path, "employee", "show", "2"])
        .assert()
        .success()
        .stdout(contains("grace@example.com").and(contains("active")));

    punch(&db_path, "in", "1", "2025-09-01 09:00");

    hrc()
        .args(["--db", &db_path, "stats", "--json"])
        .assert()
        .success()
        .stdout(
            contains("\"employees\": 2")
                .and(contains("\"active\": 2"))
                .and(contains("\"departments\": 1"))
                .and(contains("\"openSessions\": 1")),
        );
}

#[test]
fn test_employee_add_reports_every_problem() {
    let db_path = setup_test_db("cli_employee_invalid");
    init_db(&db_path);

    hrc()
        .args([
            "--db", &db_path, "employee", "add", "--first", "Ada", "--email", "ada-at-example",
        ])
        .assert()
        .failure()
        .stderr(
            contains("Last name is required")
                .and(contains("Invalid email format"))
                .and(contains("Hire date is required")),
        );
}

#[test]
fn test_clock_in_checks_the_directory() {
    let db_path = setup_test_db("cli_directory_clock_in");
    init_db(&db_path);

    add_employee(&db_path, "Ada", "Lovelace", "Engineer", "Engineering", &[]);
    add_employee(&db_path, "Old", "Timer", "Clerk", "Archive", &["--status", "inactive"]);

    hrc()
        .args(["--db", &db_path, "in", "--employee", "1", "--at", "2025-09-01 09:00"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace (#1) clocked in"));

    hrc()
        .args(["--db", &db_path, "in", "--employee", "9", "--at", "2025-09-01 09:00"])
        .assert()
        .failure()
        .stderr(contains("Employee 9 not found"));

    hrc()
        .args(["--db", &db_path, "in", "--employee", "2", "--at", "2025-09-01 09:00"])
        .assert()
        .failure()
        .stderr(contains("Employee 2 is inactive"));
}

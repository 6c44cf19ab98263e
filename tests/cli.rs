#![forbid(unsafe_code)]
use assert_cmd::Command;
use chrono::{NaiveDate, Weekday};
use predicates::str::contains;
use roulement::{Employee, JsonStorage, OperatingHours, Roster, Storage, TimeWindow, Workspace};
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("roulement-cli").unwrap()
}

#[test]
fn init_then_print_hours() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workspace.json");
    let path = path.to_str().unwrap();

    cli().args(["--workspace", path, "init"]).assert().success();
    cli()
        .args(["--workspace", path, "init"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    cli()
        .args(["--workspace", path, "hours", "--year", "2025", "--month", "6"])
        .assert()
        .success()
        .stdout(contains("2025-06-01 Sun | 11:00-20:00"))
        .stdout(contains("2025-06-02 Mon | 18:00-23:00"))
        .stdout(contains("2025-06-07 Sat | 11:00-23:00"));
}

#[test]
fn generate_prints_shifts_and_summary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workspace.json");
    let mut hours = OperatingHours::new();
    hours.set_hours(Weekday::Mon, TimeWindow::hm(9, 0, 15, 0).unwrap());
    let workspace = Workspace {
        employees: Roster::new(vec![Employee::new("alice").with_limits(1000.0, 4.0, 8.0)]),
        hours,
    };
    JsonStorage::open(&path).unwrap().save(&workspace).unwrap();
    let path = path.to_str().unwrap();

    cli()
        .args(["--workspace", path, "generate", "--year", "2025", "--month", "6"])
        .assert()
        .success()
        .stdout(contains("2025-06-02 Mon | 09:00-15:00 | alice"))
        .stdout(contains("alice: 30.00 h"));

    cli()
        .args([
            "--workspace",
            path,
            "generate",
            "--year",
            "2025",
            "--month",
            "6",
            "--closed",
            "2025-06-02",
            "--open",
            "2025-06-07=10:00-12:00",
        ])
        .assert()
        .success()
        .stdout(contains("2025-06-07 Sat | 10:00-12:00 | alice"))
        .stdout(contains("alice: 26.00 h"));
}

#[test]
fn gaps_are_reported_without_failing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workspace.json");
    let mut hours = OperatingHours::new();
    hours.set_hours_for_date(
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        TimeWindow::hm(18, 0, 23, 0).unwrap(),
    );
    let workspace = Workspace {
        employees: Roster::new(vec![Employee::new("alice")
            .with_limits(160.0, 2.0, 8.0)
            .available_only(Weekday::Mon, TimeWindow::hm(18, 0, 21, 0).unwrap())]),
        hours,
    };
    JsonStorage::open(&path).unwrap().save(&workspace).unwrap();
    let path = path.to_str().unwrap();

    cli()
        .args(["--workspace", path, "generate", "--year", "2025", "--month", "6"])
        .assert()
        .success()
        .stdout(contains("2025-06-02 Mon | 18:00-20:00 | alice (min)"))
        .stderr(contains("2025-06-02: PartiallyFilled"));
}

#[test]
fn unstaffed_month_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workspace.json");
    let path = path.to_str().unwrap();

    cli().args(["--workspace", path, "init"]).assert().success();
    cli()
        .args(["--workspace", path, "generate", "--year", "2025", "--month", "6"])
        .assert()
        .code(2)
        .stderr(contains("Unstaffed"));
}

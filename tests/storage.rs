#![forbid(unsafe_code)]
use chrono::{NaiveDate, Weekday};
use roulement::{Employee, JsonStorage, OperatingHours, Roster, Storage, TimeWindow, Workspace};
use tempfile::tempdir;

fn sample_hours() -> OperatingHours {
    let mut hours = OperatingHours::new();
    hours.set_hours(Weekday::Mon, TimeWindow::hm(9, 0, 17, 0).unwrap());
    hours.set_closed_for_date(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
    hours.set_hours_for_date(
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
        TimeWindow::hm(10, 0, 14, 0).unwrap(),
    );
    hours
}

#[test]
fn save_and_load_workspace_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("workspace.json")).unwrap();
    let workspace = Workspace {
        employees: Roster::new(vec![
            Employee::new("alice")
                .prefer_weekday(Weekday::Sat)
                .unavailable_between(Weekday::Mon, TimeWindow::hm(12, 0, 14, 0).unwrap()),
            Employee::new("bob")
                .with_limits(80.0, 3.0, 6.0)
                .unavailable_on_date(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()),
        ]),
        hours: sample_hours(),
    };

    assert!(!storage.exists());
    storage.save(&workspace).unwrap();
    let loaded = storage.load().unwrap();
    assert_eq!(loaded, workspace);
}

#[test]
fn operating_hours_json_layout() {
    let json = serde_json::to_string_pretty(&sample_hours()).unwrap();
    insta::assert_snapshot!(json, @r###"
    {
      "weekly": {
        "0": {
          "start": "09:00:00",
          "end": "17:00:00"
        }
      },
      "overrides": {
        "2025-06-09": "closed",
        "2025-06-14": {
          "open": {
            "start": "10:00:00",
            "end": "14:00:00"
          }
        }
      }
    }
    "###);
}

#[test]
fn minimal_employee_record_uses_defaults() {
    let json = r#"{
        "employees": [
            { "name": "alice", "max_hours_per_month": 40, "min_hours_per_shift": 2, "max_hours_per_shift": 6 }
        ]
    }"#;
    let workspace: Workspace = serde_json::from_str(json).unwrap();
    let alice = workspace.employees.find("alice").unwrap();
    assert!(alice.weekly.iter().all(|rules| rules.is_empty()));
    assert!(alice.dated.is_empty());
    assert!(!workspace.hours.is_open(Weekday::Mon, None));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    let err = storage.load().unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

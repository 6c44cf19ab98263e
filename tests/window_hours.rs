#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use roulement::window::{as_hours, from_hours};
use roulement::{contains, overlaps, DateOverride, OperatingHours, SchedError, TimeWindow};

fn w(sh: u32, sm: u32, eh: u32, em: u32) -> TimeWindow {
    TimeWindow::hm(sh, sm, eh, em).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn duration_wraps_past_midnight() {
    assert_eq!(w(22, 0, 2, 0).duration(), Duration::hours(4));
    assert_eq!(w(9, 0, 15, 30).duration(), Duration::minutes(390));
    assert_eq!(w(9, 0, 9, 0).duration(), Duration::zero());
}

#[test]
fn overlap_is_half_open() {
    assert!(overlaps(&w(8, 0, 12, 0), &w(11, 0, 13, 0)));
    assert!(!overlaps(&w(8, 0, 12, 0), &w(12, 0, 14, 0)));
    assert!(!overlaps(&w(14, 0, 18, 0), &w(12, 0, 14, 0)));
}

#[test]
fn overlap_across_midnight() {
    assert!(overlaps(&w(22, 0, 3, 0), &w(23, 0, 1, 0)));
    // une plage du petit matin n'est pas décalée au lendemain
    assert!(!overlaps(&w(22, 0, 3, 0), &w(1, 0, 2, 0)));
}

#[test]
fn containment() {
    assert!(contains(&w(8, 0, 18, 0), &w(8, 0, 18, 0)));
    assert!(contains(&w(8, 0, 18, 0), &w(9, 0, 12, 0)));
    assert!(!contains(&w(8, 0, 18, 0), &w(7, 30, 12, 0)));
    assert!(contains(&w(20, 0, 4, 0), &w(22, 0, 2, 0)));
    assert!(!contains(&w(20, 0, 2, 0), &w(22, 0, 4, 0)));
}

#[test]
fn starting_at_wraps_clock() {
    let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
    let window = TimeWindow::starting_at(start, Duration::hours(3));
    assert_eq!(window, w(22, 0, 1, 0));
    assert_eq!(window.duration(), Duration::hours(3));
}

#[test]
fn parses_hh_mm_ranges() {
    assert_eq!("09:00-17:30".parse::<TimeWindow>().unwrap(), w(9, 0, 17, 30));
    assert_eq!("22:00 - 02:00".parse::<TimeWindow>().unwrap(), w(22, 0, 2, 0));
    assert!(matches!(
        "9h-17h".parse::<TimeWindow>(),
        Err(SchedError::InvalidTimeRange(_))
    ));
    assert!("10:00-10:00".parse::<TimeWindow>().is_err());
    assert_eq!(w(9, 0, 17, 30).to_string(), "09:00-17:30");
}

#[test]
fn hours_conversion() {
    assert_eq!(from_hours(4.5), Duration::minutes(270));
    assert!((as_hours(Duration::minutes(90)) - 1.5).abs() < f64::EPSILON);
}

#[test]
fn weekday_default_applies_without_override() {
    let mut hours = OperatingHours::new();
    let window = w(9, 0, 17, 0);
    hours.set_hours(Weekday::Mon, window);

    assert_eq!(hours.get_hours(Weekday::Mon, None), Some(window));
    assert_eq!(hours.get_hours(Weekday::Mon, Some(date(2025, 3, 3))), Some(window));
    assert_eq!(hours.get_hours(Weekday::Tue, None), None);
}

#[test]
fn closed_override_wins_over_open_weekday() {
    let mut hours = OperatingHours::new();
    hours.set_hours(Weekday::Mon, w(9, 0, 17, 0));
    let holiday = date(2025, 3, 3);
    hours.set_closed_for_date(holiday);

    assert!(!hours.is_open(Weekday::Mon, Some(holiday)));
    assert!(hours.is_open(Weekday::Mon, Some(date(2025, 3, 10))));
    assert!(hours.is_open(Weekday::Mon, None));
}

#[test]
fn open_override_on_closed_weekday() {
    let mut hours = OperatingHours::new();
    let sunday = date(2025, 3, 9);
    let window = w(12, 0, 16, 0);
    hours.set_hours_for_date(sunday, window);

    assert_eq!(hours.get_hours(Weekday::Sun, Some(sunday)), Some(window));
    assert!(hours.has_date_override(sunday));
    assert_eq!(hours.remove_date_override(sunday), Some(DateOverride::Open(window)));
    assert!(!hours.is_open(Weekday::Sun, Some(sunday)));
}

#[test]
fn default_week_matches_store_hours() {
    let hours = OperatingHours::with_default_week();
    for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
        assert_eq!(hours.weekday_hours(day), Some(w(18, 0, 23, 0)));
    }
    assert_eq!(hours.weekday_hours(Weekday::Sat), Some(w(11, 0, 23, 0)));
    assert_eq!(hours.weekday_hours(Weekday::Sun), Some(w(11, 0, 20, 0)));
}

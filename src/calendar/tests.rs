use super::*;
use chrono::FixedOffset;

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(year, month, day, hour, minute, second)
        .unwrap()
}

#[test]
fn test_days_in_year_leap_rule() {
    assert_eq!(days_in_year(2023), 365);
    assert_eq!(days_in_year(2025), 365);
    assert_eq!(days_in_year(2024), 366);
    assert_eq!(days_in_year(1900), 365);
    assert_eq!(days_in_year(2100), 365);
    assert_eq!(days_in_year(2000), 366);
    assert_eq!(days_in_year(2400), 366);
}

#[test]
fn test_day_of_year_boundaries() {
    assert_eq!(day_of_year(&at(2025, 1, 1, 0, 0, 0)), 1);
    assert_eq!(day_of_year(&at(2025, 1, 1, 23, 59, 59)), 1);
    assert_eq!(day_of_year(&at(2025, 2, 1, 12, 0, 0)), 32);
    assert_eq!(day_of_year(&at(2025, 12, 31, 23, 59, 59)), 365);
    assert_eq!(day_of_year(&at(2024, 12, 31, 0, 0, 0)), 366);
}

#[test]
fn test_day_of_year_after_leap_day() {
    assert_eq!(day_of_year(&at(2024, 2, 29, 8, 0, 0)), 60);
    assert_eq!(day_of_year(&at(2024, 3, 1, 8, 0, 0)), 61);
    assert_eq!(day_of_year(&at(2025, 3, 1, 8, 0, 0)), 60);
}

#[test]
fn test_day_of_year_matches_ordinal() {
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    while day.year() == 2024 {
        let now = at(2024, day.month(), day.day(), 0, 30, 0);
        assert_eq!(day_of_year(&now), day.ordinal(), "mismatch on {day}");
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_percent_of_day() {
    assert_eq!(percent_of_day(&at(2025, 6, 1, 0, 0, 0)), 0.0);
    assert_eq!(percent_of_day(&at(2025, 6, 1, 12, 0, 0)), 50.0);
    assert_eq!(percent_of_day(&at(2025, 6, 1, 6, 0, 0)), 25.0);

    let last_second = percent_of_day(&at(2025, 6, 1, 23, 59, 59));
    assert!((last_second - 99.9988).abs() < 0.0001, "got {last_second}");
    assert!(last_second < 100.0);
}

#[test]
fn test_percent_of_day_ignores_subseconds() {
    let whole = at(2025, 6, 1, 9, 15, 30);
    let fractional = whole + Duration::milliseconds(999);
    assert_eq!(percent_of_day(&whole), percent_of_day(&fractional));
}

#[test]
fn test_hours_passed_today() {
    assert_eq!(hours_passed_today(&at(2025, 6, 1, 0, 0, 0)), 0.0);
    assert_eq!(hours_passed_today(&at(2025, 6, 1, 13, 30, 0)), 13.5);

    let value = hours_passed_today(&at(2025, 6, 1, 13, 30, 36));
    assert!((value - 13.51).abs() < 1e-9);

    let end_of_day = hours_passed_today(&at(2025, 6, 1, 23, 59, 59));
    assert!(end_of_day < 24.0);
}

#[test]
fn test_fridays_remaining_full_years() {
    // 2025 starts on a Wednesday: Jan 3 .. Dec 26
    assert_eq!(fridays_remaining(&at(2025, 1, 1, 9, 0, 0)), 52);
    // 2021 starts on a Friday and has 53 of them
    assert_eq!(fridays_remaining(&at(2021, 1, 1, 0, 0, 0)), 53);
    // Leap year 2024 starts on a Monday: Jan 5 .. Dec 27
    assert_eq!(fridays_remaining(&at(2024, 1, 1, 0, 0, 0)), 52);
}

#[test]
fn test_fridays_remaining_counts_today_when_friday() {
    // 2025-12-26 is the last Friday of 2025
    assert_eq!(fridays_remaining(&at(2025, 12, 26, 0, 0, 0)), 1);
    assert_eq!(fridays_remaining(&at(2025, 12, 26, 23, 59, 59)), 1);
    assert_eq!(fridays_remaining(&at(2025, 12, 27, 0, 0, 0)), 0);
    assert_eq!(fridays_remaining(&at(2025, 12, 31, 23, 59, 59)), 0);
}

#[test]
fn test_fridays_remaining_matches_closed_form() {
    // Independent count: first Friday offset, then every seventh day
    let expected = |date: NaiveDate| -> u32 {
        let days_left = days_in_year(date.year()) - date.ordinal();
        let offset = (7 + Weekday::Fri.num_days_from_monday()
            - date.weekday().num_days_from_monday())
            % 7;
        if offset > days_left {
            0
        } else {
            (days_left - offset) / 7 + 1
        }
    };

    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    while day.year() == 2024 {
        let now = at(2024, day.month(), day.day(), 15, 0, 0);
        assert_eq!(fridays_remaining(&now), expected(day), "mismatch on {day}");
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn test_months_passed() {
    assert_eq!(months_passed(&at(2025, 1, 15, 0, 0, 0)), 1);
    assert_eq!(months_passed(&at(2025, 3, 15, 0, 0, 0)), 3);
    assert_eq!(months_passed(&at(2025, 12, 31, 23, 59, 59)), 12);
}

#[test]
fn test_percent_year_passed() {
    assert_eq!(percent_year_passed(&at(2025, 1, 1, 0, 0, 0)), 0.0);

    // 183 of 366 days
    let leap_half = percent_year_passed(&at(2024, 7, 2, 0, 0, 0));
    assert!((leap_half - 50.0).abs() < 1e-9, "got {leap_half}");

    // 181.5 of 365 days
    let common = percent_year_passed(&at(2025, 7, 1, 12, 0, 0));
    assert!((common - 181.5 / 365.0 * 100.0).abs() < 1e-9, "got {common}");

    let last_second = percent_year_passed(&at(2025, 12, 31, 23, 59, 59));
    assert!(last_second < 100.0);
    assert!(last_second > 99.99);
}

#[test]
fn test_time_until_next_midnight() {
    assert_eq!(
        time_until_next_midnight(&at(2025, 6, 1, 23, 59, 30)),
        std::time::Duration::from_secs(30)
    );
    assert_eq!(
        time_until_next_midnight(&at(2025, 6, 1, 0, 0, 0)),
        std::time::Duration::from_secs(86_400)
    );
    // Year boundary
    assert_eq!(
        time_until_next_midnight(&at(2025, 12, 31, 22, 0, 0)),
        std::time::Duration::from_secs(7200)
    );
}

#[test]
fn test_upcoming_days_crosses_year() {
    // 2025-12-30 is a Tuesday
    let days = upcoming_days(&at(2025, 12, 30, 10, 0, 0), 5);
    let labels: Vec<String> = days
        .iter()
        .map(|d| format!("{} {}", d.weekday, d.day_of_month))
        .collect();
    assert_eq!(labels, vec!["TUE 30", "WED 31", "THU 1", "FRI 2", "SAT 3"]);

    assert!(days[0].is_today);
    assert!(days.iter().skip(1).all(|d| !d.is_today));
    assert_eq!(days[2].date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
}

#[test]
fn test_upcoming_days_count() {
    let now = at(2025, 6, 1, 10, 0, 0);
    assert_eq!(upcoming_days(&now, 1).len(), 1);
    assert_eq!(upcoming_days(&now, 14).len(), 14);
}

#[test]
fn test_snapshot_capture() {
    // 2025-03-14 is a Friday
    let now = at(2025, 3, 14, 18, 0, 0);
    let snapshot = MetricsSnapshot::capture(&now);

    assert_eq!(snapshot.year, 2025);
    assert_eq!(snapshot.days_in_year, 365);
    assert_eq!(snapshot.day_of_year, 73);
    assert_eq!(snapshot.percent_of_day, 75.0);
    assert_eq!(snapshot.hours_passed_today, 18.0);
    assert_eq!(snapshot.months_passed, 3);
    assert_eq!(snapshot.fridays_remaining, fridays_remaining(&now));
    assert_eq!(snapshot.captured_at, "2025-03-14T18:00:00+02:00");

    assert_eq!(snapshot.value(MetricKind::DayOfYear), 73.0);
    assert_eq!(snapshot.value(MetricKind::PercentOfDay), 75.0);
    assert_eq!(snapshot.value(MetricKind::MonthsPassed), 3.0);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let snapshot = MetricsSnapshot::capture(&at(2025, 3, 14, 18, 0, 0));
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["day_of_year"], 73);
    assert_eq!(json["months_passed"], 3);
    assert_eq!(json["percent_of_day"], 75.0);
    assert!(json.get("percent_year_passed").is_some());
    assert!(json.get("fridays_remaining").is_some());
}

#[test]
fn test_metric_kind_indices_follow_all() {
    for (idx, kind) in MetricKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), idx);
    }
}

#[test]
fn test_metric_kind_format_value() {
    assert_eq!(MetricKind::DayOfYear.format_value(72.6), "73");
    assert_eq!(MetricKind::FridaysRemaining.format_value(41.4), "41");
    assert_eq!(MetricKind::MonthsPassed.format_value(2.5), "3");
    assert_eq!(MetricKind::HoursPassed.format_value(13.5123), "13.51");
    assert_eq!(MetricKind::PercentYearPassed.format_value(19.8), "19.80%");
    assert_eq!(MetricKind::PercentOfDay.format_value(0.0), "0.00%");
}

//! Calendar metrics derived from a wall-clock instant.
//!
//! Every function here is pure: the instant is passed in explicitly and
//! nothing is cached between calls. The dashboard recomputes all metrics
//! from scratch on every tick, which is also how clock jumps (NTP
//! corrections, suspend/resume, manual changes) are absorbed.
//!
//! The functions are generic over the chrono timezone so tests can pin a
//! fixed offset; the application always passes `DateTime<Local>`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Weekday};
use serde::Serialize;

use crate::common::constants::SECONDS_PER_DAY;

/// The six metrics shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    DayOfYear,
    PercentOfDay,
    HoursPassed,
    FridaysRemaining,
    MonthsPassed,
    PercentYearPassed,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::DayOfYear,
        MetricKind::PercentOfDay,
        MetricKind::HoursPassed,
        MetricKind::FridaysRemaining,
        MetricKind::MonthsPassed,
        MetricKind::PercentYearPassed,
    ];

    /// Position in [`MetricKind::ALL`], used to index per-metric arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::DayOfYear => "Day of year",
            MetricKind::PercentOfDay => "Day progress",
            MetricKind::HoursPassed => "Hours passed today",
            MetricKind::FridaysRemaining => "Fridays left this year",
            MetricKind::MonthsPassed => "Months passed",
            MetricKind::PercentYearPassed => "Year progress",
        }
    }

    /// Format a (possibly mid-animation) value the way the dashboard shows it.
    ///
    /// Integer metrics are rounded, fractional ones keep two decimals.
    pub fn format_value(self, value: f64) -> String {
        match self {
            MetricKind::DayOfYear | MetricKind::FridaysRemaining | MetricKind::MonthsPassed => {
                format!("{}", value.round() as i64)
            }
            MetricKind::HoursPassed => format!("{value:.2}"),
            MetricKind::PercentOfDay | MetricKind::PercentYearPassed => format!("{value:.2}%"),
        }
    }
}

/// Leap year rule of the Gregorian calendar.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// First instant of `date` in `tz`.
///
/// When a DST change skips local midnight the day starts at the first valid
/// local time after the gap.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start;
    }

    (1..=180)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Whole days elapsed since the "Jan 0" origin (Dec 31 00:00 of last year).
///
/// Jan 1 is day 1 and Dec 31 is day 365 (366 in leap years). Days are
/// counted on the calendar rather than as `elapsed_ms / 86_400_000`, so a
/// spring-forward DST change earlier in the year cannot pull the first hour
/// of a day back to the previous count.
pub fn day_of_year<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    let Some(origin) = NaiveDate::from_ymd_opt(now.year() - 1, 12, 31) else {
        return now.ordinal();
    };
    let days = now.date_naive().signed_duration_since(origin).num_days();
    days.clamp(1, i64::from(days_in_year(now.year()))) as u32
}

/// Fraction of the local day elapsed, in percent. Whole seconds only.
pub fn percent_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    let seconds = now.hour() * 3600 + now.minute() * 60 + now.second();
    f64::from(seconds) / SECONDS_PER_DAY * 100.0
}

/// Hours elapsed today as a fraction, in `[0, 24)`.
pub fn hours_passed_today<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    f64::from(now.hour()) + f64::from(now.minute()) / 60.0 + f64::from(now.second()) / 3600.0
}

/// Fridays from today (inclusive) through Dec 31 of the current year.
pub fn fridays_remaining<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    let today = now.date_naive();
    today
        .iter_days()
        .take_while(|day| day.year() == today.year())
        .filter(|day| day.weekday() == Weekday::Fri)
        .count() as u32
}

/// 1-based month number.
pub fn months_passed<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    now.month()
}

/// Fraction of the year elapsed, in percent.
///
/// Uses the real span between this and next Jan 1 so leap years and DST
/// shifts are accounted for.
pub fn percent_year_passed<Tz: TimeZone>(now: &DateTime<Tz>) -> f64 {
    let tz = now.timezone();
    let year = now.year();
    let (Some(jan1), Some(next_jan1)) = (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year + 1, 1, 1),
    ) else {
        return 0.0;
    };

    let start = start_of_day(&tz, jan1);
    let end = start_of_day(&tz, next_jan1);

    let elapsed = now.clone().signed_duration_since(start.clone()).num_milliseconds();
    let span = end.signed_duration_since(start).num_milliseconds();
    if span <= 0 {
        return 0.0;
    }
    elapsed as f64 / span as f64 * 100.0
}

/// Delay from `now` until the next local day boundary.
pub fn time_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> std::time::Duration {
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return std::time::Duration::ZERO;
    };
    let next_midnight = start_of_day(&now.timezone(), tomorrow);
    next_midnight
        .signed_duration_since(now.clone())
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

/// One cell of the weekday strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Upper-case three-letter weekday (`FRI`)
    pub weekday: String,
    pub day_of_month: u32,
    pub is_today: bool,
}

/// Today and the following `count - 1` days.
pub fn upcoming_days<Tz: TimeZone>(now: &DateTime<Tz>, count: u32) -> Vec<DayCell> {
    now.date_naive()
        .iter_days()
        .take(count as usize)
        .enumerate()
        .map(|(idx, date)| DayCell {
            date,
            weekday: date.weekday().to_string().to_uppercase(),
            day_of_month: date.day(),
            is_today: idx == 0,
        })
        .collect()
}

/// All metrics captured at a single instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub captured_at: String,
    pub year: i32,
    pub days_in_year: u32,
    pub day_of_year: u32,
    pub percent_of_day: f64,
    pub hours_passed_today: f64,
    pub fridays_remaining: u32,
    pub months_passed: u32,
    pub percent_year_passed: f64,
}

impl MetricsSnapshot {
    pub fn capture<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            captured_at: now.to_rfc3339(),
            year: now.year(),
            days_in_year: days_in_year(now.year()),
            day_of_year: day_of_year(now),
            percent_of_day: percent_of_day(now),
            hours_passed_today: hours_passed_today(now),
            fridays_remaining: fridays_remaining(now),
            months_passed: months_passed(now),
            percent_year_passed: percent_year_passed(now),
        }
    }

    /// Value of one metric as the animation target.
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::DayOfYear => f64::from(self.day_of_year),
            MetricKind::PercentOfDay => self.percent_of_day,
            MetricKind::HoursPassed => self.hours_passed_today,
            MetricKind::FridaysRemaining => f64::from(self.fridays_remaining),
            MetricKind::MonthsPassed => f64::from(self.months_passed),
            MetricKind::PercentYearPassed => self.percent_year_passed,
        }
    }
}

#[cfg(test)]
mod tests;

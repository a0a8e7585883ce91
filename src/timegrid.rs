//! Zeitraster-Arithmetik: Minuten des Tages, Dauer mit Mitternachtsübergang,
//! Einrasten auf das Viertelstundenraster, Wochen ab Montag.

use anyhow::{bail, Context};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

/// Rasterweite für interaktives Verschieben/Ziehen.
pub const GRID_MINUTES: i64 = 15;
/// Mindestdauer einer Zuteilung.
pub const MIN_DURATION_MINUTES: i64 = 30;
/// Minuten eines Kalendertags.
pub const DAY_MINUTES: i64 = 1440;

/// Minute des Tages in `[0, 1440)`.
pub fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

/// Parst `HH:MM` (24h) zu einer `NaiveTime`.
pub fn parse_clock(s: &str) -> anyhow::Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M").with_context(|| format!("invalid clock time: {s}"))
}

/// `HH:MM` → Minute des Tages.
pub fn to_minutes(s: &str) -> anyhow::Result<i64> {
    Ok(minute_of_day(parse_clock(s)?))
}

/// Minute des Tages → Uhrzeit (1440 fällt auf 00:00 zurück).
pub fn from_minutes(minutes: i64) -> anyhow::Result<NaiveTime> {
    if !(0..=DAY_MINUTES).contains(&minutes) {
        bail!("minute of day out of range: {minutes}");
    }
    let m = minutes.rem_euclid(DAY_MINUTES);
    NaiveTime::from_hms_opt(m as u32 / 60, m as u32 % 60, 0)
        .context("minute of day conversion failed")
}

/// Dauer in Minuten. `end <= start` bedeutet Übergang über Mitternacht;
/// das gilt für alle Schichtarten, nicht nur für Nachtschichten.
pub fn duration_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let s = minute_of_day(start);
    let e = minute_of_day(end);
    if e <= s {
        (DAY_MINUTES - s) + e
    } else {
        e - s
    }
}

/// Dauer in Stunden (siehe [`duration_minutes`]).
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    duration_minutes(start, end) as f64 / 60.0
}

/// Rundet auf das nächste Vielfache der Rasterweite (halbe rundet auf).
/// Auch für negative Deltas definiert.
pub fn snap_to_grid(minutes: i64, grid: i64) -> i64 {
    debug_assert!(grid > 0);
    (2 * minutes + grid).div_euclid(2 * grid) * grid
}

/// Montag der Woche, in der `date` liegt.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Geschlossenes Intervall Montag–Sonntag der Woche von `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = week_monday(date);
    (monday, monday + Duration::days(6))
}

/// Liegt `date` in derselben Montag–Sonntag-Woche wie `anchor`?
pub fn same_week(date: NaiveDate, anchor: NaiveDate) -> bool {
    week_monday(date) == week_monday(anchor)
}

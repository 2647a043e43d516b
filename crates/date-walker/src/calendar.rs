//! Pure calendar arithmetic used by the resolver.
//!
//! Every function here is side-effect free and works on naive (zone-less)
//! values; the resolver decides when to apply them on wall-clock time and
//! when on elapsed time. Any result whose year leaves
//! [`MIN_YEAR`]`..=`[`MAX_YEAR`] fails with [`ResolveError::UnsupportedYear`].
//!
//! # Month overflow
//!
//! Month and year spans clamp to the last valid day of the target month:
//! Jan 31 + 1 month is Feb 29 in a leap year and Feb 28 otherwise.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// Earliest year the engine resolves into.
pub const MIN_YEAR: i32 = 1900;
/// Latest year the engine resolves into.
pub const MAX_YEAR: i32 = 9999;

// ── Tokens ──────────────────────────────────────────────────────────────────

/// Which way a seek moves through the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[serde(alias = ">")]
    Forward,
    #[serde(alias = "<")]
    Backward,
}

impl Direction {
    /// `1` for forward, `-1` for backward.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// A calendar span that can be added to a date/time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl SpanUnit {
    /// Whether the span is measured in elapsed time rather than on the calendar.
    pub fn is_sub_day(self) -> bool {
        matches!(self, SpanUnit::Second | SpanUnit::Minute | SpanUnit::Hour)
    }
}

// ── Configurable week start ─────────────────────────────────────────────────

/// Which day begins a week for "this week"/"next week" computations.
///
/// Does **not** affect day-by-day weekday seeks like "next Monday".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStartDay {
    /// ISO 8601 standard (Monday = day 0 of the week).
    #[default]
    Monday,
    /// US/Canada convention (Sunday = day 0 of the week).
    Sunday,
}

/// How many days `weekday` is from the week-start day.
fn days_from_week_start(weekday: Weekday, week_start: WeekStartDay) -> i64 {
    match week_start {
        WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
        WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
    }
}

// ── Range checks ────────────────────────────────────────────────────────────

/// Fail with [`ResolveError::UnsupportedYear`] outside the supported range.
pub fn check_year(year: i32) -> Result<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ResolveError::UnsupportedYear(year.into()))
    }
}

pub fn check_date(date: NaiveDate) -> Result<NaiveDate> {
    check_year(date.year())?;
    Ok(date)
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    Ok(last_of_month(year, month)?.day())
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    check_year(year)?;
    if !(1..=12).contains(&month) {
        return Err(ResolveError::invalid("month", month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ResolveError::UnsupportedYear(year.into()))
}

fn last_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let first = first_of_month(year, month)?;
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(ResolveError::UnsupportedYear(year.into()))
}

/// Move `date` into `year`, clamping Feb 29 to Feb 28 when needed.
pub fn with_year(date: NaiveDate, year: i32) -> Result<NaiveDate> {
    let day = date.day().min(days_in_month(year, date.month())?);
    NaiveDate::from_ymd_opt(year, date.month(), day)
        .ok_or(ResolveError::invalid("day_of_month", day))
}

// ── add_span ────────────────────────────────────────────────────────────────

/// Add `amount` units (negative to subtract) using calendar semantics.
///
/// Sub-day units are plain duration arithmetic on the naive value; days and
/// weeks move the date keeping the time of day; months and years clamp the
/// day of month (see the module docs).
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedYear`] if the result leaves the
/// supported range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_walker::calendar::{add_span, SpanUnit};
///
/// let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let feb = add_span(jan31, 1, SpanUnit::Month).unwrap();
/// assert_eq!(feb.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn add_span(datetime: NaiveDateTime, amount: i64, unit: SpanUnit) -> Result<NaiveDateTime> {
    let overflow = || ResolveError::UnsupportedYear(approximate_year(datetime.year(), amount, unit));

    let shifted = match unit {
        SpanUnit::Second => TimeDelta::try_seconds(amount),
        SpanUnit::Minute => TimeDelta::try_minutes(amount),
        SpanUnit::Hour => TimeDelta::try_hours(amount),
        SpanUnit::Day => TimeDelta::try_days(amount),
        SpanUnit::Week => TimeDelta::try_weeks(amount),
        SpanUnit::Month | SpanUnit::Year => None,
    }
    .map(|delta| datetime.checked_add_signed(delta));

    let result = match shifted {
        Some(result) => result,
        None if matches!(unit, SpanUnit::Month | SpanUnit::Year) => {
            let per_unit = if unit == SpanUnit::Year { 12 } else { 1 };
            let months = amount
                .unsigned_abs()
                .checked_mul(per_unit)
                .and_then(|m| u32::try_from(m).ok())
                .map(Months::new)
                .ok_or_else(overflow)?;
            if amount >= 0 {
                datetime.checked_add_months(months)
            } else {
                datetime.checked_sub_months(months)
            }
        }
        None => None,
    }
    .ok_or_else(overflow)?;

    check_year(result.year())?;
    Ok(result)
}

/// Best-effort year a failed span would have landed in, for error reporting.
fn approximate_year(base: i32, amount: i64, unit: SpanUnit) -> i64 {
    let per_year: i64 = match unit {
        SpanUnit::Second => 31_556_952,
        SpanUnit::Minute => 525_949,
        SpanUnit::Hour => 8_766,
        SpanUnit::Day => 365,
        SpanUnit::Week => 52,
        SpanUnit::Month => 12,
        SpanUnit::Year => 1,
    };
    i64::from(base).saturating_add(amount / per_year)
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let shifted = TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or(ResolveError::UnsupportedYear(approximate_year(
            date.year(),
            days,
            SpanUnit::Day,
        )))?;
    check_date(shifted)
}

// ── Weekday searches ────────────────────────────────────────────────────────

/// Find the `skip_amount`-th occurrence of `weekday` strictly after (forward)
/// or strictly before (backward) `date`.
///
/// `skip_amount` 0 and 1 both mean the nearest occurrence; each additional
/// unit skips one more week. `date` itself never matches: "next Monday" on a
/// Monday is seven days later.
pub fn nearest_weekday(
    date: NaiveDate,
    direction: Direction,
    weekday: Weekday,
    skip_amount: u32,
) -> Result<NaiveDate> {
    let from = date.weekday().num_days_from_monday() as i64;
    let to = weekday.num_days_from_monday() as i64;
    let gap = match direction {
        Direction::Forward => (to - from + 7) % 7,
        Direction::Backward => (from - to + 7) % 7,
    };
    let gap = if gap == 0 { 7 } else { gap };
    let extra_weeks = i64::from(skip_amount.max(1) - 1);
    shift_days(date, direction.sign() * (gap + extra_weeks * 7))
}

/// Find the Nth `weekday` in a month. `index < 0` counts from the end of the
/// month: -1 is the last, -2 the second to last, and so on.
///
/// # Errors
///
/// Returns [`ResolveError::InvalidComponentValue`] for a month outside 1..=12,
/// an index of 0 or beyond ±5, or an occurrence the month does not have (a
/// fifth Monday in a month with four).
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    index: i32,
    weekday: Weekday,
) -> Result<NaiveDate> {
    if index == 0 || index.unsigned_abs() > 5 {
        return Err(ResolveError::invalid("weekday_index", index));
    }

    let target = if index > 0 {
        // Forward from the first of the month
        let first = first_of_month(year, month)?;
        let diff = (weekday.num_days_from_monday() as i64
            - first.weekday().num_days_from_monday() as i64
            + 7)
            % 7;
        first + TimeDelta::days(diff) + TimeDelta::weeks(i64::from(index - 1))
    } else {
        // Backward from the last of the month
        let last = last_of_month(year, month)?;
        let diff = (last.weekday().num_days_from_monday() as i64
            - weekday.num_days_from_monday() as i64
            + 7)
            % 7;
        last - TimeDelta::days(diff) - TimeDelta::weeks(i64::from(-index - 1))
    };

    if target.month() == month {
        Ok(target)
    } else {
        Err(ResolveError::invalid("weekday_index", index))
    }
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: WeekStartDay) -> Result<NaiveDate> {
    shift_days(date, -days_from_week_start(date.weekday(), week_start))
}

/// The given `weekday` inside the week containing `date`; may be in the past.
pub fn weekday_in_week(
    date: NaiveDate,
    weekday: Weekday,
    week_start: WeekStartDay,
) -> Result<NaiveDate> {
    let start = start_of_week(date, week_start)?;
    shift_days(start, days_from_week_start(weekday, week_start))
}

//! The resolver's accumulator for one walk.
//!
//! A [`ResolverState`] holds the reference instant, the date/time under
//! construction ("working"), the captured alternatives and the recurrence
//! flag. The walker drives it with one call per semantic event; each call
//! composes onto whatever the previous call left in `working`. A state is
//! created per resolution and consumed by [`ResolverState::extract`].

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::Serialize;
use tracing::{debug, trace};

use crate::ast::{AmPm, SeekBy};
use crate::calendar::{
    add_span, check_date, check_year, nearest_weekday, nth_weekday_of_month, weekday_in_week,
    with_year, Direction, SpanUnit, WeekStartDay,
};
use crate::error::{ResolveError, Result};
use crate::holidays::{holiday_date, season_date, Hemisphere, Holiday, Season};
use crate::walker::ResolveOptions;
use crate::zone::{Zone, ZonedDateTime};

/// What a walk produced: the captured readings in capture order, and whether
/// the expression described a repeating schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub alternatives: Vec<DateTime<FixedOffset>>,
    pub recurring: bool,
}

#[derive(Debug, Clone)]
pub struct ResolverState {
    reference: ZonedDateTime,
    working: ZonedDateTime,
    alternatives: Vec<DateTime<FixedOffset>>,
    recurring: bool,
    week_start: WeekStartDay,
    hemisphere: Hemisphere,
}

impl ResolverState {
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedYear`] if the reference itself is
    /// outside the supported range.
    pub fn new(reference: ZonedDateTime, options: &ResolveOptions) -> Result<Self> {
        check_date(reference.date())?;
        Ok(ResolverState {
            reference,
            working: reference,
            alternatives: Vec::new(),
            recurring: false,
            week_start: options.week_start,
            hemisphere: options.hemisphere,
        })
    }

    pub fn reference(&self) -> &ZonedDateTime {
        &self.reference
    }

    pub fn working(&self) -> &ZonedDateTime {
        &self.working
    }

    pub fn alternatives(&self) -> &[DateTime<FixedOffset>] {
        &self.alternatives
    }

    pub fn is_recurring(&self) -> bool {
        self.recurring
    }

    /// Replace the working date, keeping the time of day.
    fn set_date(&mut self, date: NaiveDate) -> Result<()> {
        check_date(date)?;
        self.working.local = date.and_time(self.working.local.time());
        Ok(())
    }

    // ── Explicit values ─────────────────────────────────────────────────

    /// Pin the date. A `day_of_week` that disagrees with the day of month is
    /// ignored.
    pub fn set_explicit_date(
        &mut self,
        day_of_month: u32,
        month: Option<u32>,
        day_of_week: Option<Weekday>,
        year: Option<i32>,
    ) -> Result<()> {
        let current = self.working.date();
        if !(1..=31).contains(&day_of_month) {
            return Err(ResolveError::invalid("day_of_month", day_of_month));
        }
        let month = month.unwrap_or(current.month());
        if !(1..=12).contains(&month) {
            return Err(ResolveError::invalid("month", month));
        }
        let year = match year {
            Some(year) => check_year(year)?,
            None => current.year(),
        };
        let date = NaiveDate::from_ymd_opt(year, month, day_of_month)
            .ok_or(ResolveError::invalid("day_of_month", day_of_month))?;

        if let Some(stated) = day_of_week {
            if stated != date.weekday() {
                debug!(
                    %date,
                    ?stated,
                    actual = ?date.weekday(),
                    "explicit weekday disagrees with day of month; keeping day of month"
                );
            }
        }
        trace!(%date, "set_explicit_date");
        self.set_date(date)
    }

    /// Pin the time of day. With `am_pm` the hour is 1..=12, otherwise 0..=23.
    /// A zone re-expresses the working instant in that zone before the wall
    /// clock is set.
    pub fn set_explicit_time(
        &mut self,
        hour: u32,
        minute: Option<u32>,
        second: Option<u32>,
        am_pm: Option<AmPm>,
        zone: Option<Zone>,
    ) -> Result<()> {
        let hour = match am_pm {
            None if hour <= 23 => hour,
            Some(AmPm::Am) if (1..=12).contains(&hour) => hour % 12,
            Some(AmPm::Pm) if (1..=12).contains(&hour) => hour % 12 + 12,
            _ => return Err(ResolveError::invalid("hour", hour)),
        };
        let minute = minute.unwrap_or(0);
        if minute > 59 {
            return Err(ResolveError::invalid("minute", minute));
        }
        let second = second.unwrap_or(0);
        if second > 59 {
            return Err(ResolveError::invalid("second", second));
        }
        let time = NaiveTime::from_hms_opt(hour, minute, second)
            .ok_or(ResolveError::invalid("hour", hour))?;

        if let Some(zone) = zone {
            self.working = self.working.with_zone(zone)?;
            check_date(self.working.date())?;
        }
        trace!(%time, zone = %self.working.zone, "set_explicit_time");
        self.working.local = self.working.date().and_time(time);
        Ok(())
    }

    pub fn seek_to_day_of_month(&mut self, day: u32) -> Result<()> {
        let current = self.working.date();
        let date = NaiveDate::from_ymd_opt(current.year(), current.month(), day)
            .ok_or(ResolveError::invalid("day_of_month", day))?;
        self.set_date(date)
    }

    pub fn seek_to_day_of_year(&mut self, day: u32) -> Result<()> {
        let date = NaiveDate::from_yo_opt(self.working.date().year(), day)
            .ok_or(ResolveError::invalid("day_of_year", day))?;
        self.set_date(date)
    }

    /// Move to `year`, keeping month and day (Feb 29 clamps to Feb 28).
    pub fn seek_to_year(&mut self, year: i32) -> Result<()> {
        let date = with_year(self.working.date(), check_year(year)?)?;
        self.set_date(date)
    }

    /// The `index`-th `weekday` of the working month (negative from the end).
    pub fn set_day_of_week_index(&mut self, index: i32, weekday: Weekday) -> Result<()> {
        let current = self.working.date();
        let date = nth_weekday_of_month(current.year(), current.month(), index, weekday)?;
        self.set_date(date)
    }

    pub fn seek_to_holiday_in_year(&mut self, holiday: Holiday, year: i32) -> Result<()> {
        self.set_date(holiday_date(year, holiday)?)
    }

    pub fn seek_to_season_in_year(&mut self, season: Season, year: i32) -> Result<()> {
        self.set_date(season_date(year, season, self.hemisphere)?)
    }

    // ── Seeks ───────────────────────────────────────────────────────────

    pub fn seek_to_weekday(
        &mut self,
        direction: Direction,
        by: SeekBy,
        amount: u32,
        weekday: Weekday,
    ) -> Result<()> {
        trace!(?direction, ?by, amount, ?weekday, "seek_to_weekday");
        let current = self.working.date();
        let date = match by {
            SeekBy::Day => nearest_weekday(current, direction, weekday, amount)?,
            SeekBy::Week => {
                let in_week = weekday_in_week(current, weekday, self.week_start)?;
                let weeks = direction.sign() * i64::from(amount);
                let at = in_week.and_time(self.working.local.time());
                add_span(at, weeks, SpanUnit::Week)?.date()
            }
            SeekBy::Month => {
                let index = i32::try_from(amount.max(1))
                    .map_err(|_| ResolveError::invalid("weekday_index", amount))?;
                let index = index * direction.sign() as i32;
                nth_weekday_of_month(current.year(), current.month(), index, weekday)?
            }
        };
        self.set_date(date)
    }

    /// Move to the 1st of `month`. With `amount == 0` the month is set within
    /// the working year; otherwise the `amount`-th occurrence strictly after
    /// (or before) the working month is used.
    pub fn seek_to_month(&mut self, direction: Direction, amount: u32, month: u32) -> Result<()> {
        trace!(?direction, amount, month, "seek_to_month");
        if !(1..=12).contains(&month) {
            return Err(ResolveError::invalid("month", month));
        }
        let current = self.working.date();
        let year = if amount == 0 {
            current.year()
        } else {
            let first = match direction {
                Direction::Forward if month > current.month() => current.year(),
                Direction::Forward => current.year() + 1,
                Direction::Backward if month < current.month() => current.year(),
                Direction::Backward => current.year() - 1,
            };
            supported_year(i64::from(first) + direction.sign() * (i64::from(amount) - 1))?
        };
        let date =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(ResolveError::UnsupportedYear(year.into()))?;
        self.set_date(date)
    }

    /// Add `amount` units in `direction`. Sub-day units count elapsed time;
    /// larger units move the wall clock.
    pub fn seek_by_span(&mut self, direction: Direction, amount: u32, unit: SpanUnit) -> Result<()> {
        trace!(?direction, amount, ?unit, "seek_by_span");
        let signed = direction.sign() * i64::from(amount);
        if unit.is_sub_day() {
            let shifted = add_span(self.working.instant().naive_utc(), signed, unit)?;
            self.working =
                ZonedDateTime::from_instant(Utc.from_utc_datetime(&shifted), self.working.zone)?;
            check_date(self.working.date())?;
        } else {
            self.working.local = add_span(self.working.local, signed, unit)?;
        }
        Ok(())
    }

    pub fn seek_to_holiday(&mut self, direction: Direction, amount: u32, holiday: Holiday) -> Result<()> {
        trace!(?direction, amount, ?holiday, "seek_to_holiday");
        self.seek_to_occurrence(direction, amount, |year| holiday_date(year, holiday))
    }

    pub fn seek_to_season(&mut self, direction: Direction, amount: u32, season: Season) -> Result<()> {
        trace!(?direction, amount, ?season, "seek_to_season");
        let hemisphere = self.hemisphere;
        self.seek_to_occurrence(direction, amount, |year| season_date(year, season, hemisphere))
    }

    /// Shared search for once-a-year dates. `amount == 0` keeps the working
    /// year; otherwise counts occurrences strictly after/before the working
    /// date ("2 Christmases ago").
    fn seek_to_occurrence(
        &mut self,
        direction: Direction,
        amount: u32,
        occurrence: impl Fn(i32) -> Result<NaiveDate>,
    ) -> Result<()> {
        let current = self.working.date();
        let year = current.year();
        let date = if amount == 0 {
            occurrence(year)?
        } else {
            let this_year = occurrence(year)?;
            let first = match direction {
                Direction::Forward if this_year > current => year,
                Direction::Forward => year + 1,
                Direction::Backward if this_year < current => year,
                Direction::Backward => year - 1,
            };
            let target = i64::from(first) + direction.sign() * (i64::from(amount) - 1);
            occurrence(supported_year(target)?)?
        };
        self.set_date(date)
    }

    // ── Bookkeeping ─────────────────────────────────────────────────────

    pub fn mark_recurring(&mut self) {
        debug!("expression is recurring");
        self.recurring = true;
    }

    /// Append the working date/time to the alternatives and start the next
    /// reading from the reference again.
    pub fn capture(&mut self) {
        let captured = self.working.to_fixed();
        debug!(
            index = self.alternatives.len(),
            resolved = %captured.to_rfc3339(),
            "captured date/time"
        );
        self.alternatives.push(captured);
        self.working = self.reference;
    }

    /// Read the finished walk.
    pub fn extract(self) -> Resolution {
        Resolution {
            alternatives: self.alternatives,
            recurring: self.recurring,
        }
    }
}

fn supported_year(year: i64) -> Result<i32> {
    let year = i32::try_from(year).map_err(|_| ResolveError::UnsupportedYear(year))?;
    check_year(year)
}

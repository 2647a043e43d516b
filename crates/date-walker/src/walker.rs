//! Walks a [`DateExpression`] and drives a [`ResolverState`].
//!
//! Traversal order is fixed by the tree shape:
//!
//! 1. Every `DateTime` of the alternative, in order; each ends in a capture.
//! 2. Inside a `DateTime`: the date, then the time, then the capture.
//! 3. Inside a relative date: all seeks in order, then all explicit seeks.
//! 4. A seek's nested anchor is walked before the seek itself moves.
//! 5. The recurrence last: it marks the walk recurring and, if it carries a
//!    `DateTime`, captures it as one more alternative.
//!
//! Any error stops the walk; nothing partially resolved is returned.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::ast::{
    Date, DateExpression, DateTimeAlternative, ExplicitDate, ExplicitSeek, ExplicitTime,
    Recurrence, RelativeTime, Seek, SeekBy, SpanAnchor, Time,
};
use crate::calendar::{Direction, WeekStartDay};
use crate::error::{ResolveError, Result};
use crate::holidays::Hemisphere;
use crate::state::{Resolution, ResolverState};
use crate::zone::{Zone, ZonedDateTime};

/// Options for [`resolve_with_options`].
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Which day starts the week for "this week"/"next week" seeks.
    pub week_start: WeekStartDay,
    /// Orientation of the season table.
    pub hemisphere: Hemisphere,
    /// Deepest nesting of dates and seeks the walker accepts.
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            week_start: WeekStartDay::default(),
            hemisphere: Hemisphere::default(),
            max_depth: 64,
        }
    }
}

/// Resolve `expression` against `reference`, read in `timezone`.
///
/// Uses [`ResolveOptions::default`].
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc, Weekday};
/// use date_walker::ast::{Date, DateExpression, DateTime, Seek};
/// use date_walker::calendar::Direction;
/// use date_walker::resolve;
///
/// // Friday, March 15, 2024
/// let reference = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
/// let next_monday = DateExpression::single(DateTime::date(Date::seek(vec![
///     Seek::weekday(Direction::Forward, 1, Weekday::Mon),
/// ])));
///
/// let resolution = resolve(&next_monday, reference, "UTC").unwrap();
/// assert_eq!(resolution.alternatives[0].to_rfc3339(), "2024-03-18T12:00:00+00:00");
/// assert!(!resolution.recurring);
/// ```
pub fn resolve(
    expression: &DateExpression,
    reference: DateTime<Utc>,
    timezone: &str,
) -> Result<Resolution> {
    resolve_with_options(expression, reference, timezone, &ResolveOptions::default())
}

/// Resolve `expression` with explicit options.
///
/// # Arguments
///
/// * `expression`: The parsed tree
/// * `reference`: The "now" every relative reading starts from
/// * `timezone`: IANA name (`America/New_York`) or fixed offset (`+02:00`)
///   the reference is read in
/// * `options`: Week start, hemisphere and depth limit
///
/// # Errors
///
/// - [`ResolveError::InvalidTimezone`] for an unknown zone
/// - [`ResolveError::UnsupportedYear`] if the reference or any resolved
///   value falls outside the supported years
/// - [`ResolveError::MalformedAst`] for an empty expression, an empty
///   alternative, or nesting beyond `options.max_depth`
/// - [`ResolveError::InvalidComponentValue`] for out-of-range literals
pub fn resolve_with_options(
    expression: &DateExpression,
    reference: DateTime<Utc>,
    timezone: &str,
    options: &ResolveOptions,
) -> Result<Resolution> {
    let zone = Zone::parse(timezone)?;
    let reference = ZonedDateTime::from_instant(reference, zone)?;
    let mut walker = Walker {
        state: ResolverState::new(reference, options)?,
        depth: 0,
        max_depth: options.max_depth,
    };
    walker.expression(expression)?;

    let resolution = walker.state.extract();
    debug!(
        alternatives = resolution.alternatives.len(),
        recurring = resolution.recurring,
        "resolved expression"
    );
    Ok(resolution)
}

struct Walker {
    state: ResolverState,
    depth: usize,
    max_depth: usize,
}

impl Walker {
    fn expression(&mut self, expression: &DateExpression) -> Result<()> {
        let recurring_rule = expression
            .recurrence
            .as_ref()
            .and_then(|recurrence| recurrence.date_time.as_ref());
        if expression.alternative.is_none() && recurring_rule.is_none() {
            return Err(ResolveError::MalformedAst(
                "expression has neither a date/time nor a recurrence rule".to_string(),
            ));
        }

        if let Some(alternative) = &expression.alternative {
            self.alternative(alternative)?;
        }
        if let Some(recurrence) = &expression.recurrence {
            self.recurrence(recurrence)?;
        }
        Ok(())
    }

    fn alternative(&mut self, alternative: &DateTimeAlternative) -> Result<()> {
        if alternative.date_times.is_empty() {
            return Err(ResolveError::MalformedAst(
                "date/time alternative has no readings".to_string(),
            ));
        }
        for date_time in &alternative.date_times {
            self.date_time(date_time)?;
        }
        Ok(())
    }

    fn recurrence(&mut self, recurrence: &Recurrence) -> Result<()> {
        self.state.mark_recurring();
        match &recurrence.date_time {
            Some(date_time) => self.date_time(date_time),
            None => Ok(()),
        }
    }

    fn date_time(&mut self, date_time: &crate::ast::DateTime) -> Result<()> {
        if let Some(date) = &date_time.date {
            self.date(date)?;
        }
        if let Some(time) = &date_time.time {
            self.time(time)?;
        }
        self.state.capture();
        Ok(())
    }

    fn date(&mut self, date: &Date) -> Result<()> {
        self.descend(|walker| match date {
            Date::Explicit(ExplicitDate {
                day_of_month,
                month,
                day_of_week,
                year,
            }) => walker
                .state
                .set_explicit_date(*day_of_month, *month, *day_of_week, *year),
            Date::Relative(relative) => {
                for seek in &relative.seeks {
                    walker.seek(seek)?;
                }
                for explicit in &relative.explicit_seeks {
                    walker.explicit_seek(explicit)?;
                }
                Ok(())
            }
        })
    }

    fn time(&mut self, time: &Time) -> Result<()> {
        match time {
            Time::Explicit(explicit) => self.explicit_time(explicit),
            Time::Relative(RelativeTime { seek }) => self.seek(seek),
        }
    }

    fn explicit_time(&mut self, time: &ExplicitTime) -> Result<()> {
        let zone = time.zone.as_ref().map(Zone::from_token).transpose()?;
        self.state
            .set_explicit_time(time.hour, time.minute, time.second, time.am_pm, zone)
    }

    fn seek(&mut self, seek: &Seek) -> Result<()> {
        self.descend(|walker| match seek {
            Seek::ToWeekday {
                direction,
                by,
                amount,
                weekday,
                anchor,
            } => {
                if let Some(anchor) = anchor {
                    walker.date(anchor)?;
                }
                walker.state.seek_to_weekday(*direction, *by, *amount, *weekday)
            }
            Seek::ToMonth {
                direction,
                amount,
                month,
            } => walker.state.seek_to_month(*direction, *amount, *month),
            Seek::BySpan {
                direction,
                amount,
                unit,
                anchor,
            } => {
                match anchor.as_deref() {
                    Some(SpanAnchor::Date(date)) => walker.date(date)?,
                    Some(SpanAnchor::ExplicitSeek(explicit)) => walker.explicit_seek(explicit)?,
                    None => {}
                }
                walker.state.seek_by_span(*direction, *amount, *unit)
            }
            Seek::ToHoliday {
                direction,
                amount,
                holiday,
            } => walker.state.seek_to_holiday(*direction, *amount, *holiday),
            Seek::ToSeason {
                direction,
                amount,
                season,
            } => walker.state.seek_to_season(*direction, *amount, *season),
        })
    }

    fn explicit_seek(&mut self, seek: &ExplicitSeek) -> Result<()> {
        match seek {
            ExplicitSeek::Month { month } => self.state.seek_to_month(Direction::Forward, 0, *month),
            ExplicitSeek::DayOfMonth { day } => self.state.seek_to_day_of_month(*day),
            ExplicitSeek::DayOfWeek { weekday } => {
                self.state
                    .seek_to_weekday(Direction::Forward, SeekBy::Week, 0, *weekday)
            }
            ExplicitSeek::DayOfYear { day } => self.state.seek_to_day_of_year(*day),
            ExplicitSeek::Year { year } => self.state.seek_to_year(*year),
            ExplicitSeek::HolidayInYear { holiday, year } => {
                self.state.seek_to_holiday_in_year(*holiday, *year)
            }
            ExplicitSeek::SeasonInYear { season, year } => {
                self.state.seek_to_season_in_year(*season, *year)
            }
            ExplicitSeek::WeekdayIndex { index, weekday } => {
                self.state.set_day_of_week_index(*index, *weekday)
            }
            ExplicitSeek::Time(time) => self.explicit_time(time),
        }
    }

    /// Run `visit` one nesting level deeper, failing past `max_depth`.
    fn descend(&mut self, visit: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(ResolveError::MalformedAst(format!(
                "expression nests deeper than {} levels",
                self.max_depth
            )));
        }
        self.depth += 1;
        let result = visit(self);
        self.depth -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Weekday};

    use super::*;
    use crate::ast::{AmPm, DateTime as Reading, ExplicitTime, RelativeDate, ZoneToken};
    use crate::calendar::SpanUnit;
    use crate::holidays::{Holiday, Season};

    /// Friday, March 15, 2024, 12:00 UTC
    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn resolve_utc(expression: &DateExpression) -> Result<Resolution> {
        resolve(expression, reference(), "UTC")
    }

    fn rfc3339(resolution: &Resolution) -> Vec<String> {
        resolution
            .alternatives
            .iter()
            .map(|dt| dt.to_rfc3339())
            .collect()
    }

    fn next_monday() -> Reading {
        Reading::date(Date::seek(vec![Seek::weekday(
            Direction::Forward,
            1,
            Weekday::Mon,
        )]))
    }

    // ── basic readings ──────────────────────────────────────────────────

    #[test]
    fn test_explicit_date() {
        let expr = DateExpression::single(Reading::date(Date::explicit(25, Some(12))));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-12-25T12:00:00+00:00"]);
        assert!(!resolution.recurring);
    }

    #[test]
    fn test_next_monday() {
        let resolution = resolve_utc(&DateExpression::single(next_monday())).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-18T12:00:00+00:00"]);
    }

    #[test]
    fn test_two_weeks_from_now() {
        let expr = DateExpression::single(Reading::date(Date::seek(vec![Seek::span(
            Direction::Forward,
            2,
            SpanUnit::Week,
        )])));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-29T12:00:00+00:00"]);
    }

    #[test]
    fn test_alternatives_keep_order() {
        let expr = DateExpression::new(DateTimeAlternative::new(vec![
            Reading::date(Date::explicit(1, Some(4))),
            Reading::date(Date::explicit(1, Some(5))),
        ]));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(
            rfc3339(&resolution),
            ["2024-04-01T12:00:00+00:00", "2024-05-01T12:00:00+00:00"]
        );
    }

    #[test]
    fn test_recurrence_with_rule_captures_once() {
        let expr = DateExpression::recurring(Recurrence {
            date_time: Some(next_monday()),
        });
        let resolution = resolve_utc(&expr).unwrap();
        assert!(resolution.recurring);
        assert_eq!(rfc3339(&resolution), ["2024-03-18T12:00:00+00:00"]);
    }

    // ── composition ─────────────────────────────────────────────────────

    #[test]
    fn test_empty_reading_captures_reference() {
        let expr = DateExpression::single(Reading::default());
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-15T12:00:00+00:00"]);
    }

    #[test]
    fn test_recurrence_flag_after_alternative() {
        // "every month on the 15th"
        let expr = DateExpression::single(Reading::date(Date::pinned(vec![
            ExplicitSeek::DayOfMonth { day: 15 },
        ])))
        .with_recurrence(Recurrence::default());
        let resolution = resolve_utc(&expr).unwrap();
        assert!(resolution.recurring);
        assert_eq!(resolution.alternatives.len(), 1);
    }

    #[test]
    fn test_date_then_time() {
        // "next Friday at 3pm"
        let expr = DateExpression::single(Reading::new(
            Some(Date::seek(vec![Seek::weekday(
                Direction::Forward,
                1,
                Weekday::Fri,
            )])),
            Some(Time::Explicit(ExplicitTime {
                hour: 3,
                minute: None,
                second: None,
                am_pm: Some(AmPm::Pm),
                zone: None,
            })),
        ));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-22T15:00:00+00:00"]);
    }

    #[test]
    fn test_relative_time() {
        // "in 90 minutes"
        let expr = DateExpression::single(Reading::time(Time::Relative(RelativeTime {
            seek: Seek::span(Direction::Forward, 90, SpanUnit::Minute),
        })));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-15T13:30:00+00:00"]);
    }

    #[test]
    fn test_seeks_run_before_explicit_seeks() {
        // "next month on the 3rd Tuesday at 9:30"
        let expr = DateExpression::single(Reading::date(Date::Relative(RelativeDate {
            seeks: vec![Seek::span(Direction::Forward, 1, SpanUnit::Month)],
            explicit_seeks: vec![
                ExplicitSeek::WeekdayIndex {
                    index: 3,
                    weekday: Weekday::Tue,
                },
                ExplicitSeek::Time(ExplicitTime::hm(9, 30)),
            ],
        })));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-04-16T09:30:00+00:00"]);
    }

    #[test]
    fn test_weekday_anchor_is_walked_first() {
        // "the Monday after Christmas"; Christmas 2024 is a Wednesday
        let expr = DateExpression::single(Reading::date(Date::seek(vec![Seek::ToWeekday {
            direction: Direction::Forward,
            by: SeekBy::Day,
            amount: 1,
            weekday: Weekday::Mon,
            anchor: Some(Box::new(Date::seek(vec![Seek::ToHoliday {
                direction: Direction::Forward,
                amount: 1,
                holiday: Holiday::Christmas,
            }]))),
        }])));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-12-30T12:00:00+00:00"]);
    }

    #[test]
    fn test_span_anchor_is_walked_first() {
        // "3 days after next Friday"
        let expr = DateExpression::single(Reading::date(Date::seek(vec![Seek::BySpan {
            direction: Direction::Forward,
            amount: 3,
            unit: SpanUnit::Day,
            anchor: Some(Box::new(SpanAnchor::Date(Date::seek(vec![Seek::weekday(
                Direction::Forward,
                1,
                Weekday::Fri,
            )])))),
        }])));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-25T12:00:00+00:00"]);

        // "a week before Easter 2025"
        let expr = DateExpression::single(Reading::date(Date::seek(vec![Seek::BySpan {
            direction: Direction::Backward,
            amount: 1,
            unit: SpanUnit::Week,
            anchor: Some(Box::new(SpanAnchor::ExplicitSeek(ExplicitSeek::HolidayInYear {
                holiday: Holiday::Easter,
                year: 2025,
            }))),
        }])));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2025-04-13T12:00:00+00:00"]);
    }

    #[test]
    fn test_explicit_month_and_day_of_week() {
        // "June, on the Wednesday of that week"
        let expr = DateExpression::single(Reading::date(Date::pinned(vec![
            ExplicitSeek::Month { month: 6 },
            ExplicitSeek::DayOfWeek {
                weekday: Weekday::Wed,
            },
        ])));
        let resolution = resolve_utc(&expr).unwrap();
        // June 1, 2024 is a Saturday; its Monday-start week began May 27
        assert_eq!(rfc3339(&resolution), ["2024-05-29T12:00:00+00:00"]);
    }

    #[test]
    fn test_season_in_year_southern_hemisphere() {
        let expr = DateExpression::single(Reading::date(Date::pinned(vec![
            ExplicitSeek::SeasonInYear {
                season: Season::Summer,
                year: 2025,
            },
        ])));
        let options = ResolveOptions {
            hemisphere: Hemisphere::Southern,
            ..ResolveOptions::default()
        };
        let resolution = resolve_with_options(&expr, reference(), "UTC", &options).unwrap();
        assert_eq!(rfc3339(&resolution), ["2025-12-21T12:00:00+00:00"]);
    }

    #[test]
    fn test_week_start_changes_this_week() {
        // "Sunday this week" from Friday, March 15
        let expr = DateExpression::single(Reading::date(Date::pinned(vec![
            ExplicitSeek::DayOfWeek {
                weekday: Weekday::Sun,
            },
        ])));
        let monday = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&monday), ["2024-03-17T12:00:00+00:00"]);

        let options = ResolveOptions {
            week_start: WeekStartDay::Sunday,
            ..ResolveOptions::default()
        };
        let sunday = resolve_with_options(&expr, reference(), "UTC", &options).unwrap();
        assert_eq!(rfc3339(&sunday), ["2024-03-10T12:00:00+00:00"]);
    }

    #[test]
    fn test_reference_read_in_timezone() {
        // 12:00 UTC is 08:00 EDT; "tomorrow at 9" stays in New York
        let expr = DateExpression::single(Reading::new(
            Some(Date::seek(vec![Seek::span(Direction::Forward, 1, SpanUnit::Day)])),
            Some(Time::Explicit(ExplicitTime::hm(9, 0))),
        ));
        let resolution = resolve(&expr, reference(), "America/New_York").unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-16T09:00:00-04:00"]);
    }

    #[test]
    fn test_explicit_time_zone_token() {
        let expr = DateExpression::single(Reading::time(Time::Explicit(ExplicitTime {
            hour: 17,
            minute: Some(0),
            second: None,
            am_pm: None,
            zone: Some(ZoneToken::Named("Europe/London".to_string())),
        })));
        let resolution = resolve(&expr, reference(), "America/New_York").unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-03-15T17:00:00+00:00"]);
    }

    #[test]
    fn test_alternatives_are_independent() {
        let expr = DateExpression::new(DateTimeAlternative::new(vec![
            Reading::date(Date::seek(vec![Seek::span(
                Direction::Forward,
                10,
                SpanUnit::Year,
            )])),
            Reading::default(),
        ]));
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(
            rfc3339(&resolution),
            ["2034-03-15T12:00:00+00:00", "2024-03-15T12:00:00+00:00"]
        );
    }

    // ── errors ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_expression_is_malformed() {
        let err = resolve_utc(&DateExpression::default()).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedAst(_)), "got: {err}");

        let err = resolve_utc(&DateExpression::recurring(Recurrence::default())).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedAst(_)), "got: {err}");
    }

    #[test]
    fn test_empty_alternative_is_malformed() {
        let expr = DateExpression::new(DateTimeAlternative::new(Vec::new()));
        let err = resolve_utc(&expr).unwrap_err();
        assert!(err.to_string().contains("no readings"), "got: {err}");
    }

    #[test]
    fn test_depth_guard() {
        let mut date = Date::seek(vec![Seek::span(Direction::Forward, 1, SpanUnit::Day)]);
        for _ in 0..10 {
            date = Date::seek(vec![Seek::ToWeekday {
                direction: Direction::Forward,
                by: SeekBy::Day,
                amount: 1,
                weekday: Weekday::Mon,
                anchor: Some(Box::new(date)),
            }]);
        }
        let expr = DateExpression::single(Reading::date(date));

        assert!(resolve_utc(&expr).is_ok());

        let options = ResolveOptions {
            max_depth: 8,
            ..ResolveOptions::default()
        };
        let err = resolve_with_options(&expr, reference(), "UTC", &options).unwrap_err();
        assert!(err.to_string().contains("deeper than 8"), "got: {err}");
    }

    #[test]
    fn test_invalid_timezone() {
        let expr = DateExpression::single(Reading::default());
        let err = resolve(&expr, reference(), "Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTimezone(_)), "got: {err}");
    }

    #[test]
    fn test_invalid_time_zone_token() {
        let expr = DateExpression::single(Reading::time(Time::Explicit(ExplicitTime {
            hour: 9,
            minute: None,
            second: None,
            am_pm: None,
            zone: Some(ZoneToken::Offset(30 * 60)),
        })));
        let err = resolve_utc(&expr).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidTimezone(_)), "got: {err}");
    }

    #[test]
    fn test_reference_year_out_of_range() {
        let expr = DateExpression::single(Reading::default());
        let reference = Utc.with_ymd_and_hms(1899, 12, 31, 0, 0, 0).unwrap();
        let err = resolve(&expr, reference, "UTC").unwrap_err();
        assert_eq!(err, ResolveError::UnsupportedYear(1899));
    }

    #[test]
    fn test_reference_beyond_representable_range() {
        let expr = DateExpression::single(Reading::default());
        let err = resolve(&expr, DateTime::<Utc>::MAX_UTC, "+14:00").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedYear(_)), "got: {err}");

        let err = resolve(&expr, DateTime::<Utc>::MAX_UTC, "UTC").unwrap_err();
        assert!(matches!(err, ResolveError::UnsupportedYear(_)), "got: {err}");
    }

    #[test]
    fn test_extreme_weekday_index_is_invalid() {
        let json = r#"{ "alternative": { "date_times": [ { "date": {
            "kind": "relative",
            "explicit_seeks": [ { "kind": "weekday_index", "index": -2147483648, "weekday": "Mon" } ]
        } } ] } }"#;
        let expr = DateExpression::from_json(json).unwrap();
        assert_eq!(
            resolve_utc(&expr).unwrap_err(),
            ResolveError::invalid("weekday_index", i32::MIN)
        );
    }

    #[test]
    fn test_error_in_later_alternative_fails_whole_walk() {
        let expr = DateExpression::new(DateTimeAlternative::new(vec![
            Reading::date(Date::explicit(1, Some(4))),
            Reading::date(Date::explicit(31, Some(4))),
        ]));
        let err = resolve_utc(&expr).unwrap_err();
        assert_eq!(err, ResolveError::invalid("day_of_month", 31));
    }

    #[test]
    fn test_year_overflow_is_unsupported() {
        let expr = DateExpression::single(Reading::date(Date::seek(vec![Seek::span(
            Direction::Forward,
            8000,
            SpanUnit::Year,
        )])));
        let err = resolve_utc(&expr).unwrap_err();
        assert_eq!(err, ResolveError::UnsupportedYear(10024));
    }

    #[test]
    fn test_out_of_range_literals() {
        let expr = DateExpression::single(Reading::time(Time::Explicit(ExplicitTime::hm(25, 0))));
        assert_eq!(
            resolve_utc(&expr).unwrap_err(),
            ResolveError::invalid("hour", 25)
        );

        let expr = DateExpression::single(Reading::date(Date::pinned(vec![
            ExplicitSeek::WeekdayIndex {
                index: 5,
                weekday: Weekday::Mon,
            },
        ])));
        assert_eq!(
            resolve_utc(&expr).unwrap_err(),
            ResolveError::invalid("weekday_index", 5)
        );
    }

    #[test]
    fn test_resolves_from_json() {
        let json = r#"{
            "alternative": { "date_times": [ {
                "date": { "kind": "relative", "seeks": [
                    { "kind": "to_holiday", "direction": ">", "amount": 1, "holiday": "thanksgiving" }
                ] },
                "time": { "kind": "explicit", "hour": 6, "am_pm": "pm" }
            } ] },
            "recurrence": {}
        }"#;
        let expr = DateExpression::from_json(json).unwrap();
        let resolution = resolve_utc(&expr).unwrap();
        assert_eq!(rfc3339(&resolution), ["2024-11-28T18:00:00+00:00"]);
        assert!(resolution.recurring);
    }
}

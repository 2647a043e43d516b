//! The parsed date/time tree consumed by the walker.
//!
//! Every node kind the grammar can produce is a variant of a closed enum, so a
//! `match` in the walker is checked for exhaustiveness at compile time. Trees
//! normally arrive from an upstream parser; when they arrive as JSON, unknown
//! `kind` tags and unknown fields are rejected by [`DateExpression::from_json`]
//! instead of being skipped.
//!
//! Integer literals (days, months, years, hours, ...) are kept as plain
//! integers: range checking is the engine's job and is reported as
//! [`ResolveError::InvalidComponentValue`].

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::{Direction, SpanUnit};
use crate::error::{ResolveError, Result};
use crate::holidays::{Holiday, Season};

/// Root of a parsed expression: `date_time_alternative recurrence?`.
///
/// The alternative is optional only so that a bare recurrence carrying its own
/// date/time rule ("every Monday") can be expressed; an expression with
/// neither an alternative nor a recurrence date/time is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateExpression {
    #[serde(default)]
    pub alternative: Option<DateTimeAlternative>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

impl DateExpression {
    pub fn new(alternative: DateTimeAlternative) -> Self {
        DateExpression {
            alternative: Some(alternative),
            recurrence: None,
        }
    }

    /// An expression made of a single date/time reading.
    pub fn single(date_time: DateTime) -> Self {
        DateExpression::new(DateTimeAlternative::new(vec![date_time]))
    }

    /// An expression that is only a recurrence rule.
    pub fn recurring(recurrence: Recurrence) -> Self {
        DateExpression {
            alternative: None,
            recurrence: Some(recurrence),
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    /// Decode a tree from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedAst`] if the JSON does not describe a
    /// known tree shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ResolveError::MalformedAst(e.to_string()))
    }
}

/// One or more disjunctive readings ("April 1st or May 1st").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateTimeAlternative {
    pub date_times: Vec<DateTime>,
}

impl DateTimeAlternative {
    pub fn new(date_times: Vec<DateTime>) -> Self {
        DateTimeAlternative { date_times }
    }
}

/// A single reading. Both halves are optional; an empty node resolves to the
/// reference instant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateTime {
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub time: Option<Time>,
}

impl DateTime {
    pub fn new(date: Option<Date>, time: Option<Time>) -> Self {
        DateTime { date, time }
    }

    pub fn date(date: Date) -> Self {
        DateTime::new(Some(date), None)
    }

    pub fn time(time: Time) -> Self {
        DateTime::new(None, Some(time))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Date {
    Relative(RelativeDate),
    Explicit(ExplicitDate),
}

impl Date {
    /// A relative date made only of seeks.
    pub fn seek(seeks: Vec<Seek>) -> Self {
        Date::Relative(RelativeDate {
            seeks,
            explicit_seeks: Vec::new(),
        })
    }

    /// A relative date made only of explicit seeks.
    pub fn pinned(explicit_seeks: Vec<ExplicitSeek>) -> Self {
        Date::Relative(RelativeDate {
            seeks: Vec::new(),
            explicit_seeks,
        })
    }

    /// An explicit day of month, optionally with month.
    pub fn explicit(day_of_month: u32, month: Option<u32>) -> Self {
        Date::Explicit(ExplicitDate {
            day_of_month,
            month,
            day_of_week: None,
            year: None,
        })
    }
}

/// Seeks applied in order, then explicit seeks applied in order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelativeDate {
    #[serde(default)]
    pub seeks: Vec<Seek>,
    #[serde(default)]
    pub explicit_seeks: Vec<ExplicitSeek>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplicitDate {
    pub day_of_month: u32,
    #[serde(default)]
    pub month: Option<u32>,
    /// Redundant with `day_of_month` when present; the day of month wins.
    #[serde(default)]
    pub day_of_week: Option<Weekday>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Time {
    Explicit(ExplicitTime),
    Relative(RelativeTime),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplicitTime {
    pub hour: u32,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub second: Option<u32>,
    #[serde(default)]
    pub am_pm: Option<AmPm>,
    #[serde(default)]
    pub zone: Option<ZoneToken>,
}

impl ExplicitTime {
    pub fn hm(hour: u32, minute: u32) -> Self {
        ExplicitTime {
            hour,
            minute: Some(minute),
            second: None,
            am_pm: None,
            zone: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelativeTime {
    pub seek: Seek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmPm {
    Am,
    Pm,
}

/// A timezone as written in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneToken {
    /// IANA name (`America/New_York`) or a textual offset (`+02:00`).
    Named(String),
    /// Minutes east of UTC.
    Offset(i32),
}

/// How a weekday seek counts its `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekBy {
    /// Skip `amount` occurrences of the weekday ("2 Mondays from now").
    Day,
    /// The weekday within the week `amount` weeks away ("Monday next week").
    Week,
    /// The `amount`-th weekday of the working month ("last Friday of the month").
    Month,
}

/// A directional move of the working date/time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Seek {
    ToWeekday {
        direction: Direction,
        by: SeekBy,
        amount: u32,
        weekday: Weekday,
        /// Walked before the weekday move ("the Monday after Christmas").
        #[serde(default)]
        anchor: Option<Box<Date>>,
    },
    ToMonth {
        direction: Direction,
        amount: u32,
        month: u32,
    },
    BySpan {
        direction: Direction,
        amount: u32,
        unit: SpanUnit,
        /// Walked before the span is added ("3 days after next Friday").
        #[serde(default)]
        anchor: Option<Box<SpanAnchor>>,
    },
    ToHoliday {
        direction: Direction,
        amount: u32,
        holiday: Holiday,
    },
    ToSeason {
        direction: Direction,
        amount: u32,
        season: Season,
    },
}

impl Seek {
    pub fn weekday(direction: Direction, amount: u32, weekday: Weekday) -> Self {
        Seek::ToWeekday {
            direction,
            by: SeekBy::Day,
            amount,
            weekday,
            anchor: None,
        }
    }

    pub fn span(direction: Direction, amount: u32, unit: SpanUnit) -> Self {
        Seek::BySpan {
            direction,
            amount,
            unit,
            anchor: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanAnchor {
    Date(Date),
    ExplicitSeek(ExplicitSeek),
}

/// Pins one component of the working date/time to a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExplicitSeek {
    Month { month: u32 },
    DayOfMonth { day: u32 },
    DayOfWeek { weekday: Weekday },
    DayOfYear { day: u32 },
    Year { year: i32 },
    HolidayInYear { holiday: Holiday, year: i32 },
    SeasonInYear { season: Season, year: i32 },
    WeekdayIndex { index: i32, weekday: Weekday },
    Time(ExplicitTime),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recurrence {
    #[serde(default)]
    pub date_time: Option<DateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_relative_weekday() {
        let json = r#"{
            "alternative": { "date_times": [
                { "date": { "kind": "relative", "seeks": [
                    { "kind": "to_weekday", "direction": "forward", "by": "day",
                      "amount": 1, "weekday": "Mon" }
                ] } }
            ] }
        }"#;
        let expr = DateExpression::from_json(json).unwrap();
        assert_eq!(
            expr,
            DateExpression::single(DateTime::date(Date::seek(vec![Seek::weekday(
                Direction::Forward,
                1,
                Weekday::Mon
            )])))
        );
    }

    #[test]
    fn test_from_json_direction_arrows() {
        let json = r#"{ "alternative": { "date_times": [ { "date": {
            "kind": "relative",
            "seeks": [ { "kind": "by_span", "direction": "<", "amount": 2, "unit": "week" } ]
        } } ] } }"#;
        let expr = DateExpression::from_json(json).unwrap();
        let alternative = expr.alternative.unwrap();
        assert_eq!(
            alternative.date_times[0].date,
            Some(Date::seek(vec![Seek::span(
                Direction::Backward,
                2,
                SpanUnit::Week
            )]))
        );
    }

    #[test]
    fn test_from_json_explicit_seek_time_and_zone() {
        let json = r#"{ "alternative": { "date_times": [ { "date": {
            "kind": "relative",
            "explicit_seeks": [
                { "kind": "holiday_in_year", "holiday": "christmas", "year": 2025 },
                { "kind": "time", "hour": 9, "am_pm": "pm", "zone": { "offset": 120 } }
            ]
        } } ] } }"#;
        let expr = DateExpression::from_json(json).unwrap();
        let date = expr.alternative.unwrap().date_times[0].date.clone().unwrap();
        let Date::Relative(relative) = date else {
            panic!("expected a relative date");
        };
        assert_eq!(relative.explicit_seeks.len(), 2);
        assert_eq!(
            relative.explicit_seeks[1],
            ExplicitSeek::Time(ExplicitTime {
                hour: 9,
                minute: None,
                second: None,
                am_pm: Some(AmPm::Pm),
                zone: Some(ZoneToken::Offset(120)),
            })
        );
    }

    #[test]
    fn test_from_json_unknown_kind_is_malformed() {
        let json = r#"{ "alternative": { "date_times": [ { "date": { "kind": "lunar" } } ] } }"#;
        let err = DateExpression::from_json(json).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedAst(_)), "got: {err}");
    }

    #[test]
    fn test_from_json_unknown_field_is_malformed() {
        let json = r#"{ "alternative": { "date_times": [ { "daet": null } ] } }"#;
        let err = DateExpression::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Malformed AST"), "got: {err}");
    }
}

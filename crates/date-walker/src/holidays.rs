//! Named holidays and seasons, resolved per year.
//!
//! The holiday set follows US conventions. Floating holidays are defined by
//! their weekday-of-month rule, Easter by the anonymous Gregorian computus
//! (Meeus/Jones/Butcher). Seasons start on fixed approximations of the
//! equinoxes and solstices (Mar 20, Jun 21, Sep 22, Dec 21), mirrored for the
//! southern hemisphere.

use chrono::{NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{check_date, check_year, nth_weekday_of_month};
use crate::error::{ResolveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Holiday {
    AprilFoolsDay,
    BlackFriday,
    Christmas,
    ChristmasEve,
    ColumbusDay,
    EarthDay,
    Easter,
    ElectionDay,
    FathersDay,
    FlagDay,
    GoodFriday,
    GroundhogDay,
    Halloween,
    InaugurationDay,
    IndependenceDay,
    Kwanzaa,
    LaborDay,
    MemorialDay,
    MlkDay,
    MothersDay,
    NewYearsDay,
    NewYearsEve,
    PatriotDay,
    PresidentsDay,
    StPatricksDay,
    TaxDay,
    Thanksgiving,
    ValentinesDay,
    VeteransDay,
}

/// How a holiday's date is derived.
enum Rule {
    Fixed(u32, u32),
    /// Nth weekday of a month (negative counts from the end).
    Floating(u32, i32, Weekday),
    /// Offset in days from another holiday.
    After(Holiday, i64),
    Easter,
}

impl Holiday {
    fn rule(self) -> Rule {
        use Holiday::*;
        match self {
            NewYearsDay => Rule::Fixed(1, 1),
            InaugurationDay => Rule::Fixed(1, 20),
            GroundhogDay => Rule::Fixed(2, 2),
            ValentinesDay => Rule::Fixed(2, 14),
            StPatricksDay => Rule::Fixed(3, 17),
            AprilFoolsDay => Rule::Fixed(4, 1),
            TaxDay => Rule::Fixed(4, 15),
            EarthDay => Rule::Fixed(4, 22),
            FlagDay => Rule::Fixed(6, 14),
            IndependenceDay => Rule::Fixed(7, 4),
            PatriotDay => Rule::Fixed(9, 11),
            Halloween => Rule::Fixed(10, 31),
            VeteransDay => Rule::Fixed(11, 11),
            ChristmasEve => Rule::Fixed(12, 24),
            Christmas => Rule::Fixed(12, 25),
            Kwanzaa => Rule::Fixed(12, 26),
            NewYearsEve => Rule::Fixed(12, 31),
            MlkDay => Rule::Floating(1, 3, Weekday::Mon),
            PresidentsDay => Rule::Floating(2, 3, Weekday::Mon),
            MothersDay => Rule::Floating(5, 2, Weekday::Sun),
            MemorialDay => Rule::Floating(5, -1, Weekday::Mon),
            FathersDay => Rule::Floating(6, 3, Weekday::Sun),
            LaborDay => Rule::Floating(9, 1, Weekday::Mon),
            ColumbusDay => Rule::Floating(10, 2, Weekday::Mon),
            Thanksgiving => Rule::Floating(11, 4, Weekday::Thu),
            // Tuesday after the first Monday of November
            ElectionDay => Rule::Floating(11, 1, Weekday::Mon),
            BlackFriday => Rule::After(Thanksgiving, 1),
            GoodFriday => Rule::After(Easter, -2),
            Easter => Rule::Easter,
        }
    }
}

/// Date of `holiday` in `year`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use date_walker::holidays::{holiday_date, Holiday};
///
/// let thanksgiving = holiday_date(2024, Holiday::Thanksgiving).unwrap();
/// assert_eq!(thanksgiving, NaiveDate::from_ymd_opt(2024, 11, 28).unwrap());
/// ```
pub fn holiday_date(year: i32, holiday: Holiday) -> Result<NaiveDate> {
    check_year(year)?;
    let date = match holiday.rule() {
        Rule::Fixed(month, day) => fixed(year, month, day)?,
        Rule::Floating(month, index, weekday) => {
            let date = nth_weekday_of_month(year, month, index, weekday)?;
            if holiday == Holiday::ElectionDay {
                date + TimeDelta::days(1)
            } else {
                date
            }
        }
        Rule::After(base, days) => holiday_date(year, base)? + TimeDelta::days(days),
        Rule::Easter => easter_sunday(year)?,
    };
    check_date(date)
}

fn fixed(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ResolveError::UnsupportedYear(year.into()))
}

/// Western Easter Sunday for `year` (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Result<NaiveDate> {
    check_year(year)?;
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    fixed(year, month as u32, day as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    #[serde(alias = "autumn")]
    Fall,
    Winter,
}

/// Which half of the globe the season table is oriented for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

/// First day of `season` in `year`.
pub fn season_date(year: i32, season: Season, hemisphere: Hemisphere) -> Result<NaiveDate> {
    check_year(year)?;
    let season = match hemisphere {
        Hemisphere::Northern => season,
        Hemisphere::Southern => match season {
            Season::Spring => Season::Fall,
            Season::Summer => Season::Winter,
            Season::Fall => Season::Spring,
            Season::Winter => Season::Summer,
        },
    };
    let (month, day) = match season {
        Season::Spring => (3, 20),
        Season::Summer => (6, 21),
        Season::Fall => (9, 22),
        Season::Winter => (12, 21),
    };
    fixed(year, month, day)
}

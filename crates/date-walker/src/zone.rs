//! Timezones and zoned wall-clock values.
//!
//! The resolver works on wall-clock time ([`ZonedDateTime::local`]) and only
//! turns it into an instant when a capture is taken or an elapsed-time span
//! is applied. Local times that a DST transition makes ambiguous resolve to
//! the earlier instant; local times inside a spring-forward gap are read with
//! the offset in force before the gap, which moves them forward by the gap
//! length (02:30 on a 02:00→03:00 night becomes 03:30).

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::ast::ZoneToken;
use crate::error::{ResolveError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Iana(Tz),
    Fixed(FixedOffset),
}

impl Zone {
    /// Parse an IANA name (`America/New_York`, `UTC`), `Z`, or a numeric
    /// offset (`+02:00`, `-0530`, `+09`).
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("z") {
            return Ok(Zone::Fixed(Utc.fix()));
        }
        if s.starts_with('+') || s.starts_with('-') {
            return parse_offset(s)
                .map(Zone::Fixed)
                .ok_or_else(|| ResolveError::InvalidTimezone(format!("'{}'", s)));
        }
        s.parse::<Tz>()
            .map(Zone::Iana)
            .map_err(|_| ResolveError::InvalidTimezone(format!("'{}'", s)))
    }

    /// A fixed zone `minutes` east of UTC.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Zone::Fixed)
            .ok_or_else(|| ResolveError::InvalidTimezone(format!("offset of {minutes} minutes")))
    }

    pub fn from_token(token: &ZoneToken) -> Result<Self> {
        match token {
            ZoneToken::Named(name) => Zone::parse(name),
            ZoneToken::Offset(minutes) => Zone::from_offset_minutes(*minutes),
        }
    }

    /// Wall-clock reading of `instant` in this zone.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedYear`] if the local reading falls
    /// outside the representable range.
    pub fn to_local(&self, instant: DateTime<Utc>) -> Result<NaiveDateTime> {
        let utc = instant.naive_utc();
        let offset = match self {
            Zone::Iana(tz) => tz.offset_from_utc_datetime(&utc).fix(),
            Zone::Fixed(offset) => *offset,
        };
        utc.checked_add_offset(offset)
            .ok_or(ResolveError::UnsupportedYear(utc.year().into()))
    }

    /// Instant for the wall-clock time `local` in this zone.
    pub fn localize(&self, local: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            Zone::Fixed(offset) => {
                let utc = local - TimeDelta::seconds(offset.local_minus_utc().into());
                offset.from_utc_datetime(&utc)
            }
            Zone::Iana(tz) => match tz.from_local_datetime(&local) {
                LocalResult::Single(dt) => to_fixed(dt),
                LocalResult::Ambiguous(earliest, _) => to_fixed(earliest),
                LocalResult::None => {
                    let before = tz
                        .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                        .fix();
                    let utc = local - TimeDelta::seconds(before.local_minus_utc().into());
                    to_fixed(tz.from_utc_datetime(&utc))
                }
            },
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Iana(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn to_fixed<T: TimeZone>(dt: DateTime<T>) -> DateTime<FixedOffset> {
    let offset = dt.offset().fix();
    dt.with_timezone(&offset)
}

/// Parse `±HH:MM` or `±HHMM` with chrono, falling back to a bare `±HH`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    if let Ok(offset) = s.parse::<FixedOffset>() {
        return Some(offset);
    }
    let (sign, hours) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return None,
    };
    if hours.len() != 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    FixedOffset::east_opt(sign * hours.parse::<i32>().ok()? * 3600)
}

/// A wall-clock date/time together with the zone it is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedDateTime {
    pub local: NaiveDateTime,
    pub zone: Zone,
}

impl ZonedDateTime {
    pub fn from_instant(instant: DateTime<Utc>, zone: Zone) -> Result<Self> {
        Ok(ZonedDateTime {
            local: zone.to_local(instant)?,
            zone,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn to_fixed(&self) -> DateTime<FixedOffset> {
        self.zone.localize(self.local)
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.to_fixed().with_timezone(&Utc)
    }

    /// The same instant read in another zone.
    pub fn with_zone(&self, zone: Zone) -> Result<Self> {
        ZonedDateTime::from_instant(self.instant(), zone)
    }
}

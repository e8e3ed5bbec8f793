//! Module containing functionality related to BSON DateTimes.
//! For more information, see the documentation for the [`DateTime`] type.

use std::{
    fmt::{self, Display},
    time::{Duration, SystemTime},
};

use time::{
    Date,
    OffsetDateTime,
    PrimitiveDateTime,
    format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::error::{Error, Result};

/// Struct representing a BSON datetime.
/// Note: BSON datetimes have millisecond precision.
///
/// The shell writes datetimes as `ISODate("1998-02-12T00:01:00.023Z")` and reads them back from
/// `ISODate(...)`, `Date(<millis>)`, `new Date(<millis>)` and `{ "$date" : ... }`.
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dt = mongo_extjson::DateTime::parse_iso_str("1998-02-12 00:01:00.023")?;
/// let expected = mongo_extjson::DateTime::parse_rfc3339_str("1998-02-12T00:01:00.023Z")?;
/// assert_eq!(dt, expected);
/// assert_eq!(dt.to_iso_string().as_deref(), Some("1998-02-12T00:01:00.023Z"));
/// # Ok(())
/// # }
/// ```
///
/// ## Large Dates
/// The range of dates supported by `DateTime` is defined by [`DateTime::MIN`] and
/// [`DateTime::MAX`]. Only years 0000 through 9999 have an ISO-8601 text form; datetimes outside
/// that range are rendered by their millisecond count instead.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
pub struct DateTime(i64);

impl crate::DateTime {
    /// The latest possible date that can be represented in BSON.
    pub const MAX: Self = Self::from_millis(i64::MAX);

    /// The earliest possible date that can be represented in BSON.
    pub const MIN: Self = Self::from_millis(i64::MIN);

    /// Makes a new [`DateTime`] from the number of non-leap milliseconds since
    /// January 1, 1970 0:00:00 UTC (aka "UNIX timestamp").
    pub const fn from_millis(date: i64) -> Self {
        Self(date)
    }

    /// Returns a [`DateTime`] which corresponds to the current date and time.
    pub fn now() -> DateTime {
        Self::from_system_time(SystemTime::now())
    }

    fn from_time(dt: time::OffsetDateTime) -> Self {
        let millis = dt.unix_timestamp_nanos() / 1_000_000;
        match millis.try_into() {
            Ok(ts) => Self::from_millis(ts),
            _ => {
                if millis > 0 {
                    Self::MAX
                } else {
                    Self::MIN
                }
            }
        }
    }

    pub(crate) fn to_time_opt(self) -> Option<time::OffsetDateTime> {
        time::OffsetDateTime::UNIX_EPOCH.checked_add(time::Duration::milliseconds(self.0))
    }

    /// Convert the given [`std::time::SystemTime`] to a [`DateTime`].
    ///
    /// If the provided time is too far in the future or too far in the past to be represented
    /// by a BSON datetime, either [`DateTime::MAX`] or [`DateTime::MIN`] will be
    /// returned, whichever is closer.
    pub fn from_system_time(st: SystemTime) -> Self {
        match st.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(d) => {
                if d.as_millis() <= i64::MAX as u128 {
                    Self::from_millis(d.as_millis() as i64)
                } else {
                    Self::MAX
                }
            }
            // handle SystemTime from before the Unix Epoch
            Err(e) => {
                let millis = e.duration().as_millis();
                if millis > i64::MAX as u128 {
                    Self::MIN
                } else {
                    Self::from_millis(-(millis as i64))
                }
            }
        }
    }

    /// Convert this [`DateTime`] to a [`std::time::SystemTime`].
    pub fn to_system_time(self) -> SystemTime {
        if self.0 >= 0 {
            SystemTime::UNIX_EPOCH + Duration::from_millis(self.0 as u64)
        } else {
            // need to convert to i128 before calculating absolute value since i64::MIN.abs()
            // overflows and panics.
            SystemTime::UNIX_EPOCH - Duration::from_millis((self.0 as i128).unsigned_abs() as u64)
        }
    }

    /// Returns the number of non-leap-milliseconds since January 1, 1970 UTC.
    pub const fn timestamp_millis(self) -> i64 {
        self.0
    }

    /// Renders this datetime as `YYYY-MM-DDTHH:MM:SS.mmmZ` in UTC.
    ///
    /// Returns `None` for datetimes whose year falls outside 0000 through 9999.
    pub fn to_iso_string(self) -> Option<String> {
        let dt = self.to_time_opt()?;
        if !(0..=9999).contains(&dt.year()) {
            return None;
        }
        Some(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.millisecond()
        ))
    }

    /// Convert this [`DateTime`] to an RFC 3339 formatted string.
    pub fn try_to_rfc3339_string(self) -> Result<String> {
        self.to_time_opt()
            .ok_or_else(|| {
                Error::cannot_format_datetime(format!("{} ms is out of range", self.0))
            })?
            .format(&Rfc3339)
            .map_err(Error::cannot_format_datetime)
    }

    /// Convert the given RFC 3339 formatted string to a [`DateTime`], truncating it to millisecond
    /// precision.
    pub fn parse_rfc3339_str(s: impl AsRef<str>) -> Result<Self> {
        let odt = time::OffsetDateTime::parse(s.as_ref(), &Rfc3339)
            .map_err(Error::invalid_datetime_value)?;
        Ok(Self::from_time(odt))
    }

    /// Parses the date text accepted by `ISODate(...)`.
    ///
    /// RFC 3339 is tried first. Failing that, the looser shell form
    /// `YYYY-MM-DD[(T| )hh[:]mm[:]ss[.fff]][Z|±HH[:]MM]` is accepted, where a missing zone means
    /// UTC. The keywords `epoch` and `now` are also recognized.
    pub fn parse_iso_str(s: impl AsRef<str>) -> Result<Self> {
        let s = s.as_ref().trim();
        match s {
            "epoch" => return Ok(Self::from_millis(0)),
            "now" => return Ok(Self::now()),
            _ => {}
        }
        if let Ok(dt) = Self::parse_rfc3339_str(s) {
            return Ok(dt);
        }
        parse_lenient(s)
            .map(Self::from_time)
            .ok_or_else(|| Error::invalid_datetime_value(format!("\"{s}\" is not an ISO-8601 date")))
    }
}

/// The shell's looser ISO-8601 forms. A trailing `Z` or a missing zone both mean UTC.
fn parse_lenient(s: &str) -> Option<OffsetDateTime> {
    // date and time may also be separated by a space
    let s = s.replacen(' ', "T", 1);

    let with_offset = format_description!(
        "[year]-[month]-[day]T[hour][optional [:]][minute][optional [:]][second][optional [.[subsecond]]][offset_hour sign:mandatory][optional [:]][offset_minute]"
    );
    if let Ok(odt) = OffsetDateTime::parse(&s, with_offset) {
        return Some(odt);
    }

    let local = s.strip_suffix('Z').unwrap_or(&s);
    let date_time = format_description!(
        "[year]-[month]-[day]T[hour][optional [:]][minute][optional [:]][second][optional [.[subsecond]]]"
    );
    if let Ok(pdt) = PrimitiveDateTime::parse(local, date_time) {
        return Some(pdt.assume_utc());
    }
    Date::parse(local, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

impl fmt::Debug for crate::DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("DateTime");
        match self.to_iso_string() {
            Some(iso) => tup.field(&iso),
            _ => tup.field(&self.0),
        };
        tup.finish()
    }
}

impl Display for crate::DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso_string() {
            Some(iso) => f.write_str(&iso),
            _ => Display::fmt(&self.0, f),
        }
    }
}

impl From<SystemTime> for crate::DateTime {
    fn from(st: SystemTime) -> Self {
        Self::from_system_time(st)
    }
}

impl From<crate::DateTime> for SystemTime {
    fn from(dt: crate::DateTime) -> Self {
        dt.to_system_time()
    }
}

impl From<time::OffsetDateTime> for crate::DateTime {
    fn from(x: time::OffsetDateTime) -> Self {
        Self::from_time(x)
    }
}

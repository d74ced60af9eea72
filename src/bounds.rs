use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, NaiveTime, Timelike, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// Time-bound parsing and timestamp projection live here so the filter stays a pure comparison.

pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Tz {
  #[default]
  Local,
  Utc,
}

impl Tz {
  /// Wall-clock date and time of an epoch-millisecond timestamp in this zone.
  ///
  /// Returns `None` for timestamps outside chrono's representable range.
  pub fn wall_clock(self, epoch_ms: i64) -> Option<NaiveDateTime> {
    let utc = DateTime::<Utc>::from_timestamp_millis(epoch_ms)?;
    Some(match self {
      Tz::Local => utc.with_timezone(&Local).naive_local(),
      Tz::Utc => utc.naive_utc(),
    })
  }

  /// Epoch milliseconds of a wall-clock reading in this zone.
  ///
  /// A reading repeated by a fall-back transition resolves to its first occurrence. A reading
  /// skipped by a spring-forward gap is taken with the offset in force before the gap, which
  /// lands it after the gap (02:30 in a 02:00 to 03:00 gap becomes 03:30).
  pub fn instant_ms(self, wall: NaiveDateTime) -> Option<i64> {
    match self {
      Tz::Utc => Some(wall.and_utc().timestamp_millis()),
      Tz::Local => match wall.and_local_timezone(Local) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        LocalResult::None => {
          let before = (wall - Duration::hours(1)).and_local_timezone(Local).earliest()?;
          Some(before.timestamp_millis() + Duration::hours(1).num_milliseconds())
        }
      },
    }
  }

  /// Time of day (hour, minute, second) with the date and sub-second part dropped.
  pub fn time_of_day(self, epoch_ms: i64) -> Option<NaiveTime> {
    let wall = self.wall_clock(epoch_ms)?;
    NaiveTime::from_hms_opt(wall.hour(), wall.minute(), wall.second())
  }
}

/// The four optional, independent bounds. An absent bound is never applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBounds {
  pub start_time: Option<NaiveTime>,
  pub end_time: Option<NaiveTime>,
  pub start_date: Option<NaiveDateTime>,
  pub end_date: Option<NaiveDateTime>,
}

impl FilterBounds {
  pub fn is_empty(&self) -> bool {
    self.start_time.is_none() && self.end_time.is_none() && self.start_date.is_none() && self.end_date.is_none()
  }
}

/// Parse an `HH:mm:ss` time-of-day bound; `option` names the flag in the error.
pub fn parse_time_bound(option: &str, raw: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
    .with_context(|| format!("invalid {option} {raw:?}, expected HH:mm:ss"))
}

/// Parse a `YYYY-MM-DD HH:mm:ss` date bound; `option` names the flag in the error.
pub fn parse_date_bound(option: &str, raw: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT)
    .with_context(|| format!("invalid {option} {raw:?}, expected YYYY-MM-DD HH:mm:ss"))
}

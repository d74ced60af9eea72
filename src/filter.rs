use chrono::{NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::bounds::{FilterBounds, Tz};
use crate::model::{Entry, TimeMode};

/// Bounds resolved against the zone once per run.
///
/// Date bounds become epoch instants so they compare against the raw timestamp; a bound that has
/// no instant in the zone rejects every entry.
pub struct EntryFilter {
  mode: TimeMode,
  tz: Tz,
  start_time: Option<NaiveTime>,
  end_time: Option<NaiveTime>,
  start_date: Option<(NaiveDateTime, i64)>,
  end_date: Option<(NaiveDateTime, i64)>,
}

impl EntryFilter {
  pub fn new(mode: TimeMode, bounds: &FilterBounds, tz: Tz) -> Self {
    Self {
      mode,
      tz,
      start_time: bounds.start_time,
      end_time: bounds.end_time,
      start_date: bounds.start_date.map(|d| (d, tz.instant_ms(d).unwrap_or(i64::MAX))),
      end_date: bounds.end_date.map(|d| (d, tz.instant_ms(d).unwrap_or(i64::MIN))),
    }
  }

  /// Decide whether one entry survives every supplied bound.
  ///
  /// Bounds are inclusive: only values strictly before a start bound or strictly after an end
  /// bound are rejected. A timestamp with no time of day in the zone fails the time bounds.
  pub fn keeps(&self, entry: &Entry) -> bool {
    let ts = entry.timestamp_ms(self.mode);

    if self.start_time.is_some() || self.end_time.is_some() {
      let Some(tod) = self.tz.time_of_day(ts) else {
        return false;
      };
      if let Some(start) = self.start_time {
        if tod < start {
          return false;
        }
        debug!(entry = %entry.name, %start, "start-time filter passed");
      }
      if let Some(end) = self.end_time {
        if tod > end {
          return false;
        }
        debug!(entry = %entry.name, %end, "end-time filter passed");
      }
    }

    if let Some((start, start_ms)) = self.start_date {
      if ts < start_ms {
        return false;
      }
      debug!(entry = %entry.name, %start, "start-date filter passed");
    }
    if let Some((end, end_ms)) = self.end_date {
      if ts > end_ms {
        return false;
      }
      debug!(entry = %entry.name, %end, "end-date filter passed");
    }

    true
  }
}

/// Keep the entries that pass all bounds, preserving input order.
pub fn filter_entries(entries: Vec<Entry>, mode: TimeMode, bounds: &FilterBounds, tz: Tz) -> Vec<Entry> {
  if bounds.is_empty() {
    return entries;
  }
  let filter = EntryFilter::new(mode, bounds, tz);
  entries.into_iter().filter(|e| filter.keeps(e)).collect()
}

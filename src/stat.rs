use std::fs::Metadata;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::warn;

use crate::model::Entry;

/// Milliseconds since the epoch; negative for pre-epoch times.
pub fn system_time_ms(t: SystemTime) -> i64 {
  match t.duration_since(UNIX_EPOCH) {
    Ok(d) => d.as_millis() as i64,
    Err(e) => -(e.duration().as_millis() as i64),
  }
}

#[cfg(unix)]
fn change_time_ms(meta: &Metadata) -> Result<i64> {
  use std::os::unix::fs::MetadataExt;
  Ok(meta.ctime() * 1_000 + meta.ctime_nsec() / 1_000_000)
}

#[cfg(not(unix))]
fn change_time_ms(meta: &Metadata) -> Result<i64> {
  let t = meta.created().or_else(|_| meta.modified())?;
  Ok(system_time_ms(t))
}

/// Stat `base/name` (following symlinks) and capture its three timestamps.
pub fn read_entry(base: &Path, name: &str) -> Result<Entry> {
  let path = base.join(name);
  let meta = std::fs::metadata(&path).with_context(|| format!("stat {}", path.display()))?;

  let access_ms = system_time_ms(meta.accessed().with_context(|| format!("atime of {}", path.display()))?);
  let modify_ms = system_time_ms(meta.modified().with_context(|| format!("mtime of {}", path.display()))?);
  let change_ms = change_time_ms(&meta).with_context(|| format!("ctime of {}", path.display()))?;

  Ok(Entry {
    name: name.to_string(),
    access_ms,
    modify_ms,
    change_ms,
  })
}

/// Stat every name in parallel, returning entries in the order of `names`.
///
/// The first failure aborts the run unless `skip_unreadable` is set, in which case the entry is
/// dropped with a warning.
pub fn collect_entries(base: &Path, names: &[String], skip_unreadable: bool) -> Result<Vec<Entry>> {
  let results: Vec<Result<Entry>> = names.par_iter().map(|name| read_entry(base, name)).collect();

  let mut entries = Vec::with_capacity(results.len());
  for result in results {
    match result {
      Ok(entry) => entries.push(entry),
      Err(err) if skip_unreadable => warn!("skipping unreadable entry: {:#}", err),
      Err(err) => return Err(err),
    }
  }

  Ok(entries)
}

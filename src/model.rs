use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which of an entry's timestamps drives the filters.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum TimeMode {
  Atime,
  #[default]
  Mtime,
  Ctime,
}

/// A matched directory entry with its three timestamps in epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
  pub name: String,
  pub access_ms: i64,
  pub modify_ms: i64,
  pub change_ms: i64,
}

impl Entry {
  pub fn timestamp_ms(&self, mode: TimeMode) -> i64 {
    match mode {
      TimeMode::Atime => self.access_ms,
      TimeMode::Mtime => self.modify_ms,
      TimeMode::Ctime => self.change_ms,
    }
  }
}

/// JSON shape for `--format json`.
#[derive(Debug, Serialize)]
pub struct EntryReport {
  pub name: String,
  pub atime: String,
  pub mtime: String,
  pub ctime: String,
}

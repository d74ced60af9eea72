use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::bounds::Tz;
use crate::cli::EffectiveConfig;
use crate::model::{Entry, EntryReport};
use crate::util;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Plain,
  Json,
}

pub fn render_plain(entries: &[Entry], delimiter: &str) -> String {
  entries
    .iter()
    .map(|e| e.name.as_str())
    .collect::<Vec<_>>()
    .join(delimiter)
}

pub fn build_reports(entries: &[Entry], tz: Tz) -> Vec<EntryReport> {
  entries
    .iter()
    .map(|e| EntryReport {
      name: e.name.clone(),
      atime: util::iso_in_tz(e.access_ms, tz),
      mtime: util::iso_in_tz(e.modify_ms, tz),
      ctime: util::iso_in_tz(e.change_ms, tz),
    })
    .collect()
}

/// Write the filtered entries in the configured format. Plain output is always exactly one line.
pub fn write_report<W: Write>(out: &mut W, entries: &[Entry], cfg: &EffectiveConfig) -> Result<()> {
  match cfg.format {
    OutputFormat::Plain => {
      let line = render_plain(entries, &cfg.delimiter);
      if cfg.color && !line.is_empty() {
        writeln!(out, "{}", line.red().bold())?;
      } else {
        writeln!(out, "{}", line)?;
      }
    }
    OutputFormat::Json => {
      let reports = build_reports(entries, cfg.tz);
      serde_json::to_writer_pretty(&mut *out, &reports)?;
      writeln!(out)?;
    }
  }

  out.flush()?;
  Ok(())
}

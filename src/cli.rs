use std::ffi::OsString;
use std::io::IsTerminal;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::bounds::{FilterBounds, Tz, parse_date_bound, parse_time_bound};
use crate::listing;
use crate::model::TimeMode;
use crate::render::OutputFormat;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "ls-extend",
    version,
    disable_version_flag = true,
    about = "List directory entries whose access, modify, or change time falls in a window",
    long_about = None,
    after_help = "Example: ls-extend . -st 09:00:00 -et 17:30:00"
)]
pub struct Cli {
  /// Directory to list
  pub target: Option<String>,

  /// Which timestamp to filter on
  #[arg(short = 'm', long, value_enum, default_value_t = TimeMode::Mtime)]
  pub mode: TimeMode,

  /// Glob pattern matched against entries of the target directory
  #[arg(short = 'p', long, default_value = "*")]
  pub pattern: String,

  /// Separator placed between entries in the output line
  #[arg(short = 'd', long, default_value = " ", allow_hyphen_values = true)]
  pub delimiter: String,

  /// Earliest time of day to keep, HH:mm:ss (alias: -st)
  #[arg(long, value_name = "HH:mm:ss")]
  pub start_time: Option<String>,

  /// Latest time of day to keep, HH:mm:ss (alias: -et)
  #[arg(long, value_name = "HH:mm:ss")]
  pub end_time: Option<String>,

  /// Earliest date to keep, "YYYY-MM-DD HH:mm:ss" (alias: -sd)
  #[arg(long, value_name = "YYYY-MM-DD HH:mm:ss")]
  pub start_date: Option<String>,

  /// Latest date to keep, "YYYY-MM-DD HH:mm:ss" (alias: -ed)
  #[arg(long, value_name = "YYYY-MM-DD HH:mm:ss")]
  pub end_date: Option<String>,

  /// Time zone for time-of-day derivation and date bounds
  #[arg(long, value_enum, default_value_t = Tz::Local)]
  pub tz: Tz,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
  pub format: OutputFormat,

  /// When to color plain output
  #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
  pub color: ColorChoice,

  /// Skip entries that cannot be stat'ed (with a warning) instead of aborting
  #[arg(long)]
  pub skip_unreadable: bool,

  /// Log filter decisions to stderr
  #[arg(long)]
  pub debug: bool,

  /// Print version
  #[arg(short = 'v', long, action = ArgAction::Version)]
  pub version: Option<bool>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Print the effective configuration as JSON to stderr (hidden; diagnostics)
  #[arg(long, hide = true)]
  pub print_config: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ColorChoice {
  Auto,
  Always,
  Never,
}

impl ColorChoice {
  pub fn resolve(self) -> bool {
    match self {
      ColorChoice::Always => true,
      ColorChoice::Never => false,
      ColorChoice::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub target: String, // absolute path for stability
  pub mode: TimeMode,
  pub pattern: String,
  pub delimiter: String,
  pub bounds: FilterBounds,
  pub tz: Tz,
  pub format: OutputFormat,
  pub color: bool,
  pub skip_unreadable: bool,
}

const SHORT_ALIASES: [(&str, &str); 4] = [
  ("-st", "--start-time"),
  ("-et", "--end-time"),
  ("-sd", "--start-date"),
  ("-ed", "--end-date"),
];

/// Flags whose next argument is a value and must not be rewritten.
const VALUE_FLAGS: [&str; 13] = [
  "-m",
  "--mode",
  "-p",
  "--pattern",
  "-d",
  "--delimiter",
  "--start-time",
  "--end-time",
  "--start-date",
  "--end-date",
  "--tz",
  "--format",
  "--color",
];

/// Rewrite the two-letter single-dash aliases (`-st`, `-et`, `-sd`, `-ed`) to their long forms.
///
/// clap short flags are single characters, so these are expanded before parsing. Both `-st VALUE`
/// and `-st=VALUE` are accepted. The value of a value-taking flag is never rewritten, and
/// everything after a bare `--` is left alone.
pub fn expand_short_aliases<I>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = OsString>,
{
  let mut out = Vec::new();
  let mut passthrough = false;
  let mut expects_value = false;

  for arg in args {
    if passthrough || std::mem::take(&mut expects_value) {
      out.push(arg);
      continue;
    }
    let Some(s) = arg.to_str() else {
      out.push(arg);
      continue;
    };
    if s == "--" {
      passthrough = true;
      out.push(arg);
      continue;
    }

    let mut rewritten = None;
    for (short, long) in SHORT_ALIASES {
      if s == short {
        rewritten = Some(OsString::from(long));
      } else if let Some(value) = s.strip_prefix(short).and_then(|rest| rest.strip_prefix('=')) {
        rewritten = Some(OsString::from(format!("{long}={value}")));
      }
    }
    let arg = rewritten.unwrap_or(arg);
    expects_value = arg.to_str().is_some_and(|a| VALUE_FLAGS.contains(&a));
    out.push(arg);
  }

  out
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  // Target first: nothing else is worth validating without it.
  let target = listing::validate_target(cli.target.as_deref().unwrap_or(""))?;

  let bounds = FilterBounds {
    start_time: cli
      .start_time
      .as_deref()
      .map(|s| parse_time_bound("--start-time", s))
      .transpose()?,
    end_time: cli
      .end_time
      .as_deref()
      .map(|s| parse_time_bound("--end-time", s))
      .transpose()?,
    start_date: cli
      .start_date
      .as_deref()
      .map(|s| parse_date_bound("--start-date", s))
      .transpose()?,
    end_date: cli
      .end_date
      .as_deref()
      .map(|s| parse_date_bound("--end-date", s))
      .transpose()?,
  };

  Ok(EffectiveConfig {
    target: util::canonicalize_lossy(&target),
    mode: cli.mode,
    pattern: cli.pattern,
    delimiter: cli.delimiter,
    bounds,
    tz: cli.tz,
    format: cli.format,
    color: cli.color.resolve(),
    skip_unreadable: cli.skip_unreadable,
  })
}

// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, timestamp formatting, logging setup, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; epoch milliseconds; paths; clap CommandFactory
// outputs: Canonicalized paths, RFC3339 timestamps, man page text
// side_effects: init_tracing installs the global subscriber once
// invariants:
// - iso_in_tz is seconds-precision and uses Z for UTC
// - logs go to stderr only; stdout carries the report
// errors: render_man_page surfaces IO errors from clap_mangen
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

use crate::bounds::Tz;

pub const LOG_ENV: &str = "LS_EXTEND_LOG";

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// Formats an epoch-millisecond timestamp as RFC3339 in the given zone.
/// Out-of-range values render as the raw millisecond count.
pub fn iso_in_tz(epoch_ms: i64, tz: Tz) -> String {
  let Some(dt) = DateTime::<Utc>::from_timestamp_millis(epoch_ms) else {
    return epoch_ms.to_string();
  };

  match tz {
    Tz::Utc => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    Tz::Local => dt.with_timezone(&Local).to_rfc3339_opts(SecondsFormat::Secs, true),
  }
}

/// Install the stderr fmt subscriber.
///
/// `--debug` forces debug output for this crate; otherwise `LS_EXTEND_LOG` is honored, falling
/// back to `warn`.
pub fn init_tracing(debug: bool) {
  let filter = if debug {
    EnvFilter::new("ls_extend=debug")
  } else {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .with_target(false)
    .try_init();
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}

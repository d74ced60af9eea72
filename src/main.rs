use anyhow::Result;
use clap::Parser;

mod bounds;
mod cli;
mod filter;
mod listing;
mod model;
mod pipeline;
mod render;
mod stat;
mod util;

use crate::cli::{Cli, expand_short_aliases, normalize};
use crate::listing::MissingTarget;

/// Exit status for a missing or nonexistent target directory.
const EXIT_MISSING_TARGET: i32 = 255;

fn main() -> Result<()> {
  let cli = Cli::parse_from(expand_short_aliases(std::env::args_os()));

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  util::init_tracing(cli.debug);
  let print_config = cli.print_config;

  // Phase 1: validate target and normalize options
  let cfg = match normalize(cli) {
    Ok(cfg) => cfg,
    Err(err) => {
      if let Some(missing) = err.downcast_ref::<MissingTarget>() {
        eprintln!("{}", missing);
        std::process::exit(EXIT_MISSING_TARGET);
      }
      return Err(err);
    }
  };

  if print_config {
    eprintln!("{}", serde_json::to_string_pretty(&cfg)?);
  }

  colored::control::set_override(cfg.color);

  // Phase 2: enumerate, stat, filter, report
  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  pipeline::run(&cfg, &mut out)?;

  Ok(())
}

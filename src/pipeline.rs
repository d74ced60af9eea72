// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run one listing pass: enumerate, stat, filter, report
// role: processing/orchestrator
// inputs: EffectiveConfig (validated target, parsed bounds), output writer
// outputs: One report written to the writer
// side_effects: Reads directory listings and metadata; writes to the given writer
// invariants:
// - enumeration completes before any stat call; all stats complete before filtering
// - surviving entries are an ordered subsequence of the enumerated names
// errors: First enumeration/stat error aborts the pass before anything is written
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::cli::EffectiveConfig;
use crate::{filter, listing, render, stat};

pub fn run<W: Write>(cfg: &EffectiveConfig, out: &mut W) -> Result<()> {
  let base = Path::new(&cfg.target);

  let names = listing::enumerate(base, &cfg.pattern)?;
  debug!(count = names.len(), pattern = %cfg.pattern, "enumerated entries");

  let entries = stat::collect_entries(base, &names, cfg.skip_unreadable)?;
  let kept = filter::filter_entries(entries, cfg.mode, &cfg.bounds, cfg.tz);
  debug!(kept = kept.len(), "filter complete");

  render::write_report(out, &kept, cfg)
}

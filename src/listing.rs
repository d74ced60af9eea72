// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Validate the target directory and expand the glob pattern into entry names relative to it
// role: input/enumeration
// inputs: Raw target path string; canonical base directory; glob pattern
// outputs: Validated PathBuf; Vec<String> of relative entry names in matcher order
// side_effects: Reads directory listings
// invariants:
// - names are relative to the base directory and appear in glob order
// - metacharacters in the base path are escaped; only the pattern is interpreted
// - leading-dot names match only when the aligned pattern component spells the dot
// - `.` and `..` are never returned; an empty pattern yields no names
// errors: MissingTarget for empty/nonexistent targets; pattern and read errors carry pattern + base context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

/// The target path was empty or does not exist. `main` maps this to exit code 255.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTarget {
  pub path: String,
}

impl fmt::Display for MissingTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "filePath: {} does not exist!", self.path)
  }
}

impl std::error::Error for MissingTarget {}

pub fn validate_target(raw: &str) -> Result<PathBuf> {
  let path = Path::new(raw);
  if raw.is_empty() || !path.exists() {
    return Err(MissingTarget { path: raw.to_string() }.into());
  }
  Ok(path.to_path_buf())
}

fn match_options() -> MatchOptions {
  // glob drops every dot-entry up front when this is set, so hidden names are screened in
  // `is_visible` instead.
  MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
  }
}

/// A match is visible when it has no `.`/`..` components and each leading-dot component lines up
/// with a pattern component that spells the dot. When `**` makes the depths differ, hidden
/// components are never revealed.
fn is_visible(rel: &Path, pattern: &str) -> bool {
  let names: Vec<String> = rel
    .components()
    .map(|c| c.as_os_str().to_string_lossy().to_string())
    .collect();
  if names.is_empty() {
    return false;
  }

  let parts: Vec<&str> = pattern.split('/').filter(|p| !p.is_empty()).collect();
  let aligned = parts.len() == names.len();

  names.iter().enumerate().all(|(i, name)| {
    if name == "." || name == ".." {
      return false;
    }
    !name.starts_with('.') || (aligned && parts[i].starts_with('.'))
  })
}

/// Expand `pattern` under `base` and return the matches relative to `base`.
///
/// An empty pattern matches nothing.
pub fn enumerate(base: &Path, pattern: &str) -> Result<Vec<String>> {
  if pattern.is_empty() {
    return Ok(Vec::new());
  }

  let base_str = base.to_string_lossy();
  let escaped = Pattern::escape(&base_str);
  let full = format!("{}/{}", escaped.trim_end_matches('/'), pattern);

  let paths = glob::glob_with(&full, match_options())
    .with_context(|| format!("invalid --pattern {pattern:?}"))?;

  let mut names = Vec::new();
  for item in paths {
    let path = item.with_context(|| format!("reading entries matching {pattern:?} under {}", base.display()))?;
    let rel = path.strip_prefix(base).unwrap_or(&path);
    if is_visible(rel, pattern) {
      names.push(rel.to_string_lossy().to_string());
    }
  }

  Ok(names)
}

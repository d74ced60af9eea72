use predicates::prelude::*;
use test_support::{FixtureDir, cmd_bin, utc_epoch};

#[test]
fn delimiter_joins_survivors() {
  let fx = FixtureDir::new();
  fx.file_at("x", utc_epoch(2025, 8, 15, 10, 0, 0));
  fx.file_at("y", utc_epoch(2025, 8, 15, 11, 0, 0));
  cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["--delimiter", ","])
    .assert()
    .success()
    .stdout("x,y\n");
}

#[test]
fn no_matches_prints_empty_line() {
  let fx = FixtureDir::new();
  fx.file_at("a.txt", utc_epoch(2025, 8, 15, 10, 0, 0));
  cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["-p", "*.log"])
    .assert()
    .code(0)
    .stdout("\n");
}

#[test]
fn pattern_selects_entries() {
  let fx = FixtureDir::new();
  fx.file_at("a.txt", utc_epoch(2025, 8, 15, 10, 0, 0));
  fx.file_at("b.log", utc_epoch(2025, 8, 15, 10, 0, 0));
  fx.file_at("c.log", utc_epoch(2025, 8, 15, 10, 0, 0));
  cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["-p", "*.log", "-d", "\n"])
    .assert()
    .success()
    .stdout("b.log\nc.log\n");
}

#[test]
fn color_always_wraps_line_in_ansi() {
  let fx = FixtureDir::new();
  fx.file_at("a.txt", utc_epoch(2025, 8, 15, 10, 0, 0));
  cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["--color", "always"])
    .assert()
    .success()
    .stdout(predicate::str::contains("\u{1b}[").and(predicate::str::contains("a.txt")));
}

#[test]
fn json_format_reports_times() {
  let fx = FixtureDir::new();
  fx.file_at("a.txt", utc_epoch(2024, 9, 12, 0, 30, 0));
  let out = cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["--format", "json", "--tz", "utc"])
    .output()
    .unwrap();
  assert!(out.status.success());
  let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  let arr = v.as_array().unwrap();
  assert_eq!(arr.len(), 1);
  assert_eq!(arr[0]["name"], "a.txt");
  assert_eq!(arr[0]["mtime"], "2024-09-12T00:30:00Z");
  assert_eq!(arr[0]["atime"], "2024-09-12T00:30:00Z");
  assert!(arr[0]["ctime"].is_string());
}

#[test]
fn debug_logs_go_to_stderr_only() {
  let fx = FixtureDir::new();
  fx.file_at("a.txt", utc_epoch(2025, 8, 15, 10, 0, 0));
  cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["--tz", "utc", "-st", "09:00:00", "--debug"])
    .assert()
    .success()
    .stdout("a.txt\n")
    .stderr(predicate::str::contains("start-time filter passed"));
}

#[test]
fn print_config_dumps_effective_config() {
  let fx = FixtureDir::new();
  cmd_bin("ls-extend")
    .arg(fx.path())
    .args(["--print-config", "-m", "atime"])
    .assert()
    .success()
    .stderr(predicate::str::contains("\"mode\": \"atime\""));
}

#[test]
fn hidden_entries_need_a_dot_pattern() {
  let fx = FixtureDir::new();
  fx.file_at(".env", utc_epoch(2025, 8, 15, 10, 0, 0));
  fx.file_at("x", utc_epoch(2025, 8, 15, 10, 0, 0));

  cmd_bin("ls-extend").arg(fx.path()).args(["-p", ".*"]).assert().success().stdout(".env\n");
  cmd_bin("ls-extend").arg(fx.path()).args(["-p", ".?*"]).assert().success().stdout(".env\n");
  cmd_bin("ls-extend").arg(fx.path()).args(["-p", "*"]).assert().success().stdout("x\n");
}

#[test]
fn empty_pattern_prints_empty_line() {
  let fx = FixtureDir::new();
  fx.file_at("a.txt", utc_epoch(2025, 8, 15, 10, 0, 0));
  cmd_bin("ls-extend").arg(fx.path()).args(["-p", ""]).assert().code(0).stdout("\n");
}

#[test]
fn delimiter_may_look_like_a_bound_alias() {
  let fx = FixtureDir::new();
  fx.file_at("a", utc_epoch(2025, 8, 15, 10, 0, 0));
  fx.file_at("b", utc_epoch(2025, 8, 15, 11, 0, 0));
  cmd_bin("ls-extend").arg(fx.path()).args(["-d", "-st"]).assert().success().stdout("a-stb\n");
}

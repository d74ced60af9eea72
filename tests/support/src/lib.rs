//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support" }
//! ```
//!
//! Then in tests:
//! ```rust,no_run
//! use test_support::{init_tracing, FixtureDir};
//!
//! init_tracing();
//! let fx = FixtureDir::new();
//! fx.file_at("a.txt", test_support::utc_epoch(2025, 8, 15, 10, 0, 0));
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::{File, FileTimes};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Coloring and log filters are pinned so output stays byte-stable regardless of the caller's
/// environment.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    cmd.env("NO_COLOR", "1").env_remove("LS_EXTEND_LOG");
    cmd
}

/// Seconds since the epoch for a UTC wall-clock instant.
pub fn utc_epoch(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> u64 {
    let dt = chrono::NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap_or_else(|| panic!("invalid fixture instant {y}-{mo}-{d} {h}:{mi}:{s}"));
    dt.and_utc().timestamp() as u64
}

/// A temp directory populated with entries whose access/modify times are pinned.
///
/// Deleted on drop.
pub struct FixtureDir {
    dir: tempfile::TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }

    /// Create an empty file with both atime and mtime set to `epoch_secs`.
    pub fn file_at(&self, rel: &str, epoch_secs: u64) -> PathBuf {
        let t = UNIX_EPOCH + Duration::from_secs(epoch_secs);
        self.file_with_times(rel, t, t)
    }

    /// Create an empty file with distinct access and modify times.
    pub fn file_with_times(&self, rel: &str, accessed: SystemTime, modified: SystemTime) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("failed to create {}: {e}", parent.display()));
        }
        let f = File::create(&path).unwrap_or_else(|e| panic!("failed to create {}: {e}", path.display()));
        f.set_times(FileTimes::new().set_accessed(accessed).set_modified(modified))
            .unwrap_or_else(|e| panic!("failed to set times on {}: {e}", path.display()));
        path
    }
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

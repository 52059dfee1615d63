//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::Metadata;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "XZARC_LOG";

/// Install the stderr log subscriber, filtered by `XZARC_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Ownership and permission line for a file.
#[cfg(unix)]
pub fn describe_owner(meta: &Metadata) -> String {
    use std::os::unix::fs::MetadataExt;
    format!(
        "owner uid = {}, gid = {}, mode = {:#o}",
        meta.uid(),
        meta.gid(),
        meta.mode()
    )
}

/// Ownership and permission line for a file.
#[cfg(not(unix))]
pub fn describe_owner(meta: &Metadata) -> String {
    format!("read-only = {}", meta.permissions().readonly())
}

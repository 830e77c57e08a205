//! Browser launcher for the backend wake-up page.
//!
//! Free-tier hosts put idle backends to sleep; visiting their URL in a
//! browser starts them again.

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Platform openers tried in order, as program plus leading arguments.
fn openers() -> Vec<(&'static str, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        vec![("open", vec![])]
    } else if cfg!(target_os = "windows") {
        vec![("cmd", vec!["/C", "start", ""])]
    } else {
        vec![
            ("xdg-open", vec![]),
            ("gio", vec!["open"]),
            ("sensible-browser", vec![]),
        ]
    }
}

/// Open `url` in the default browser.
///
/// # Arguments
/// * `url` - Page to open
///
/// # Returns
/// * `Result<()>` - Success once an opener was spawned
///
/// # Details
/// The child's output is discarded so it cannot draw over the TUI.
pub fn open_in_browser(url: &str) -> Result<()> {
    let candidates = openers();
    for (program, args) in &candidates {
        let spawned = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if spawned.is_ok() {
            return Ok(());
        }
    }

    let tried: Vec<&str> = candidates.iter().map(|(p, _)| *p).collect();
    Err(anyhow::anyhow!("no browser opener found (tried {})", tried.join(", ")))
        .with_context(|| format!("Failed to open {}", url))
}

//! Terminal-side host capabilities: fullscreen layout and external links

use tokio::process::Command;
use tokio::task::JoinHandle;

use super::{FullscreenHost, MediaError};

/// In a terminal "fullscreen" means dropping the shell chrome around the
/// viewer, which is always possible.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    fullscreen: bool,
}

impl FullscreenHost for TerminalSurface {
    fn set_fullscreen(&mut self, on: bool) -> Result<(), MediaError> {
        self.fullscreen = on;
        tracing::debug!(fullscreen = self.fullscreen, "Terminal layout switched");
        Ok(())
    }
}

/// Open `url` in the system browser, detached from the terminal.
///
/// The launcher is reaped on a background task. Must be called from within
/// the tokio runtime.
pub fn open_external(url: &str) -> Result<(), MediaError> {
    #[cfg(target_os = "macos")]
    let command = Command::new("open");

    #[cfg(target_os = "windows")]
    let command = {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let command = Command::new("xdg-open");

    launch(command, url).map(|_| ())
}

/// Spawn `command` with `url` and wait for it in the background so that no
/// zombie outlives the launcher
fn launch(mut command: Command, url: &str) -> Result<JoinHandle<()>, MediaError> {
    let mut child = command
        .arg(url)
        .spawn()
        .map_err(|e| MediaError::Load(format!("could not open {url}: {e}")))?;

    Ok(tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => tracing::debug!(%status, "Link launcher exited"),
            Err(e) => tracing::warn!(error = %e, "Could not reap link launcher"),
        }
    }))
}

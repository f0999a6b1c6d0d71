//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::media::AutoplayPolicy;
use crate::model::{CourseFile, ResourceDescriptor, ResourceKind};

#[derive(Debug, Parser)]
#[command(name = "nexus-viewer", version, about = "Terminal viewer for Nexus 4D course materials")]
pub struct Cli {
    /// JSON course file holding one material or a list of them
    pub course: Option<PathBuf>,

    /// Material type when passing a single resource inline
    #[arg(long = "type", value_enum, requires = "url", conflicts_with = "course")]
    pub kind: Option<ResourceKind>,

    #[arg(long, requires = "kind")]
    pub url: Option<String>,

    #[arg(long, requires = "kind")]
    pub title: Option<String>,

    /// Video length in seconds for the simulated clock
    #[arg(long, requires = "kind")]
    pub duration: Option<f64>,

    /// Idle time before on-screen controls hide
    #[arg(long, env = "NEXUS_HIDE_AFTER_MS", default_value_t = 3000)]
    pub hide_after_ms: u64,

    /// Seconds skipped by the arrow keys
    #[arg(long, default_value_t = 5.0)]
    pub seek_step: f64,

    /// Do not try to start videos on mount
    #[arg(long)]
    pub no_autoplay: bool,

    /// Behave like a runtime that rejects unattended playback
    #[arg(long)]
    pub block_autoplay: bool,

    /// Quit once a video plays to the end
    #[arg(long)]
    pub exit_on_end: bool,
}

impl Cli {
    pub fn materials(&self) -> Result<Vec<ResourceDescriptor>> {
        if let (Some(kind), Some(url)) = (self.kind, self.url.as_ref()) {
            return Ok(vec![ResourceDescriptor {
                kind,
                url: url.clone(),
                title: self.title.clone(),
                duration: self.duration,
            }]);
        }

        let Some(path) = self.course.as_ref() else {
            bail!("no course material given: pass a course file or --type and --url");
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading course file {}", path.display()))?;
        let course: CourseFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing course file {}", path.display()))?;
        let materials = course.into_materials();
        if materials.is_empty() {
            bail!("course file {} lists no materials", path.display());
        }
        Ok(materials)
    }

    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            hide_after: Duration::from_millis(self.hide_after_ms),
            seek_step: self.seek_step.abs(),
            autoplay: !self.no_autoplay,
            ..ViewerConfig::default()
        }
    }

    pub fn autoplay_policy(&self) -> AutoplayPolicy {
        if self.block_autoplay {
            AutoplayPolicy::Blocked
        } else {
            AutoplayPolicy::Allowed
        }
    }
}

/// Tuning shared by every mounted viewer
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub hide_after: Duration,
    pub seek_feedback_for: Duration,
    pub seek_step: f64,
    pub volume_step: f64,
    pub zoom_step: f64,
    pub autoplay: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            hide_after: Duration::from_secs(3),
            seek_feedback_for: Duration::from_millis(800),
            seek_step: 5.0,
            volume_step: 0.1,
            zoom_step: 0.1,
            autoplay: true,
        }
    }
}

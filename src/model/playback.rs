//! Video playback state and the transitions that keep it consistent

use super::types::{SeekDirection, SeekFeedback};

/// Playback rates the transport offers
pub const SUPPORTED_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

pub const DEFAULT_VOLUME: f64 = 1.0;

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub position: f64,
    pub duration: f64,
    pub progress_percent: f64,
    pub is_playing: bool,
    pub is_buffering: bool,
    pub is_ended: bool,
    pub volume: f64,
    pub is_muted: bool,
    volume_before_mute: f64,
    pub playback_rate: f64,
    pub fullscreen: bool,
    seek_token: u64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            position: 0.0,
            duration: 0.0,
            progress_percent: 0.0,
            is_playing: false,
            is_buffering: true,
            is_ended: false,
            volume: DEFAULT_VOLUME,
            is_muted: false,
            volume_before_mute: DEFAULT_VOLUME,
            playback_rate: 1.0,
            fullscreen: false,
            seek_token: 0,
        }
    }
}

impl PlaybackState {
    pub fn begin_playing(&mut self) {
        self.is_playing = true;
        self.is_ended = false;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Clamp `position + delta` into `[0, duration]`
    pub fn seek_target(&self, delta_secs: f64) -> f64 {
        let target = self.position + delta_secs;
        if target.is_nan() {
            return self.position;
        }
        target.clamp(0.0, self.duration)
    }

    /// Move to `position + delta` and produce a fresh feedback cue for it
    pub fn seek_by(&mut self, delta_secs: f64) -> SeekFeedback {
        self.set_position(self.seek_target(delta_secs));
        self.seek_token += 1;
        SeekFeedback {
            direction: if delta_secs < 0.0 {
                SeekDirection::Backward
            } else {
                SeekDirection::Forward
            },
            step_secs: delta_secs.abs(),
            token: self.seek_token,
        }
    }

    pub fn fraction_target(&self, percent: f64) -> f64 {
        let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
        self.duration * percent / 100.0
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = if position.is_finite() {
            position.clamp(0.0, self.duration)
        } else {
            0.0
        };
        self.progress_percent = self.compute_progress();
    }

    /// Native progress tick. A missing or non-finite duration reads as zero.
    pub fn time_update(&mut self, position: f64, duration: f64) {
        self.duration = sanitize_duration(duration);
        if self.duration > 0.0 {
            self.set_position(position);
        } else {
            self.position = if position.is_finite() { position.max(0.0) } else { 0.0 };
            self.progress_percent = 0.0;
        }
    }

    fn compute_progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Returns the volume actually applied
    pub fn set_volume(&mut self, value: f64) -> f64 {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.volume = value;
        if value > 0.0 {
            self.is_muted = false;
        }
        value
    }

    /// Target for a relative volume step, snapped to hundredths so that
    /// repeated key steps land on exact values
    pub fn volume_step_target(&self, delta: f64) -> f64 {
        round_hundredths(self.volume + delta)
    }

    pub fn toggle_mute(&mut self) -> bool {
        if self.is_muted {
            self.is_muted = false;
            self.volume = self.volume_before_mute;
        } else {
            self.volume_before_mute = self.volume;
            self.is_muted = true;
        }
        self.is_muted
    }

    /// Volume the element should output
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    pub fn is_supported_rate(rate: f64) -> bool {
        SUPPORTED_RATES.iter().any(|r| (r - rate).abs() < f64::EPSILON)
    }

    pub fn next_rate(&self) -> f64 {
        let index = SUPPORTED_RATES
            .iter()
            .position(|r| (r - self.playback_rate).abs() < f64::EPSILON)
            .unwrap_or(2);
        SUPPORTED_RATES[(index + 1) % SUPPORTED_RATES.len()]
    }

    /// Natural completion. Returns true only on the first report per run.
    pub fn mark_ended(&mut self) -> bool {
        if self.is_ended {
            return false;
        }
        self.is_ended = true;
        self.is_playing = false;
        self.is_buffering = false;
        if self.duration > 0.0 {
            self.set_position(self.duration);
        }
        true
    }
}

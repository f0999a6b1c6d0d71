//! Video transport operations

use crate::media::{MediaError, PlayOrigin};
use crate::model::PlaybackState;

use super::timers::ScopedTimer;
use super::AppController;

impl AppController {
    pub async fn toggle_play(&self) {
        let mut model = self.model.lock().await;
        let Some(playback) = model.playback_mut() else {
            return;
        };
        let mut media = self.media.lock().await;
        let Some(element) = media.as_mut() else {
            tracing::debug!("Toggle play ignored, no media loaded");
            return;
        };

        if playback.is_playing {
            element.pause();
            playback.pause();
        } else {
            if let Err(e) = element.play(PlayOrigin::User) {
                tracing::warn!(error = %e, "Play request failed");
                return;
            }
            playback.begin_playing();
        }
        let is_playing = playback.is_playing;
        drop(media);
        drop(model);

        tracing::info!(action = if is_playing { "resumed" } else { "paused" }, "Playback toggled");
        if is_playing {
            self.pointer_activity().await;
        } else {
            self.pin_controls().await;
        }
    }

    /// Relative seek with a transient direction cue
    pub async fn seek(&self, delta_secs: f64) {
        let mut model = self.model.lock().await;
        let Some(playback) = model.playback_mut() else {
            return;
        };
        let mut media = self.media.lock().await;
        let Some(element) = media.as_mut() else {
            return;
        };

        let feedback = playback.seek_by(delta_secs);
        element.seek(playback.position);
        tracing::debug!(delta_secs, position = playback.position, "Seeked");
        drop(media);
        model.seek_feedback = Some(feedback);
        drop(model);

        let model = self.model.clone();
        let timer = ScopedTimer::after(self.config.seek_feedback_for, async move {
            model.lock().await.dismiss_seek_feedback(feedback.token);
        });
        self.timers.lock().await.push_feedback(timer);
    }

    pub async fn seek_to_fraction(&self, percent: f64) {
        let mut model = self.model.lock().await;
        let Some(playback) = model.playback_mut() else {
            return;
        };
        let mut media = self.media.lock().await;
        let Some(element) = media.as_mut() else {
            return;
        };

        let target = playback.fraction_target(percent);
        playback.set_position(target);
        element.seek(playback.position);
        tracing::debug!(percent, position = playback.position, "Seeked to fraction");
    }

    pub async fn set_volume(&self, value: f64) {
        let mut model = self.model.lock().await;
        let Some(playback) = model.playback_mut() else {
            return;
        };

        let applied = playback.set_volume(value);
        if let Some(element) = self.media.lock().await.as_mut() {
            element.set_volume(applied);
            element.set_muted(playback.is_muted);
        }
        tracing::debug!(volume = applied, muted = playback.is_muted, "Volume set");
    }

    pub async fn adjust_volume(&self, delta: f64) {
        let target = match self.model.lock().await.playback() {
            Some(playback) => playback.volume_step_target(delta),
            None => return,
        };
        self.set_volume(target).await;
    }

    pub async fn toggle_mute(&self) {
        let mut model = self.model.lock().await;
        let Some(playback) = model.playback_mut() else {
            return;
        };

        let muted = playback.toggle_mute();
        if let Some(element) = self.media.lock().await.as_mut() {
            element.set_muted(muted);
            element.set_volume(playback.volume);
        }
        tracing::debug!(muted, volume = playback.volume, "Mute toggled");
    }

    pub async fn set_playback_rate(&self, rate: f64) -> Result<(), MediaError> {
        if !PlaybackState::is_supported_rate(rate) {
            return Err(MediaError::UnsupportedRate(rate));
        }
        let mut model = self.model.lock().await;
        let Some(playback) = model.playback_mut() else {
            return Err(MediaError::NotLoaded);
        };
        let mut media = self.media.lock().await;
        let element = media.as_mut().ok_or(MediaError::NotLoaded)?;

        element.set_playback_rate(rate);
        playback.playback_rate = rate;
        tracing::debug!(rate, "Playback rate set");
        Ok(())
    }

    pub async fn cycle_playback_rate(&self) {
        let next = match self.model.lock().await.playback() {
            Some(playback) => playback.next_rate(),
            None => return,
        };
        if let Err(e) = self.set_playback_rate(next).await {
            tracing::warn!(error = %e, "Could not change playback rate");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::sleep;

    use crate::controller::testing::{harness, material, Call, Harness};
    use crate::media::{MediaError, NativeEvent, PlayOrigin};
    use crate::model::{ResourceKind, SeekDirection};

    async fn video(block_autoplay: bool) -> Harness {
        let h = harness(vec![material(ResourceKind::Video, "a.mp4")], block_autoplay, false).await;
        h.emit(NativeEvent::TimeUpdate { position: 5.0, duration: 120.0 }).await;
        h.clear_calls();
        h
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_play_pauses_and_resumes() {
        let h = video(false).await;
        h.controller.toggle_play().await;
        assert!(!h.model().await.playback().unwrap().is_playing);
        h.controller.toggle_play().await;
        assert!(h.model().await.playback().unwrap().is_playing);
        assert_eq!(h.calls(), vec![Call::Pause, Call::Play(PlayOrigin::User)]);
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_play_without_media_is_a_no_op() {
        let h = video(false).await;
        h.controller.unmount().await;
        h.controller.toggle_play().await;
        assert!(h.calls().is_empty());
        assert!(h.model().await.playback().unwrap().is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn user_can_play_after_autoplay_rejection() {
        let h = video(true).await;
        assert!(!h.model().await.playback().unwrap().is_playing);
        h.controller.toggle_play().await;
        assert!(h.model().await.playback().unwrap().is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn seek_back_past_start_clamps_to_zero() {
        let h = video(false).await;
        h.controller.seek(-10.0).await;

        let model = h.model().await;
        assert_eq!(model.playback().unwrap().position, 0.0);
        assert_eq!(model.seek_feedback.unwrap().direction, SeekDirection::Backward);
        drop(model);
        assert_eq!(h.calls(), vec![Call::Seek(0.0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn seek_feedback_is_dismissed_per_token() {
        let h = video(false).await;
        h.controller.seek(5.0).await;
        sleep(Duration::from_millis(500)).await;
        h.controller.seek(5.0).await;
        let latest = h.model().await.seek_feedback.unwrap().token;

        // first cue's timer fires but must not clear the second cue
        sleep(Duration::from_millis(400)).await;
        assert_eq!(h.model().await.seek_feedback.map(|f| f.token), Some(latest));

        sleep(Duration::from_millis(500)).await;
        assert!(h.model().await.seek_feedback.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn seek_to_fraction_maps_percent() {
        let h = video(false).await;
        h.controller.seek_to_fraction(50.0).await;
        assert_eq!(h.model().await.playback().unwrap().position, 60.0);
        assert_eq!(h.calls(), vec![Call::Seek(60.0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn mute_round_trip_restores_volume() {
        let h = video(false).await;
        h.controller.set_volume(0.6).await;
        h.controller.toggle_mute().await;
        assert!(h.model().await.playback().unwrap().is_muted);
        h.controller.toggle_mute().await;

        let model = h.model().await;
        let playback = model.playback().unwrap();
        assert!(!playback.is_muted);
        assert_eq!(playback.volume, 0.6);
    }

    #[tokio::test(start_paused = true)]
    async fn volume_keys_clamp_at_full() {
        let h = video(false).await;
        h.controller.adjust_volume(0.1).await;
        assert_eq!(h.model().await.playback().unwrap().volume, 1.0);
        h.controller.adjust_volume(-0.1).await;
        assert_eq!(h.model().await.playback().unwrap().volume, 0.9);
    }

    #[tokio::test(start_paused = true)]
    async fn direct_volume_is_not_quantized() {
        let h = video(false).await;
        h.controller.set_volume(0.375).await;
        assert_eq!(h.model().await.playback().unwrap().volume, 0.375);
        assert_eq!(h.calls(), vec![Call::Volume(0.375), Call::Muted(false)]);

        h.controller.set_volume(0.3333).await;
        for _ in 0..3 {
            h.controller.adjust_volume(0.1).await;
        }
        assert_eq!(h.model().await.playback().unwrap().volume, 0.63);
    }

    #[tokio::test(start_paused = true)]
    async fn unsupported_rate_is_rejected() {
        let h = video(false).await;
        assert_eq!(
            h.controller.set_playback_rate(3.0).await,
            Err(MediaError::UnsupportedRate(3.0))
        );
        assert_eq!(h.controller.set_playback_rate(1.5).await, Ok(()));
        h.controller.cycle_playback_rate().await;
        assert_eq!(h.model().await.playback().unwrap().playback_rate, 2.0);
        assert_eq!(h.calls(), vec![Call::Rate(1.5), Call::Rate(2.0)]);
    }
}

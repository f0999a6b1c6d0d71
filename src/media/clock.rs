//! Simulated video element
//!
//! A terminal cannot decode video, so the element is a clock running in its
//! own task. The handle sends commands to it and the task reports progress
//! back as native events. Dropping the handle ends the task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval, sleep, MissedTickBehavior};

use super::{EventSink, MediaElement, MediaError, NativeEvent, PlayOrigin};

const TICK: Duration = Duration::from_millis(250);
const STARTUP_DELAY: Duration = Duration::from_millis(400);

/// Whether the runtime lets playback start without a user gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutoplayPolicy {
    Allowed,
    Blocked,
}

#[derive(Debug)]
enum ClockCommand {
    Play,
    Pause,
    Seek(f64),
    Rate(f64),
}

pub struct ClockPlayer {
    commands: mpsc::UnboundedSender<ClockCommand>,
    autoplay: AutoplayPolicy,
    volume: f64,
    muted: bool,
}

impl ClockPlayer {
    pub fn spawn(duration: Option<f64>, autoplay: AutoplayPolicy, sink: EventSink) -> Self {
        let duration = duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(f64::NAN);
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_clock(rx, duration, sink));

        Self {
            commands: tx,
            autoplay,
            volume: 1.0,
            muted: false,
        }
    }

    fn send(&self, command: ClockCommand) -> Result<(), MediaError> {
        self.commands.send(command).map_err(|_| MediaError::NotLoaded)
    }
}

impl MediaElement for ClockPlayer {
    fn play(&mut self, origin: PlayOrigin) -> Result<(), MediaError> {
        if origin == PlayOrigin::Autoplay && self.autoplay == AutoplayPolicy::Blocked {
            return Err(MediaError::AutoplayBlocked);
        }
        self.send(ClockCommand::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(ClockCommand::Pause);
    }

    fn seek(&mut self, position_secs: f64) {
        let _ = self.send(ClockCommand::Seek(position_secs));
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        tracing::trace!(volume, muted = self.muted, "Clock volume");
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        tracing::trace!(volume = self.volume, muted, "Clock mute");
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let _ = self.send(ClockCommand::Rate(rate));
    }
}

struct Clock {
    position: f64,
    duration: f64,
    rate: f64,
    playing: bool,
    ready: bool,
}

impl Clock {
    fn clamp(&self, position: f64) -> f64 {
        if self.duration.is_finite() {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        }
    }

    fn at_end(&self) -> bool {
        self.duration.is_finite() && self.position >= self.duration
    }

    fn time_update(&self, sink: &EventSink) {
        sink.emit(NativeEvent::TimeUpdate {
            position: self.position,
            duration: self.duration,
        });
    }

    fn apply(&mut self, command: ClockCommand, sink: &EventSink) {
        match command {
            ClockCommand::Play => {
                if self.at_end() {
                    self.position = 0.0;
                }
                self.playing = true;
                if self.ready {
                    sink.emit(NativeEvent::Playing);
                }
            }
            ClockCommand::Pause => {
                self.playing = false;
                sink.emit(NativeEvent::Paused);
            }
            ClockCommand::Seek(position) => {
                if position.is_finite() {
                    self.position = self.clamp(position);
                }
                if self.ready {
                    self.time_update(sink);
                }
            }
            ClockCommand::Rate(rate) => self.rate = rate,
        }
    }

    fn advance(&mut self, elapsed: Duration, sink: &EventSink) {
        self.position = self.clamp(self.position + elapsed.as_secs_f64() * self.rate);
        self.time_update(sink);
        if self.at_end() {
            self.playing = false;
            sink.emit(NativeEvent::Ended);
        }
    }
}

async fn run_clock(mut commands: mpsc::UnboundedReceiver<ClockCommand>, duration: f64, sink: EventSink) {
    let mut clock = Clock {
        position: 0.0,
        duration,
        rate: 1.0,
        playing: false,
        ready: false,
    };
    let mut ticker = interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let startup = sleep(STARTUP_DELAY);
    tokio::pin!(startup);

    sink.emit(NativeEvent::Waiting);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => {
                    // a resumed clock waits a full tick before advancing
                    let resumes = matches!(command, ClockCommand::Play) && !clock.playing;
                    clock.apply(command, &sink);
                    if resumes {
                        ticker.reset();
                    }
                }
                None => break,
            },
            () = &mut startup, if !clock.ready => {
                clock.ready = true;
                sink.emit(NativeEvent::LoadedMetadata { duration: clock.duration });
                sink.emit(NativeEvent::CanPlay);
                clock.time_update(&sink);
                if clock.playing {
                    sink.emit(NativeEvent::Playing);
                }
            }
            _ = ticker.tick(), if clock.playing && clock.ready => clock.advance(TICK, &sink),
        }
    }

    tracing::debug!("Video clock stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaEnvelope;

    fn drain(rx: &mut mpsc::UnboundedReceiver<MediaEnvelope>) -> Vec<NativeEvent> {
        let mut events = Vec::new();
        while let Ok(envelope) = rx.try_recv() {
            events.push(envelope.event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_autoplay_is_rejected_but_user_play_works() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut player = ClockPlayer::spawn(Some(3.0), AutoplayPolicy::Blocked, EventSink::new(1, tx));

        assert_eq!(player.play(PlayOrigin::Autoplay), Err(MediaError::AutoplayBlocked));
        assert_eq!(player.play(PlayOrigin::User), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn clock_runs_to_the_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = ClockPlayer::spawn(Some(1.0), AutoplayPolicy::Allowed, EventSink::new(1, tx));
        player.play(PlayOrigin::Autoplay).unwrap();

        sleep(Duration::from_secs(3)).await;
        let events = drain(&mut rx);

        assert_eq!(events.first(), Some(&NativeEvent::Waiting));
        assert!(events.contains(&NativeEvent::Playing));
        assert_eq!(events.iter().filter(|e| **e == NativeEvent::Ended).count(), 1);
        assert!(events.contains(&NativeEvent::TimeUpdate { position: 1.0, duration: 1.0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn resume_does_not_jump_ahead() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut player = ClockPlayer::spawn(Some(10.0), AutoplayPolicy::Allowed, EventSink::new(1, tx));
        sleep(Duration::from_secs(2)).await;
        drain(&mut rx);

        player.play(PlayOrigin::User).unwrap();
        sleep(Duration::from_millis(100)).await;
        let moved = drain(&mut rx).into_iter().any(|e| {
            matches!(e, NativeEvent::TimeUpdate { position, .. } if position > 0.0)
        });
        assert!(!moved);

        sleep(Duration::from_millis(200)).await;
        assert!(drain(&mut rx).contains(&NativeEvent::TimeUpdate { position: 0.25, duration: 10.0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_clock() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let player = ClockPlayer::spawn(Some(10.0), AutoplayPolicy::Allowed, EventSink::new(1, tx));
        drop(player);

        sleep(Duration::from_secs(1)).await;
        let events = drain(&mut rx);
        assert_eq!(events, vec![NativeEvent::Waiting]);
        // every sender is gone once the task exits
        assert!(rx.recv().await.is_none());
    }
}

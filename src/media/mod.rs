//! Native backend seam
//!
//! The viewer never talks to a decoder or renderer directly. It drives a
//! [`MediaElement`] and listens to [`NativeEvent`]s tagged with the resource
//! generation that produced them. The terminal build supplies stand-ins:
//!
//! - `clock`: simulated video element driven by a tokio clock
//! - `loader`: local PDF page counting and image probing
//! - `surface`: terminal fullscreen host and external link opener

mod clock;
mod loader;
mod surface;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::model::{ResourceDescriptor, ResourceKind};

pub use clock::{AutoplayPolicy, ClockPlayer};
pub use surface::{open_external, TerminalSurface};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MediaError {
    #[error("autoplay was blocked by the runtime")]
    AutoplayBlocked,
    #[error("no media is loaded")]
    NotLoaded,
    #[error("unsupported playback rate {0}")]
    UnsupportedRate(f64),
    #[error("fullscreen request denied: {0}")]
    FullscreenDenied(String),
    #[error("{0}")]
    Load(String),
}

/// Who asked for playback to start
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayOrigin {
    User,
    Autoplay,
}

/// Lifecycle notifications from the native media and document backends
#[derive(Clone, Debug, PartialEq)]
pub enum NativeEvent {
    LoadedMetadata { duration: f64 },
    TimeUpdate { position: f64, duration: f64 },
    Waiting,
    CanPlay,
    Playing,
    Paused,
    Ended,
    DocumentLoaded { pages: u32 },
    ImageLoaded { width: u32, height: u32 },
    LoadFailed { reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaEnvelope {
    pub generation: u64,
    pub event: NativeEvent,
}

/// Sending half handed to a backend for one mounted resource
#[derive(Clone, Debug)]
pub struct EventSink {
    generation: u64,
    tx: mpsc::UnboundedSender<MediaEnvelope>,
}

impl EventSink {
    pub fn new(generation: u64, tx: mpsc::UnboundedSender<MediaEnvelope>) -> Self {
        Self { generation, tx }
    }

    pub fn emit(&self, event: NativeEvent) {
        if self
            .tx
            .send(MediaEnvelope { generation: self.generation, event })
            .is_err()
        {
            tracing::trace!(generation = self.generation, "Event listener gone, dropping native event");
        }
    }
}

/// Handle to one native video element
pub trait MediaElement: Send {
    fn play(&mut self, origin: PlayOrigin) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn seek(&mut self, position_secs: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_playback_rate(&mut self, rate: f64);
}

/// The container that can be switched in and out of fullscreen
pub trait FullscreenHost: Send {
    fn set_fullscreen(&mut self, on: bool) -> Result<(), MediaError>;
}

/// Factory for the native collaborators of each resource type
pub trait MediaBackend: Send + Sync {
    fn open_video(&self, resource: &ResourceDescriptor, sink: EventSink) -> Box<dyn MediaElement>;
    fn load_document(&self, resource: &ResourceDescriptor, sink: EventSink);
    fn load_image(&self, resource: &ResourceDescriptor, sink: EventSink);
}

/// Backends available from a terminal
pub struct TerminalBackend {
    autoplay: AutoplayPolicy,
}

impl TerminalBackend {
    pub fn new(autoplay: AutoplayPolicy) -> Self {
        Self { autoplay }
    }
}

impl MediaBackend for TerminalBackend {
    fn open_video(&self, resource: &ResourceDescriptor, sink: EventSink) -> Box<dyn MediaElement> {
        tracing::info!(url = %resource.url, duration = ?resource.duration, "Opening video clock");
        Box::new(ClockPlayer::spawn(resource.duration, self.autoplay, sink))
    }

    fn load_document(&self, resource: &ResourceDescriptor, sink: EventSink) {
        debug_assert!(resource.kind.is_paginated());
        loader::spawn_document_load(resource.url.clone(), sink);
    }

    fn load_image(&self, resource: &ResourceDescriptor, sink: EventSink) {
        debug_assert_eq!(resource.kind, ResourceKind::Image);
        loader::spawn_image_load(resource.url.clone(), sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_tags_events_with_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(7, tx);
        sink.emit(NativeEvent::Ended);

        let envelope = rx.try_recv().unwrap();
        assert_eq!(envelope.generation, 7);
        assert_eq!(envelope.event, NativeEvent::Ended);
    }

    #[test]
    fn sink_tolerates_closed_listener() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        EventSink::new(1, tx).emit(NativeEvent::Waiting);
    }
}

//! Controller module - Viewer logic and event handling
//!
//! The controller owns the mounted viewer's native handles and timers and
//! applies every state transition to the model. It is organized into
//! submodules by responsibility:
//!
//! - `input`: Key event dispatch
//! - `playback`: Video transport operations
//! - `document`: Page, zoom and rotation operations
//! - `pointer`: Auto-hide of the on-screen controls
//! - `media_events`: Native media/document event listener
//! - `timers`: Scoped timers released on unmount

mod input;
mod playback;
mod document;
mod pointer;
mod media_events;
mod timers;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::config::ViewerConfig;
use crate::media::{
    open_external, EventSink, FullscreenHost, MediaBackend, MediaElement, MediaEnvelope, MediaError,
    PlayOrigin,
};
use crate::model::{AppModel, ResourceKind, ViewerKind};

use timers::ViewerTimers;

/// Invoked once each time a video plays through to its natural end
pub type EndedCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) media: Arc<Mutex<Option<Box<dyn MediaElement>>>>,
    surface: Arc<Mutex<Box<dyn FullscreenHost>>>,
    timers: Arc<Mutex<ViewerTimers>>,
    backend: Arc<dyn MediaBackend>,
    events: mpsc::UnboundedSender<MediaEnvelope>,
    on_ended: EndedCallback,
    pub(crate) config: Arc<ViewerConfig>,
}

impl AppController {
    /// Build the controller and the receiving end of its native event stream
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        backend: Arc<dyn MediaBackend>,
        surface: Box<dyn FullscreenHost>,
        config: ViewerConfig,
        on_ended: EndedCallback,
    ) -> (Self, mpsc::UnboundedReceiver<MediaEnvelope>) {
        let (events, rx) = mpsc::unbounded_channel();
        let controller = Self {
            model,
            media: Arc::new(Mutex::new(None)),
            surface: Arc::new(Mutex::new(surface)),
            timers: Arc::new(Mutex::new(ViewerTimers::default())),
            backend,
            events,
            on_ended,
            config: Arc::new(config),
        };
        (controller, rx)
    }

    /// Mount the material at `index`, releasing whatever was mounted before
    pub async fn mount(&self, index: usize) {
        self.unmount().await;

        let mut model = self.model.lock().await;
        let Some(generation) = model.mount(index) else {
            tracing::warn!(index, "No material at index");
            return;
        };
        let Some(resource) = model.active_material().cloned() else {
            return;
        };
        tracing::info!(
            index,
            generation,
            kind = resource.kind.label(),
            url = %resource.url,
            "Mounting material"
        );

        let sink = EventSink::new(generation, self.events.clone());
        match resource.kind {
            ResourceKind::Video => {
                let mut element = self.backend.open_video(&resource, sink);
                if self.config.autoplay {
                    if let Some(playback) = model.playback_mut() {
                        match element.play(PlayOrigin::Autoplay) {
                            Ok(()) => playback.begin_playing(),
                            Err(MediaError::AutoplayBlocked) => {
                                tracing::info!("Autoplay blocked, waiting for the user to press play");
                                playback.pause();
                            }
                            Err(e) => tracing::warn!(error = %e, "Autoplay failed"),
                        }
                    }
                }
                *self.media.lock().await = Some(element);
            }
            ResourceKind::Pdf | ResourceKind::Slide => self.backend.load_document(&resource, sink),
            ResourceKind::Image => self.backend.load_image(&resource, sink),
            ResourceKind::Link => {}
        }

        let fullscreen = model.is_fullscreen();
        let active = model.is_content_active();
        drop(model);

        if let Err(e) = self.surface.lock().await.set_fullscreen(fullscreen) {
            tracing::warn!(error = %e, "Could not restore fullscreen layout");
        }
        if active {
            self.pointer_activity().await;
        }
    }

    /// Cancel pending timers and drop the native element
    pub async fn unmount(&self) {
        self.timers.lock().await.clear();
        let element = self.media.lock().await.take();
        if element.is_some() {
            tracing::debug!("Released media element");
        }
    }

    pub async fn switch_material(&self, forward: bool) {
        let target = self.model.lock().await.neighbor_index(forward);
        if let Some(index) = target {
            self.mount(index).await;
        }
    }

    /// Shared by the video and document viewers. A refused request leaves
    /// the state untouched.
    pub async fn toggle_fullscreen(&self) {
        let mut model = self.model.lock().await;
        if matches!(model.viewer, ViewerKind::Image(_) | ViewerKind::Link) {
            return;
        }
        let target = !model.is_fullscreen();

        match self.surface.lock().await.set_fullscreen(target) {
            Ok(()) => {
                model.set_fullscreen(target);
                tracing::debug!(fullscreen = target, "Fullscreen toggled");
            }
            Err(e) => tracing::warn!(error = %e, "Fullscreen request failed"),
        }
    }

    pub async fn open_link(&self) {
        let mut model = self.model.lock().await;
        if !matches!(model.viewer, ViewerKind::Link) {
            return;
        }
        let Some(url) = model.active_material().map(|m| m.url.clone()) else {
            return;
        };

        match open_external(&url) {
            Ok(()) => {
                tracing::info!(url = %url, "Opened link in browser");
                model.set_status(format!("Opened {url} in your browser"));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not open link");
                model.set_status(e.to_string());
            }
        }
    }

    #[cfg(test)]
    pub async fn pending_timers(&self) -> usize {
        self.timers.lock().await.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{harness, material, Call};
    use crate::model::ResourceKind;

    #[tokio::test(start_paused = true)]
    async fn autoplay_starts_video_on_mount() {
        let h = harness(vec![material(ResourceKind::Video, "a.mp4")], false, false).await;
        assert_eq!(h.calls(), vec![Call::Play(crate::media::PlayOrigin::Autoplay)]);
        assert!(h.model().await.playback().unwrap().is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_autoplay_falls_back_to_paused() {
        let h = harness(vec![material(ResourceKind::Video, "a.mp4")], true, false).await;
        let model = h.model().await;
        let playback = model.playback().unwrap();
        assert!(!playback.is_playing);
        assert!(model.ui_state.status_message.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn switching_material_releases_previous_viewer() {
        let h = harness(
            vec![material(ResourceKind::Video, "a.mp4"), material(ResourceKind::Pdf, "b.pdf")],
            false,
            false,
        )
        .await;
        h.controller.pointer_activity().await;
        assert!(h.controller.pending_timers().await > 0);

        h.controller.switch_material(true).await;
        assert!(h.controller.media.lock().await.is_none());
        assert_eq!(h.controller.pending_timers().await, 0);
        assert_eq!(h.loads(), vec!["b.pdf".to_string()]);

        h.controller.switch_material(true).await;
        assert_eq!(h.model().await.active_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn denied_fullscreen_is_a_no_op() {
        let h = harness(vec![material(ResourceKind::Video, "a.mp4")], false, true).await;
        h.controller.toggle_fullscreen().await;
        assert!(!h.model().await.is_fullscreen());
    }

    #[tokio::test(start_paused = true)]
    async fn fullscreen_round_trip() {
        let h = harness(vec![material(ResourceKind::Pdf, "a.pdf")], false, false).await;
        h.controller.toggle_fullscreen().await;
        assert!(h.model().await.is_fullscreen());
        h.controller.toggle_fullscreen().await;
        assert!(!h.model().await.is_fullscreen());
    }
}

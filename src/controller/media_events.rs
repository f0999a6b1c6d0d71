//! Listener for native media and document events

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::media::{MediaEnvelope, NativeEvent};
use crate::model::ViewerKind;

use super::AppController;

impl AppController {
    pub fn start_media_event_listener(
        &self,
        mut events: mpsc::UnboundedReceiver<MediaEnvelope>,
    ) -> JoinHandle<()> {
        let controller = self.clone();
        tracing::info!("Starting native media event listener");

        tokio::spawn(async move {
            while let Some(envelope) = events.recv().await {
                controller.handle_media_event(envelope).await;

                if controller.model.lock().await.should_quit() {
                    tracing::debug!("Media event listener shutting down");
                    break;
                }
            }
        })
    }

    pub async fn handle_media_event(&self, envelope: MediaEnvelope) {
        let mut model = self.model.lock().await;
        if envelope.generation != model.generation() {
            tracing::trace!(
                event_generation = envelope.generation,
                current = model.generation(),
                "Dropping event from a previous resource"
            );
            return;
        }

        let follow_up = match (&mut model.viewer, envelope.event) {
            (ViewerKind::Video(playback), NativeEvent::LoadedMetadata { duration }) => {
                tracing::debug!(duration, "Video metadata loaded");
                let position = playback.position;
                playback.time_update(position, duration);
                FollowUp::None
            }
            (ViewerKind::Video(playback), NativeEvent::TimeUpdate { position, duration }) => {
                playback.time_update(position, duration);
                FollowUp::None
            }
            (ViewerKind::Video(playback), NativeEvent::Waiting) => {
                tracing::trace!("Video buffering");
                playback.is_buffering = true;
                FollowUp::None
            }
            (ViewerKind::Video(playback), NativeEvent::CanPlay) => {
                playback.is_buffering = false;
                FollowUp::None
            }
            (ViewerKind::Video(playback), NativeEvent::Playing) => {
                playback.is_buffering = false;
                playback.begin_playing();
                FollowUp::None
            }
            (ViewerKind::Video(playback), NativeEvent::Paused) => {
                playback.pause();
                FollowUp::None
            }
            (ViewerKind::Video(playback), NativeEvent::Ended) => {
                if playback.mark_ended() {
                    tracing::info!(duration = playback.duration, "Video played to the end");
                    FollowUp::Ended
                } else {
                    tracing::trace!("Duplicate end of playback ignored");
                    FollowUp::None
                }
            }
            (ViewerKind::Video(playback), NativeEvent::LoadFailed { reason }) => {
                tracing::warn!(reason = %reason, "Video failed to load");
                playback.is_buffering = false;
                playback.pause();
                FollowUp::Status(reason)
            }
            (ViewerKind::Document(document), NativeEvent::DocumentLoaded { pages }) => {
                tracing::debug!(pages, "Document ready");
                document.load_succeeded(pages);
                FollowUp::DocumentReady(document.page)
            }
            (ViewerKind::Document(document), NativeEvent::LoadFailed { reason }) => {
                tracing::warn!(reason = %reason, "Document failed to load");
                document.load_failed(reason);
                FollowUp::None
            }
            (ViewerKind::Image(image), NativeEvent::ImageLoaded { width, height }) => {
                image.loaded(width, height);
                FollowUp::None
            }
            (ViewerKind::Image(image), NativeEvent::LoadFailed { reason }) => {
                tracing::warn!(reason = %reason, "Image failed to load");
                image.failed(reason);
                FollowUp::None
            }
            (_, event) => {
                tracing::trace!(?event, "Event does not apply to the mounted viewer");
                FollowUp::None
            }
        };

        match follow_up {
            FollowUp::None => {}
            FollowUp::Status(message) => model.set_status(message),
            FollowUp::Ended => {
                model.mark_active_completed();
                drop(model);
                self.pin_controls().await;
                (self.on_ended)();
            }
            FollowUp::DocumentReady(page) => {
                model.page_input.sync(page);
                drop(model);
                self.pointer_activity().await;
            }
        }
    }
}

/// Work left after the viewer state has been updated
enum FollowUp {
    None,
    Status(String),
    Ended,
    DocumentReady(u32),
}

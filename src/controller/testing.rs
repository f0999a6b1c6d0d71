//! Scriptable stand-ins for the native backends used by controller tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{mpsc, Mutex, MutexGuard};

use super::AppController;
use crate::config::ViewerConfig;
use crate::media::{
    EventSink, FullscreenHost, MediaBackend, MediaElement, MediaEnvelope, MediaError, NativeEvent,
    PlayOrigin,
};
use crate::model::{AppModel, ResourceDescriptor, ResourceKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Play(PlayOrigin),
    Pause,
    Seek(f64),
    Volume(f64),
    Muted(bool),
    Rate(f64),
}

type CallLog = Arc<StdMutex<Vec<Call>>>;

struct FakeElement {
    calls: CallLog,
    block_autoplay: bool,
}

impl MediaElement for FakeElement {
    fn play(&mut self, origin: PlayOrigin) -> Result<(), MediaError> {
        if origin == PlayOrigin::Autoplay && self.block_autoplay {
            return Err(MediaError::AutoplayBlocked);
        }
        self.calls.lock().unwrap().push(Call::Play(origin));
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.lock().unwrap().push(Call::Pause);
    }

    fn seek(&mut self, position_secs: f64) {
        self.calls.lock().unwrap().push(Call::Seek(position_secs));
    }

    fn set_volume(&mut self, volume: f64) {
        self.calls.lock().unwrap().push(Call::Volume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.calls.lock().unwrap().push(Call::Muted(muted));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.calls.lock().unwrap().push(Call::Rate(rate));
    }
}

struct FakeBackend {
    calls: CallLog,
    loads: Arc<StdMutex<Vec<String>>>,
    block_autoplay: bool,
}

impl MediaBackend for FakeBackend {
    fn open_video(&self, _resource: &ResourceDescriptor, _sink: EventSink) -> Box<dyn MediaElement> {
        Box::new(FakeElement {
            calls: self.calls.clone(),
            block_autoplay: self.block_autoplay,
        })
    }

    fn load_document(&self, resource: &ResourceDescriptor, _sink: EventSink) {
        self.loads.lock().unwrap().push(resource.url.clone());
    }

    fn load_image(&self, resource: &ResourceDescriptor, _sink: EventSink) {
        self.loads.lock().unwrap().push(resource.url.clone());
    }
}

struct FakeSurface {
    deny: bool,
}

impl FullscreenHost for FakeSurface {
    fn set_fullscreen(&mut self, on: bool) -> Result<(), MediaError> {
        if self.deny && on {
            return Err(MediaError::FullscreenDenied("permission denied".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub controller: AppController,
    pub rx: mpsc::UnboundedReceiver<MediaEnvelope>,
    pub ended: Arc<AtomicUsize>,
    calls: CallLog,
    loads: Arc<StdMutex<Vec<String>>>,
}

impl Harness {
    pub async fn model(&self) -> MutexGuard<'_, AppModel> {
        self.controller.model.lock().await
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }

    pub fn ended_count(&self) -> usize {
        self.ended.load(Ordering::SeqCst)
    }

    /// Deliver a native event for the currently mounted resource
    pub async fn emit(&self, event: NativeEvent) {
        let generation = self.controller.model.lock().await.generation();
        self.controller
            .handle_media_event(MediaEnvelope { generation, event })
            .await;
    }
}

pub fn material(kind: ResourceKind, url: &str) -> ResourceDescriptor {
    ResourceDescriptor {
        kind,
        url: url.to_string(),
        title: None,
        duration: None,
    }
}

/// Controller over `materials` with the first one mounted
pub async fn harness(
    materials: Vec<ResourceDescriptor>,
    block_autoplay: bool,
    deny_fullscreen: bool,
) -> Harness {
    let calls = CallLog::default();
    let loads = Arc::new(StdMutex::new(Vec::new()));
    let ended = Arc::new(AtomicUsize::new(0));
    let ended_counter = ended.clone();

    let (controller, rx) = AppController::new(
        Arc::new(Mutex::new(AppModel::new(materials))),
        Arc::new(FakeBackend {
            calls: calls.clone(),
            loads: loads.clone(),
            block_autoplay,
        }),
        Box::new(FakeSurface { deny: deny_fullscreen }),
        ViewerConfig::default(),
        Arc::new(move || {
            ended_counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    controller.mount(0).await;

    Harness {
        controller,
        rx,
        ended,
        calls,
        loads,
    }
}

//! Main application model: the course shell plus the mounted viewer

use super::playback::PlaybackState;
use super::resource::{ResourceDescriptor, ResourceKind};
use super::types::{InputFocus, PageJumpInput, SeekFeedback, UiState};
use super::viewer::{ImageState, ViewerState};
use super::visibility::ControlVisibility;

/// Transient state of whichever viewer is mounted
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerKind {
    Video(PlaybackState),
    Document(ViewerState),
    Image(ImageState),
    Link,
}

impl ViewerKind {
    fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Video => Self::Video(PlaybackState::default()),
            ResourceKind::Pdf | ResourceKind::Slide => Self::Document(ViewerState::default()),
            ResourceKind::Image => Self::Image(ImageState::default()),
            ResourceKind::Link => Self::Link,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppModel {
    materials: Vec<ResourceDescriptor>,
    completed: Vec<bool>,
    active: usize,
    generation: u64,
    pub viewer: ViewerKind,
    pub controls: ControlVisibility,
    pub seek_feedback: Option<SeekFeedback>,
    pub page_input: PageJumpInput,
    pub ui_state: UiState,
    should_quit: bool,
}

impl AppModel {
    pub fn new(materials: Vec<ResourceDescriptor>) -> Self {
        let completed = vec![false; materials.len()];
        let viewer = materials
            .first()
            .map(|m| ViewerKind::for_kind(m.kind))
            .unwrap_or(ViewerKind::Link);
        let mut page_input = PageJumpInput::default();
        page_input.sync(1);

        Self {
            materials,
            completed,
            active: 0,
            generation: 0,
            viewer,
            controls: ControlVisibility::default(),
            seek_feedback: None,
            page_input,
            ui_state: UiState::default(),
            should_quit: false,
        }
    }

    // ========================================================================
    // Course shell
    // ========================================================================

    pub fn materials(&self) -> &[ResourceDescriptor] {
        &self.materials
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_material(&self) -> Option<&ResourceDescriptor> {
        self.materials.get(self.active)
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.get(index).copied().unwrap_or(false)
    }

    pub fn mark_active_completed(&mut self) {
        if let Some(done) = self.completed.get_mut(self.active) {
            *done = true;
        }
    }

    pub fn neighbor_index(&self, forward: bool) -> Option<usize> {
        if forward {
            let next = self.active + 1;
            (next < self.materials.len()).then_some(next)
        } else {
            self.active.checked_sub(1)
        }
    }

    /// Mount the material at `index`, discarding all viewer-local state.
    ///
    /// Returns the new resource generation; native events tagged with an
    /// older generation must be ignored.
    pub fn mount(&mut self, index: usize) -> Option<u64> {
        let kind = self.materials.get(index)?.kind;
        self.active = index;
        self.generation += 1;

        match (&mut self.viewer, kind) {
            (ViewerKind::Document(state), ResourceKind::Pdf | ResourceKind::Slide) => state.reset(),
            (viewer, kind) => *viewer = ViewerKind::for_kind(kind),
        }

        self.controls.force_visible();
        self.seek_feedback = None;
        self.page_input.blur();
        self.page_input.sync(1);
        Some(self.generation)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ========================================================================
    // Viewer access
    // ========================================================================

    pub fn playback(&self) -> Option<&PlaybackState> {
        match &self.viewer {
            ViewerKind::Video(state) => Some(state),
            _ => None,
        }
    }

    pub fn playback_mut(&mut self) -> Option<&mut PlaybackState> {
        match &mut self.viewer {
            ViewerKind::Video(state) => Some(state),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&ViewerState> {
        match &self.viewer {
            ViewerKind::Document(state) => Some(state),
            _ => None,
        }
    }

    pub fn document_mut(&mut self) -> Option<&mut ViewerState> {
        match &mut self.viewer {
            ViewerKind::Document(state) => Some(state),
            _ => None,
        }
    }

    /// Whether idle controls may auto-hide right now. Never while the
    /// page-jump field owns the keyboard.
    pub fn is_content_active(&self) -> bool {
        if self.text_input_focused() {
            return false;
        }
        match &self.viewer {
            ViewerKind::Video(state) => state.is_playing,
            ViewerKind::Document(state) => state.is_ready(),
            ViewerKind::Image(_) | ViewerKind::Link => false,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        match &self.viewer {
            ViewerKind::Video(state) => state.fullscreen,
            ViewerKind::Document(state) => state.fullscreen,
            ViewerKind::Image(_) | ViewerKind::Link => false,
        }
    }

    pub fn set_fullscreen(&mut self, on: bool) {
        match &mut self.viewer {
            ViewerKind::Video(state) => state.fullscreen = on,
            ViewerKind::Document(state) => state.fullscreen = on,
            ViewerKind::Image(_) | ViewerKind::Link => {}
        }
    }

    /// Clear the seek cue if it is still the one identified by `token`
    pub fn dismiss_seek_feedback(&mut self, token: u64) -> bool {
        match self.seek_feedback {
            Some(feedback) if feedback.token == token => {
                self.seek_feedback = None;
                true
            }
            _ => false,
        }
    }

    pub fn text_input_focused(&self) -> bool {
        self.page_input.text_input_focused()
    }

    // ========================================================================
    // UI State
    // ========================================================================

    pub fn toggle_help(&mut self) {
        self.ui_state.show_help = !self.ui_state.show_help;
    }

    pub fn hide_help(&mut self) {
        self.ui_state.show_help = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.ui_state.status_message = Some(message.into());
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(kind: ResourceKind, url: &str) -> ResourceDescriptor {
        ResourceDescriptor {
            kind,
            url: url.to_string(),
            title: None,
            duration: None,
        }
    }

    fn course() -> AppModel {
        AppModel::new(vec![
            material(ResourceKind::Pdf, "a.pdf"),
            material(ResourceKind::Slide, "b.pdf"),
            material(ResourceKind::Video, "c.mp4"),
        ])
    }

    #[test]
    fn remount_resets_document_state() {
        let mut model = course();
        model.mount(0);
        let state = model.document_mut().unwrap();
        state.load_succeeded(12);
        state.change_page(5);
        state.change_scale(0.8);
        state.fullscreen = true;
        model.page_input.focus();

        let generation = model.mount(1).unwrap();
        assert_eq!(generation, 2);
        let state = model.document().unwrap();
        assert_eq!(state.page, 1);
        assert_eq!(state.scale, 1.0);
        assert!(state.loading);
        assert!(state.fullscreen);
        assert_eq!(model.page_input.text, "1");
        assert!(!model.text_input_focused());
    }

    #[test]
    fn mount_switches_viewer_kind() {
        let mut model = course();
        model.mount(2);
        assert!(model.playback().is_some());
        assert!(model.document().is_none());
        assert!(model.mount(7).is_none());
        assert_eq!(model.active_index(), 2);
    }

    #[test]
    fn neighbors_respect_course_bounds() {
        let mut model = course();
        assert_eq!(model.neighbor_index(false), None);
        assert_eq!(model.neighbor_index(true), Some(1));
        model.mount(2);
        assert_eq!(model.neighbor_index(true), None);
    }

    #[test]
    fn stale_seek_feedback_is_not_dismissed() {
        let mut model = course();
        model.mount(2);
        let playback = model.playback_mut().unwrap();
        playback.time_update(0.0, 60.0);
        let old = playback.seek_by(5.0);
        let new = playback.seek_by(5.0);
        model.seek_feedback = Some(new);

        assert!(!model.dismiss_seek_feedback(old.token));
        assert!(model.seek_feedback.is_some());
        assert!(model.dismiss_seek_feedback(new.token));
        assert!(model.seek_feedback.is_none());
    }

    #[test]
    fn focused_page_input_keeps_content_inactive() {
        let mut model = course();
        model.document_mut().unwrap().load_succeeded(4);
        assert!(model.is_content_active());
        model.page_input.focus();
        assert!(!model.is_content_active());
    }

    #[test]
    fn completion_is_tracked_per_material() {
        let mut model = course();
        model.mount(2);
        model.mark_active_completed();
        assert!(model.is_completed(2));
        assert!(!model.is_completed(0));
    }
}

//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (time formatting, centering)
//! - `layout`: Title bar and course sidebar
//! - `content`: The mounted viewer (video stage, page card, image, link)
//! - `progress`: Video transport bar
//! - `overlays`: Seek cue, status notification, help popup

mod utils;
mod layout;
mod content;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AppModel, ViewerKind};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, model: &AppModel) {
        // Fullscreen gives the whole terminal to the viewer
        let viewer_area = if model.is_fullscreen() {
            frame.area()
        } else {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(28), // Course materials
                    Constraint::Percentage(72), // Viewer
                ])
                .split(frame.area());
            layout::render_sidebar(frame, main_chunks[0], model);

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(main_chunks[1]);
            layout::render_title_bar(frame, chunks[0], model);
            chunks[1]
        };

        match &model.viewer {
            ViewerKind::Video(playback) if model.controls.is_visible() => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(viewer_area);
                content::render_viewer(frame, chunks[0], model);
                progress::render_transport_bar(frame, chunks[1], playback);
            }
            _ => content::render_viewer(frame, viewer_area, model),
        }

        if let Some(feedback) = &model.seek_feedback {
            overlays::render_seek_feedback(frame, viewer_area, feedback);
        }

        if let Some(message) = &model.ui_state.status_message {
            overlays::render_status_notification(frame, message);
        }

        if model.ui_state.show_help {
            overlays::render_help_popup(frame);
        }
    }
}

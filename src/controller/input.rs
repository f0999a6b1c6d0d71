//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::ViewerConfig;
use crate::model::ViewerKind;
use super::AppController;

/// Viewer action bound to a key
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    TogglePlay,
    ToggleFullscreen,
    ToggleMute,
    Seek(f64),
    AdjustVolume(f64),
    SeekToPercent(f64),
    CyclePlaybackRate,
    ChangePage(i64),
    ChangeScale(f64),
    Rotate,
    ToggleFitMode,
    FocusPageInput,
    OpenLink,
}

pub fn video_command(key: &KeyEvent, config: &ViewerConfig) -> Option<Command> {
    let command = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('k') => Command::TogglePlay,
        KeyCode::Char('f') => Command::ToggleFullscreen,
        KeyCode::Char('m') => Command::ToggleMute,
        KeyCode::Left => Command::Seek(-config.seek_step),
        KeyCode::Right => Command::Seek(config.seek_step),
        KeyCode::Up => Command::AdjustVolume(config.volume_step),
        KeyCode::Down => Command::AdjustVolume(-config.volume_step),
        KeyCode::Char('s') => Command::CyclePlaybackRate,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let digit = c.to_digit(10)?;
            Command::SeekToPercent(f64::from(digit) * 10.0)
        }
        _ => return None,
    };
    Some(command)
}

pub fn document_command(key: &KeyEvent, config: &ViewerConfig) -> Option<Command> {
    let command = match key.code {
        KeyCode::Left => Command::ChangePage(-1),
        KeyCode::Right => Command::ChangePage(1),
        KeyCode::Up => Command::ChangeScale(config.zoom_step),
        KeyCode::Down => Command::ChangeScale(-config.zoom_step),
        KeyCode::Char('r') => Command::Rotate,
        KeyCode::Char('f') => Command::ToggleFullscreen,
        KeyCode::Char('w') => Command::ToggleFitMode,
        KeyCode::Char('g') => Command::FocusPageInput,
        _ => return None,
    };
    Some(command)
}

pub fn link_command(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => Some(Command::OpenLink),
        _ => None,
    }
}

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true);
            return Ok(());
        }

        // Help popup swallows everything except its close keys
        if model.ui_state.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h')) {
                model.hide_help();
            }
            return Ok(());
        }

        // Page-jump field has focus: keys edit the field instead of driving the viewer
        if model.text_input_focused() {
            drop(model);
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.page_input_digit(c).await,
                KeyCode::Backspace => self.page_input_backspace().await,
                KeyCode::Enter => self.submit_page_input().await,
                KeyCode::Esc => self.cancel_page_input().await,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true);
                return Ok(());
            }
            KeyCode::Char('?') => {
                model.toggle_help();
                return Ok(());
            }
            KeyCode::Esc => {
                model.ui_state.status_message = None;
                return Ok(());
            }
            KeyCode::Char(']') => {
                drop(model);
                self.switch_material(true).await;
                return Ok(());
            }
            KeyCode::Char('[') => {
                drop(model);
                self.switch_material(false).await;
                return Ok(());
            }
            _ => {}
        }

        let command = match &model.viewer {
            ViewerKind::Video(_) => video_command(&key, &self.config),
            ViewerKind::Document(_) => document_command(&key, &self.config),
            ViewerKind::Link => link_command(&key),
            ViewerKind::Image(_) => None,
        };
        drop(model);

        if let Some(command) = command {
            tracing::trace!(?command, "Dispatching key command");
            self.execute(command).await;
        }
        Ok(())
    }

    pub async fn execute(&self, command: Command) {
        match command {
            Command::TogglePlay => self.toggle_play().await,
            Command::ToggleFullscreen => self.toggle_fullscreen().await,
            Command::ToggleMute => self.toggle_mute().await,
            Command::Seek(delta) => self.seek(delta).await,
            Command::AdjustVolume(delta) => self.adjust_volume(delta).await,
            Command::SeekToPercent(percent) => self.seek_to_fraction(percent).await,
            Command::CyclePlaybackRate => self.cycle_playback_rate().await,
            Command::ChangePage(offset) => self.change_page(offset).await,
            Command::ChangeScale(delta) => self.change_scale(delta).await,
            Command::Rotate => self.rotate().await,
            Command::ToggleFitMode => self.toggle_fit_mode().await,
            Command::FocusPageInput => self.focus_page_input().await,
            Command::OpenLink => self.open_link().await,
        }
    }
}

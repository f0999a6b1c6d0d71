//! Video transport bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlaybackState;
use super::utils::format_time;

pub fn render_transport_bar(frame: &mut Frame, area: Rect, playback: &PlaybackState) {
    let status_text = if playback.is_ended {
        " ↺ Ended (space to replay)"
    } else if playback.is_buffering {
        " … Buffering"
    } else if playback.is_playing {
        " ▶ Playing"
    } else {
        " ⏸  Paused"
    };

    let volume_text = if playback.is_muted || playback.volume == 0.0 {
        "Muted".to_string()
    } else {
        format!("Vol: {:.0}%", playback.effective_volume() * 100.0)
    };
    let controls_info = format!(
        " {} | Speed: {}x | {} ",
        volume_text,
        playback.playback_rate,
        if playback.fullscreen { "Fullscreen" } else { "Windowed" }
    );

    let time_str = format!(
        "{} / {}",
        format_time(playback.position),
        format_time(playback.duration)
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((playback.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(time_str);

    frame.render_widget(gauge, area);
}

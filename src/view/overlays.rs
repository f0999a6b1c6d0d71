//! Overlay rendering (seek cue, status notification, help popup)

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::{SeekDirection, SeekFeedback};
use super::utils::centered_rect;

/// Transient "⏪ 5s" / "5s ⏩" cue over the video stage
pub fn render_seek_feedback(frame: &mut Frame, area: Rect, feedback: &SeekFeedback) {
    let text = match feedback.direction {
        SeekDirection::Backward => format!("⏪ {:.0}s", feedback.step_secs),
        SeekDirection::Forward => format!("{:.0}s ⏩", feedback.step_secs),
    };
    let cue_area = centered_rect(area, 12, 3);
    frame.render_widget(Clear, cue_area);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL)),
        cue_area,
    );
}

pub fn render_status_notification(frame: &mut Frame, message: &str) {
    let area = frame.area();

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;
    let line_count = message.chars().count().div_ceil(inner_width).max(1) as u16;

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(line_count + 2),
        width: popup_width,
        height: (line_count + 2).min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    let widget = Paragraph::new(message.to_string())
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Notice (Esc to dismiss) ")
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Video ──"),
        ("Space / K", "Play / Pause"),
        ("← / →", "Seek 5s"),
        ("↑ / ↓", "Volume"),
        ("M", "Mute"),
        ("0-9", "Jump to 0-90%"),
        ("S", "Cycle speed"),
        ("", ""),
        ("", "── Document ──"),
        ("← / →", "Previous / next page"),
        ("↑ / ↓", "Zoom"),
        ("R", "Rotate"),
        ("W", "Fit page / width"),
        ("G", "Go to page"),
        ("", ""),
        ("", "── General ──"),
        ("F", "Fullscreen"),
        ("Enter", "Open link"),
        ("[ / ]", "Previous / next material"),
        ("?", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_area = centered_rect(area, 56, keybindings.len() as u16 + 2);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^52}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (? or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help_text, popup_area);
}

//! Viewer area rendering (video stage, document page, image, link)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    AppModel, ImageState, InputFocus, PageJumpInput, PlaybackState, ViewerKind, ViewerState,
};
use super::utils::centered_rect;

pub fn render_viewer(frame: &mut Frame, area: Rect, model: &AppModel) {
    let url = model.active_material().map(|m| m.url.as_str()).unwrap_or_default();
    match &model.viewer {
        ViewerKind::Video(playback) => render_video_stage(frame, area, playback),
        ViewerKind::Document(document) => {
            render_document(frame, area, document, &model.page_input, model.controls.is_visible())
        }
        ViewerKind::Image(image) => render_image(frame, area, image, url),
        ViewerKind::Link => render_link(frame, area, url),
    }
}

fn render_video_stage(frame: &mut Frame, area: Rect, playback: &PlaybackState) {
    let symbol = if playback.is_buffering {
        "…"
    } else if playback.is_ended {
        "↺"
    } else if playback.is_playing {
        "▶"
    } else {
        "⏸"
    };

    let stage = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            symbol,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{:.0}%", playback.progress_percent),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" Video "));
    frame.render_widget(stage, area);
}

fn render_document(
    frame: &mut Frame,
    area: Rect,
    document: &ViewerState,
    page_input: &PageJumpInput,
    show_toolbar: bool,
) {
    let chunks = if show_toolbar {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0)])
            .split(area)
    };

    let block = Block::default().borders(Borders::ALL).title(" Document ");
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    if let Some(error) = &document.error {
        render_inline_error(frame, inner, error);
    } else if document.loading {
        render_placeholder(frame, inner, "Loading document…");
    } else {
        render_page_card(frame, inner, document);
    }

    if show_toolbar {
        render_document_toolbar(frame, chunks[1], document, page_input);
    }
}

/// Page card sized by zoom and turned sideways on quarter rotations
fn render_page_card(frame: &mut Frame, area: Rect, document: &ViewerState) {
    let (base_w, base_h) = (24.0, 16.0);
    let (w, h) = if document.rotation.is_sideways() {
        (base_h * 2.0, base_w / 2.0)
    } else {
        (base_w, base_h)
    };
    let card = centered_rect(
        area,
        (w * document.scale).round() as u16,
        (h * document.scale).round() as u16,
    );

    let page = Paragraph::new(format!("Page {}", document.page))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Black).bg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(format!(" {}° ", document.rotation.degrees())),
        );
    frame.render_widget(page, card);
}

fn render_document_toolbar(
    frame: &mut Frame,
    area: Rect,
    document: &ViewerState,
    page_input: &PageJumpInput,
) {
    let total = if document.total_pages > 0 {
        document.total_pages.to_string()
    } else {
        "…".to_string()
    };
    let input_style = if page_input.text_input_focused() {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Yellow)
    };

    let line = Line::from(vec![
        Span::raw(" Page "),
        Span::styled(format!("[{:>3}]", page_input.text), input_style),
        Span::raw(format!(" / {total}   ")),
        Span::raw(format!("Zoom {:.0}%   ", document.scale * 100.0)),
        Span::raw(format!("Fit: {}   ", document.fit_mode.label())),
        Span::raw(format!("Rotation {}°", document.rotation.degrees())),
    ]);

    let toolbar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(toolbar, area);
}

fn render_image(frame: &mut Frame, area: Rect, image: &ImageState, url: &str) {
    let block = Block::default().borders(Borders::ALL).title(" Image ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match (&image.error, image.dimensions) {
        (Some(error), _) => render_inline_error(frame, inner, error),
        (None, Some((width, height))) => {
            let text = vec![
                Line::from(Span::styled(url.to_string(), Style::default().fg(Color::Cyan))),
                Line::from(format!("{width} × {height}")),
            ];
            let paragraph = Paragraph::new(text).alignment(Alignment::Center);
            frame.render_widget(paragraph, centered_rect(inner, inner.width, 2));
        }
        (None, None) if image.loading => render_placeholder(frame, inner, "Loading image…"),
        (None, None) => render_placeholder(frame, inner, "No image"),
    }
}

fn render_link(frame: &mut Frame, area: Rect, url: &str) {
    let text = vec![
        Line::from(Span::styled(
            url.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to open in your browser",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default().borders(Borders::ALL).title(" Link ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        centered_rect(inner, inner.width, 3),
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, centered_rect(area, area.width, 1));
}

fn render_inline_error(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered_rect(area, area.width, 3));
}

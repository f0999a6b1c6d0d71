//! Layout rendering (title bar, course sidebar)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::AppModel;
use super::utils::{render_scrollable_list, truncate_string};

pub fn render_title_bar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let (title, kind) = match model.active_material() {
        Some(material) => (material.display_title(), material.kind.label()),
        None => ("No material", ""),
    };
    let position = format!(
        " {}/{} ",
        model.active_index() + 1,
        model.materials().len().max(1)
    );

    let line = Line::from(vec![
        Span::styled(
            format!("{kind} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(title.to_string(), Style::default().fg(Color::White)),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Nexus ")
            .title_bottom(Line::from(position).right_aligned())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(bar, area);
}

/// Ordered material list with completion marks
pub fn render_sidebar(frame: &mut Frame, area: Rect, model: &AppModel) {
    let max_title = area.width.saturating_sub(10) as usize;

    let items: Vec<ListItem> = model
        .materials()
        .iter()
        .enumerate()
        .map(|(i, material)| {
            let mark = if model.is_completed(i) { "✓" } else { " " };
            let style = if i == model.active_index() {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if model.is_completed(i) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {mark} "), Style::default().fg(Color::Green)),
                Span::styled(
                    format!("{:>2}. {}", i + 1, truncate_string(material.display_title(), max_title)),
                    style,
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Materials ([ / ]) ");
    render_scrollable_list(frame, area, items, model.active_index(), block);
}

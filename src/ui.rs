use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

pub const TITLE: &str = "Healthcare Chatbot";
pub const INPUT_LABEL: &str = "Ask a healthcare question";
pub const ANSWER_TITLE: &str = "Answer";

const ACCENT: Color = Color::Blue;

pub fn draw_ui(f: &mut Frame, app: &mut App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = outer.inner(f.area());
    f.render_widget(outer, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Question + Ask
            Constraint::Min(0),    // Answer
            Constraint::Length(1), // Key hints
        ])
        .split(inner);

    render_input_row(f, app, chunks[0]);

    // The answer region only exists while there is something to show.
    if !app.panel.answer().is_empty() {
        render_answer(f, app, chunks[1]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ask  "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit  "),
        Span::styled("↑↓ PgUp PgDn", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" scroll"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hints, chunks[2]);
}

fn render_input_row(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(9)])
        .split(area);

    app.textarea
        .set_block(Block::default().borders(Borders::ALL).title(INPUT_LABEL));
    f.render_widget(&app.textarea, chunks[0]);

    let control = app.panel.control();
    let (content, style) = match control.label() {
        Some(label) => (
            label,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        None => (app.spinner(), Style::default().fg(Color::DarkGray)),
    };
    let border_style = if control.is_enabled() {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(content)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style));
    f.render_widget(button, chunks[1]);
}

fn render_answer(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            ANSWER_TITLE,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);

    let text = answer_text(&app.panel.paragraphs());
    let wrap = Wrap { trim: false };

    // Keys only move the offset; the bottom stop depends on the wrapped height.
    let total = Paragraph::new(text.clone()).wrap(wrap).line_count(inner.width);
    let max_scroll = u16::try_from(total)
        .unwrap_or(u16::MAX)
        .saturating_sub(inner.height);
    app.answer_scroll = app.answer_scroll.min(max_scroll);

    let answer = Paragraph::new(text)
        .block(block)
        .wrap(wrap)
        .scroll((app.answer_scroll, 0));
    f.render_widget(answer, area);
}

/// One block of lines per paragraph, with an empty line between blocks.
pub fn answer_text<'a>(paragraphs: &[&'a str]) -> Text<'a> {
    let mut lines: Vec<Line<'a>> = Vec::new();
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(paragraph.lines().map(Line::raw));
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_text_separates_paragraphs() {
        let text = answer_text(&["A", "B\nb", "C"]);
        let rendered: Vec<String> = text.lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["A", "", "B", "b", "", "C"]);
    }

    #[test]
    fn test_answer_text_empty() {
        assert!(answer_text(&[]).lines.is_empty());
    }
}

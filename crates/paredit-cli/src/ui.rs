use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::clipboard::Clipboard;
use crate::keymap::line_col;
use paredit_engine::editing::{SelectionSpan, TextEditor};

pub fn ui<C: Clipboard>(f: &mut Frame, app: &mut App<C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());
    let body = chunks[0];

    app.scroll_to_cursor(body.height.saturating_sub(2) as usize);

    let text = app.editor().text();
    let selection = app.editor().selection();
    let content = Paragraph::new(highlighted_lines(&text, selection))
        .block(Block::default().borders(Borders::ALL).title(app.title()))
        .scroll((app.scroll() as u16, 0));
    f.render_widget(content, body);

    let status = Paragraph::new(app.status_line())
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_widget(status, chunks[1]);

    match app.prompt() {
        Some(input) => {
            let prompt = format!("paredit.{input}");
            let x = chunks[2].x + prompt.chars().count() as u16;
            f.render_widget(Paragraph::new(prompt), chunks[2]);
            f.set_cursor_position(Position::new(x, chunks[2].y));
        }
        None => {
            f.render_widget(
                Paragraph::new(app.help()).style(Style::default().fg(Color::DarkGray)),
                chunks[2],
            );
            let (line, col) = line_col(&text, selection.cursor);
            if let Some(row) = line.checked_sub(app.scroll()) {
                let x = body.x + 1 + col as u16;
                let y = body.y + 1 + row as u16;
                if x < body.right().saturating_sub(1) && y < body.bottom().saturating_sub(1) {
                    f.set_cursor_position(Position::new(x, y));
                }
            }
        }
    }
}

/// One line per text line, with the selected characters highlighted.
pub fn highlighted_lines(text: &str, selection: SelectionSpan) -> Vec<Line<'static>> {
    let selected = Style::default().bg(Color::Yellow).fg(Color::Black);
    let mut offset = 0;
    text.split('\n')
        .map(|content| {
            let line_start = offset;
            let len = content.chars().count();
            offset += len + 1;

            let from = selection.start.clamp(line_start, line_start + len) - line_start;
            let to = selection.end.clamp(line_start, line_start + len) - line_start;
            if from == to {
                return Line::from(content.to_string());
            }
            let chars: Vec<char> = content.chars().collect();
            let mut spans = Vec::with_capacity(3);
            if from > 0 {
                spans.push(Span::raw(chars[..from].iter().collect::<String>()));
            }
            spans.push(Span::styled(
                chars[from..to].iter().collect::<String>(),
                selected,
            ));
            if to < len {
                spans.push(Span::raw(chars[to..].iter().collect::<String>()));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spans(line: &Line) -> Vec<(String, bool)> {
        line.spans
            .iter()
            .map(|s| (s.content.to_string(), s.style.bg == Some(Color::Yellow)))
            .collect()
    }

    #[test]
    fn collapsed_selection_highlights_nothing() {
        let lines = highlighted_lines("(a b)", SelectionSpan::collapsed(2));
        assert_eq!(lines.len(), 1);
        assert_eq!(spans(&lines[0]), vec![("(a b)".to_string(), false)]);
    }

    #[test]
    fn selection_across_lines() {
        let lines = highlighted_lines("(foo\n  bar)", SelectionSpan::from_pair(2, 9));
        assert_eq!(
            spans(&lines[0]),
            vec![("(f".to_string(), false), ("oo".to_string(), true)]
        );
        assert_eq!(
            spans(&lines[1]),
            vec![("  ba".to_string(), true), ("r)".to_string(), false)]
        );
    }

    #[test]
    fn empty_buffer_has_one_line() {
        assert_eq!(
            highlighted_lines("", SelectionSpan::default()),
            vec![Line::from("")]
        );
    }
}

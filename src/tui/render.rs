//! Frame layout and drawing

use super::HitAreas;
use crate::panel::{MessageKind, MessagePanel, UiMessage};
use crate::runtime::ChatController;
use crate::transport::ChatTransport;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::borrow::Cow;

const SEND_LABEL: &str = "[ Send ]";
const BODY_INDENT: &str = "  ";

pub fn draw<T>(frame: &mut Frame, controller: &mut ChatController<T>) -> HitAreas
where
    T: ChatTransport + 'static,
{
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());
    let input_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(rows[1]);

    draw_messages(frame, rows[0], controller.panel_mut());
    draw_input(frame, input_row[0], controller);
    draw_send_button(frame, input_row[1], controller.state().is_sending());
    draw_status(frame, rows[2], controller);

    HitAreas {
        messages: rows[0],
        send_button: input_row[1],
    }
}

fn draw_messages(frame: &mut Frame, area: Rect, panel: &mut MessagePanel) {
    let block = Block::default().borders(Borders::ALL).title(" Chat ");
    let inner = block.inner(area);

    // Lines are wrapped here so that one line is one row
    let width = usize::from(inner.width.max(1));
    let lines: Vec<Line<'static>> = panel
        .entries()
        .flat_map(|message| message_lines(message, width))
        .collect();

    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_back = total.saturating_sub(inner.height);
    panel.clamp_scroll(max_back);
    let top = max_back - panel.scroll_back();

    let paragraph = Paragraph::new(lines).block(block).scroll((top, 0));
    frame.render_widget(paragraph, area);
}

/// Rows for one entry, each at most `width` columns wide
fn message_lines(message: &UiMessage, width: usize) -> Vec<Line<'static>> {
    let stamp_text = format!("[{}] ", message.at.format("%H:%M"));
    let stamp_width = stamp_text.chars().count();
    let stamp = Span::styled(stamp_text, Style::default().fg(Color::DarkGray));

    let mut lines = match message.kind {
        MessageKind::User | MessageKind::Model => {
            let (label, color) = if message.kind == MessageKind::User {
                ("You", Color::Cyan)
            } else {
                ("Model", Color::Green)
            };
            let mut lines = vec![Line::from(vec![
                stamp,
                Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])];
            lines.extend(
                wrap_text(&message.text, width.saturating_sub(BODY_INDENT.len()))
                    .into_iter()
                    .map(|row| Line::from(format!("{BODY_INDENT}{row}"))),
            );
            lines
        }
        MessageKind::Error => {
            let style = Style::default().fg(Color::Red);
            let pad = " ".repeat(stamp_width);
            wrap_text(&message.display_text(), width.saturating_sub(stamp_width))
                .into_iter()
                .enumerate()
                .map(|(i, row)| {
                    let lead = if i == 0 {
                        stamp.clone()
                    } else {
                        Span::raw(pad.clone())
                    };
                    Line::from(vec![lead, Span::styled(row, style)])
                })
                .collect()
        }
        MessageKind::Typing => wrap_text(&format!("Model is {}", message.text), width)
            .into_iter()
            .map(|row| {
                Line::from(Span::styled(
                    row,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))
            })
            .collect(),
    };

    lines.push(Line::default());
    lines
}

/// Word-wrap each source line, keeping blank lines
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    text.lines()
        .flat_map(|line| {
            textwrap::wrap(line, width)
                .into_iter()
                .map(Cow::into_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn draw_input<T>(frame: &mut Frame, area: Rect, controller: &ChatController<T>)
where
    T: ChatTransport + 'static,
{
    let block = Block::default().borders(Borders::ALL).title(" Message ");
    let inner = block.inner(area);
    let input = controller.input();

    // Keep the cursor visible by sliding the text window
    let visible = usize::from(inner.width.saturating_sub(1).max(1));
    let offset = input.cursor().saturating_sub(visible);
    let shown: String = input.text().chars().skip(offset).collect();

    frame.render_widget(Paragraph::new(shown).block(block), area);

    let cursor_x = u16::try_from(input.cursor() - offset).unwrap_or(inner.width);
    frame.set_cursor_position((inner.x + cursor_x, inner.y));
}

fn draw_send_button(frame: &mut Frame, area: Rect, sending: bool) {
    let style = if sending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(SEND_LABEL)
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn draw_status<T>(frame: &mut Frame, area: Rect, controller: &ChatController<T>)
where
    T: ChatTransport + 'static,
{
    let status = format!(
        " {} | {} | Enter send, PgUp/PgDn scroll, Esc quit",
        controller.state().label(),
        controller.endpoint()
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

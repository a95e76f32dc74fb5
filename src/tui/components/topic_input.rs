//! # TopicInput Component
//!
//! The form's single-line, required text field.
//!
//! ## Responsibilities
//!
//! - Own the topic text and keep it in sync with every edit
//! - Handle editing (insert, paste, backspace, delete, cursor movement)
//! - Refuse to submit while empty, like a `required` form field
//! - Scroll horizontally so the cursor stays visible in narrow terminals
//!
//! Submitting does not clear the field: the text stays until the user
//! edits it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Type a topic and press Enter";

/// High-level events emitted by the TopicInput
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Form submitted with the current text
    Submit(String),
    /// Submit refused because the field is empty
    Rejected,
    /// Text or cursor changed
    ContentChanged,
}

pub struct TopicInput {
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// True after an empty submit, until the next edit.
    pub rejected: bool,
}

impl TopicInput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            rejected: false,
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        self.rejected = false;
    }
}

impl Default for TopicInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TopicInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (title, border_style) = if self.rejected {
            (
                "Topic (required): please fill out this field",
                Style::default().fg(Color::Yellow),
            )
        } else {
            ("Topic", Style::default())
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);

        let inner_width = area.width.saturating_sub(2) as usize;
        let (visible, cursor_col) = visible_window(&self.buffer, self.cursor, inner_width);

        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(visible.to_string(), Style::default().fg(Color::Green)))
        };

        frame.render_widget(Paragraph::new(line).block(block), area);

        if inner_width > 0 && area.height > 2 {
            frame.set_cursor_position((area.x + 1 + cursor_col as u16, area.y + 1));
        }
    }
}

impl EventHandler for TopicInput {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut encoded));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: line breaks are dropped
                let flattened: String = text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
                if flattened.is_empty() {
                    return None;
                }
                self.insert_str(&flattened);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                self.rejected = false;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                self.rejected = false;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if self.buffer.is_empty() {
                    self.rejected = true;
                    Some(InputEvent::Rejected)
                } else {
                    Some(InputEvent::Submit(self.buffer.clone()))
                }
            }
            _ => None,
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .chars()
        .next_back()
        .map_or(0, |c| pos - c.len_utf8())
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}

/// Slice of `buffer` that fits in `width` columns with the cursor visible,
/// plus the cursor's column within that slice.
fn visible_window(buffer: &str, cursor: usize, width: usize) -> (&str, usize) {
    if width == 0 {
        return ("", 0);
    }

    // The cursor cell itself needs a column, hence `>=`
    let mut start = 0;
    while buffer[start..cursor].width() >= width {
        start = next_char_boundary(buffer, start);
    }

    let mut end = start;
    let mut used = 0;
    for (idx, ch) in buffer[start..].char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        end = start + idx + ch.len_utf8();
    }

    (&buffer[start..end], buffer[start..cursor].width())
}

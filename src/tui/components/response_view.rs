//! # ResponseView Component
//!
//! Shows the backend's reply. Renders nothing at all while the reply is
//! empty, so the area stays blank until the first successful submission.
//!
//! Replies can be long markdown lessons, so the body is rendered through
//! [`crate::tui::markdown`] inside a `tui_scrollview::ScrollView`.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Scroll position of the reply, kept across frames.
#[derive(Default)]
pub struct ResponseViewState {
    pub scroll_state: ScrollViewState,
}

impl ResponseViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when a new reply replaces the old one.
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for ResponseViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// # Props
///
/// - `message`: the current reply (may be empty)
/// - `answered_at`: when it arrived, shown in the title
pub struct ResponseView<'a> {
    pub message: &'a str,
    pub answered_at: Option<DateTime<Local>>,
    pub state: &'a mut ResponseViewState,
}

impl ResponseView<'_> {
    fn title(&self) -> String {
        match self.answered_at {
            Some(at) => format!("Reply ({})", at.format("%H:%M:%S")),
            None => "Reply".to_string(),
        }
    }
}

impl Component for ResponseView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.message.is_empty() {
            return;
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column reserved for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(markdown::render(self.message, Color::White))
            .wrap(Wrap { trim: false });
        let content_height = scroll_height(paragraph.line_count(content_width));

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

/// Wrapped line count as a scroll height. Longer replies are cut at `u16::MAX` rows.
fn scroll_height(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(message: &str, state: &mut ResponseViewState, height: u16) -> String {
        let backend = TestBackend::new(40, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut view = ResponseView {
                    message,
                    answered_at: None,
                    state: &mut *state,
                };
                view.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_scroll_height_saturates() {
        assert_eq!(scroll_height(12), 12);
        assert_eq!(scroll_height(65_535), u16::MAX);
        // 70_000 as u16 would wrap to 4464
        assert_eq!(scroll_height(70_000), u16::MAX);
    }

    #[test]
    fn test_empty_reply_renders_nothing() {
        let mut state = ResponseViewState::new();
        let text = draw("", &mut state, 6);
        assert!(text.trim().is_empty());
    }

    #[test]
    fn test_reply_text_is_shown() {
        let mut state = ResponseViewState::new();
        let text = draw("Hello, Alice", &mut state, 6);
        assert!(text.contains("Reply"));
        assert!(text.contains("Hello, Alice"));
    }

    #[test]
    fn test_title_includes_time() {
        let mut state = ResponseViewState::new();
        let at = Local::now();
        let view = ResponseView {
            message: "x",
            answered_at: Some(at),
            state: &mut state,
        };
        assert_eq!(view.title(), format!("Reply ({})", at.format("%H:%M:%S")));
    }

    #[test]
    fn test_scroll_events_are_consumed() {
        let mut state = ResponseViewState::new();
        let long: String = (1..=30).map(|i| format!("line {i}\n\n")).collect();
        draw(&long, &mut state, 8);

        assert_eq!(state.handle_event(&TuiEvent::ScrollDown), Some(()));
        assert_eq!(state.scroll_state.offset().y, 1);
        state.reset();
        assert_eq!(state.scroll_state.offset().y, 0);

        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }
}

//! # TitleBar Component
//!
//! Single status line at the top: where submissions go and what is
//! happening right now.
//!
//! Priority of the right-hand segment:
//!
//! 1. **Requests outstanding**: `"topicform → <endpoint> | Submitting… (2)"`
//! 2. **Status message**: `"topicform → <endpoint> | Answered #3"`
//! 3. **Default**: `"topicform → <endpoint>"`
//!
//! The outstanding count is informational only; the form never blocks a
//! new submission while earlier ones are pending.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// All fields are props.
pub struct TitleBar {
    pub endpoint: String,
    pub status_message: String,
    pub in_flight: usize,
}

impl TitleBar {
    pub fn new(endpoint: String, status_message: String, in_flight: usize) -> Self {
        Self {
            endpoint,
            status_message,
            in_flight,
        }
    }

    fn text(&self) -> String {
        if self.in_flight > 0 {
            format!("topicform → {} | Submitting… ({})", self.endpoint, self.in_flight)
        } else if self.status_message.is_empty() {
            format!("topicform → {}", self.endpoint)
        } else {
            format!("topicform → {} | {}", self.endpoint, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const ENDPOINT: &str = "http://127.0.0.1:5000/api/greet";

    #[test]
    fn test_title_bar_submitting_wins_over_status() {
        let bar = TitleBar::new(ENDPOINT.to_string(), "Answered #1".to_string(), 2);
        assert_eq!(bar.text(), format!("topicform → {ENDPOINT} | Submitting… (2)"));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let bar = TitleBar::new(ENDPOINT.to_string(), "Failed #4".to_string(), 0);
        assert_eq!(bar.text(), format!("topicform → {ENDPOINT} | Failed #4"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = TitleBar::new(ENDPOINT.to_string(), String::new(), 0);

        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("topicform"));
        assert!(text.contains(ENDPOINT));
        assert!(!text.contains('|'));
    }
}

//! # ErrorBanner Component
//!
//! Red box shown above the reply when the last request failed. The reply
//! below it keeps showing whatever last succeeded.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl Component for ErrorBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default().fg(Color::Red);
        let banner = Paragraph::new(self.message)
            .block(
                Block::bordered()
                    .title("Request failed")
                    .title_style(style.add_modifier(Modifier::BOLD))
                    .border_style(style),
            )
            .style(style)
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, area);
    }
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::FormState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorBanner, ResponseView, TitleBar};

const HELP_TEXT: &str = "Enter submit · Esc cancel pending / quit · PgUp/PgDn scroll · Ctrl+C quit";
const INPUT_HEIGHT: u16 = 3;
const BANNER_HEIGHT: u16 = 3;

struct Areas {
    title: Rect,
    input: Rect,
    banner: Rect,
    reply: Rect,
    help: Rect,
}

fn layout(area: Rect, has_error: bool) -> Areas {
    use Constraint::{Length, Min};
    let banner_height = if has_error { BANNER_HEIGHT } else { 0 };
    let [title, input, banner, reply, help] = Layout::vertical([
        Length(1),
        Length(INPUT_HEIGHT),
        Length(banner_height),
        Min(0),
        Length(1),
    ])
    .areas(area);
    Areas {
        title,
        input,
        banner,
        reply,
        help,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &FormState, tui: &mut TuiState) {
    let areas = layout(frame.area(), app.error.is_some());

    TitleBar::new(
        app.endpoint.clone(),
        app.status_message.clone(),
        app.in_flight.len(),
    )
    .render(frame, areas.title);

    tui.input.render(frame, areas.input);

    if let Some(error) = &app.error {
        ErrorBanner { message: error }.render(frame, areas.banner);
    }

    ResponseView {
        message: &app.response_message,
        answered_at: app.answered_at,
        state: &mut tui.response,
    }
    .render(frame, areas.reply);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        areas.help,
    );
}

//! Markdown → ratatui `Text` renderer for backend replies.
//!
//! Replies are usually model-written lessons: headings, lists, emphasis and
//! fenced code. HTML is shown verbatim as plain text (`#include <vector>`,
//! `List<T>` are ordinary reply content). Tables and footnotes are not
//! styled.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.text
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline styles, composed with `patch` so bold inside italic works.
    styles: Vec<Style>,
    /// Prefixes repeated on every line of the current block (quote bar, code gutter).
    line_prefixes: Vec<Span<'static>>,
    /// None = bullet list, Some(n) = ordered list at item n.
    list_indices: Vec<Option<u64>>,
    in_code_block: bool,
    link_url: Option<String>,
    needs_blank: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            in_code_block: false,
            link_url: None,
            needs_blank: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn new_line(&mut self) {
        let prefixes: Vec<Span<'static>> = self.line_prefixes.clone();
        self.text.lines.push(Line::from(prefixes));
    }

    fn push_span(&mut self, span: Span<'static>) {
        if self.text.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn start_block(&mut self) {
        if self.needs_blank {
            self.text.lines.push(Line::default());
            self.needs_blank = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.push_span(Span::styled(
                c.into_string(),
                Style::default().fg(Color::Cyan).bg(Color::Black),
            )),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.start_block();
                self.text.lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_blank = true;
            }
            Event::TaskListMarker(checked) => {
                self.push_span(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            Event::Html(raw) => {
                for line in raw.lines() {
                    self.new_line();
                    self.push_span(Span::styled(line.to_string(), self.style()));
                }
            }
            Event::InlineHtml(raw) => self.raw_text(&raw),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.start_block();
                // List items already opened their line with the bullet
                if self.list_indices.is_empty() || !self.last_line_is_bullet() {
                    self.new_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.start_block();
                self.new_line();
                self.push_style(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.line_prefixes
                    .push(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.start_block();
                let lang = match &kind {
                    CodeBlockKind::Fenced(l) => l.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let gutter = Style::default().fg(Color::DarkGray);
                self.text.lines.push(Line::from(vec![
                    Span::styled("╭── ", gutter),
                    Span::styled(lang, gutter.add_modifier(Modifier::BOLD)),
                ]));
                self.line_prefixes.push(Span::styled("│ ", gutter));
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.start_block();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                let depth = self.list_indices.len().saturating_sub(1);
                let marker = match self.list_indices.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.new_line();
                self.push_span(Span::raw("  ".repeat(depth)));
                self.push_span(Span::styled(marker, Style::default().fg(Color::Yellow)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::HtmlBlock => self.start_block(),
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.into_string());
                self.push_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_blank = self.list_indices.is_empty(),
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                self.line_prefixes.pop();
                self.in_code_block = false;
                self.text.lines.push(Line::from(Span::styled(
                    "╰──",
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_blank = self.list_indices.is_empty();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::HtmlBlock => self.needs_blank = true,
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    /// Inline tag text, kept as typed. A tag spanning lines continues on a new line.
    fn raw_text(&mut self, raw: &str) {
        let style = self.style();
        for (idx, line) in raw.split('\n').enumerate() {
            if idx > 0 {
                self.new_line();
            }
            if !line.is_empty() {
                self.push_span(Span::styled(line.to_string(), style));
            }
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        if self.in_code_block {
            let style = Style::default().fg(Color::Cyan);
            for line in cow.replace('\t', "    ").lines() {
                self.new_line();
                self.push_span(Span::styled(line.to_string(), style));
            }
            return;
        }
        let style = self.style();
        self.push_span(Span::styled(cow.into_string(), style));
    }

    /// True when the last line holds only an item marker (and its indent).
    fn last_line_is_bullet(&self) -> bool {
        self.text.lines.last().is_some_and(|line| {
            line.spans
                .last()
                .is_some_and(|span| span.content.ends_with(". ") || span.content == "• ")
        })
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.fg(Color::Magenta).add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style.fg(Color::Magenta),
        _ => style.fg(Color::Blue),
    }
}

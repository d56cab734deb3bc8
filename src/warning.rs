use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;
use std::error::Error;

/// A modal pop-up describing a non-fatal error and its causes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: u16 = 12;
    const TEXT_WIDTH: u16 = 44;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn from_error(e: &dyn Error) -> Warning {
        let mut lines = wrap(&e.to_string(), "", "");
        let mut source = e.source();
        if source.is_some() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
        }
        while let Some(src) = source {
            lines.extend(wrap(&src.to_string(), "  - ", "    "));
            source = src.source();
        }
        Warning { lines }
    }

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    fn shown_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .take(usize::from(Warning::MAX_LINES))
            .map(String::as_str)
    }
}

fn wrap(s: &str, initial_indent: &str, subsequent_indent: &str) -> Vec<String> {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    textwrap::wrap(s, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    // `area` is the whole display; the pop-up is centered within it.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Warning::MAX_LINES);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height: text_height.saturating_add(4),
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.shown_lines()).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

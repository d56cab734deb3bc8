use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Widget,
};

/// The screen listing recorded scores, highest first
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Leaderboard {
    scores: Vec<u32>,
}

impl Leaderboard {
    const WIDTH: u16 = 20;

    /// `scores` must already be in display order.
    pub(crate) fn new(scores: Vec<u32>) -> Leaderboard {
        Leaderboard { scores }
    }
}

impl Widget for &Leaderboard {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Leaderboard::WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [title_area, list_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .spacing(1)
        .areas(area);

        Line::styled("The leaderboard:", consts::TITLE_STYLE)
            .centered()
            .render(title_area, buf);
        if self.scores.is_empty() {
            Line::from("No scores yet").centered().render(list_area, buf);
        } else {
            // Rows beyond the available space are left off.
            for ((rank, score), row) in (1..).zip(&self.scores).zip(list_area.rows()) {
                Line::from(format!("{rank:>3}. {score}")).render(row, buf);
            }
        }
        Line::from_iter([
            Span::raw("To exit, press "),
            Span::styled("Esc", consts::KEY_STYLE),
        ])
        .centered()
        .render(footer_area, buf);
    }
}

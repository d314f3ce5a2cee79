use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::config::{FIELD_BG, TEXT_COLOR};
use crate::game::Snapshot;

/// Renders the one-line score bar and returns the remaining play area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let [score_area, length_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(hud_area);

    let style = Style::default().fg(TEXT_COLOR).bg(FIELD_BG);
    frame.render_widget(
        Paragraph::new(format!(" Score: {}", snapshot.score))
            .style(style.add_modifier(Modifier::BOLD)),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(format!("Length: {} ", snapshot.snake.len()))
            .alignment(Alignment::Right)
            .style(style),
        length_area,
    );

    play_area
}

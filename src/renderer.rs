use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;

use crate::config::{CELL_ASPECT_X, DEFAULT_CELL_SIZE, FIELD_BG, FOOD_COLOR, GridSize, SNAKE_COLOR};
use crate::game::Snapshot;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Largest whole cell size at which the grid fits the available surface.
///
/// Falls back to [`DEFAULT_CELL_SIZE`] when the surface has no size, and never
/// returns less than 1 so a cramped terminal still shows something.
#[must_use]
pub fn fit_cell_size(available_width: u16, available_height: u16, grid: GridSize) -> u16 {
    if available_width == 0 || available_height == 0 || grid.width == 0 || grid.height == 0 {
        return DEFAULT_CELL_SIZE;
    }

    let by_width = available_width / grid.width.saturating_mul(CELL_ASPECT_X);
    let by_height = available_height / grid.height;
    by_width.min(by_height).max(1)
}

/// Placement of the logical grid inside a terminal area.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridLayout {
    /// Top-left terminal cell of grid cell (0, 0).
    pub origin: (u16, u16),
    pub cell_width: u16,
    pub cell_height: u16,
    /// Visible part of the grid; equal to the full grid when it fits.
    pub field: Rect,
}

impl GridLayout {
    /// Scales and centres `grid` inside `area`.
    #[must_use]
    pub fn fit(area: Rect, grid: GridSize) -> Self {
        let cell_size = fit_cell_size(area.width, area.height, grid);
        let cell_width = cell_size.saturating_mul(CELL_ASPECT_X);
        let cell_height = cell_size;

        let grid_width = grid.width.saturating_mul(cell_width);
        let grid_height = grid.height.saturating_mul(cell_height);
        let origin = (
            area.x + area.width.saturating_sub(grid_width) / 2,
            area.y + area.height.saturating_sub(grid_height) / 2,
        );
        let field = Rect::new(origin.0, origin.1, grid_width, grid_height).intersection(area);

        Self {
            origin,
            cell_width,
            cell_height,
            field,
        }
    }

    /// Terminal rectangle covered by grid cell `position`, clipped to the visible field.
    #[must_use]
    pub fn cell_rect(&self, position: Position) -> Option<Rect> {
        let x = u16::try_from(position.x).ok()?;
        let y = u16::try_from(position.y).ok()?;

        let rect = Rect::new(
            self.origin.0.saturating_add(x.saturating_mul(self.cell_width)),
            self.origin.1.saturating_add(y.saturating_mul(self.cell_height)),
            self.cell_width,
            self.cell_height,
        )
        .intersection(self.field);

        (!rect.is_empty()).then_some(rect)
    }
}

/// Renders the full game frame from a read-only snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot);

    let block = Block::bordered().title(" Ekans ");
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let layout = GridLayout::fit(inner, snapshot.grid);
    let buffer = frame.buffer_mut();
    buffer.set_style(layout.field, Style::new().bg(FIELD_BG));

    for segment in snapshot.snake.segments() {
        paint_cell(frame, &layout, *segment, SNAKE_COLOR);
    }
    paint_cell(frame, &layout, snapshot.food, FOOD_COLOR);

    if snapshot.game_over {
        render_game_over_menu(frame, play_area, snapshot.score, snapshot.death_reason);
    }
}

fn paint_cell(frame: &mut Frame<'_>, layout: &GridLayout, position: Position, color: Color) {
    let Some(rect) = layout.cell_rect(position) else {
        return;
    };

    frame.buffer_mut().set_style(rect, Style::new().bg(color));
}

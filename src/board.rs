use crate::theme;
use crate::util::center_rect;
use diamond_hunter::engine::{Coordinate, Phase, Snapshot};
use diamond_hunter::GridSizing;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget drawing one frame of the game: the score bar, the playfield, a
/// status line, and (optionally) the game-over pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Board<'a> {
    snapshot: &'a Snapshot,
    sizing: GridSizing,
    dialog: bool,
}

impl<'a> Board<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot, sizing: GridSizing, dialog: bool) -> Board<'a> {
        Board {
            snapshot,
            sizing,
            dialog,
        }
    }

    /// Size of a grid cell in terminal cells
    fn cell_size(&self) -> Size {
        Size::new(
            self.sizing.cell_width().get(),
            self.sizing.cell_height().get(),
        )
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, field_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let snap = self.snapshot;
        Line::styled(
            format!(" Score: {}  High score: {}", snap.score, snap.high_score),
            theme::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let cell = self.cell_size();
        let block_size = Size::new(
            snap.grid
                .width()
                .saturating_mul(cell.width)
                .saturating_add(2),
            snap.grid
                .height()
                .saturating_mul(cell.height)
                .saturating_add(2),
        );
        let block_area = center_rect(field_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            cell,
            buf,
        };
        for &pos in snap.snake.iter().skip(1) {
            canvas.draw_cell(pos, theme::SNAKE_BODY_SYMBOL, theme::SNAKE_STYLE);
        }
        for &pos in &snap.food {
            canvas.draw_cell(pos, theme::FOOD_SYMBOL, theme::FOOD_STYLE);
        }
        if let Some(head) = snap.head() {
            if snap.is_over() {
                canvas.draw_cell(head, theme::COLLISION_SYMBOL, theme::COLLISION_STYLE);
            } else {
                canvas.draw_cell(
                    head,
                    theme::head_symbol(snap.direction),
                    theme::SNAKE_STYLE,
                );
            }
        }

        status_line(snap).render(status_area, buf);

        if self.dialog && snap.is_over() {
            let dialog_area = center_rect(
                field_area,
                Size::new(GameOver::WIDTH, GameOver::HEIGHT),
            );
            GameOver {
                score: snap.score,
                high_score: snap.high_score,
            }
            .render(dialog_area, buf);
        }
    }
}

fn status_line(snap: &Snapshot) -> Line<'static> {
    match snap.phase {
        Phase::NotStarted => Line::from_iter([
            Span::raw(" Press "),
            Span::styled("p", theme::KEY_STYLE),
            Span::raw(" to play"),
        ]),
        Phase::Running => Line::from(format!(" Speed: {} ms", snap.speed_ms)),
        Phase::GameOver => Line::from_iter([
            Span::raw(" Play again ("),
            Span::styled("p", theme::KEY_STYLE),
            Span::raw(") or quit ("),
            Span::styled("q", theme::KEY_STYLE),
            Span::raw(")"),
        ]),
    }
}

/// Pop-up shown when a game ends
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameOver {
    score: u32,
    high_score: u32,
}

impl GameOver {
    const HEIGHT: u16 = 6;
    const WIDTH: u16 = 20;
}

impl Widget for GameOver {
    /*
     * ┌─── Game Over! ───┐
     * │ Score: 30        │
     * │ High score: 30   │
     * │                  │
     * │ OK (Enter)       │
     * └──────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" Game Over! ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = [
            Line::from(format!("Score: {}", self.score)),
            Line::from(format!("High score: {}", self.high_score)),
            Line::default(),
            Line::from_iter([
                Span::raw("OK ("),
                Span::styled("Enter", theme::KEY_STYLE),
                Span::raw(")"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

/// The playfield, addressed in grid coordinates
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    cell: Size,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Fill the terminal cells making up grid cell `pos`: `symbol` in the top
    /// left corner and blanks elsewhere, all in `style`.  Anything outside
    /// the playfield is clipped.
    fn draw_cell(&mut self, pos: Coordinate, symbol: char, style: Style) {
        let (Ok(col), Ok(row)) = (u16::try_from(pos.x), u16::try_from(pos.y)) else {
            return;
        };
        let Some(x0) = col
            .checked_mul(self.cell.width)
            .and_then(|x| x.checked_add(self.area.x))
        else {
            return;
        };
        let Some(y0) = row
            .checked_mul(self.cell.height)
            .and_then(|y| y.checked_add(self.area.y))
        else {
            return;
        };
        for dy in 0..self.cell.height {
            for dx in 0..self.cell.width {
                let (Some(x), Some(y)) = (x0.checked_add(dx), y0.checked_add(dy)) else {
                    continue;
                };
                if !self.area.contains(Position::new(x, y)) {
                    continue;
                }
                if let Some(c) = self.buf.cell_mut((x, y)) {
                    c.set_char(if dx == 0 && dy == 0 { symbol } else { ' ' });
                    c.set_style(Style::reset().patch(style));
                }
            }
        }
    }
}

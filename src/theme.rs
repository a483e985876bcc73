//! Glyphs & styles for the terminal front-end
use diamond_hunter::engine::Direction;
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// How long to wait for input before checking for new game states
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Rows of the terminal not available to the playfield: the header, the
/// status line, and the board's top & bottom borders
pub(crate) const RESERVED_ROWS: u16 = 4;

/// Columns of the terminal not available to the playfield: the board's left
/// & right borders
pub(crate) const RESERVED_COLUMNS: u16 = 2;

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for a piece of food
pub(crate) const FOOD_SYMBOL: char = '◆';

/// Glyph for the snake's head once it has crashed
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightCyan);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Glyph for the snake's head, open towards where it is heading
pub(crate) fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => 'v',
        Direction::Down => '^',
        Direction::Left => '>',
        Direction::Right => '<',
    }
}

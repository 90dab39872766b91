use bit_common::{Cell, Color, Facing, Grid};
use crossterm::style::{self, Stylize};

pub const HELP_TEXT: &str =
    "n: next step    p: previous step    f: first step    l: last step    s: switch world    q: quit";

const BLANK: &str = "     ";

fn background(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::Grey,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Blue => style::Color::DarkBlue,
        Color::Green => style::Color::DarkGreen,
    }
}

// Cyan on the square's color; the agent's glyph sits in the middle line
fn square(cell: &Cell, facing: Facing, line: usize) -> String {
    let text = if cell.occupied && line == 1 {
        format!("  {}  ", facing.glyph())
    } else {
        BLANK.to_string()
    };
    text.with(style::Color::DarkCyan)
        .on(background(cell.color))
        .to_string()
}

/// Draws the grid with each square five columns wide and three lines tall.
pub fn draw_grid_colored(out: &mut String, grid: &Grid, facing: Facing) {
    for row in grid.rows() {
        for line in 0..3 {
            for cell in row {
                out.push_str(&square(cell, facing, line));
            }
            out.push('\n');
        }
    }
}

/// One character per square: the world-file symbol, or the agent's glyph.
pub fn draw_grid_plain(out: &mut String, grid: &Grid, facing: Facing) {
    for row in grid.rows() {
        let line: String = row.iter().map(|cell| plain_symbol(cell, facing)).collect();
        out.push_str(&line);
        out.push('\n');
    }
}

fn plain_symbol(cell: &Cell, facing: Facing) -> char {
    if cell.occupied {
        facing.glyph()
    } else {
        cell.color.symbol()
    }
}

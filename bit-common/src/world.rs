use crate::error::WorldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color of a single square in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
    Red,
    Blue,
    Green,
}

impl Color {
    /// Maps a world-file symbol (`-`, `x`, `r`, `b`, `g`) to a color.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(Color::White),
            'x' => Some(Color::Black),
            'r' => Some(Color::Red),
            'b' => Some(Color::Blue),
            'g' => Some(Color::Green),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::White => '-',
            Color::Black => 'x',
            Color::Red => 'r',
            Color::Blue => 'b',
            Color::Green => 'g',
        }
    }

    /// Colors the agent may paint with. White is reached through erase only.
    pub fn from_paint_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A square of the world: its color and whether the agent stands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub color: Color,
    pub occupied: bool,
}

impl Cell {
    pub fn new(color: Color) -> Self {
        Cell {
            color,
            occupied: false,
        }
    }
}

/// Direction the agent is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'u' => Some(Facing::Up),
            'd' => Some(Facing::Down),
            'l' => Some(Facing::Left),
            'r' => Some(Facing::Right),
            _ => None,
        }
    }

    /// Up -> Right -> Down -> Left -> Up.
    pub fn turn_right(self) -> Self {
        match self {
            Facing::Up => Facing::Right,
            Facing::Right => Facing::Down,
            Facing::Down => Facing::Left,
            Facing::Left => Facing::Up,
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Facing::Up => Facing::Left,
            Facing::Left => Facing::Down,
            Facing::Down => Facing::Right,
            Facing::Right => Facing::Up,
        }
    }

    /// Row and column offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Facing::Up => (-1, 0),
            Facing::Down => (1, 0),
            Facing::Left => (0, -1),
            Facing::Right => (0, 1),
        }
    }

    /// Glyph used by the viewer to draw the agent.
    pub fn glyph(self) -> char {
        match self {
            Facing::Up => '▲',
            Facing::Down => '▼',
            Facing::Left => '◀',
            Facing::Right => '▶',
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left => "left",
            Facing::Right => "right",
        };
        f.write_str(name)
    }
}

/// Rectangular world of cells stored row-major. The shape is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-white grid with no agent on it.
    pub fn new(width: usize, height: usize) -> Result<Self, WorldError> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyGrid);
        }
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    /// Builds a grid from rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, WorldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(WorldError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(WorldError::RaggedRow {
                    row,
                    expected: width,
                    found: cells_in_row.len(),
                });
            }
            cells.extend(cells_in_row);
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, WorldError> {
        if row >= self.height || col >= self.width {
            return Err(WorldError::IndexOutOfRange {
                row,
                col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(row * self.width + col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, WorldError> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, WorldError> {
        let idx = self.index(row, col)?;
        Ok(&mut self.cells[idx])
    }

    /// Coordinates one step from `(row, col)` towards `facing`, or `None` past the edge.
    pub fn neighbor(&self, row: usize, col: usize, facing: Facing) -> Option<(usize, usize)> {
        let (d_row, d_col) = facing.delta();
        let row = row.checked_add_signed(d_row)?;
        let col = col.checked_add_signed(d_col)?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// `(row, col)` of every cell that holds the agent.
    pub fn occupied_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.occupied)
            .map(|(idx, _)| (idx / self.width, idx % self.width))
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = WorldError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.rows().map(<[Cell]>::to_vec).collect()
    }
}

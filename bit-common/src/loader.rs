//! Reader for the plain-text world format.
//!
//! ```text
//! u
//! -r-r-
//! -b-b-
//! xx---
//! 0 0
//! ```
//!
//! The first line is the starting facing (`u`, `d`, `l`, `r`), every following
//! line is a row of squares (`-` white, `r` red, `b` blue, `g` green, `x`
//! black) and the last line is the agent's starting column and row.

use crate::error::WorldError;
use crate::world::{Cell, Color, Facing, Grid};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// A parsed world file: the grid with the agent's cell marked occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    pub facing: Facing,
    pub grid: Grid,
    /// Column of the agent.
    pub x: usize,
    /// Row of the agent.
    pub y: usize,
}

pub fn parse_world(text: &str) -> Result<World, WorldError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    if lines.len() < 3 {
        let line = lines.last().map_or(1, |(n, _)| *n);
        return Err(WorldError::parse(
            line,
            "expected a facing line, at least one row and a position line",
        ));
    }

    let (facing_line, facing_text) = lines[0];
    let facing = parse_facing(facing_line, facing_text)?;

    let (position_line, position_text) = lines[lines.len() - 1];
    let (x, y) = parse_position(position_line, position_text)?;

    let mut rows = Vec::with_capacity(lines.len() - 2);
    for &(line, text) in &lines[1..lines.len() - 1] {
        let row = text
            .chars()
            .map(|symbol| {
                Color::from_symbol(symbol)
                    .map(Cell::new)
                    .ok_or_else(|| WorldError::parse(line, format!("unknown square '{symbol}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    let mut grid = Grid::from_rows(rows)?;
    match grid.cell_mut(y, x) {
        Ok(cell) => cell.occupied = true,
        Err(_) => {
            return Err(WorldError::parse(
                position_line,
                format!(
                    "start ({x}, {y}) is outside the {}x{} world",
                    grid.width(),
                    grid.height()
                ),
            ))
        }
    }

    Ok(World { facing, grid, x, y })
}

fn parse_facing(line: usize, text: &str) -> Result<Facing, WorldError> {
    let mut chars = text.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Facing::from_symbol(symbol)
            .ok_or_else(|| WorldError::parse(line, format!("unknown facing '{symbol}'"))),
        _ => Err(WorldError::parse(line, "facing must be one of u, d, l, r")),
    }
}

fn parse_position(line: usize, text: &str) -> Result<(usize, usize), WorldError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let parsed: Option<(usize, usize)> = match tokens.as_slice() {
        [x, y] => x.parse().ok().zip(y.parse().ok()),
        // "03" reads as column 0, row 3.
        [both] if both.len() == 2 && both.chars().all(|c| c.is_ascii_digit()) => {
            let mut digits = both.chars().filter_map(|c| c.to_digit(10));
            digits
                .next()
                .zip(digits.next())
                .map(|(x, y)| (x as usize, y as usize))
        }
        _ => None,
    };
    parsed.ok_or_else(|| WorldError::parse(line, format!("expected 'X Y' position, got '{text}'")))
}

/// Reads and parses a world file.
pub fn load_world<P: AsRef<Path>>(path: P) -> Result<World> {
    let path_ref = path.as_ref();
    let text = std::fs::read_to_string(path_ref)
        .with_context(|| format!("Failed to read world file '{}'", path_ref.display()))?;
    let world = parse_world(&text)
        .with_context(|| format!("Failed to parse world file '{}'", path_ref.display()))?;
    debug!(
        "Loaded {}x{} world from {} (agent at {}, {} facing {})",
        world.grid.width(),
        world.grid.height(),
        path_ref.display(),
        world.x,
        world.y,
        world.facing
    );
    Ok(world)
}

/// Loads the start and goal worlds of a run and checks they have the same shape.
pub fn load_world_pair<P: AsRef<Path>, Q: AsRef<Path>>(start: P, goal: Q) -> Result<(World, World)> {
    let start = load_world(start)?;
    let goal = load_world(goal)?;
    if !start.grid.same_dimensions(&goal.grid) {
        return Err(WorldError::DimensionMismatch {
            height: start.grid.height(),
            width: start.grid.width(),
            goal_height: goal.grid.height(),
            goal_width: goal.grid.width(),
        }
        .into());
    }
    Ok((start, goal))
}

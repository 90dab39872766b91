use bit_common::{Facing, Grid, Snapshot, World};
use std::sync::Arc;

/// Where the agent stands, which way it faces and how many steps it has taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    pub facing: Facing,
    /// Counts moves and turns, including a move that ends the run.
    pub step_count: u32,
}

impl Agent {
    pub fn new(x: usize, y: usize, facing: Facing) -> Self {
        Agent {
            x,
            y,
            facing,
            step_count: 0,
        }
    }

    /// Places a fresh agent where the world file put it.
    pub fn from_world(world: &World) -> Self {
        Agent::new(world.x, world.y, world.facing)
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.turn_right();
    }

    /// `(row, col)` of the square one step towards `direction`, if it exists.
    pub fn neighbor(&self, grid: &Grid, direction: Facing) -> Option<(usize, usize)> {
        grid.neighbor(self.y, self.x, direction)
    }

    /// Copies the agent and `world` into a snapshot sharing `goal`.
    pub fn snapshot(&self, world: &Grid, goal: &Arc<Grid>) -> Snapshot {
        Snapshot {
            facing: self.facing,
            step_count: self.step_count,
            x: self.x,
            y: self.y,
            world: world.clone(),
            goal: Arc::clone(goal),
        }
    }
}

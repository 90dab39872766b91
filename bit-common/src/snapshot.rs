use crate::world::{Facing, Grid};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The agent and its world as they stood after one recorded step.
///
/// `world` is an owned copy, so later moves and paints never reach back into
/// an earlier snapshot. The goal never changes during a run and is shared.
/// Run records store the goal once and rebuild the sharing on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub facing: Facing,
    /// Moves and turns taken so far.
    pub step_count: u32,
    /// Column of the agent.
    pub x: usize,
    /// Row of the agent.
    pub y: usize,
    pub world: Grid,
    pub goal: Arc<Grid>,
}

/// A user-named marker of how many steps had been taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub step_count: u32,
    pub name: String,
}

use thiserror::Error;

/// Errors raised while building or indexing a world.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("world has no rows")]
    EmptyGrid,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({row}, {col}) is outside a {height}x{width} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("goal world is {goal_height}x{goal_width} but start world is {height}x{width}")]
    DimensionMismatch {
        height: usize,
        width: usize,
        goal_height: usize,
        goal_width: usize,
    },

    #[error("expected exactly one occupied cell, found {found}")]
    AgentCount { found: usize },

    #[error("agent position ({x}, {y}) does not hold the occupied cell")]
    AgentMisplaced { x: usize, y: usize },
}

/// A recorded history that breaks the log's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("history must contain at least the initial state")]
    Empty,

    #[error("entry at position {position} claims index {index}")]
    IndexMismatch { position: usize, index: usize },

    #[error("entry {index} has a {height}x{width} world but the goal is {goal_height}x{goal_width}")]
    ShapeMismatch {
        index: usize,
        height: usize,
        width: usize,
        goal_height: usize,
        goal_width: usize,
    },
}

impl WorldError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        WorldError::Parse {
            line,
            reason: reason.into(),
        }
    }
}

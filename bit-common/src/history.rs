use crate::error::HistoryError;
use crate::snapshot::Snapshot;
use crate::world::{Facing, Grid};

/// Label of the entry every log starts with.
pub const INITIAL_LABEL: &str = "initial state";

/// One recorded step: the state after it and what caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,
    pub label: String,
    /// Position of this entry in its log.
    pub index: usize,
}

/// What a renderer needs to draw one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderData<'a> {
    pub facing: Facing,
    pub grid: &'a Grid,
}

/// Append-only list of snapshots with a read cursor for stepping through them.
///
/// The log is never empty and the cursor always points at an existing entry.
/// Navigating moves only the cursor; entries are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl HistoryLog {
    /// Starts a log whose entry 0 is `initial`, labelled [`INITIAL_LABEL`].
    pub fn new(initial: Snapshot) -> Self {
        HistoryLog {
            entries: vec![HistoryEntry {
                snapshot: initial,
                label: INITIAL_LABEL.to_string(),
                index: 0,
            }],
            cursor: 0,
        }
    }

    /// Records a step and returns its index. The cursor does not move.
    pub fn append(&mut self, snapshot: Snapshot, label: impl Into<String>) -> usize {
        let index = self.entries.len();
        self.entries.push(HistoryEntry {
            snapshot,
            label: label.into(),
            index,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a log always holds its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.cursor]
    }

    /// The most recently appended entry, without touching the cursor.
    pub fn latest(&self) -> &HistoryEntry {
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn first(&mut self) -> &HistoryEntry {
        self.cursor = 0;
        self.current()
    }

    pub fn last(&mut self) -> &HistoryEntry {
        self.cursor = self.entries.len() - 1;
        self.current()
    }

    /// Steps forward, staying put on the final entry.
    pub fn next(&mut self) -> &HistoryEntry {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Steps back, staying put on entry 0.
    pub fn previous(&mut self) -> &HistoryEntry {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    /// Facing and grid to draw for `index`; `show_goal` swaps in the goal world.
    pub fn render_data_at(&self, index: usize, show_goal: bool) -> Option<RenderData<'_>> {
        let snapshot = &self.entries.get(index)?.snapshot;
        let grid = if show_goal {
            snapshot.goal.as_ref()
        } else {
            &snapshot.world
        };
        Some(RenderData {
            facing: snapshot.facing,
            grid,
        })
    }
}

impl TryFrom<Vec<HistoryEntry>> for HistoryLog {
    type Error = HistoryError;

    fn try_from(entries: Vec<HistoryEntry>) -> Result<Self, Self::Error> {
        if entries.is_empty() {
            return Err(HistoryError::Empty);
        }
        if let Some((position, entry)) = entries
            .iter()
            .enumerate()
            .find(|(position, entry)| entry.index != *position)
        {
            return Err(HistoryError::IndexMismatch {
                position,
                index: entry.index,
            });
        }
        Ok(HistoryLog { entries, cursor: 0 })
    }
}

impl From<HistoryLog> for Vec<HistoryEntry> {
    fn from(log: HistoryLog) -> Self {
        log.entries
    }
}

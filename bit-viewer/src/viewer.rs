use crate::render::{draw_grid_colored, draw_grid_plain, HELP_TEXT};
use bit_common::{mismatches, RunRecord, RunState, StartAt};
use log::debug;

/// A key the user can press while stepping through a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    SwitchWorld,
    Quit,
}

impl Command {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'n' => Some(Command::Next),
            'p' => Some(Command::Previous),
            'f' => Some(Command::First),
            'l' => Some(Command::Last),
            's' => Some(Command::SwitchWorld),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Steps through a recorded run, optionally showing the goal world instead
/// of the working one at the same position.
pub struct Viewer {
    record: RunRecord,
    show_goal: bool,
    color: bool,
}

impl Viewer {
    pub fn new(mut record: RunRecord, start_at: StartAt, show_goal: bool, color: bool) -> Self {
        match start_at {
            StartAt::First => record.history.first(),
            StartAt::Last => record.history.last(),
        };
        Viewer {
            record,
            show_goal,
            color,
        }
    }

    pub fn current_index(&self) -> usize {
        self.record.history.current_index()
    }

    pub fn show_goal(&self) -> bool {
        self.show_goal
    }

    /// Applies a command; returns `false` when the viewer should close.
    pub fn handle(&mut self, command: Command) -> bool {
        let history = &mut self.record.history;
        match command {
            Command::Next => {
                history.next();
            }
            Command::Previous => {
                history.previous();
            }
            Command::First => {
                history.first();
            }
            Command::Last => {
                history.last();
            }
            Command::SwitchWorld => self.show_goal = !self.show_goal,
            Command::Quit => return false,
        }
        debug!(
            "{:?} -> entry {} (showing {} world)",
            command,
            self.current_index(),
            if self.show_goal { "goal" } else { "working" }
        );
        true
    }

    /// The status line, the grid for the current entry and the key help.
    pub fn frame(&self) -> String {
        let history = &self.record.history;
        let entry = history.current();
        let mut out = format!("{} : {}", entry.index, entry.label);
        if self.show_goal {
            out.push_str("    [goal world]");
        }
        out.push('\n');

        if let Some(render) = history.render_data_at(entry.index, self.show_goal) {
            if self.color {
                draw_grid_colored(&mut out, render.grid, render.facing);
            } else {
                draw_grid_plain(&mut out, render.grid, render.facing);
            }
        }

        let snapshot = &entry.snapshot;
        let differing = mismatches(&snapshot.world, &snapshot.goal).len();
        out.push_str(&format!(
            "step {} of {}  |  steps taken: {}  |  squares off goal: {}",
            entry.index,
            history.len() - 1,
            snapshot.step_count,
            differing
        ));
        if let RunState::Halted(reason) = &self.record.state {
            out.push_str(&format!("  |  halted: {}", reason));
        }
        out.push('\n');
        out.push_str(HELP_TEXT);
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bit_common::{Checkpoint, HaltReason, HistoryLog, Snapshot};
    use std::sync::Arc;

    // initial state, "move", "Out of bounds" on a 2x1 world
    fn record() -> RunRecord {
        let start = bit_common::parse_world("r\n--\n0 0").unwrap();
        let goal = bit_common::parse_world("r\n--\n1 0").unwrap();
        let goal_grid = Arc::new(goal.grid.clone());
        let first = Snapshot {
            facing: start.facing,
            step_count: 0,
            x: 0,
            y: 0,
            world: start.grid,
            goal: Arc::clone(&goal_grid),
        };
        let moved = Snapshot {
            step_count: 1,
            x: 1,
            world: goal.grid,
            ..first.clone()
        };
        let mut history = HistoryLog::new(first);
        history.append(moved.clone(), "move");
        history.append(
            Snapshot {
                step_count: 2,
                ..moved
            },
            "Out of bounds",
        );
        RunRecord {
            history,
            checkpoints: Vec::<Checkpoint>::new(),
            state: RunState::Halted(HaltReason::OutOfBounds),
        }
    }

    #[test]
    fn opens_on_the_configured_entry() {
        assert_eq!(Viewer::new(record(), StartAt::Last, false, false).current_index(), 2);
        assert_eq!(Viewer::new(record(), StartAt::First, false, false).current_index(), 0);
    }

    #[test]
    fn keys_move_the_cursor_within_bounds() {
        let mut viewer = Viewer::new(record(), StartAt::First, false, false);
        let keys = "ppnnnnlpfs";
        let mut seen = Vec::new();
        for key in keys.chars() {
            assert!(viewer.handle(Command::from_key(key).unwrap()));
            seen.push(viewer.current_index());
        }
        assert_eq!(seen, vec![0, 0, 1, 2, 2, 2, 2, 1, 0, 0]);
        assert!(viewer.show_goal());
        assert!(!viewer.handle(Command::Quit));
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn frame_shows_status_grid_and_help() {
        let viewer = Viewer::new(record(), StartAt::First, false, false);
        let frame = viewer.frame();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], "0 : initial state");
        assert_eq!(lines[1], "▶-");
        assert!(lines[2].contains("squares off goal: 2"));
        assert!(lines[2].contains("halted: Out of bounds"));
        assert_eq!(lines[3], HELP_TEXT);
    }

    #[test]
    fn switching_world_keeps_the_position() {
        let mut viewer = Viewer::new(record(), StartAt::First, false, false);
        viewer.handle(Command::SwitchWorld);
        let frame = viewer.frame();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[0], "0 : initial state    [goal world]");
        assert_eq!(lines[1], "-▶");
        assert_eq!(viewer.current_index(), 0);
    }
}

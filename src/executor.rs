//! Applies one primitive action to the agent and its working world.
//!
//! Every action either succeeds with the label it records in the history, or
//! stops the run with a [`HaltReason`]. The executor knows nothing about the
//! run state or the history; [`crate::Simulation`] handles both.

use crate::agent::Agent;
use bit_common::{compare, Action, Cell, Checkpoint, Color, Facing, Grid, HaltReason};

/// Value handed back to the caller of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionValue {
    Unit,
    Bool(bool),
    Color(Color),
    Checkpoint(Checkpoint),
}

/// A successful action: its history label and its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub label: String,
    pub value: ActionValue,
}

impl Outcome {
    fn new(label: impl Into<String>, value: ActionValue) -> Self {
        Outcome {
            label: label.into(),
            value,
        }
    }

    fn unit(label: impl Into<String>) -> Self {
        Outcome::new(label, ActionValue::Unit)
    }

    fn query(label: &str, answer: bool) -> Self {
        Outcome::new(label, ActionValue::Bool(answer))
    }
}

pub fn execute(
    agent: &mut Agent,
    world: &mut Grid,
    goal: &Grid,
    action: &Action,
) -> Result<Outcome, HaltReason> {
    match action {
        Action::MoveForward => move_forward(agent, world),
        Action::TurnLeft => {
            agent.step_count += 1;
            agent.turn_left();
            Ok(Outcome::unit("left"))
        }
        Action::TurnRight => {
            agent.step_count += 1;
            agent.turn_right();
            Ok(Outcome::unit("right"))
        }
        Action::Paint(name) => paint(agent, world, name),
        Action::Erase => {
            current_cell(agent, world)?.color = Color::White;
            Ok(Outcome::unit("erase"))
        }
        Action::CurrentColor => {
            let color = current_cell(agent, world)?.color;
            Ok(Outcome::new("get color", ActionValue::Color(color)))
        }
        Action::IsRed => Ok(Outcome::query("is red", standing_on(agent, world, Color::Red))),
        Action::IsBlue => Ok(Outcome::query("is blue", standing_on(agent, world, Color::Blue))),
        Action::IsGreen => Ok(Outcome::query("is green", standing_on(agent, world, Color::Green))),
        Action::IsFrontClear => Ok(Outcome::query(
            "is front clear",
            is_clear(agent, world, agent.facing),
        )),
        Action::IsRightClear => Ok(Outcome::query(
            "is right clear",
            is_clear(agent, world, agent.facing.turn_right()),
        )),
        Action::IsLeftClear => Ok(Outcome::query(
            "is left clear",
            is_clear(agent, world, agent.facing.turn_left()),
        )),
        Action::Snapshot(name) => Ok(Outcome::new(
            format!("snapshot {name}"),
            ActionValue::Checkpoint(Checkpoint {
                step_count: agent.step_count,
                name: name.clone(),
            }),
        )),
        Action::Compare => {
            let matches = compare(world, goal);
            let label = if matches {
                "Success!"
            } else {
                "Error: Does not match"
            };
            Ok(Outcome::query(label, matches))
        }
    }
}

// A position outside the grid can only mean the agent left it.
fn cell_at(world: &mut Grid, row: usize, col: usize) -> Result<&mut Cell, HaltReason> {
    world
        .cell_mut(row, col)
        .map_err(|_| HaltReason::OutOfBounds)
}

fn current_cell<'a>(agent: &Agent, world: &'a mut Grid) -> Result<&'a mut Cell, HaltReason> {
    cell_at(world, agent.y, agent.x)
}

fn move_forward(agent: &mut Agent, world: &mut Grid) -> Result<Outcome, HaltReason> {
    agent.step_count += 1;

    let (row, col) = agent
        .neighbor(world, agent.facing)
        .ok_or(HaltReason::OutOfBounds)?;
    if cell_at(world, row, col)?.color == Color::Black {
        return Err(HaltReason::Blocked);
    }

    current_cell(agent, world)?.occupied = false;
    cell_at(world, row, col)?.occupied = true;
    agent.x = col;
    agent.y = row;
    Ok(Outcome::unit("move"))
}

fn paint(agent: &Agent, world: &mut Grid, name: &str) -> Result<Outcome, HaltReason> {
    let color =
        Color::from_paint_name(name).ok_or_else(|| HaltReason::InvalidColor(name.to_string()))?;
    current_cell(agent, world)?.color = color;
    Ok(Outcome::unit(format!("paint {name}")))
}

fn standing_on(agent: &Agent, world: &Grid, color: Color) -> bool {
    world
        .cell(agent.y, agent.x)
        .is_ok_and(|cell| cell.color == color)
}

/// Anything but a black square is clear, and so is the edge of the world:
/// only moving checks the boundary.
fn is_clear(agent: &Agent, world: &Grid, direction: Facing) -> bool {
    match agent.neighbor(world, direction) {
        None => true,
        Some((row, col)) => world
            .cell(row, col)
            .map_or(true, |cell| cell.color != Color::Black),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bit_common::parse_world;

    struct Fixture {
        agent: Agent,
        world: Grid,
        goal: Grid,
    }

    impl Fixture {
        fn new(text: &str) -> Self {
            let world = parse_world(text).unwrap();
            Fixture {
                agent: Agent::from_world(&world),
                goal: world.grid.clone(),
                world: world.grid,
            }
        }

        fn run(&mut self, action: Action) -> Result<Outcome, HaltReason> {
            execute(&mut self.agent, &mut self.world, &self.goal, &action)
        }

        fn color_at(&self, row: usize, col: usize) -> Color {
            self.world.cell(row, col).unwrap().color
        }
    }

    #[test]
    fn move_carries_the_occupied_flag() {
        let mut f = Fixture::new("r\n---\n0 0");
        let outcome = f.run(Action::MoveForward).unwrap();
        assert_eq!(outcome.label, "move");
        assert_eq!((f.agent.x, f.agent.y), (1, 0));
        assert_eq!(f.world.occupied_cells(), vec![(0, 1)]);
        assert_eq!(f.agent.step_count, 1);
    }

    #[test]
    fn move_off_each_edge_is_out_of_bounds() {
        for (text, x, y) in [
            ("u\n---\n---\n1 0", 1, 0),
            ("d\n---\n---\n1 1", 1, 1),
            ("l\n---\n---\n0 1", 0, 1),
            ("r\n---\n---\n2 0", 2, 0),
        ] {
            let mut f = Fixture::new(text);
            assert_eq!(f.run(Action::MoveForward), Err(HaltReason::OutOfBounds), "{text}");
            assert_eq!((f.agent.x, f.agent.y), (x, y));
            assert_eq!(f.world.occupied_cells(), vec![(y, x)]);
            assert_eq!(f.agent.step_count, 1);
        }
    }

    #[test]
    fn move_into_black_is_blocked() {
        let mut f = Fixture::new("d\n-\nx\n0 0");
        assert_eq!(f.run(Action::MoveForward), Err(HaltReason::Blocked));
        assert_eq!(f.world.occupied_cells(), vec![(0, 0)]);
    }

    #[test]
    fn moving_onto_colored_squares_is_allowed() {
        let mut f = Fixture::new("r\n-rbg\n0 0");
        for col in 1..=3 {
            f.run(Action::MoveForward).unwrap();
            assert_eq!(f.agent.x, col);
        }
        assert_eq!(f.color_at(0, 3), Color::Green);
    }

    #[test]
    fn turns_count_as_steps() {
        let mut f = Fixture::new("u\n-\n0 0");
        assert_eq!(f.run(Action::TurnRight).unwrap().label, "right");
        assert_eq!(f.agent.facing, Facing::Right);
        assert_eq!(f.run(Action::TurnLeft).unwrap().label, "left");
        assert_eq!(f.run(Action::TurnLeft).unwrap().label, "left");
        assert_eq!(f.agent.facing, Facing::Left);
        assert_eq!(f.agent.step_count, 3);
    }

    #[test]
    fn paint_and_erase_change_only_the_current_square() {
        let mut f = Fixture::new("u\n--\n0 0");
        assert_eq!(f.run(Action::Paint("blue".into())).unwrap().label, "paint blue");
        assert_eq!(f.color_at(0, 0), Color::Blue);
        assert_eq!(f.color_at(0, 1), Color::White);
        assert_eq!(f.run(Action::Erase).unwrap().label, "erase");
        assert_eq!(f.color_at(0, 0), Color::White);
        assert_eq!(f.agent.step_count, 0);
    }

    #[test]
    fn invalid_paint_leaves_the_square_alone() {
        let mut f = Fixture::new("u\nr\n0 0");
        for name in ["purple", "white", "black", "RED"] {
            assert_eq!(
                f.run(Action::Paint(name.into())),
                Err(HaltReason::InvalidColor(name.to_string()))
            );
            assert_eq!(f.color_at(0, 0), Color::Red);
        }
    }

    #[test]
    fn color_sensors_read_the_current_square() {
        let mut f = Fixture::new("u\ng\n0 0");
        let outcome = f.run(Action::CurrentColor).unwrap();
        assert_eq!(outcome.label, "get color");
        assert_eq!(outcome.value, ActionValue::Color(Color::Green));
        assert_eq!(f.run(Action::IsGreen).unwrap().value, ActionValue::Bool(true));
        assert_eq!(f.run(Action::IsRed).unwrap().value, ActionValue::Bool(false));
        let blue = f.run(Action::IsBlue).unwrap();
        assert_eq!(blue.label, "is blue");
        assert_eq!(blue.value, ActionValue::Bool(false));
    }

    #[test]
    fn clear_sensors_look_relative_to_facing() {
        // agent in the middle facing up: black above, black on its right
        let mut f = Fixture::new("u\n-x-\n--x\n---\n1 1");
        assert_eq!(f.run(Action::IsFrontClear).unwrap().value, ActionValue::Bool(false));
        assert_eq!(f.run(Action::IsRightClear).unwrap().value, ActionValue::Bool(false));
        assert_eq!(f.run(Action::IsLeftClear).unwrap().value, ActionValue::Bool(true));

        f.run(Action::TurnRight).unwrap();
        assert_eq!(f.run(Action::IsFrontClear).unwrap().value, ActionValue::Bool(false));
        assert_eq!(f.run(Action::IsLeftClear).unwrap().value, ActionValue::Bool(false));
        assert_eq!(f.run(Action::IsRightClear).unwrap().value, ActionValue::Bool(true));
    }

    #[test]
    fn the_edge_of_the_world_reads_as_clear() {
        let mut f = Fixture::new("u\n-\n0 0");
        for action in [Action::IsFrontClear, Action::IsLeftClear, Action::IsRightClear] {
            assert_eq!(f.run(action).unwrap().value, ActionValue::Bool(true));
        }
        assert_eq!(f.run(Action::MoveForward), Err(HaltReason::OutOfBounds));
    }

    #[test]
    fn snapshot_reports_a_checkpoint() {
        let mut f = Fixture::new("u\n-\n0 0");
        f.run(Action::TurnLeft).unwrap();
        let outcome = f.run(Action::Snapshot("turned".into())).unwrap();
        assert_eq!(outcome.label, "snapshot turned");
        assert_eq!(
            outcome.value,
            ActionValue::Checkpoint(Checkpoint {
                step_count: 1,
                name: "turned".to_string()
            })
        );
    }

    #[test]
    fn compare_labels_match_and_mismatch() {
        let mut f = Fixture::new("u\n--\n0 0");
        let same = f.run(Action::Compare).unwrap();
        assert_eq!(same.label, "Success!");
        assert_eq!(same.value, ActionValue::Bool(true));

        f.run(Action::Paint("red".into())).unwrap();
        let differs = f.run(Action::Compare).unwrap();
        assert_eq!(differs.label, "Error: Does not match");
        assert_eq!(differs.value, ActionValue::Bool(false));
    }
}

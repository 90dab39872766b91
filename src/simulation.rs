use crate::agent::Agent;
use crate::executor::{execute, ActionValue};
use bit_common::{
    mismatches, parse_world, Action, Checkpoint, Grid, HistoryEntry, HistoryLog, RenderData,
    RunRecord, RunState, World, WorldError,
};
use log::{debug, info, trace, warn};
use std::sync::Arc;

/// One run of the agent: its working world, the goal it is judged against,
/// and every state it has passed through.
///
/// Each call on the agent is recorded as a history entry until the first
/// invalid action. That action records its halt reason as the final entry,
/// and from then on every action is ignored and returns a neutral value.
/// Navigation keeps working on a halted run.
#[derive(Debug, Clone)]
pub struct Simulation {
    agent: Agent,
    world: Grid,
    goal: Arc<Grid>,
    history: HistoryLog,
    checkpoints: Vec<Checkpoint>,
    state: RunState,
}

impl Simulation {
    /// Creates a simulation from loaded start and goal worlds.
    ///
    /// The goal must have the start's dimensions and the start must hold the
    /// agent on exactly one square; neither is re-checked later.
    pub fn new(start: World, goal: World) -> Result<Self, WorldError> {
        if !start.grid.same_dimensions(&goal.grid) {
            return Err(WorldError::DimensionMismatch {
                height: start.grid.height(),
                width: start.grid.width(),
                goal_height: goal.grid.height(),
                goal_width: goal.grid.width(),
            });
        }

        let occupied = start.grid.occupied_cells();
        if occupied.len() != 1 {
            return Err(WorldError::AgentCount {
                found: occupied.len(),
            });
        }
        if occupied[0] != (start.y, start.x) {
            return Err(WorldError::AgentMisplaced {
                x: start.x,
                y: start.y,
            });
        }

        let agent = Agent::from_world(&start);
        let goal = Arc::new(goal.grid);
        let history = HistoryLog::new(agent.snapshot(&start.grid, &goal));

        info!(
            "New {}x{} simulation, agent at ({}, {}) facing {}",
            start.grid.width(),
            start.grid.height(),
            agent.x,
            agent.y,
            agent.facing
        );

        Ok(Simulation {
            agent,
            world: start.grid,
            goal,
            history,
            checkpoints: Vec::new(),
            state: RunState::Running,
        })
    }

    /// Parses both worlds from world-file text and builds a simulation.
    pub fn from_text(start: &str, goal: &str) -> Result<Self, WorldError> {
        Simulation::new(parse_world(start)?, parse_world(goal)?)
    }

    /// Runs one action. Returns `None` once the run has halted, including for
    /// the action that halts it.
    pub fn perform(&mut self, action: &Action) -> Option<ActionValue> {
        if let RunState::Halted(reason) = &self.state {
            trace!("Ignoring {} after halt ({})", action, reason);
            return None;
        }

        match execute(&mut self.agent, &mut self.world, &self.goal, action) {
            Ok(outcome) => {
                debug!(
                    "{} -> {:?} at ({}, {}) facing {}",
                    action, outcome.value, self.agent.x, self.agent.y, self.agent.facing
                );
                if let Action::Compare = action {
                    self.log_comparison(&outcome.label);
                }
                if let ActionValue::Checkpoint(checkpoint) = &outcome.value {
                    self.checkpoints.push(checkpoint.clone());
                }
                self.push_entry(outcome.label);
                Some(outcome.value)
            }
            Err(reason) => {
                warn!(
                    "Run halted at step {} on {}: {}",
                    self.agent.step_count, action, reason
                );
                self.push_entry(reason.to_string());
                self.state = RunState::Halted(reason);
                None
            }
        }
    }

    /// Runs actions in order and returns how many were recorded.
    pub fn perform_all<'a, I>(&mut self, actions: I) -> usize
    where
        I: IntoIterator<Item = &'a Action>,
    {
        let before = self.history.len();
        for action in actions {
            if self.is_halted() {
                break;
            }
            self.perform(action);
        }
        self.history.len() - before
    }

    fn push_entry(&mut self, label: String) {
        let snapshot = self.agent.snapshot(&self.world, &self.goal);
        let index = self.history.append(snapshot, label);
        trace!("Recorded entry {}: {}", index, self.history.latest().label);
    }

    fn log_comparison(&self, label: &str) {
        let differing = mismatches(&self.world, &self.goal);
        if differing.is_empty() {
            info!("Compare: {}", label);
        } else {
            info!("Compare: {} ({} squares differ)", label, differing.len());
            debug!("Differing squares (row, col): {:?}", differing);
        }
    }

    // --- Actions ---

    pub fn move_forward(&mut self) {
        self.perform(&Action::MoveForward);
    }

    pub fn turn_left(&mut self) {
        self.perform(&Action::TurnLeft);
    }

    pub fn turn_right(&mut self) {
        self.perform(&Action::TurnRight);
    }

    /// Paints the current square `"red"`, `"blue"` or `"green"`; anything else halts the run.
    pub fn paint(&mut self, color: &str) {
        self.perform(&Action::Paint(color.to_string()));
    }

    pub fn erase(&mut self) {
        self.perform(&Action::Erase);
    }

    /// Name of the current square's color, or `""` once halted.
    pub fn current_color(&mut self) -> String {
        match self.perform(&Action::CurrentColor) {
            Some(ActionValue::Color(color)) => color.name().to_string(),
            _ => String::new(),
        }
    }

    pub fn is_red(&mut self) -> bool {
        self.ask(Action::IsRed)
    }

    pub fn is_blue(&mut self) -> bool {
        self.ask(Action::IsBlue)
    }

    pub fn is_green(&mut self) -> bool {
        self.ask(Action::IsGreen)
    }

    pub fn is_front_clear(&mut self) -> bool {
        self.ask(Action::IsFrontClear)
    }

    pub fn is_right_clear(&mut self) -> bool {
        self.ask(Action::IsRightClear)
    }

    pub fn is_left_clear(&mut self) -> bool {
        self.ask(Action::IsLeftClear)
    }

    /// Records a named checkpoint at the current step count.
    pub fn snapshot(&mut self, name: &str) {
        self.perform(&Action::Snapshot(name.to_string()));
    }

    /// Records whether the working world matches the goal and returns the verdict.
    pub fn compare(&mut self) -> bool {
        self.ask(Action::Compare)
    }

    fn ask(&mut self, action: Action) -> bool {
        matches!(self.perform(&action), Some(ActionValue::Bool(true)))
    }

    // --- Navigation ---

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn current_index(&self) -> usize {
        self.history.current_index()
    }

    pub fn first(&mut self) -> &HistoryEntry {
        self.history.first()
    }

    pub fn last(&mut self) -> &HistoryEntry {
        self.history.last()
    }

    pub fn next(&mut self) -> &HistoryEntry {
        self.history.next()
    }

    pub fn previous(&mut self) -> &HistoryEntry {
        self.history.previous()
    }

    pub fn render_data_at(&self, index: usize, show_goal: bool) -> Option<RenderData<'_>> {
        self.history.render_data_at(index, show_goal)
    }

    // --- Accessors ---

    pub fn run_state(&self) -> &RunState {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state.is_halted()
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn world(&self) -> &Grid {
        &self.world
    }

    pub fn goal(&self) -> &Grid {
        &self.goal
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Packages the run for saving and later replay.
    pub fn into_record(self) -> RunRecord {
        RunRecord {
            history: self.history,
            checkpoints: self.checkpoints,
            state: self.state,
        }
    }
}

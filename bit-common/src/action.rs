use serde::{Deserialize, Serialize};
use std::fmt;

/// One primitive call a program can make on the agent.
///
/// In TOML the argument-free actions are plain strings and the others are
/// single-key tables: `["move_forward", { paint = "red" }, { snapshot = "done" }]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveForward,
    TurnLeft,
    TurnRight,
    Paint(String),
    Erase,
    CurrentColor,
    IsRed,
    IsBlue,
    IsGreen,
    IsFrontClear,
    IsRightClear,
    IsLeftClear,
    Snapshot(String),
    Compare,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MoveForward => f.write_str("move_forward"),
            Action::TurnLeft => f.write_str("turn_left"),
            Action::TurnRight => f.write_str("turn_right"),
            Action::Paint(color) => write!(f, "paint({color})"),
            Action::Erase => f.write_str("erase"),
            Action::CurrentColor => f.write_str("current_color"),
            Action::IsRed => f.write_str("is_red"),
            Action::IsBlue => f.write_str("is_blue"),
            Action::IsGreen => f.write_str("is_green"),
            Action::IsFrontClear => f.write_str("is_front_clear"),
            Action::IsRightClear => f.write_str("is_right_clear"),
            Action::IsLeftClear => f.write_str("is_left_clear"),
            Action::Snapshot(name) => write!(f, "snapshot({name})"),
            Action::Compare => f.write_str("compare"),
        }
    }
}

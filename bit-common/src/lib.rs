pub mod action;
pub mod compare;
pub mod config;
pub mod error;
pub mod history;
pub mod loader;
pub mod record;
pub mod run_state;
pub mod snapshot;
pub mod world;

// Re-export key types for easier use by dependent crates
pub use action::Action;
pub use compare::{compare, mismatches};
pub use config::{BitConfig, OutputConfig, ProgramConfig, StartAt, ViewerConfig, WorldConfig};
pub use error::{HistoryError, WorldError};
pub use history::{HistoryEntry, HistoryLog, RenderData, INITIAL_LABEL};
pub use loader::{load_world, load_world_pair, parse_world, World};
pub use record::{history_path, OutputFormat, RunRecord, UnknownFormat};
pub use run_state::{HaltReason, RunState};
pub use snapshot::{Checkpoint, Snapshot};
pub use world::{Cell, Color, Facing, Grid};

//! Runs a programmable agent over a colored grid and records every step.
//!
//! ```
//! use bit_engine::Simulation;
//!
//! let mut sim = Simulation::from_text("r\n---\n0 0", "r\n---\n2 0").unwrap();
//! sim.move_forward();
//! sim.move_forward();
//! assert!(sim.compare());
//! assert_eq!(sim.history_len(), 4);
//! ```

pub mod agent;
pub mod executor;
pub mod simulation;

pub use agent::Agent;
pub use executor::{execute, ActionValue, Outcome};
pub use simulation::Simulation;

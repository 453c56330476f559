//! This crate provides the core logic for a nondeterministic Turing machine
//! simulator. It includes modules for parsing tabular machine definitions,
//! exploring all nondeterministic branches breadth-first under configurable
//! resource limits, rendering execution traces, and managing a collection of
//! embedded machine definitions.

pub mod analyzer;
pub mod loader;
pub mod machine;
pub mod machines;
pub mod parser;
pub mod reporter;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the simulation engine and its outcome types from the machine module.
pub use machine::{Action, Configuration, Exhaustion, Outcome, Simulator, TransitionTable};
/// Re-exports `MachineInfo`, `MachineManager`, and `MACHINES` from the machines module.
pub use machines::{MachineInfo, MachineManager, MACHINES};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `report` function from the reporter module.
pub use reporter::report;
/// Re-exports the machine definition and error types from the types module.
pub use types::{
    Direction, Machine, NtmError, Transition, BLANK_SYMBOL, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_TRANSITIONS,
};

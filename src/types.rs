//! This module defines the core data structures and types used throughout the
//! nondeterministic Turing machine simulator: machine definitions, transition
//! rules, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::Rule;

/// The distinguished blank symbol used for uninitialized tape cells.
pub const BLANK_SYMBOL: char = '_';
/// The default bound on the number of configuration-tree levels explored per run.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default bound on the total number of transition applications per run.
pub const DEFAULT_MAX_TRANSITIONS: usize = 1000;

/// A parsed nondeterministic Turing machine definition.
///
/// A `Machine` is built once by the parser and never mutated afterwards. The
/// simulation engine derives its transition table from `transitions` and only
/// reads the distinguished states during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Machine {
    /// Identifying label for the machine, informational only.
    pub name: String,
    /// The set of declared state identifiers.
    pub states: HashSet<String>,
    /// Symbols the input string may be written in.
    pub input_alphabet: HashSet<char>,
    /// Symbols the tape may hold; a superset of `input_alphabet` that
    /// includes the blank symbol.
    pub tape_alphabet: HashSet<char>,
    /// The state the machine starts in.
    pub start_state: String,
    /// Reaching this state accepts the input.
    pub accept_state: String,
    /// Reaching this state kills the branch.
    pub reject_state: String,
    /// Transition rows in file order. Multiple rows sharing the same
    /// (state, read) pair encode nondeterminism; their order decides the
    /// order in which sibling configurations are generated.
    pub transitions: Vec<Transition>,
}

impl Machine {
    /// Returns the number of declared states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transition rows.
    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }
}

/// A single transition row of a machine definition.
///
/// When the machine is in `state` reading `read` under the head, it may write
/// `write`, move the head in `direction`, and enter `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state this row applies in.
    pub state: String,
    /// The symbol that must be under the head.
    pub read: char,
    /// The state entered after the move.
    pub next_state: String,
    /// The symbol written at the head position before moving.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

/// A head movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// Errors that can occur while loading or validating a machine definition.
///
/// Runtime events such as undefined transitions or resource exhaustion are
/// not errors; they are reported through [`crate::machine::Outcome`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NtmError {
    /// The definition text does not match the tabular grammar, or a row has
    /// malformed fields.
    #[error("Machine parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// The definition parsed but is structurally or logically inconsistent.
    #[error("Machine validation error: {0}")]
    ValidationError(String),
    /// A file system operation failed while loading a definition.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_transition_creation() {
        let transition = Transition {
            state: "q0".to_string(),
            read: '0',
            next_state: "q1".to_string(),
            write: 'X',
            direction: Direction::Right,
        };

        assert_eq!(transition.read, '0');
        assert_eq!(transition.write, 'X');
        assert_eq!(transition.direction, Direction::Right);
        assert_eq!(transition.next_state, "q1");
    }

    #[test]
    fn test_machine_counts() {
        let machine = Machine {
            name: "Counter".to_string(),
            states: ["q0", "qa", "qr"].iter().map(|s| s.to_string()).collect(),
            input_alphabet: ['0'].into_iter().collect(),
            tape_alphabet: ['0', BLANK_SYMBOL].into_iter().collect(),
            start_state: "q0".to_string(),
            accept_state: "qa".to_string(),
            reject_state: "qr".to_string(),
            transitions: vec![Transition {
                state: "q0".to_string(),
                read: '0',
                next_state: "qa".to_string(),
                write: '0',
                direction: Direction::Right,
            }],
        };

        assert_eq!(machine.state_count(), 3);
        assert_eq!(machine.transition_count(), 1);
    }

    #[test]
    fn test_error_display() {
        let error = NtmError::ValidationError("accept and reject states overlap".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("validation error"));
        assert!(error_msg.contains("overlap"));
    }
}

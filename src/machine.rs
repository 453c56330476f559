//! This module implements the breadth-first simulation engine. It defines the
//! `TransitionTable` queried during a run, the immutable `Configuration`
//! values that make up the search space, and the `Simulator` that expands the
//! configuration tree level by level until the machine accepts, rejects, or a
//! resource limit is hit.

use crate::types::{Direction, Machine, BLANK_SYMBOL};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// One applicable move for a (state, symbol) pair: the state to enter, the
/// symbol to write, and the direction to shift the head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub next_state: String,
    pub write: char,
    pub direction: Direction,
}

/// The immutable lookup structure driving a simulation run.
///
/// Built once from a machine's transition rows; row order is preserved within
/// each (state, symbol) key so that sibling configurations are generated in
/// definition order. Querying an absent key yields an empty slice, which the
/// engine reads as "no defined move" rather than an error.
pub struct TransitionTable {
    entries: HashMap<String, HashMap<char, Vec<Action>>>,
}

impl TransitionTable {
    /// Builds the table from a machine definition in one pass over its rows.
    pub fn new(machine: &Machine) -> Self {
        let mut entries: HashMap<String, HashMap<char, Vec<Action>>> = HashMap::new();

        for transition in &machine.transitions {
            entries
                .entry(transition.state.clone())
                .or_default()
                .entry(transition.read)
                .or_default()
                .push(Action {
                    next_state: transition.next_state.clone(),
                    write: transition.write,
                    direction: transition.direction,
                });
        }

        Self { entries }
    }

    /// Returns the moves applicable in `state` when `symbol` is under the
    /// head, in definition order. Empty when no move is defined.
    pub fn lookup(&self, state: &str, symbol: char) -> &[Action] {
        self.entries
            .get(state)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map_or(&[], Vec::as_slice)
    }
}

/// A snapshot of one branch of the computation: the tape to the left of the
/// head, the current state, and the tape from the head rightwards.
///
/// The head always reads the front of `right`; an empty `right` reads as the
/// blank symbol. The tape is conceptually infinite in both directions, so
/// blanks are materialized on demand as the head moves past either boundary.
/// Configurations are never mutated once created: sibling branches share the
/// same parent, so every move produces a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    left: Vec<char>,
    state: String,
    right: VecDeque<char>,
}

impl Configuration {
    /// The root configuration: empty left tape, the machine's start state,
    /// and the input string under and to the right of the head.
    pub fn initial(state: &str, input: &str) -> Self {
        Self {
            left: Vec::new(),
            state: state.to_string(),
            right: input.chars().collect(),
        }
    }

    /// The current state of this branch.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The symbol under the head, blank when the materialized tape ends
    /// before it.
    pub fn head_symbol(&self) -> char {
        self.right.front().copied().unwrap_or(BLANK_SYMBOL)
    }

    /// The successor for an undefined move: same tapes, parked in the reject
    /// state.
    pub fn rejected(&self, reject_state: &str) -> Self {
        Self {
            left: self.left.clone(),
            state: reject_state.to_string(),
            right: self.right.clone(),
        }
    }

    /// Applies one action: writes at the head position, then shifts the head
    /// one cell in the action's direction.
    pub fn apply(&self, action: &Action) -> Self {
        let mut left = self.left.clone();
        let mut right = self.right.clone();

        // Write, materializing the head cell if it is still blank tape.
        if let Some(cell) = right.front_mut() {
            *cell = action.write;
        } else {
            right.push_back(action.write);
        }

        match action.direction {
            Direction::Left => {
                // The last left cell becomes the head; blank when the left
                // tape is exhausted.
                right.push_front(left.pop().unwrap_or(BLANK_SYMBOL));
            }
            Direction::Right => {
                if let Some(cell) = right.pop_front() {
                    left.push(cell);
                }
                // Keep the head resolvable to a symbol.
                if right.is_empty() {
                    right.push_back(BLANK_SYMBOL);
                }
            }
        }

        Self {
            left,
            state: action.next_state.clone(),
            right,
        }
    }

    /// The tape left of the head as a string.
    pub fn left(&self) -> String {
        self.left.iter().collect()
    }

    /// The tape from the head rightwards as a string.
    pub fn right(&self) -> String {
        self.right.iter().collect()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {}, {:?})", self.left(), self.state, self.right())
    }
}

/// The tree of configurations explored by a run: level `i` holds every
/// configuration reachable in exactly `i` transition applications along a
/// surviving branch. Retained in full so the reporter can show all live
/// branches per level.
pub type Tree = Vec<Vec<Configuration>>;

/// The terminal result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Some branch reached the accept state after `depth` transitions. The
    /// tree holds every level materialized up to and including `depth`.
    Accepted { depth: usize, tree: Tree },
    /// Every branch died by `depth` transitions without accepting.
    Rejected { depth: usize },
    /// The search was truncated before any branch accepted or all rejected.
    Exhausted(Exhaustion),
}

impl Outcome {
    /// Whether this outcome is an acceptance.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

/// The specific limit that truncated a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exhaustion {
    /// The total number of transition applications reached the budget.
    TransitionLimit(usize),
    /// The configuration tree grew past the level bound.
    DepthLimit(usize),
}

/// Drives the breadth-first exploration of a machine's configuration tree.
///
/// The simulator owns nothing mutable between runs: the transition table is
/// built once, and each call to [`Simulator::run`] threads its own tree and
/// transition counter through the expansion loop.
pub struct Simulator<'a> {
    machine: &'a Machine,
    table: TransitionTable,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator for the given machine, building its transition
    /// table.
    pub fn new(machine: &'a Machine) -> Self {
        Self {
            table: TransitionTable::new(machine),
            machine,
        }
    }

    /// Explores all nondeterministic branches breadth-first.
    ///
    /// Levels are expanded one at a time. Within a level, configurations are
    /// scanned in order: an accepting configuration halts the run
    /// immediately (siblings already expanded into the next level are
    /// discarded), a rejecting one contributes no successors, and any other
    /// costs one unit of the transition budget to expand. A (state, symbol)
    /// pair with no defined move produces a single implicit successor in the
    /// reject state.
    ///
    /// Breadth-first order guarantees the reported accepting depth is the
    /// minimum over all accepting branches. Both limits are enforced before
    /// the next level is fully expanded, so worst-case work per run is
    /// bounded even under exponential branching.
    pub fn run(&self, input: &str, max_depth: usize, max_transitions: usize) -> Outcome {
        let mut tree: Tree = vec![vec![Configuration::initial(
            &self.machine.start_state,
            input,
        )]];
        let mut transitions = 0usize;

        while transitions < max_transitions {
            let depth = tree.len() - 1;
            let mut next_level = Vec::new();

            for i in 0..tree[depth].len() {
                if tree[depth][i].state() == self.machine.accept_state {
                    return Outcome::Accepted { depth, tree };
                }

                if tree[depth][i].state() == self.machine.reject_state {
                    continue;
                }

                let config = &tree[depth][i];
                let symbol = config.head_symbol();

                transitions += 1;
                if transitions > max_transitions {
                    return Outcome::Exhausted(Exhaustion::TransitionLimit(max_transitions));
                }

                let actions = self.table.lookup(config.state(), symbol);
                if actions.is_empty() {
                    // An undefined move rejects the branch, it is not an
                    // error.
                    next_level.push(config.rejected(&self.machine.reject_state));
                } else {
                    for action in actions {
                        next_level.push(config.apply(action));
                    }
                }
            }

            // Every branch at the frontier died without any successor.
            if next_level.is_empty() {
                return Outcome::Rejected { depth: tree.len() - 1 };
            }

            let all_rejected = next_level
                .iter()
                .all(|config| config.state() == self.machine.reject_state);

            tree.push(next_level);

            // The frontier is uniformly doomed: reject states expand to
            // nothing, so no accepting outcome remains possible.
            if all_rejected {
                return Outcome::Rejected { depth: tree.len() - 1 };
            }

            if tree.len() > max_depth {
                return Outcome::Exhausted(Exhaustion::DepthLimit(max_depth));
            }
        }

        Outcome::Exhausted(Exhaustion::TransitionLimit(max_transitions))
    }
}

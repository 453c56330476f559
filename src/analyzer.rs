//! This module provides functions for analyzing machine definitions to detect
//! inconsistencies before simulation. This includes checks for the
//! distinguished states, alphabet containment, and that every transition row
//! only references declared states and symbols.
//!
//! The simulation engine itself never re-validates a definition; an undefined
//! transition at runtime is branch rejection, not an error. Everything that
//! *is* an error is caught here, at load time.

use crate::types::{Machine, NtmError, BLANK_SYMBOL};

/// Represents the errors that can be found during analysis of a machine
/// definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// A distinguished state (start/accept/reject) is not in the declared
    /// state set.
    UndeclaredState(String),
    /// The accept and reject states name the same state.
    AcceptRejectOverlap(String),
    /// Input alphabet symbols missing from the tape alphabet.
    InputSymbolsNotOnTape(Vec<char>),
    /// The tape alphabet does not contain the blank symbol.
    MissingBlank,
    /// Transition rows reference states missing from the declared state set.
    UndeclaredTransitionStates(Vec<String>),
    /// Transition rows read or write symbols missing from the tape alphabet.
    UnknownTapeSymbols(Vec<char>),
}

impl From<AnalysisError> for NtmError {
    /// Converts an `AnalysisError` into an `NtmError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UndeclaredState(state) => {
                NtmError::ValidationError(format!("Undeclared distinguished state: {}", state))
            }
            AnalysisError::AcceptRejectOverlap(state) => NtmError::ValidationError(format!(
                "Accept and reject states must differ, both are: {}",
                state
            )),
            AnalysisError::InputSymbolsNotOnTape(symbols) => NtmError::ValidationError(format!(
                "Input alphabet symbols missing from tape alphabet: {:?}",
                symbols
            )),
            AnalysisError::MissingBlank => NtmError::ValidationError(format!(
                "Tape alphabet does not contain the blank symbol '{}'",
                BLANK_SYMBOL
            )),
            AnalysisError::UndeclaredTransitionStates(states) => NtmError::ValidationError(
                format!("Transitions reference undeclared states: {:?}", states),
            ),
            AnalysisError::UnknownTapeSymbols(symbols) => NtmError::ValidationError(format!(
                "Transitions use symbols missing from the tape alphabet: {:?}",
                symbols
            )),
        }
    }
}

/// Analyzes a machine definition for structural and logical errors.
///
/// # Arguments
///
/// * `machine` - A reference to the `Machine` to be analyzed.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(NtmError::ValidationError)` describing the first violated rule.
pub fn analyze(machine: &Machine) -> Result<(), NtmError> {
    let errors = [
        check_distinguished_states,
        check_alphabets,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .filter_map(|f| f(machine).err())
    .collect::<Vec<_>>();

    if let Some(first_error) = errors.first() {
        return Err(first_error.clone().into());
    }

    Ok(())
}

/// Checks that the start, accept, and reject states are declared, and that
/// accept and reject do not overlap.
fn check_distinguished_states(machine: &Machine) -> Result<(), AnalysisError> {
    for state in [
        &machine.start_state,
        &machine.accept_state,
        &machine.reject_state,
    ] {
        if !machine.states.contains(state) {
            return Err(AnalysisError::UndeclaredState(state.clone()));
        }
    }

    if machine.accept_state == machine.reject_state {
        return Err(AnalysisError::AcceptRejectOverlap(
            machine.accept_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that the input alphabet is a subset of the tape alphabet and that
/// the tape alphabet contains the blank symbol.
fn check_alphabets(machine: &Machine) -> Result<(), AnalysisError> {
    let mut missing: Vec<char> = machine
        .input_alphabet
        .difference(&machine.tape_alphabet)
        .copied()
        .collect();

    if !missing.is_empty() {
        missing.sort_unstable();
        return Err(AnalysisError::InputSymbolsNotOnTape(missing));
    }

    if !machine.tape_alphabet.contains(&BLANK_SYMBOL) {
        return Err(AnalysisError::MissingBlank);
    }

    Ok(())
}

/// Checks that every state a transition row mentions is declared.
fn check_transition_states(machine: &Machine) -> Result<(), AnalysisError> {
    let mut undeclared: Vec<String> = machine
        .transitions
        .iter()
        .flat_map(|t| [&t.state, &t.next_state])
        .filter(|state| !machine.states.contains(*state))
        .cloned()
        .collect();

    if undeclared.is_empty() {
        return Ok(());
    }

    undeclared.sort_unstable();
    undeclared.dedup();
    Err(AnalysisError::UndeclaredTransitionStates(undeclared))
}

/// Checks that every symbol a transition row reads or writes is in the tape
/// alphabet.
fn check_transition_symbols(machine: &Machine) -> Result<(), AnalysisError> {
    let mut unknown: Vec<char> = machine
        .transitions
        .iter()
        .flat_map(|t| [t.read, t.write])
        .filter(|symbol| !machine.tape_alphabet.contains(symbol))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort_unstable();
    unknown.dedup();
    Err(AnalysisError::UnknownTapeSymbols(unknown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Transition};

    fn sample_machine() -> Machine {
        Machine {
            name: "Sample".to_string(),
            states: ["q0", "q1", "qa", "qr"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            input_alphabet: ['0', '1'].into_iter().collect(),
            tape_alphabet: ['0', '1', 'X', BLANK_SYMBOL].into_iter().collect(),
            start_state: "q0".to_string(),
            accept_state: "qa".to_string(),
            reject_state: "qr".to_string(),
            transitions: vec![Transition {
                state: "q0".to_string(),
                read: '0',
                next_state: "q1".to_string(),
                write: 'X',
                direction: Direction::Right,
            }],
        }
    }

    #[test]
    fn test_valid_machine_passes() {
        assert!(analyze(&sample_machine()).is_ok());
    }

    #[test]
    fn test_undeclared_start_state() {
        let mut machine = sample_machine();
        machine.start_state = "missing".to_string();

        let result = check_distinguished_states(&machine);
        assert_eq!(
            result,
            Err(AnalysisError::UndeclaredState("missing".to_string()))
        );
        assert!(analyze(&machine).is_err());
    }

    #[test]
    fn test_accept_reject_overlap() {
        let mut machine = sample_machine();
        machine.reject_state = machine.accept_state.clone();

        let result = check_distinguished_states(&machine);
        assert_eq!(
            result,
            Err(AnalysisError::AcceptRejectOverlap("qa".to_string()))
        );
    }

    #[test]
    fn test_input_alphabet_not_on_tape() {
        let mut machine = sample_machine();
        machine.input_alphabet.insert('2');

        let result = check_alphabets(&machine);
        assert_eq!(result, Err(AnalysisError::InputSymbolsNotOnTape(vec!['2'])));
    }

    #[test]
    fn test_missing_blank() {
        let mut machine = sample_machine();
        machine.tape_alphabet.remove(&BLANK_SYMBOL);

        let result = check_alphabets(&machine);
        assert_eq!(result, Err(AnalysisError::MissingBlank));
    }

    #[test]
    fn test_transition_references_undeclared_state() {
        let mut machine = sample_machine();
        machine.transitions.push(Transition {
            state: "q1".to_string(),
            read: '1',
            next_state: "ghost".to_string(),
            write: '1',
            direction: Direction::Left,
        });

        let result = check_transition_states(&machine);
        assert_eq!(
            result,
            Err(AnalysisError::UndeclaredTransitionStates(vec![
                "ghost".to_string()
            ]))
        );
    }

    #[test]
    fn test_transition_uses_unknown_symbol() {
        let mut machine = sample_machine();
        machine.transitions.push(Transition {
            state: "q1".to_string(),
            read: '#',
            next_state: "qa".to_string(),
            write: '#',
            direction: Direction::Right,
        });

        let result = check_transition_symbols(&machine);
        assert_eq!(result, Err(AnalysisError::UnknownTapeSymbols(vec!['#'])));
    }

    #[test]
    fn test_first_error_wins() {
        let mut machine = sample_machine();
        machine.start_state = "missing".to_string();
        machine.tape_alphabet.remove(&BLANK_SYMBOL);

        match analyze(&machine) {
            Err(NtmError::ValidationError(msg)) => {
                assert!(msg.contains("Undeclared distinguished state"));
            }
            other => panic!("Expected a ValidationError, got {:?}", other),
        }
    }
}

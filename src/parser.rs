//! This module provides the parser for tabular machine definitions, utilizing
//! the `pest` crate. The grammar in `grammar.pest` splits the input into
//! comma-separated records; this module then gives each row its
//! position-dependent meaning and builds a validated [`Machine`].

use crate::{
    analyzer::analyze,
    types::{Direction, Machine, NtmError, Transition},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the tabular grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DefinitionParser;

// Fixed row positions of the tabular format.
const ROW_NAME: usize = 0;
const ROW_STATES: usize = 1;
const ROW_INPUT_ALPHABET: usize = 2;
const ROW_TAPE_ALPHABET: usize = 3;
const ROW_START_STATE: usize = 4;
const ROW_ACCEPT_STATE: usize = 5;
const ROW_REJECT_STATE: usize = 6;
const ROW_TRANSITIONS: usize = 7;

/// Parses the given input string into a [`Machine`].
///
/// This is the main entry point for parsing machine definitions. It trims the
/// input, parses it with the `DefinitionParser`, decodes the rows into a
/// structured `Machine`, and validates the result with the analyzer before
/// returning it.
///
/// # Arguments
///
/// * `input` - A string slice containing the tabular machine definition.
///
/// # Returns
///
/// * `Ok(Machine)` if the input is successfully parsed and validated.
/// * `Err(NtmError::ParseError)` if a row is malformed.
/// * `Err(NtmError::ValidationError)` if the definition fails validation.
pub fn parse(input: &str) -> Result<Machine, NtmError> {
    let root = DefinitionParser::parse(Rule::file, input.trim())
        .map_err(|e| NtmError::ParseError(e.into()))? //
        .next()
        .unwrap();

    let machine = parse_machine(root)?;

    // Analyze the parsed machine
    analyze(&machine)?;

    Ok(machine)
}

/// One record of the tabular input: its raw fields plus the span covering the
/// line, kept for error reporting.
struct Row<'i> {
    fields: Vec<&'i str>,
    span: Span<'i>,
}

/// Decodes the ordered rows of a parsed definition into a `Machine`.
///
/// Row positions carry meaning: name, states, input alphabet, tape alphabet,
/// start state, accept state, reject state, then one transition per row.
fn parse_machine(pair: Pair<Rule>) -> Result<Machine, NtmError> {
    let rows = collect_rows(pair);

    if rows.len() < ROW_TRANSITIONS {
        return Err(NtmError::ValidationError(format!(
            "Definition has {} rows; at least {} are required \
             (name, states, input alphabet, tape alphabet, start, accept, reject)",
            rows.len(),
            ROW_TRANSITIONS
        )));
    }

    let name = rows[ROW_NAME].fields[0].to_string();
    let states: HashSet<String> = rows[ROW_STATES]
        .fields
        .iter()
        .map(|s| s.to_string())
        .collect();
    let input_alphabet = parse_alphabet(&rows[ROW_INPUT_ALPHABET])?;
    let tape_alphabet = parse_alphabet(&rows[ROW_TAPE_ALPHABET])?;
    let start_state = parse_state(&rows[ROW_START_STATE])?;
    let accept_state = parse_state(&rows[ROW_ACCEPT_STATE])?;
    let reject_state = parse_state(&rows[ROW_REJECT_STATE])?;

    let transitions = rows[ROW_TRANSITIONS..]
        .iter()
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Machine {
        name,
        states,
        input_alphabet,
        tape_alphabet,
        start_state,
        accept_state,
        reject_state,
        transitions,
    })
}

/// Flattens the parse tree into rows of raw fields.
///
/// Lines without any content (e.g., trailing blank lines) are skipped.
fn collect_rows(pair: Pair<Rule>) -> Vec<Row> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::record)
        .filter_map(|record| {
            let span = record.as_span();
            let fields: Vec<&str> = record
                .into_inner()
                .filter(|p| p.as_rule() == Rule::field)
                .map(|p| p.as_str())
                .collect();

            if fields.iter().all(|f| f.is_empty()) {
                return None;
            }

            Some(Row { fields, span })
        })
        .collect()
}

/// Parses an alphabet row: every field must be a single-character symbol.
fn parse_alphabet(row: &Row) -> Result<HashSet<char>, NtmError> {
    row.fields
        .iter()
        .map(|field| parse_symbol(field, row.span))
        .collect()
}

/// Parses a distinguished-state row; only the first field is significant.
fn parse_state(row: &Row) -> Result<String, NtmError> {
    let state = row.fields[0];
    if state.is_empty() {
        return Err(parse_error("Expected a state identifier", row.span));
    }

    Ok(state.to_string())
}

/// Parses one transition row of the form
/// `state, read, next state, write, direction`.
fn parse_transition(row: &Row) -> Result<Transition, NtmError> {
    if row.fields.len() != 5 {
        return Err(parse_error(
            &format!(
                "Expected 5 fields (state, read, next state, write, direction), found {}",
                row.fields.len()
            ),
            row.span,
        ));
    }

    Ok(Transition {
        state: row.fields[0].to_string(),
        read: parse_symbol(row.fields[1], row.span)?,
        next_state: row.fields[2].to_string(),
        write: parse_symbol(row.fields[3], row.span)?,
        direction: parse_direction(row.fields[4], row.span)?,
    })
}

/// Parses a single direction letter: `L` for Left, `R` for Right.
fn parse_direction(field: &str, span: Span) -> Result<Direction, NtmError> {
    match field {
        "L" => Ok(Direction::Left),
        "R" => Ok(Direction::Right),
        _ => Err(parse_error(
            &format!("Unsupported direction: {field:?}"),
            span,
        )),
    }
}

/// Parses a single-character symbol field.
fn parse_symbol(field: &str, span: Span) -> Result<char, NtmError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(parse_error(
            &format!("Expected a single-character symbol, found {field:?}"),
            span,
        )),
    }
}

/// Creates an `NtmError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> NtmError {
    NtmError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

//! This module renders the terminal outcome of a simulation run as a
//! human-readable report.
//!
//! For an acceptance the report lists, level by level, every configuration
//! the run materialized up to the accepting depth. The engine retains whole
//! levels rather than parent pointers, so this is the full set of live
//! branches along the way, not just the single accepting path.

use crate::machine::{Exhaustion, Outcome};

/// Renders an [`Outcome`] as a multi-line report.
pub fn report(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Accepted { depth, tree } => {
            let mut out = format!("String accepted in {depth} transitions.\n");
            let mut total = 0;

            for (level, configs) in tree.iter().take(depth + 1).enumerate() {
                for config in configs {
                    total += 1;
                    out.push_str(&format!("Level {level}: {config}\n"));
                }
            }

            out.push_str(&format!("Configurations explored: {total}\n"));
            out
        }
        Outcome::Rejected { depth } => {
            format!("String rejected in {depth} transitions.\n")
        }
        Outcome::Exhausted(Exhaustion::TransitionLimit(limit)) => {
            format!("Execution stopped after {limit} transitions.\n")
        }
        Outcome::Exhausted(Exhaustion::DepthLimit(limit)) => {
            format!("Execution stopped after reaching max depth of {limit}.\n")
        }
    }
}

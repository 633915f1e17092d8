//! Validation and bounded simulation of deterministic automata.
//!
//! A caller builds (or deserializes) a [Definition], hands it to [validate] to obtain a
//! [ValidatedDefinition], and runs the matching engine against an input word. Every run terminates:
//! the pushdown and Turing machine engines are bounded by the budgets in [SimulationOptions] and report
//! [Outcome::Inconclusive] when a budget is exhausted.

#![warn(clippy::all)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod error;
mod limits;
mod outcome;

/// Automaton definitions as supplied by a caller.
pub mod definition;

/// Simulation engines, one per automaton class.
pub mod engine;

/// The request/response contract consumed by a transport layer.
pub mod request;

/// Structural and determinism checks on definitions.
pub mod validate;

pub use {
    definition::{Definition, Move, State, Symbol},
    engine::Simulate,
    error::*,
    limits::*,
    outcome::*,
    validate::{validate, ValidatedDefinition, ValidatedDfa, ValidatedDpda, ValidatedDtm},
};

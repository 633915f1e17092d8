//! Each engine is a pure function of a validated definition, an input word, and [SimulationOptions]. Engines never
//! fail: every run ends in an [Outcome], and a symbol outside the input alphabet simply has no transition.

/// DFA simulation.
pub mod dfa;

/// DPDA simulation bounded by an epsilon-chain budget.
pub mod dpda;

/// DTM simulation bounded by a step budget.
pub mod dtm;

use crate::{
    definition::Symbol,
    validate::{ValidatedDefinition, ValidatedDfa, ValidatedDpda, ValidatedDtm},
    Outcome, Simulation, SimulationOptions,
};

/// Runs a validated automaton against an input word.
pub trait Simulate {
    /// Runs the automaton, recording a trace if `options.record_trace` is set.
    fn simulate(&self, input: &[Symbol], options: &SimulationOptions) -> Simulation;

    /// Runs the automaton and returns only the decision.
    fn accepts(&self, input: &[Symbol], options: &SimulationOptions) -> Outcome {
        self.simulate(input, &options.trace(false)).outcome
    }
}

impl Simulate for ValidatedDfa {
    fn simulate(&self, input: &[Symbol], options: &SimulationOptions) -> Simulation {
        dfa::simulate(self, input, options.record_trace)
    }
}

impl Simulate for ValidatedDpda {
    fn simulate(&self, input: &[Symbol], options: &SimulationOptions) -> Simulation {
        dpda::simulate(self, input, options.epsilon_chain, options.record_trace)
    }
}

impl Simulate for ValidatedDtm {
    fn simulate(&self, input: &[Symbol], options: &SimulationOptions) -> Simulation {
        dtm::simulate(self, input, options.max_steps, options.record_trace)
    }
}

impl Simulate for ValidatedDefinition {
    fn simulate(&self, input: &[Symbol], options: &SimulationOptions) -> Simulation {
        match self {
            Self::Dfa(a) => a.simulate(input, options),
            Self::Dpda(a) => a.simulate(input, options),
            Self::Dtm(a) => a.simulate(input, options),
        }
    }
}

use {
    crate::{definition::Symbol, outcome::TraceRecorder, validate::ValidatedDfa, Configuration, Outcome, Simulation},
    log::{debug, trace},
};

/// Returns whether `dfa` accepts `input`. Runs in time linear in the input length.
pub fn accepts(dfa: &ValidatedDfa, input: &[Symbol]) -> Outcome {
    simulate(dfa, input, false).outcome
}

/// Runs `dfa` over `input`, optionally recording the state after each symbol.
pub fn simulate(dfa: &ValidatedDfa, input: &[Symbol], record_trace: bool) -> Simulation {
    let mut recorder = TraceRecorder::new(record_trace);
    let mut state = dfa.initial;
    recorder.record(|| snapshot(dfa, state, 0));

    for (position, symbol) in input.iter().enumerate() {
        let Some(symbol_index) = dfa.symbols.get(symbol) else {
            debug!("DFA read {symbol:?} at position {position}, which is not an input symbol; rejecting");
            return recorder.finish(Outcome::Rejected, position);
        };

        let next = dfa.step(state, symbol_index);
        trace!("DFA {} --{symbol}--> {}", dfa.states.label(state), dfa.states.label(next));
        state = next;
        recorder.record(|| snapshot(dfa, state, position + 1));
    }

    let outcome = Outcome::decide(dfa.accept[state]);
    debug!("DFA {outcome} input of length {} in state {}", input.len(), dfa.states.label(state));
    recorder.finish(outcome, input.len())
}

fn snapshot(dfa: &ValidatedDfa, state: usize, position: usize) -> Configuration {
    Configuration::Dfa {
        state: dfa.states.label(state).clone(),
        position,
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{accepts, simulate},
        crate::{
            definition::{labels, DfaDefinition, DfaTransition, Symbol},
            validate::ValidatedDfa,
            Configuration, Outcome,
        },
        pretty_assertions::assert_eq,
        test_log::test,
    };

    /// Binary strings ending in "01".
    fn ends_in_01() -> ValidatedDfa {
        ValidatedDfa::new(DfaDefinition {
            states: labels(&["q0", "q1", "q2"]),
            input_symbols: labels(&["0", "1"]),
            transitions: vec![
                DfaTransition::new("q0", "0", "q1"),
                DfaTransition::new("q0", "1", "q0"),
                DfaTransition::new("q1", "0", "q1"),
                DfaTransition::new("q1", "1", "q2"),
                DfaTransition::new("q2", "0", "q1"),
                DfaTransition::new("q2", "1", "q0"),
            ],
            initial_state: "q0".into(),
            final_states: labels(&["q2"]),
        })
        .unwrap()
    }

    #[test]
    fn test_suffix_automaton() {
        let dfa = ends_in_01();
        assert_eq!(accepts(&dfa, &Symbol::split("1101")), Outcome::Accepted);
        assert_eq!(accepts(&dfa, &Symbol::split("110")), Outcome::Rejected);
        assert_eq!(accepts(&dfa, &Symbol::split("01")), Outcome::Accepted);
        assert_eq!(accepts(&dfa, &Symbol::split("011")), Outcome::Rejected);
    }

    #[test]
    fn test_empty_input() {
        let dfa = ends_in_01();
        assert_eq!(accepts(&dfa, &[]), Outcome::Rejected);

        let mut definition = dfa.definition().clone();
        definition.final_states = labels(&["q0"]);
        let dfa = ValidatedDfa::new(definition).unwrap();
        assert_eq!(accepts(&dfa, &[]), Outcome::Accepted);
    }

    #[test]
    fn test_foreign_symbol_rejects() {
        let simulation = simulate(&ends_in_01(), &Symbol::split("0a1"), false);
        assert_eq!(simulation.outcome, Outcome::Rejected);
        assert_eq!(simulation.steps, 1);
    }

    #[test]
    fn test_trace() {
        let simulation = simulate(&ends_in_01(), &Symbol::split("101"), true);
        let states: Vec<&str> = simulation.trace.as_ref().unwrap().iter().map(|c| c.state().as_str()).collect();
        assert_eq!(states, vec!["q0", "q0", "q1", "q2"]);
        assert_eq!(
            simulation.trace.unwrap().last(),
            Some(&Configuration::Dfa {
                state: "q2".into(),
                position: 3,
            })
        );
    }
}

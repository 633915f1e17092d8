use {
    crate::{
        definition::{AcceptanceMode, Symbol},
        outcome::TraceRecorder,
        validate::{StackAction, ValidatedDpda},
        Configuration, EpsilonChainLimit, InconclusiveReason, Outcome, Simulation,
    },
    log::{debug, trace, warn},
};

/// Returns whether `dpda` accepts `input`, giving up after more than `max_epsilon_chain` consecutive epsilon moves.
pub fn accepts(dpda: &ValidatedDpda, input: &[Symbol], max_epsilon_chain: EpsilonChainLimit) -> Outcome {
    simulate(dpda, input, max_epsilon_chain, false).outcome
}

/// Runs `dpda` over `input`.
///
/// At every configuration an epsilon move for (state, stack top) is taken if one exists; validation guarantees no
/// reading move exists for the same pair, so this order never chooses between two applicable moves. Otherwise the
/// next input symbol is consumed. The run rejects when input remains but no move applies (including when the stack
/// is empty), and otherwise decides by the automaton's [AcceptanceMode] once input is consumed and no epsilon move
/// applies.
pub fn simulate(
    dpda: &ValidatedDpda,
    input: &[Symbol],
    max_epsilon_chain: EpsilonChainLimit,
    record_trace: bool,
) -> Simulation {
    let mut recorder = TraceRecorder::new(record_trace);
    let num_states = dpda.states.len();
    let mut state = dpda.initial;
    let mut stack = vec![dpda.initial_stack];
    let mut position = 0;
    let mut steps = 0;
    let mut chain = 0;
    let mut max_depth = stack.len();
    let mut chain_limit = max_epsilon_chain.limit(num_states, max_depth);

    recorder.record(|| snapshot(dpda, state, position, &stack));

    loop {
        let Some(&top) = stack.last() else {
            let outcome = if position < input.len() {
                debug!("DPDA stack emptied with {} input symbols left; rejecting", input.len() - position);
                Outcome::Rejected
            } else {
                decide(dpda, state, &stack)
            };
            return recorder.finish(outcome, steps);
        };

        if let Some(action) = dpda.epsilon_move(state, top) {
            if chain == 0 {
                chain_limit = max_epsilon_chain.limit(num_states, max_depth);
            }

            if chain >= chain_limit {
                warn!("DPDA exceeded {chain_limit} consecutive epsilon moves at input position {position}");
                return recorder.finish(Outcome::Inconclusive(InconclusiveReason::EpsilonLoopBudgetExceeded), steps);
            }

            trace!(
                "DPDA {} --epsilon/{}--> {}",
                dpda.states.label(state),
                dpda.symbols.label(top),
                dpda.states.label(action.to)
            );
            state = apply(action, &mut stack);
            chain += 1;
            steps += 1;
            max_depth = max_depth.max(stack.len());
            recorder.record(|| snapshot(dpda, state, position, &stack));
            continue;
        }

        let Some(symbol) = input.get(position) else {
            let outcome = decide(dpda, state, &stack);
            return recorder.finish(outcome, steps);
        };

        chain = 0;
        let action = dpda.inputs.get(symbol).and_then(|i| dpda.reading_move(state, i, top));
        let Some(action) = action else {
            debug!(
                "DPDA has no move from {} on {symbol} with stack top {}; rejecting",
                dpda.states.label(state),
                dpda.symbols.label(top)
            );
            return recorder.finish(Outcome::Rejected, steps);
        };

        trace!(
            "DPDA {} --{symbol}/{}--> {}",
            dpda.states.label(state),
            dpda.symbols.label(top),
            dpda.states.label(action.to)
        );
        state = apply(action, &mut stack);
        position += 1;
        steps += 1;
        max_depth = max_depth.max(stack.len());
        recorder.record(|| snapshot(dpda, state, position, &stack));
    }
}

/// Pops the top and pushes the replacement so that its first symbol ends up on top. Returns the new state.
fn apply(action: &StackAction, stack: &mut Vec<usize>) -> usize {
    stack.pop();
    stack.extend(action.push.iter().rev());
    action.to
}

fn decide(dpda: &ValidatedDpda, state: usize, stack: &[usize]) -> Outcome {
    let accept = match dpda.acceptance_mode() {
        AcceptanceMode::FinalState => dpda.accept[state],
        AcceptanceMode::EmptyStack => stack.is_empty(),
        AcceptanceMode::Both => dpda.accept[state] && stack.is_empty(),
    };

    let outcome = Outcome::decide(accept);
    debug!("DPDA {outcome} in state {} with stack depth {}", dpda.states.label(state), stack.len());
    outcome
}

fn snapshot(dpda: &ValidatedDpda, state: usize, position: usize, stack: &[usize]) -> Configuration {
    Configuration::Dpda {
        state: dpda.states.label(state).clone(),
        position,
        stack: stack.iter().map(|&s| dpda.symbols.label(s).clone()).collect(),
    }
}

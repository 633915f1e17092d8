use {
    crate::{
        definition::Symbol, outcome::TraceRecorder, validate::ValidatedDtm, Configuration, InconclusiveReason, Outcome,
        Simulation, TapeCell,
    },
    log::{debug, trace, warn},
    std::collections::BTreeMap,
};

/// A sparse, two-way infinite tape. Cells not present hold the blank.
#[derive(Debug)]
struct Tape {
    cells: BTreeMap<i64, usize>,
    blank: usize,
}

impl Tape {
    fn new<I: IntoIterator<Item = usize>>(input: I, blank: usize) -> Self {
        let cells = (0..).zip(input).filter(|&(_, symbol)| symbol != blank).collect();
        Self {
            cells,
            blank,
        }
    }

    #[inline]
    fn read(&self, position: i64) -> usize {
        self.cells.get(&position).copied().unwrap_or(self.blank)
    }

    fn write(&mut self, position: i64, symbol: usize) {
        if symbol == self.blank {
            self.cells.remove(&position);
        } else {
            self.cells.insert(position, symbol);
        }
    }
}

/// Returns whether `dtm` accepts `input`, giving up after `max_steps` transitions.
pub fn accepts(dtm: &ValidatedDtm, input: &[Symbol], max_steps: usize) -> Outcome {
    simulate(dtm, input, max_steps, false).outcome
}

/// Runs `dtm` over `input` with the head starting on the first input symbol.
///
/// The machine accepts as soon as it is in a final state (including before the first step), rejects when no
/// transition exists for the current state and tape symbol, and is inconclusive when it would need more than
/// `max_steps` transitions. An input containing a symbol outside the input alphabet is rejected without running.
pub fn simulate(dtm: &ValidatedDtm, input: &[Symbol], max_steps: usize, record_trace: bool) -> Simulation {
    let mut recorder = TraceRecorder::new(record_trace);
    let definition = dtm.definition();

    let mut cells = Vec::with_capacity(input.len());
    for (position, symbol) in input.iter().enumerate() {
        match dtm.symbols.get(symbol) {
            Some(index) if definition.input_symbols.contains(symbol) => cells.push(index),
            _ => {
                debug!("DTM input has {symbol:?} at position {position}, which is not an input symbol; rejecting");
                return recorder.finish(Outcome::Rejected, 0);
            }
        }
    }

    let mut tape = Tape::new(cells, dtm.blank);
    let mut state = dtm.initial;
    let mut head: i64 = 0;
    let mut steps = 0;

    recorder.record(|| snapshot(dtm, state, head, &tape));

    loop {
        if dtm.accept[state] {
            debug!("DTM accepted in state {} after {steps} steps", dtm.states.label(state));
            return recorder.finish(Outcome::Accepted, steps);
        }

        let read = tape.read(head);
        let Some(action) = dtm.action(state, read) else {
            debug!(
                "DTM halted in state {} reading {} at {head} after {steps} steps; rejecting",
                dtm.states.label(state),
                dtm.symbols.label(read)
            );
            return recorder.finish(Outcome::Rejected, steps);
        };

        if steps >= max_steps {
            warn!("DTM exceeded its budget of {max_steps} steps in state {}", dtm.states.label(state));
            return recorder.finish(Outcome::Inconclusive(InconclusiveReason::StepBudgetExceeded), steps);
        }

        trace!(
            "DTM {} reads {} at {head}: write {}, move {:?}, enter {}",
            dtm.states.label(state),
            dtm.symbols.label(read),
            dtm.symbols.label(action.write),
            action.movement,
            dtm.states.label(action.to)
        );

        tape.write(head, action.write);
        head += action.movement.offset();
        state = action.to;
        steps += 1;
        recorder.record(|| snapshot(dtm, state, head, &tape));
    }
}

fn snapshot(dtm: &ValidatedDtm, state: usize, head: i64, tape: &Tape) -> Configuration {
    Configuration::Dtm {
        state: dtm.states.label(state).clone(),
        head,
        tape: tape
            .cells
            .iter()
            .map(|(&position, &symbol)| TapeCell {
                position,
                symbol: dtm.symbols.label(symbol).clone(),
            })
            .collect(),
    }
}

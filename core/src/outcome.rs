use {
    crate::definition::{State, Symbol},
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Why a run ended without a decision.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InconclusiveReason {
    /// A Turing machine used up its step budget.
    StepBudgetExceeded,

    /// A pushdown automaton made more consecutive epsilon moves than its budget allows.
    EpsilonLoopBudgetExceeded,
}

impl Display for InconclusiveReason {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::StepBudgetExceeded => f.write_str("step-budget-exceeded"),
            Self::EpsilonLoopBudgetExceeded => f.write_str("epsilon-loop-budget-exceeded"),
        }
    }
}

/// The result of simulating an automaton on an input.
///
/// [Outcome::Inconclusive] is not a rejection: a larger budget could still produce either decision.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", content = "reason", rename_all = "lowercase")]
pub enum Outcome {
    /// The input is in the language.
    Accepted,

    /// The input is not in the language.
    Rejected,

    /// The run exhausted its budget before deciding.
    Inconclusive(InconclusiveReason),
}

impl Outcome {
    /// Returns `Accepted` if `accept` is true, `Rejected` otherwise.
    #[inline]
    pub fn decide(accept: bool) -> Self {
        if accept {
            Self::Accepted
        } else {
            Self::Rejected
        }
    }

    /// Indicates whether this outcome is `Accepted`.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns the decision, or `None` when the run was inconclusive.
    pub fn accepted(&self) -> Option<bool> {
        match self {
            Self::Accepted => Some(true),
            Self::Rejected => Some(false),
            Self::Inconclusive(_) => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
            Self::Inconclusive(reason) => write!(f, "inconclusive ({reason})"),
        }
    }
}

/// A non-blank DTM tape cell.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TapeCell {
    /// Cell position; the input starts at 0.
    pub position: i64,

    /// Symbol stored in the cell.
    pub symbol: Symbol,
}

/// A snapshot of a run at one step.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Configuration {
    /// DFA snapshot.
    Dfa {
        /// Current state.
        state: State,

        /// Number of input symbols consumed.
        position: usize,
    },

    /// DPDA snapshot.
    Dpda {
        /// Current state.
        state: State,

        /// Number of input symbols consumed.
        position: usize,

        /// Stack contents, bottom first; the last element is the top.
        stack: Vec<Symbol>,
    },

    /// DTM snapshot.
    Dtm {
        /// Current state.
        state: State,

        /// Head position.
        head: i64,

        /// Non-blank cells in position order.
        tape: Vec<TapeCell>,
    },
}

impl Configuration {
    /// Returns the state of this snapshot.
    pub fn state(&self) -> &State {
        match self {
            Self::Dfa { state, .. } | Self::Dpda { state, .. } | Self::Dtm { state, .. } => state,
        }
    }
}

/// An outcome together with the run that produced it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// The decision.
    pub outcome: Outcome,

    /// Number of transitions applied.
    pub steps: usize,

    /// Every configuration visited, starting with the initial one, if tracing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<Configuration>>,
}

/// Collects configurations when tracing is on; does nothing otherwise.
#[derive(Debug)]
pub(crate) struct TraceRecorder {
    configurations: Option<Vec<Configuration>>,
}

impl TraceRecorder {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            configurations: if enabled {
                Some(Vec::new())
            } else {
                None
            },
        }
    }

    /// Records the configuration built by `f`; `f` is only called when tracing.
    #[inline]
    pub(crate) fn record<F: FnOnce() -> Configuration>(&mut self, f: F) {
        if let Some(configurations) = self.configurations.as_mut() {
            configurations.push(f());
        }
    }

    pub(crate) fn finish(self, outcome: Outcome, steps: usize) -> Simulation {
        Simulation {
            outcome,
            steps,
            trace: self.configurations,
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{Configuration, InconclusiveReason, Outcome, TraceRecorder},
        crate::definition::State,
        pretty_assertions::assert_eq,
        serde_json::json,
        test_log::test,
    };

    #[test]
    fn test_outcome_json() {
        assert_eq!(serde_json::to_value(Outcome::Accepted).unwrap(), json!({"result": "accepted"}));
        assert_eq!(
            serde_json::to_value(Outcome::Inconclusive(InconclusiveReason::StepBudgetExceeded)).unwrap(),
            json!({"result": "inconclusive", "reason": "step-budget-exceeded"})
        );
    }

    #[test]
    fn test_outcome_decision() {
        assert_eq!(Outcome::decide(true), Outcome::Accepted);
        assert_eq!(Outcome::Rejected.accepted(), Some(false));
        assert_eq!(Outcome::Inconclusive(InconclusiveReason::EpsilonLoopBudgetExceeded).accepted(), None);
        assert_eq!(
            Outcome::Inconclusive(InconclusiveReason::EpsilonLoopBudgetExceeded).to_string(),
            "inconclusive (epsilon-loop-budget-exceeded)"
        );
    }

    #[test]
    fn test_recorder_disabled() {
        let mut recorder = TraceRecorder::new(false);
        recorder.record(|| panic!("configuration built while tracing is off"));
        assert!(recorder.finish(Outcome::Rejected, 0).trace.is_none());

        let mut recorder = TraceRecorder::new(true);
        recorder.record(|| Configuration::Dfa {
            state: State::from("q0"),
            position: 0,
        });
        let trace = recorder.finish(Outcome::Accepted, 0).trace.unwrap();
        assert_eq!(trace[0].state().as_str(), "q0");
    }
}

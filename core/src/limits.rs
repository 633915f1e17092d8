use {
    crate::SimulationError,
    serde::{Deserialize, Serialize},
};

/// Default number of steps a Turing machine may execute before a run is declared inconclusive.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Bound on the number of consecutive epsilon moves a DPDA may make without consuming input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpsilonChainLimit {
    /// At most this many consecutive epsilon moves.
    Fixed(usize),

    /// At most `|states| × max(depth, 1)` consecutive epsilon moves, where `depth` is the deepest the stack has
    /// been when the current chain began.
    #[default]
    Proportional,
}

impl EpsilonChainLimit {
    /// Returns the chain length allowed for an automaton with `num_states` states whose stack has reached
    /// `max_depth` symbols.
    pub fn limit(&self, num_states: usize, max_depth: usize) -> usize {
        match self {
            Self::Fixed(n) => *n,
            Self::Proportional => num_states.saturating_mul(max_depth.max(1)),
        }
    }
}

/// Budgets and reporting switches for a single simulation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Maximum number of Turing machine steps.
    pub max_steps: usize,

    /// Maximum length of a DPDA epsilon-move chain.
    pub epsilon_chain: EpsilonChainLimit,

    /// Whether to record every configuration visited.
    pub record_trace: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            epsilon_chain: EpsilonChainLimit::default(),
            record_trace: false,
        }
    }
}

impl SimulationOptions {
    /// Options with a Turing machine step budget of `max_steps`.
    pub fn with_max_steps(max_steps: usize) -> Self {
        Self {
            max_steps,
            ..Self::default()
        }
    }

    /// Options with a fixed DPDA epsilon-chain budget of `max_epsilon_chain`.
    pub fn with_epsilon_chain(max_epsilon_chain: usize) -> Self {
        Self {
            epsilon_chain: EpsilonChainLimit::Fixed(max_epsilon_chain),
            ..Self::default()
        }
    }

    /// Returns a copy of these options with trace recording switched on or off.
    pub fn trace(self, record_trace: bool) -> Self {
        Self {
            record_trace,
            ..self
        }
    }

    /// Verifies that every budget is positive.
    pub fn check(&self) -> Result<(), SimulationError> {
        if self.max_steps == 0 {
            return Err(SimulationError::InvalidBudget("max_steps"));
        }

        if self.epsilon_chain == EpsilonChainLimit::Fixed(0) {
            return Err(SimulationError::InvalidBudget("epsilon_chain"));
        }

        Ok(())
    }
}

use {
    crate::definition::{State, Symbol},
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// The alphabet a symbol was expected to belong to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SymbolRole {
    /// The input alphabet.
    Input,

    /// The DPDA stack alphabet.
    Stack,

    /// The DTM tape alphabet.
    Tape,
}

impl Display for SymbolRole {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Input => f.write_str("input"),
            Self::Stack => f.write_str("stack"),
            Self::Tape => f.write_str("tape"),
        }
    }
}

/// Reasons a definition can fail validation. Raised only by [crate::validate()], never by an engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// The state set is empty.
    EmptyStates,

    /// A state label was the empty string.
    EmptyStateLabel,

    /// A symbol label in the given alphabet was the empty string.
    EmptySymbolLabel(SymbolRole),

    /// The initial state is not a member of the state set.
    UnknownInitialState(State),

    /// A final state is not a member of the state set.
    UnknownFinalState(State),

    /// A transition references a state outside the state set.
    UnknownTransitionState(State),

    /// A transition references a symbol outside the alphabet for its role.
    UnknownTransitionSymbol(SymbolRole, Symbol),

    /// A DFA has no transition for the given (state, symbol) pair.
    MissingTransition(State, Symbol),

    /// More than one transition was registered for the same key.
    DuplicateTransition(State, Option<Symbol> /* input or tape symbol */, Option<Symbol> /* stack top */),

    /// A DPDA has both an epsilon transition and a symbol transition for the same (state, stack top).
    EpsilonConflict(State, Symbol /* stack top */, Symbol /* input */),

    /// The DPDA initial stack symbol is not in the stack alphabet.
    UnknownInitialStackSymbol(Symbol),

    /// An input symbol is missing from the stack or tape alphabet, which must contain the input alphabet.
    InputSymbolNotInAlphabet(SymbolRole, Symbol),

    /// The DTM blank symbol is not in the tape alphabet.
    BlankNotInTapeSymbols(Symbol),

    /// The DTM blank symbol is also an input symbol.
    BlankInInputSymbols(Symbol),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::EmptyStates => write!(f, "State set is empty"),
            Self::EmptyStateLabel => write!(f, "State labels must not be empty"),
            Self::EmptySymbolLabel(role) => write!(f, "Symbol labels in the {role} alphabet must not be empty"),
            Self::UnknownInitialState(state) => write!(f, "Initial state {state} is not in the state set"),
            Self::UnknownFinalState(state) => write!(f, "Final state {state} is not in the state set"),
            Self::UnknownTransitionState(state) => {
                write!(f, "Transition references state {state} which is not in the state set")
            }
            Self::UnknownTransitionSymbol(role, symbol) => {
                write!(f, "Transition references symbol {symbol} which is not in the {role} alphabet")
            }
            Self::MissingTransition(state, symbol) => {
                write!(f, "Missing transition from state {state} on symbol {symbol}")
            }
            Self::DuplicateTransition(state, symbol, top) => {
                write!(f, "Duplicate transition from state {state}")?;
                match symbol {
                    Some(symbol) => write!(f, " on symbol {symbol}")?,
                    None => write!(f, " on epsilon")?,
                }
                if let Some(top) = top {
                    write!(f, " with stack top {top}")?;
                }
                Ok(())
            }
            Self::EpsilonConflict(state, top, input) => write!(
                f,
                "Non-deterministic transitions from state {state} with stack top {top}: epsilon and symbol {input} both apply"
            ),
            Self::UnknownInitialStackSymbol(symbol) => {
                write!(f, "Initial stack symbol {symbol} is not in the stack alphabet")
            }
            Self::InputSymbolNotInAlphabet(role, symbol) => {
                write!(f, "Input symbol {symbol} is not in the {role} alphabet")
            }
            Self::BlankNotInTapeSymbols(symbol) => write!(f, "Blank symbol {symbol} is not in the tape alphabet"),
            Self::BlankInInputSymbols(symbol) => write!(f, "Blank symbol {symbol} must not be an input symbol"),
        }
    }
}

impl Error for ValidationError {}

/// Errors that prevent a simulation request from running.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SimulationError {
    /// The automaton definition is malformed or non-deterministic.
    InvalidDefinition(ValidationError),

    /// The input string contains a symbol outside the input alphabet.
    InvalidInputSymbol(String /* symbol */, usize /* position */),

    /// A step or epsilon-chain budget was zero.
    InvalidBudget(&'static str /* budget name */),
}

impl Display for SimulationError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidDefinition(e) => write!(f, "Invalid automaton definition: {e}"),
            Self::InvalidInputSymbol(symbol, position) => {
                write!(f, "Invalid input: symbol {symbol:?} at position {position} is not an input symbol")
            }
            Self::InvalidBudget(name) => write!(f, "Invalid budget: {name} must be positive"),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDefinition(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for SimulationError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidDefinition(e)
    }
}

/// A type alias for any kind of error. The error is boxed and must be `Send`, `Sync`, and `'static`.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A type alias for a `Result` with a [BoxError].
pub type BoxResult<T> = Result<T, BoxError>;

//! Definitions are plain immutable values: sets of labels plus a list of transition rules. Nothing here is
//! checked; [crate::validate()] turns a [Definition] into something an engine will run.
use {
    serde::{Deserialize, Deserializer, Serialize},
    std::{
        borrow::Borrow,
        collections::BTreeSet,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// An opaque state label.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    /// Create a state with the given label.
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self(label.into())
    }

    /// Returns the label of this state.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An opaque symbol label, used for input, stack, and tape alphabets alike.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol with the given label.
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self(label.into())
    }

    /// Returns the label of this symbol.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split an input string into one symbol per character.
    pub fn split(input: &str) -> Vec<Symbol> {
        input.chars().map(|c| Symbol(c.to_string())).collect()
    }
}

macro_rules! label_impls {
    ($t:ident) => {
        impl Display for $t {
            fn fmt(&self, f: &mut Formatter) -> FmtResult {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(label: &str) -> Self {
                Self(label.to_string())
            }
        }

        impl From<String> for $t {
            fn from(label: String) -> Self {
                Self(label)
            }
        }

        impl Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

label_impls!(State);
label_impls!(Symbol);

/// Direction the DTM head moves after writing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Move {
    /// Move one cell towards negative positions.
    #[serde(rename = "L")]
    Left,

    /// Move one cell towards positive positions.
    #[serde(rename = "R")]
    Right,

    /// Leave the head where it is.
    #[serde(rename = "N", alias = "S")]
    Stay,
}

impl Move {
    /// Returns the change in head position for this move.
    #[inline]
    pub fn offset(self) -> i64 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
            Self::Stay => 0,
        }
    }
}

/// When a DPDA accepts once its input is consumed and no epsilon move applies.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceMode {
    /// Accept iff the current state is final; stack contents are ignored.
    #[default]
    FinalState,

    /// Accept iff the stack is empty; the current state is ignored.
    EmptyStack,

    /// Accept iff the current state is final and the stack is empty.
    Both,
}

/// The class of an automaton.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomatonKind {
    /// Deterministic finite automaton.
    Dfa,

    /// Deterministic pushdown automaton.
    Dpda,

    /// Deterministic Turing machine.
    Dtm,
}

impl Display for AutomatonKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Dfa => f.write_str("dfa"),
            Self::Dpda => f.write_str("dpda"),
            Self::Dtm => f.write_str("dtm"),
        }
    }
}

/// A DFA transition: reading `on` in state `from` moves to `to`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DfaTransition {
    /// Source state.
    pub from: State,

    /// Input symbol read.
    pub on: Symbol,

    /// Destination state.
    pub to: State,
}

impl DfaTransition {
    /// Create a new DFA transition.
    pub fn new<F: Into<State>, O: Into<Symbol>, T: Into<State>>(from: F, on: O, to: T) -> Self {
        Self {
            from: from.into(),
            on: on.into(),
            to: to.into(),
        }
    }
}

/// A DPDA transition. The stack top is popped and `push` is pushed in its place; the first symbol of `push`
/// becomes the new top. An `input` of `None` is an epsilon move.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DpdaTransition {
    /// Source state.
    pub from: State,

    /// Input symbol consumed, or `None` for an epsilon move. Deserializes `null`, a missing field, and `""`
    /// as epsilon.
    #[serde(default, deserialize_with = "deserialize_epsilon")]
    pub input: Option<Symbol>,

    /// Stack symbol that must be on top; it is popped.
    pub stack_top: Symbol,

    /// Destination state.
    pub to: State,

    /// Symbols replacing the popped top, new top first. Empty pops without pushing.
    #[serde(default)]
    pub push: Vec<Symbol>,
}

impl DpdaTransition {
    /// Create a new DPDA transition consuming `input` (or an epsilon move for `None`).
    pub fn new<F, T>(from: F, input: Option<&str>, stack_top: &str, to: T, push: &[&str]) -> Self
    where
        F: Into<State>,
        T: Into<State>,
    {
        Self {
            from: from.into(),
            input: input.map(Symbol::from),
            stack_top: Symbol::from(stack_top),
            to: to.into(),
            push: push.iter().map(|s| Symbol::from(*s)).collect(),
        }
    }
}

fn deserialize_epsilon<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Symbol>, D::Error> {
    let label: Option<String> = Option::deserialize(d)?;
    Ok(label.filter(|label| !label.is_empty()).map(Symbol))
}

/// A DTM transition: reading `read` in state `from` writes `write`, moves the head, and enters `to`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DtmTransition {
    /// Source state.
    pub from: State,

    /// Tape symbol under the head.
    pub read: Symbol,

    /// Destination state.
    pub to: State,

    /// Tape symbol written over `read`.
    pub write: Symbol,

    /// Head movement after writing.
    #[serde(rename = "move")]
    pub movement: Move,
}

impl DtmTransition {
    /// Create a new DTM transition.
    pub fn new<F: Into<State>, T: Into<State>>(from: F, read: &str, to: T, write: &str, movement: Move) -> Self {
        Self {
            from: from.into(),
            read: Symbol::from(read),
            to: to.into(),
            write: Symbol::from(write),
            movement,
        }
    }
}

/// A deterministic finite automaton. The transition table must be total over `states × input_symbols`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DfaDefinition {
    /// All states.
    pub states: BTreeSet<State>,

    /// The input alphabet.
    pub input_symbols: BTreeSet<Symbol>,

    /// Transition rules, one per (state, input symbol).
    pub transitions: Vec<DfaTransition>,

    /// The start state.
    pub initial_state: State,

    /// Accepting states.
    pub final_states: BTreeSet<State>,
}

/// A deterministic pushdown automaton.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DpdaDefinition {
    /// All states.
    pub states: BTreeSet<State>,

    /// The input alphabet.
    pub input_symbols: BTreeSet<Symbol>,

    /// The stack alphabet; contains every input symbol.
    pub stack_symbols: BTreeSet<Symbol>,

    /// Transition rules.
    pub transitions: Vec<DpdaTransition>,

    /// The start state.
    pub initial_state: State,

    /// The only symbol on the stack when a run starts.
    pub initial_stack_symbol: Symbol,

    /// Accepting states.
    pub final_states: BTreeSet<State>,

    /// How acceptance is decided once input is consumed.
    #[serde(default)]
    pub acceptance_mode: AcceptanceMode,
}

/// A deterministic Turing machine.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DtmDefinition {
    /// All states.
    pub states: BTreeSet<State>,

    /// The input alphabet.
    pub input_symbols: BTreeSet<Symbol>,

    /// The tape alphabet; contains every input symbol and the blank.
    pub tape_symbols: BTreeSet<Symbol>,

    /// Transition rules, at most one per (state, tape symbol).
    pub transitions: Vec<DtmTransition>,

    /// The start state.
    pub initial_state: State,

    /// The symbol in every cell not written by the input.
    pub blank_symbol: Symbol,

    /// Accepting (halting) states.
    pub final_states: BTreeSet<State>,
}

/// An automaton definition of any supported class, tagged by `"type"` when serialized.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Definition {
    /// A deterministic finite automaton.
    Dfa(DfaDefinition),

    /// A deterministic pushdown automaton.
    Dpda(DpdaDefinition),

    /// A deterministic Turing machine.
    Dtm(DtmDefinition),
}

impl Definition {
    /// Returns the class of this automaton.
    pub fn kind(&self) -> AutomatonKind {
        match self {
            Self::Dfa(_) => AutomatonKind::Dfa,
            Self::Dpda(_) => AutomatonKind::Dpda,
            Self::Dtm(_) => AutomatonKind::Dtm,
        }
    }
}

impl From<DfaDefinition> for Definition {
    fn from(d: DfaDefinition) -> Self {
        Self::Dfa(d)
    }
}

impl From<DpdaDefinition> for Definition {
    fn from(d: DpdaDefinition) -> Self {
        Self::Dpda(d)
    }
}

impl From<DtmDefinition> for Definition {
    fn from(d: DtmDefinition) -> Self {
        Self::Dtm(d)
    }
}

/// Collect labels into an ordered set.
pub fn labels<T: for<'a> From<&'a str> + Ord>(labels: &[&str]) -> BTreeSet<T> {
    labels.iter().map(|label| T::from(*label)).collect()
}

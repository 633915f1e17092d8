use {
    crate::{
        definition::{
            AcceptanceMode, AutomatonKind, Definition, DfaDefinition, DpdaDefinition, DtmDefinition, Move, State,
            Symbol,
        },
        SimulationError, SymbolRole, ValidationError,
    },
    bitvec::vec::BitVec,
    log::debug,
    std::{
        collections::{BTreeSet, HashMap},
        hash::Hash,
    },
};

/// Checks a definition of any class and compiles it for simulation.
///
/// Checks run in a fixed order and the first violation is returned: the state set, then the alphabets and every
/// label used by a transition, then DFA totality, then determinism, then the DPDA/DTM extras (initial stack symbol,
/// blank symbol, alphabet containment).
pub fn validate(definition: Definition) -> Result<ValidatedDefinition, ValidationError> {
    let kind = definition.kind();
    let result = match definition {
        Definition::Dfa(d) => ValidatedDfa::new(d).map(ValidatedDefinition::Dfa),
        Definition::Dpda(d) => ValidatedDpda::new(d).map(ValidatedDefinition::Dpda),
        Definition::Dtm(d) => ValidatedDtm::new(d).map(ValidatedDefinition::Dtm),
    };

    match &result {
        Ok(_) => debug!("Validated {kind} definition"),
        Err(e) => debug!("Rejected {kind} definition: {e}"),
    }

    result
}

/// Dense indices for a set of labels, assigned in label order.
#[derive(Clone, Debug)]
pub(crate) struct Labels<T> {
    labels: Vec<T>,
    index: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash + Ord> Labels<T> {
    fn new(set: &BTreeSet<T>) -> Self {
        let labels: Vec<T> = set.iter().cloned().collect();
        let index = labels.iter().enumerate().map(|(i, label)| (label.clone(), i)).collect();
        Self {
            labels,
            index,
        }
    }

    #[inline]
    pub(crate) fn get(&self, label: &T) -> Option<usize> {
        self.index.get(label).copied()
    }

    #[inline]
    pub(crate) fn label(&self, i: usize) -> &T {
        &self.labels[i]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

/// What a DPDA does once a transition fires: the destination state and the stack symbols (new top first).
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct StackAction {
    pub(crate) to: usize,
    pub(crate) push: Vec<usize>,
}

/// What a DTM does once a transition fires.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TapeAction {
    pub(crate) to: usize,
    pub(crate) write: usize,
    pub(crate) movement: Move,
}

/// A definition that passed validation. Engines accept only these.
#[derive(Clone, Debug)]
pub enum ValidatedDefinition {
    /// A validated DFA.
    Dfa(ValidatedDfa),

    /// A validated DPDA.
    Dpda(ValidatedDpda),

    /// A validated DTM.
    Dtm(ValidatedDtm),
}

impl ValidatedDefinition {
    /// Returns the class of this automaton.
    pub fn kind(&self) -> AutomatonKind {
        match self {
            Self::Dfa(_) => AutomatonKind::Dfa,
            Self::Dpda(_) => AutomatonKind::Dpda,
            Self::Dtm(_) => AutomatonKind::Dtm,
        }
    }

    /// Returns the input alphabet.
    pub fn input_symbols(&self) -> &BTreeSet<Symbol> {
        match self {
            Self::Dfa(a) => &a.definition.input_symbols,
            Self::Dpda(a) => &a.definition.input_symbols,
            Self::Dtm(a) => &a.definition.input_symbols,
        }
    }

    /// Splits `input` into one symbol per character, failing on the first character that is not an input symbol.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Symbol>, SimulationError> {
        let alphabet = self.input_symbols();
        input
            .chars()
            .enumerate()
            .map(|(position, c)| {
                let symbol = Symbol::new(c);
                if alphabet.contains(&symbol) {
                    Ok(symbol)
                } else {
                    Err(SimulationError::InvalidInputSymbol(c.to_string(), position))
                }
            })
            .collect()
    }
}

fn check_states(
    states: &BTreeSet<State>,
    initial_state: &State,
    final_states: &BTreeSet<State>,
) -> Result<(), ValidationError> {
    if states.is_empty() {
        return Err(ValidationError::EmptyStates);
    }

    if states.iter().any(|s| s.as_str().is_empty()) {
        return Err(ValidationError::EmptyStateLabel);
    }

    if !states.contains(initial_state) {
        return Err(ValidationError::UnknownInitialState(initial_state.clone()));
    }

    if let Some(state) = final_states.iter().find(|s| !states.contains(*s)) {
        return Err(ValidationError::UnknownFinalState(state.clone()));
    }

    Ok(())
}

fn check_alphabet(symbols: &BTreeSet<Symbol>, role: SymbolRole) -> Result<(), ValidationError> {
    if symbols.iter().any(|s| s.as_str().is_empty()) {
        Err(ValidationError::EmptySymbolLabel(role))
    } else {
        Ok(())
    }
}

fn check_subset(
    input_symbols: &BTreeSet<Symbol>,
    alphabet: &BTreeSet<Symbol>,
    role: SymbolRole,
) -> Result<(), ValidationError> {
    match input_symbols.iter().find(|s| !alphabet.contains(*s)) {
        Some(symbol) => Err(ValidationError::InputSymbolNotInAlphabet(role, symbol.clone())),
        None => Ok(()),
    }
}

fn state_index(states: &Labels<State>, state: &State) -> Result<usize, ValidationError> {
    states.get(state).ok_or_else(|| ValidationError::UnknownTransitionState(state.clone()))
}

fn symbol_index(symbols: &Labels<Symbol>, symbol: &Symbol, role: SymbolRole) -> Result<usize, ValidationError> {
    symbols.get(symbol).ok_or_else(|| ValidationError::UnknownTransitionSymbol(role, symbol.clone()))
}

fn initial_index(states: &Labels<State>, initial_state: &State) -> Result<usize, ValidationError> {
    states.get(initial_state).ok_or_else(|| ValidationError::UnknownInitialState(initial_state.clone()))
}

fn accept_set(states: &Labels<State>, final_states: &BTreeSet<State>) -> BitVec {
    let mut accept = bitvec::bitvec!(0; states.len());
    for state in final_states {
        if let Some(i) = states.get(state) {
            accept.set(i, true);
        }
    }
    accept
}

/// A DFA with a total transition table, compiled to a dense `states × symbols` array.
#[derive(Clone, Debug)]
pub struct ValidatedDfa {
    definition: DfaDefinition,
    pub(crate) states: Labels<State>,
    pub(crate) symbols: Labels<Symbol>,
    pub(crate) initial: usize,
    pub(crate) accept: BitVec,
    transitions: Vec<usize>,
}

impl ValidatedDfa {
    /// Validate a DFA definition.
    pub fn new(definition: DfaDefinition) -> Result<Self, ValidationError> {
        check_states(&definition.states, &definition.initial_state, &definition.final_states)?;
        check_alphabet(&definition.input_symbols, SymbolRole::Input)?;

        let states = Labels::new(&definition.states);
        let symbols = Labels::new(&definition.input_symbols);
        let mut table: Vec<Option<usize>> = vec![None; states.len() * symbols.len()];
        let mut duplicate = None;

        for t in &definition.transitions {
            let from = state_index(&states, &t.from)?;
            let on = symbol_index(&symbols, &t.on, SymbolRole::Input)?;
            let to = state_index(&states, &t.to)?;

            let slot = &mut table[from * symbols.len() + on];
            if slot.is_some() && duplicate.is_none() {
                duplicate = Some(ValidationError::DuplicateTransition(t.from.clone(), Some(t.on.clone()), None));
            }
            *slot = Some(to);
        }

        // Totality comes before determinism.
        let mut transitions = Vec::with_capacity(table.len());
        for (i, dest) in table.into_iter().enumerate() {
            match dest {
                Some(dest) => transitions.push(dest),
                None => {
                    let state = states.label(i / symbols.len()).clone();
                    let symbol = symbols.label(i % symbols.len()).clone();
                    return Err(ValidationError::MissingTransition(state, symbol));
                }
            }
        }

        if let Some(e) = duplicate {
            return Err(e);
        }

        let initial = initial_index(&states, &definition.initial_state)?;
        let accept = accept_set(&states, &definition.final_states);

        Ok(Self {
            definition,
            states,
            symbols,
            initial,
            accept,
            transitions,
        })
    }

    /// Returns the definition this automaton was built from.
    #[inline]
    pub fn definition(&self) -> &DfaDefinition {
        &self.definition
    }

    /// Returns the state reached by reading `symbol` in `state`. Both are dense indices.
    #[inline]
    pub(crate) fn step(&self, state: usize, symbol: usize) -> usize {
        self.transitions[state * self.symbols.len() + symbol]
    }
}

/// A deterministic pushdown automaton, compiled to hashed `(state, [input,] stack top)` keys. Input and stack
/// symbols are indexed separately.
#[derive(Clone, Debug)]
pub struct ValidatedDpda {
    definition: DpdaDefinition,
    pub(crate) states: Labels<State>,
    pub(crate) inputs: Labels<Symbol>,
    pub(crate) symbols: Labels<Symbol>,
    pub(crate) initial: usize,
    pub(crate) initial_stack: usize,
    pub(crate) accept: BitVec,
    epsilon: HashMap<(usize, usize), StackAction>,
    reading: HashMap<(usize, usize, usize), StackAction>,
}

impl ValidatedDpda {
    /// Validate a DPDA definition.
    pub fn new(definition: DpdaDefinition) -> Result<Self, ValidationError> {
        check_states(&definition.states, &definition.initial_state, &definition.final_states)?;
        check_alphabet(&definition.input_symbols, SymbolRole::Input)?;
        check_alphabet(&definition.stack_symbols, SymbolRole::Stack)?;

        let states = Labels::new(&definition.states);
        let inputs = Labels::new(&definition.input_symbols);
        let symbols = Labels::new(&definition.stack_symbols);

        let mut compiled = Vec::with_capacity(definition.transitions.len());
        for t in &definition.transitions {
            let from = state_index(&states, &t.from)?;
            let input = t.input.as_ref().map(|s| symbol_index(&inputs, s, SymbolRole::Input)).transpose()?;
            let top = symbol_index(&symbols, &t.stack_top, SymbolRole::Stack)?;
            let to = state_index(&states, &t.to)?;
            let push =
                t.push.iter().map(|s| symbol_index(&symbols, s, SymbolRole::Stack)).collect::<Result<Vec<_>, _>>()?;
            compiled.push(((from, input, top), StackAction { to, push }));
        }

        let keys: Vec<_> = compiled.iter().map(|(key, _)| *key).collect();
        let mut epsilon = HashMap::new();
        let mut reading = HashMap::new();

        for (t, ((from, input, top), action)) in definition.transitions.iter().zip(compiled) {
            let duplicate = match input {
                None => epsilon.insert((from, top), action).is_some(),
                Some(input) => reading.insert((from, input, top), action).is_some(),
            };

            if duplicate {
                return Err(ValidationError::DuplicateTransition(
                    t.from.clone(),
                    t.input.clone(),
                    Some(t.stack_top.clone()),
                ));
            }
        }

        // An epsilon move and a reading move on the same (state, stack top) could both apply.
        for (t, (from, _, top)) in definition.transitions.iter().zip(keys) {
            if let Some(input) = &t.input {
                if epsilon.contains_key(&(from, top)) {
                    return Err(ValidationError::EpsilonConflict(t.from.clone(), t.stack_top.clone(), input.clone()));
                }
            }
        }

        let initial_stack = symbols
            .get(&definition.initial_stack_symbol)
            .ok_or_else(|| ValidationError::UnknownInitialStackSymbol(definition.initial_stack_symbol.clone()))?;
        check_subset(&definition.input_symbols, &definition.stack_symbols, SymbolRole::Stack)?;

        let initial = initial_index(&states, &definition.initial_state)?;
        let accept = accept_set(&states, &definition.final_states);

        Ok(Self {
            definition,
            states,
            inputs,
            symbols,
            initial,
            initial_stack,
            accept,
            epsilon,
            reading,
        })
    }

    /// Returns the definition this automaton was built from.
    #[inline]
    pub fn definition(&self) -> &DpdaDefinition {
        &self.definition
    }

    #[inline]
    pub(crate) fn acceptance_mode(&self) -> AcceptanceMode {
        self.definition.acceptance_mode
    }

    #[inline]
    pub(crate) fn epsilon_move(&self, state: usize, top: usize) -> Option<&StackAction> {
        self.epsilon.get(&(state, top))
    }

    #[inline]
    pub(crate) fn reading_move(&self, state: usize, input: usize, top: usize) -> Option<&StackAction> {
        self.reading.get(&(state, input, top))
    }
}

/// A deterministic Turing machine, compiled to hashed `(state, tape symbol)` keys.
#[derive(Clone, Debug)]
pub struct ValidatedDtm {
    definition: DtmDefinition,
    pub(crate) states: Labels<State>,
    pub(crate) symbols: Labels<Symbol>,
    pub(crate) initial: usize,
    pub(crate) blank: usize,
    pub(crate) accept: BitVec,
    transitions: HashMap<(usize, usize), TapeAction>,
}

impl ValidatedDtm {
    /// Validate a DTM definition.
    pub fn new(definition: DtmDefinition) -> Result<Self, ValidationError> {
        check_states(&definition.states, &definition.initial_state, &definition.final_states)?;
        check_alphabet(&definition.input_symbols, SymbolRole::Input)?;
        check_alphabet(&definition.tape_symbols, SymbolRole::Tape)?;

        let states = Labels::new(&definition.states);
        let symbols = Labels::new(&definition.tape_symbols);

        let mut keyed = Vec::with_capacity(definition.transitions.len());
        for t in &definition.transitions {
            let from = state_index(&states, &t.from)?;
            let read = symbol_index(&symbols, &t.read, SymbolRole::Tape)?;
            let to = state_index(&states, &t.to)?;
            let write = symbol_index(&symbols, &t.write, SymbolRole::Tape)?;
            keyed.push(((from, read), TapeAction { to, write, movement: t.movement }));
        }

        let mut transitions = HashMap::with_capacity(keyed.len());
        for (t, (key, action)) in definition.transitions.iter().zip(keyed) {
            if transitions.insert(key, action).is_some() {
                return Err(ValidationError::DuplicateTransition(t.from.clone(), Some(t.read.clone()), None));
            }
        }

        let blank = symbols
            .get(&definition.blank_symbol)
            .ok_or_else(|| ValidationError::BlankNotInTapeSymbols(definition.blank_symbol.clone()))?;
        if definition.input_symbols.contains(&definition.blank_symbol) {
            return Err(ValidationError::BlankInInputSymbols(definition.blank_symbol.clone()));
        }
        check_subset(&definition.input_symbols, &definition.tape_symbols, SymbolRole::Tape)?;

        let initial = initial_index(&states, &definition.initial_state)?;
        let accept = accept_set(&states, &definition.final_states);

        Ok(Self {
            definition,
            states,
            symbols,
            initial,
            blank,
            accept,
            transitions,
        })
    }

    /// Returns the definition this machine was built from.
    #[inline]
    pub fn definition(&self) -> &DtmDefinition {
        &self.definition
    }

    #[inline]
    pub(crate) fn action(&self, state: usize, read: usize) -> Option<&TapeAction> {
        self.transitions.get(&(state, read))
    }
}

impl TryFrom<DfaDefinition> for ValidatedDfa {
    type Error = ValidationError;

    fn try_from(definition: DfaDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

impl TryFrom<DpdaDefinition> for ValidatedDpda {
    type Error = ValidationError;

    fn try_from(definition: DpdaDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

impl TryFrom<DtmDefinition> for ValidatedDtm {
    type Error = ValidationError;

    fn try_from(definition: DtmDefinition) -> Result<Self, Self::Error> {
        Self::new(definition)
    }
}

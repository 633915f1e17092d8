use {
    automata_core::{
        definition::{AutomatonKind, Definition},
        engine::{dfa, dpda, dtm},
        request::{process, read_request_file},
        validate, Configuration, EpsilonChainLimit, InconclusiveReason, Outcome, Symbol, ValidatedDefinition,
    },
    pretty_assertions::assert_eq,
    std::path::PathBuf,
    test_log::test,
};

fn fixture(dir: &str, name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push(dir);
    path.push(format!("{name}.json"));
    path
}

fn machine(name: &str) -> ValidatedDefinition {
    let body = std::fs::read(fixture("machines", name)).unwrap();
    let definition: Definition = serde_json::from_slice(&body).unwrap();
    validate(definition).unwrap()
}

#[test]
fn dfa_binary_strings_ending_in_01() {
    let ValidatedDefinition::Dfa(automaton) = machine("ends_in_01") else {
        panic!("ends_in_01 is not a DFA");
    };

    assert_eq!(dfa::accepts(&automaton, &Symbol::split("1101")), Outcome::Accepted);
    assert_eq!(dfa::accepts(&automaton, &Symbol::split("110")), Outcome::Rejected);
}

#[test]
fn dpda_balanced_parentheses() {
    let ValidatedDefinition::Dpda(automaton) = machine("balanced_parentheses") else {
        panic!("balanced_parentheses is not a DPDA");
    };

    let limit = EpsilonChainLimit::default();
    assert_eq!(dpda::accepts(&automaton, &Symbol::split("(())"), limit), Outcome::Accepted);
    assert_eq!(dpda::accepts(&automaton, &Symbol::split("(()"), limit), Outcome::Rejected);
}

#[test]
fn dtm_a_n_b_n() {
    let ValidatedDefinition::Dtm(turing) = machine("a_n_b_n") else {
        panic!("a_n_b_n is not a DTM");
    };

    assert_eq!(dtm::accepts(&turing, &Symbol::split("aabb"), 1000), Outcome::Accepted);
    assert_eq!(dtm::accepts(&turing, &Symbol::split("aab"), 1000), Outcome::Rejected);
}

#[test]
fn dtm_looping_variant_is_inconclusive() {
    let ValidatedDefinition::Dtm(looping) = machine("a_n_b_n_looping") else {
        panic!("a_n_b_n_looping is not a DTM");
    };

    let inconclusive = Outcome::Inconclusive(InconclusiveReason::StepBudgetExceeded);
    assert_eq!(dtm::accepts(&looping, &Symbol::split("b"), 10), inconclusive);
    assert_eq!(dtm::accepts(&looping, &Symbol::split("bb"), 10), inconclusive);
    assert_eq!(dtm::accepts(&looping, &Symbol::split("aabb"), 1000), Outcome::Accepted);
}

#[test]
fn dpda_epsilon_budget_from_fixture() {
    let ValidatedDefinition::Dpda(automaton) = machine("drain_after_b") else {
        panic!("drain_after_b is not a DPDA");
    };

    let input = Symbol::split("aab");
    assert_eq!(
        dpda::accepts(&automaton, &input, EpsilonChainLimit::Fixed(1)),
        Outcome::Inconclusive(InconclusiveReason::EpsilonLoopBudgetExceeded)
    );
    assert_eq!(dpda::accepts(&automaton, &input, EpsilonChainLimit::Fixed(2)), Outcome::Accepted);
}

#[test_log::test(tokio::test)]
async fn request_with_trace() {
    let request = read_request_file(fixture("requests", "parentheses_trace")).await.unwrap();
    let response = process(request).unwrap();

    assert_eq!(response.kind, AutomatonKind::Dpda);
    assert_eq!(response.outcome, Outcome::Accepted);
    assert_eq!(response.accepted, Some(true));
    assert_eq!(response.steps, 3);

    let stacks: Vec<(String, usize, Vec<String>)> = response
        .trace
        .unwrap()
        .into_iter()
        .map(|c| match c {
            Configuration::Dpda {
                state,
                position,
                stack,
            } => (state.to_string(), position, stack.iter().map(|s| s.to_string()).collect()),
            other => panic!("Unexpected configuration {other:?}"),
        })
        .collect();

    let expected: Vec<(String, usize, Vec<String>)> = vec![
        ("q0".to_string(), 0, vec!["Z".to_string()]),
        ("q1".to_string(), 1, vec!["Z".to_string(), "(".to_string()]),
        ("q1".to_string(), 2, vec!["Z".to_string()]),
        ("q0".to_string(), 2, vec!["Z".to_string()]),
    ];
    assert_eq!(stacks, expected);
}

#[test_log::test(tokio::test)]
async fn missing_request_file() {
    assert!(read_request_file(fixture("requests", "does_not_exist")).await.is_err());
}

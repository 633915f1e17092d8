//! A transport layer (HTTP handler, CLI, ...) deserializes a [SimulationRequest], calls [process], and serializes the
//! [SimulationResponse]. Nothing here performs network I/O or keeps state between calls.
use {
    crate::{
        definition::{AutomatonKind, Definition},
        engine::Simulate,
        validate, BoxResult, Configuration, Outcome, SimulationError, SimulationOptions,
    },
    log::debug,
    serde::{Deserialize, Serialize},
    std::path::Path,
    tokio::io::{AsyncRead, AsyncReadExt},
};

/// An automaton definition plus the input string to run it on.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// The automaton, with its `"type"` tag alongside the definition fields.
    #[serde(flatten)]
    pub definition: Definition,

    /// The input string; each character is one input symbol.
    pub input: String,

    /// Budgets and trace switch.
    #[serde(default)]
    pub options: SimulationOptions,
}

/// The decision for a [SimulationRequest].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    /// The class of automaton that ran.
    pub kind: AutomatonKind,

    /// The input string, echoed back.
    pub input: String,

    /// The outcome of the run.
    pub outcome: Outcome,

    /// `true` or `false` for a definite outcome; absent when the run was inconclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,

    /// Number of transitions applied.
    pub steps: usize,

    /// Configurations visited, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<Configuration>>,
}

/// Validates the definition, options, and input of `request`, then runs the matching engine.
pub fn process(request: SimulationRequest) -> Result<SimulationResponse, SimulationError> {
    let SimulationRequest {
        definition,
        input,
        options,
    } = request;

    options.check()?;
    let automaton = validate(definition)?;
    let word = automaton.tokenize(&input)?;
    let simulation = automaton.simulate(&word, &options);
    debug!("{} run on {input:?}: {} after {} steps", automaton.kind(), simulation.outcome, simulation.steps);

    Ok(SimulationResponse {
        kind: automaton.kind(),
        input,
        outcome: simulation.outcome,
        accepted: simulation.outcome.accepted(),
        steps: simulation.steps,
        trace: simulation.trace,
    })
}

/// Reads a JSON-encoded [SimulationRequest] from the given reader.
pub async fn read_request<R: AsyncRead + Unpin>(r: &mut R) -> BoxResult<SimulationRequest> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf).await?;
    Ok(serde_json::from_slice(&buf)?)
}

/// Reads a JSON-encoded [SimulationRequest] from the given file.
pub async fn read_request_file<P: AsRef<Path>>(path: P) -> BoxResult<SimulationRequest> {
    let path = path.as_ref();
    debug!("Reading simulation request from {path:?}");
    let mut file = tokio::fs::File::open(path).await?;
    read_request(&mut file).await
}

#[cfg(test)]
mod tests {
    use {
        super::{process, read_request, SimulationRequest},
        crate::{definition::AutomatonKind, InconclusiveReason, Outcome, SimulationError, ValidationError},
        pretty_assertions::assert_eq,
        serde_json::json,
    };

    fn loop_forever_request(max_steps: usize) -> serde_json::Value {
        json!({
            "type": "dtm",
            "states": ["q0"],
            "input_symbols": ["a"],
            "tape_symbols": ["a", "_"],
            "transitions": [
                {"from": "q0", "read": "a", "to": "q0", "write": "a", "move": "R"},
                {"from": "q0", "read": "_", "to": "q0", "write": "_", "move": "R"},
            ],
            "initial_state": "q0",
            "blank_symbol": "_",
            "final_states": [],
            "input": "aa",
            "options": {"max_steps": max_steps, "record_trace": true},
        })
    }

    #[test_log::test]
    fn test_inconclusive_response() {
        let request: SimulationRequest = serde_json::from_value(loop_forever_request(4)).unwrap();
        let response = process(request).unwrap();
        assert_eq!(response.kind, AutomatonKind::Dtm);
        assert_eq!(response.outcome, Outcome::Inconclusive(InconclusiveReason::StepBudgetExceeded));
        assert_eq!(response.accepted, None);
        assert_eq!(response.trace.as_ref().map(Vec::len), Some(5));

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("accepted").is_none());
        assert_eq!(value["outcome"], json!({"result": "inconclusive", "reason": "step-budget-exceeded"}));
    }

    #[test_log::test]
    fn test_rejects_bad_requests() {
        let request: SimulationRequest = serde_json::from_value(loop_forever_request(0)).unwrap();
        assert_eq!(process(request), Err(SimulationError::InvalidBudget("max_steps")));

        let mut request: SimulationRequest = serde_json::from_value(loop_forever_request(4)).unwrap();
        request.input = "ab".to_string();
        assert_eq!(process(request), Err(SimulationError::InvalidInputSymbol("b".to_string(), 1)));

        let mut value = loop_forever_request(4);
        value["initial_state"] = json!("q9");
        let request: SimulationRequest = serde_json::from_value(value).unwrap();
        assert_eq!(
            process(request),
            Err(SimulationError::InvalidDefinition(ValidationError::UnknownInitialState("q9".into())))
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_read_request() {
        let body = serde_json::to_vec(&loop_forever_request(4)).unwrap();
        let request = read_request(&mut body.as_slice()).await.unwrap();
        assert_eq!(request.input, "aa");
        assert_eq!(request.options.max_steps, 4);

        let mut garbage: &[u8] = b"{\"type\": \"nfa\"}";
        assert!(read_request(&mut garbage).await.is_err());
    }
}

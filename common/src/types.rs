use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Journal tag for the start of a contract deployment
pub const INITIALIZE_EVENT: &str = "DEPLOYMENT_EXECUTION_STATE_INITIALIZE";
/// Journal tag for the end of a contract deployment
pub const COMPLETE_EVENT: &str = "DEPLOYMENT_EXECUTION_STATE_COMPLETE";
/// Result tag of a deployment that produced a contract
pub const SUCCESS_RESULT: &str = "SUCCESS";

/// Payload of a deployment initialize event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeEvent {
    /// Deployment unit identifier
    #[serde(deserialize_with = "non_empty_future_id")]
    pub future_id: String,
    /// Contract name as declared in the deployment module
    pub contract_name: String,
    /// Constructor arguments, kept exactly as journaled
    pub constructor_args: Vec<Value>,
}

/// Payload of a deployment complete event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteEvent {
    /// Deployment unit identifier
    #[serde(deserialize_with = "non_empty_future_id")]
    pub future_id: String,
    /// Outcome of the deployment
    pub result: ExecutionResult,
}

/// Outcome of a completed deployment
///
/// Only a successful deployment carries an address. Every other result tag the
/// deployment engine writes (`REVERTED_TRANSACTION`, `STRATEGY_ERROR`, ...) is
/// kept as a failure with its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExecutionResult", into = "RawExecutionResult")]
pub enum ExecutionResult {
    Success { address: String },
    Failure { outcome: String },
}

impl ExecutionResult {
    /// The result tag as written in the journal
    pub fn outcome(&self) -> &str {
        match self {
            Self::Success { .. } => SUCCESS_RESULT,
            Self::Failure { outcome } => outcome,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawExecutionResult {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl TryFrom<RawExecutionResult> for ExecutionResult {
    type Error = String;

    fn try_from(raw: RawExecutionResult) -> Result<Self, Self::Error> {
        if raw.kind == SUCCESS_RESULT {
            match raw.address {
                Some(address) if !address.is_empty() => Ok(Self::Success { address }),
                _ => Err("successful result is missing its address".to_string()),
            }
        } else {
            Ok(Self::Failure { outcome: raw.kind })
        }
    }
}

impl From<ExecutionResult> for RawExecutionResult {
    fn from(result: ExecutionResult) -> Self {
        match result {
            ExecutionResult::Success { address } => Self {
                kind: SUCCESS_RESULT.to_string(),
                address: Some(address),
            },
            ExecutionResult::Failure { outcome } => Self {
                kind: outcome,
                address: None,
            },
        }
    }
}

/// One parsed line of a deployment journal
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEvent {
    Initialize(InitializeEvent),
    Complete(CompleteEvent),
    /// Any other journal entry (network interactions, nonces, wipes, ...)
    Unrecognized {
        kind: String,
        future_id: Option<String>,
    },
}

impl JournalEvent {
    /// Parse a single journal line
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(line)?;
        Self::from_value(value)
    }

    /// Classify a structured journal entry by its `type` tag
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let kind = match value.as_object() {
            Some(entry) => match entry.get("type") {
                Some(Value::String(kind)) => kind.clone(),
                Some(_) => return Err(serde_json::Error::custom("`type` is not a string")),
                None => return Err(serde_json::Error::custom("missing field `type`")),
            },
            None => return Err(serde_json::Error::custom("journal entry is not an object")),
        };

        match kind.as_str() {
            INITIALIZE_EVENT => serde_json::from_value(value).map(Self::Initialize),
            COMPLETE_EVENT => serde_json::from_value(value).map(Self::Complete),
            _ => {
                let future_id = value
                    .get("futureId")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Ok(Self::Unrecognized { kind, future_id })
            }
        }
    }

    /// The `type` tag of the entry
    pub fn kind(&self) -> &str {
        match self {
            Self::Initialize(_) => INITIALIZE_EVENT,
            Self::Complete(_) => COMPLETE_EVENT,
            Self::Unrecognized { kind, .. } => kind,
        }
    }

    pub fn future_id(&self) -> Option<&str> {
        match self {
            Self::Initialize(event) => Some(&event.future_id),
            Self::Complete(event) => Some(&event.future_id),
            Self::Unrecognized { future_id, .. } => future_id.as_deref(),
        }
    }
}

fn non_empty_future_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let future_id = String::deserialize(deserializer)?;
    if future_id.is_empty() {
        return Err(D::Error::custom("`futureId` is empty"));
    }
    Ok(future_id)
}

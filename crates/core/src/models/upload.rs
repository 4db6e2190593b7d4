use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of the CSV upload control.
///
/// Transitions: `Idle → Uploading → Succeeded | Failed`, and from
/// either terminal state back to `Uploading` on the next attempt.
/// A second upload while one is outstanding is rejected, not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadState {
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

impl std::fmt::Display for UploadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadState::Idle => write!(f, "idle"),
            UploadState::Uploading => write!(f, "uploading"),
            UploadState::Succeeded => write!(f, "succeeded"),
            UploadState::Failed => write!(f, "failed"),
        }
    }
}

/// Raw JSON envelope returned by `POST /api/upload`.
///
/// The backend sends either a success body (`message`, `stocks_count`,
/// `stocks`) or `{"error": ...}`. All fields are optional here so a
/// well-formed body of either kind deserializes; `into_outcome` decides
/// which one it was.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stocks_count: Option<usize>,
    #[serde(default)]
    pub stocks: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadEnvelope {
    /// An `error` field marks the envelope as a rejection regardless of
    /// what else the body carries.
    #[must_use]
    pub fn into_outcome(self) -> UploadOutcome {
        match self.error {
            Some(error) => UploadOutcome::Rejected { error },
            None => UploadOutcome::Accepted {
                message: self.message.unwrap_or_default(),
                stocks_count: self.stocks_count.unwrap_or_default(),
                stocks: self.stocks.unwrap_or_default(),
            },
        }
    }
}

/// Result of one upload attempt. Held until the next attempt replaces it.
///
/// The `stocks` records have no documented schema — they are passed
/// through as opaque JSON values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UploadOutcome {
    Accepted {
        message: String,
        stocks_count: usize,
        stocks: Vec<Value>,
    },
    Rejected {
        error: String,
    },
}

impl UploadOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, UploadOutcome::Accepted { .. })
    }

    /// The error string of a rejected outcome, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            UploadOutcome::Rejected { error } => Some(error),
            UploadOutcome::Accepted { .. } => None,
        }
    }
}

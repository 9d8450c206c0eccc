use serde::{Deserialize, Serialize};

/// Successful login body
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Authenticated {
    #[serde(default)]
    pub token: Option<String>,
}

/// Error body returned by the service, e.g. `{"error": "Missing password"}`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

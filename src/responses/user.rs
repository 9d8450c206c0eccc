use serde::{Deserialize, Serialize};

/// A user as served by the service
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// One page of `GET /api/users?page=N`
///
/// Records default to [`User`]. Decode with `UserPage<serde_json::Value>` to
/// inspect records that may not have the expected shape.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserPage<T = User> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    pub data: Vec<T>,
}

/// Body of `GET /api/users/{id}`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SingleUser {
    pub data: User,
}

use serde::{Deserialize, Serialize};

use crate::config::Credentials;

/// Body of `POST /api/login`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<&Credentials> for LoginRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        }
    }
}

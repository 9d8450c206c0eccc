use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SuiteError, SuiteResult};
use crate::responses::user::User;

/// Expected user records, keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    users: BTreeMap<u64, User>,
}

#[derive(Deserialize, Serialize)]
struct FixtureFile {
    users: Vec<User>,
}

impl Fixtures {
    /// Read a fixture document of the shape `{"users": [User, ...]}`
    pub fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let path = path.as_ref();
        let fixture_error = |message: String| SuiteError::Fixture {
            path: path.display().to_string(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| fixture_error(e.to_string()))?;
        let fixtures = Self::parse(&content).map_err(|e| fixture_error(e.to_string()))?;

        ::tracing::debug!(path = %path.display(), users = fixtures.len(), "fixtures loaded");

        Ok(fixtures)
    }

    pub fn parse(content: &str) -> SuiteResult<Self> {
        let file = serde_json::from_str::<FixtureFile>(content)?;

        Self::from_users(file.users)
    }

    /// Ids must be unique; a fixture that contradicts itself is rejected
    pub fn from_users(users: impl IntoIterator<Item = User>) -> SuiteResult<Self> {
        let mut fixtures = BTreeMap::new();

        for user in users {
            let id = user.id;

            if fixtures.insert(id, user).is_some() {
                return Err(SuiteError::Fixture {
                    path: "<memory>".to_string(),
                    message: format!("user {id} is defined more than once"),
                });
            }
        }

        Ok(Self { users: fixtures })
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

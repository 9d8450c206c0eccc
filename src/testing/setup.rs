use crate::config::SuiteConfig;
use crate::fixture::Fixtures;
use crate::responses::user::User;
use crate::testing::server::StubState;

/// Fixture document shipped with the crate
pub const FIXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/users.json");

/// Default configuration aimed at `base_url`.
///
/// Timeouts are short and retries disabled so failing tests fail fast.
pub fn config(base_url: &str) -> SuiteConfig {
    let mut config = SuiteConfig {
        base_url: Some(base_url.to_string()),
        ..SuiteConfig::default()
    };
    config.run.timeout_ms = 5_000;
    config.run.retries = 0;
    config.fixtures.path = FIXTURE_PATH.to_string();
    config
}

/// The bundled fixtures
///
/// # Panics
/// Panics if the bundled fixture file is missing or malformed.
pub fn fixtures() -> Fixtures {
    Fixtures::load(FIXTURE_PATH).expect("bundled fixtures must load")
}

/// Seeded user with the given id
///
/// # Panics
/// Panics if the id is not one of the twelve seeded users.
pub fn seeded_user(id: u64) -> User {
    StubState::seeded()
        .user(id)
        .cloned()
        .unwrap_or_else(|| panic!("user {id} is not seeded"))
}

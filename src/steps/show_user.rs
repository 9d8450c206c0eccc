use crate::client::ApiClient;
use crate::context::RunContext;
use crate::error::SuiteResult;
use crate::fixture::Fixtures;
use crate::responses::user::SingleUser;
use crate::validation::{Checks, Failure, record};

/// Fetch one user and compare it with the fixture and the retained listing
#[::tracing::instrument(skip(client, context, fixtures))]
pub async fn show_user(
    client: &ApiClient,
    context: &RunContext,
    fixtures: &Fixtures,
    id: u64,
) -> SuiteResult<Vec<Failure>> {
    let response = client
        .get(&format!("/api/users/{id}"))
        .await?
        .ensure_success()?;
    let user = response.json::<SingleUser>()?.data;

    ::tracing::info!("Fetched user {}: {} {}", user.id, user.first_name, user.last_name);

    let mut checks = Checks::new();

    match fixtures.user(id) {
        Some(expected) => checks.extend(record::compare("fixture", expected, &user)),
        None => {
            checks.expect(false, "fixture", || format!("no fixture for user {id}"));
        }
    }

    match context.listed_user(id) {
        Some(listed) => checks.extend(record::compare("listing", listed, &user)),
        None => ::tracing::debug!("user {} was not part of the listing, skipping cross check", id),
    }

    Ok(checks.into_failures())
}

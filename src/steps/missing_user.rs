use crate::client::ApiClient;
use crate::error::SuiteResult;
use crate::validation::{Failure, not_found};

/// Fetch a user that must not exist
#[::tracing::instrument(skip(client))]
pub async fn missing_user(client: &ApiClient, id: u64) -> SuiteResult<Vec<Failure>> {
    let response = client.get(&format!("/api/users/{id}")).await?;

    ::tracing::info!("Missing user {} answered {}: {}", id, response.status.as_u16(), response.text());

    Ok(not_found::validate(&response))
}

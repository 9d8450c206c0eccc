use serde_json::Value;

use crate::client::ApiClient;
use crate::config::CheckConfig;
use crate::context::RunContext;
use crate::error::SuiteResult;
use crate::responses::user::{User, UserPage};
use crate::validation::{Failure, listing};

/// Fetch one page of users, retain it and validate it
#[::tracing::instrument(skip_all, fields(page = checks.listing_page))]
pub async fn list_users(
    client: &ApiClient,
    context: &mut RunContext,
    checks: &CheckConfig,
) -> SuiteResult<Vec<Failure>> {
    let response = client
        .get(&format!("/api/users?page={}", checks.listing_page))
        .await?
        .ensure_success()?;
    let page = response.json::<UserPage<Value>>()?;
    let ids: Vec<Value> = page
        .data
        .iter()
        .map(|record| record.get("id").cloned().unwrap_or(Value::Null))
        .collect();

    ::tracing::info!("User IDs: {}", serde_json::Value::Array(ids));

    let failures = listing::validate(&page.data, &checks.email_domain);
    let total = page.data.len();

    // Only well-formed records take part in the single user cross check
    context.listing = page
        .data
        .into_iter()
        .filter_map(|record| serde_json::from_value::<User>(record).ok())
        .collect();

    if context.listing.len() < total {
        ::tracing::warn!(
            retained = context.listing.len(),
            total,
            "malformed records left out of the retained listing"
        );
    }

    Ok(failures)
}

use crate::client::ApiClient;
use crate::config::Credentials;
use crate::context::RunContext;
use crate::error::{SuiteError, SuiteResult};
use crate::requests::auth::LoginRequest;
use crate::responses::auth::{Authenticated, ErrorResponse};

pub const PATH: &str = "/api/login";

/// Obtain a bearer token and keep it in the context.
///
/// Any problem is a [`SuiteError::Setup`]: later steps depend on a
/// successful login and are not run without it.
#[::tracing::instrument(skip_all, fields(email = %credentials.email))]
pub async fn login(
    client: &ApiClient,
    context: &mut RunContext,
    credentials: &Credentials,
) -> SuiteResult<()> {
    ::tracing::info!("Making login request...");

    let response = client
        .post(PATH, &LoginRequest::from(credentials))
        .await
        .map_err(|e| SuiteError::Setup(e.to_string()))?;
    let body = response.text();

    ::tracing::info!("Login response status: {}", response.status.as_u16());
    ::tracing::info!("Login response body: {}", body);

    if !response.is_success() {
        let reason = match response.json::<ErrorResponse>() {
            Ok(error) => error.error,
            Err(_) => body,
        };

        return Err(SuiteError::Setup(format!(
            "login answered {}: {}",
            response.status.as_u16(),
            reason
        )));
    }

    let authenticated = response
        .json::<Authenticated>()
        .map_err(|e| SuiteError::Setup(format!("login body is not valid JSON: {e}")))?;

    match authenticated.token {
        Some(token) if !token.is_empty() => {
            context.token = Some(token);

            Ok(())
        }
        _ => Err(SuiteError::Setup("login response carries no token".to_string())),
    }
}

use awc::http::StatusCode;
use serde_json::Value;

use super::{Checks, Failure};
use crate::client::ApiResponse;

/// A missing record answers exactly 404 with an empty JSON object
pub fn validate(response: &ApiResponse) -> Vec<Failure> {
    let mut checks = Checks::new();

    checks.equal(
        "status",
        &StatusCode::NOT_FOUND.as_u16(),
        &response.status.as_u16(),
    );

    match response.json::<Value>() {
        Ok(Value::Object(body)) if body.is_empty() => {}
        Ok(body) => {
            checks.expect(false, "empty body", || format!("expected {{}}, got {body}"));
        }
        Err(e) => {
            checks.expect(false, "empty body", || {
                format!("body {:?} is not JSON: {e}", response.text())
            });
        }
    }

    checks.into_failures()
}

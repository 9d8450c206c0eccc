use super::{Checks, Failure};
use crate::responses::user::User;

/// Compare two user records field by field.
///
/// `source` names where `expected` came from (fixture, listing) and prefixes
/// every failure so the report says which comparison broke.
pub fn compare(source: &str, expected: &User, actual: &User) -> Vec<Failure> {
    let mut checks = Checks::new();
    let check = |field: &str| format!("{source} {field}");

    checks.equal(check("id"), &expected.id, &actual.id);
    checks.equal(check("email"), &expected.email, &actual.email);
    checks.equal(check("first_name"), &expected.first_name, &actual.first_name);
    checks.equal(check("last_name"), &expected.last_name, &actual.last_name);
    checks.equal(check("avatar"), &expected.avatar, &actual.avatar);

    checks.into_failures()
}

use std::collections::BTreeMap;

use serde_json::Value;

use super::{Checks, Failure};

/// Validate a page of user records as served.
///
/// Ids must be unsigned integers, unique and strictly ascending, every email
/// must be a string containing `email_domain` and both name fields must be
/// non-empty strings. Records are taken as raw JSON so one malformed record
/// does not hide the checks on the others. Failures name the position and id
/// of the offending record and the field that broke.
pub fn validate(records: &[Value], email_domain: &str) -> Vec<Failure> {
    let mut checks = Checks::new();
    let ids: Vec<Option<u64>> = records.iter().map(id).collect();

    unique_ids(&mut checks, &ids);

    for (index, record) in records.iter().enumerate() {
        let label = match ids[index] {
            Some(id) => format!("user #{index} (id {id})"),
            None => format!("user #{index}"),
        };

        checks.expect(ids[index].is_some(), "integer id", || {
            format!("{label} id is {}, expected an unsigned integer", describe(record.get("id")))
        });

        match record.get("email").and_then(Value::as_str) {
            Some(email) => checks.expect(email.contains(email_domain), "email domain", || {
                format!("{label} email {email:?} does not contain {email_domain:?}")
            }),
            None => checks.expect(false, "email domain", || {
                format!("{label} email is {}, expected a string", describe(record.get("email")))
            }),
        };

        for field in ["first_name", "last_name"] {
            match record.get(field).and_then(Value::as_str) {
                Some(value) => checks.expect(!value.is_empty(), "non-empty name", || {
                    format!("{label} has an empty {field}")
                }),
                None => checks.expect(false, "non-empty name", || {
                    format!("{label} {field} is {}, expected a string", describe(record.get(field)))
                }),
            };
        }
    }

    ascending_ids(&mut checks, &ids);

    checks.into_failures()
}

/// Id of a record, if it has a usable one
pub fn id(record: &Value) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(value) => value.to_string(),
    }
}

fn unique_ids(checks: &mut Checks, ids: &[Option<u64>]) {
    let mut positions: BTreeMap<u64, Vec<usize>> = BTreeMap::new();

    for (index, id) in ids.iter().enumerate() {
        if let Some(id) = id {
            positions.entry(*id).or_default().push(index);
        }
    }

    for (id, indexes) in positions.into_iter().filter(|(_, indexes)| indexes.len() > 1) {
        checks.expect(false, "unique ids", || {
            format!("id {id} appears at positions {indexes:?}")
        });
    }
}

/// Records without a usable id are left out of the ordering
fn ascending_ids(checks: &mut Checks, ids: &[Option<u64>]) {
    let known: Vec<(usize, u64)> = ids
        .iter()
        .enumerate()
        .filter_map(|(index, id)| id.map(|id| (index, id)))
        .collect();

    for pair in known.windows(2) {
        let ((index, current), (next_index, next)) = (pair[0], pair[1]);

        checks.expect(current < next, "ascending ids", || {
            format!(
                "id {current} at position {index} is not less than id {next} at position {next_index}"
            )
        });
    }
}

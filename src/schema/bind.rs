//! Argument binding
//!
//! Both dispatchers end up here: positional values, named values and the
//! decoded keyword bag are merged against an [`ArgumentSchema`].

use crate::error::{OperationError, OperationResult};
use crate::operation::Arguments;
use crate::schema::types::{ArgumentSchema, OperationKind, Value};
use serde_json::Map;
use std::collections::{BTreeMap, HashSet};

/// Values collected from one request, before binding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallInput {
    /// Values without a name, in the order they were given
    pub positional: Vec<String>,

    /// `name=value` pairs; text values are coerced to the declared type
    pub named: Vec<(String, Value)>,

    /// Entries decoded from the keyword bag
    pub extra: Map<String, Value>,
}

/// Decode a keyword bag blob; anything but a JSON object is rejected
pub fn decode_extra(blob: &str) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_str::<Map<String, Value>>(blob)
}

/// Bind a request to an operation schema
pub fn bind(schema: &ArgumentSchema, input: CallInput) -> OperationResult<Arguments> {
    let mut bound: BTreeMap<String, Value> = BTreeMap::new();
    let mut supplied: HashSet<String> = HashSet::new();

    // Named values override by name
    for (name, value) in input.named {
        let param = schema
            .parameter(&name)
            .ok_or_else(|| OperationError::MalformedCall(format!("unknown option '{}'", name)))?;
        bound.insert(name.clone(), param.ty.coerce_value(&name, value)?);
        supplied.insert(name);
    }

    // Positional values fill the remaining slots in declared order
    let open: Vec<_> = schema
        .parameters
        .iter()
        .filter(|p| !supplied.contains(&p.name))
        .collect();
    if input.positional.len() > open.len() {
        return Err(OperationError::MalformedCall(format!(
            "{} takes {} positional arguments but {} were given",
            schema.operation,
            open.len(),
            input.positional.len()
        )));
    }
    for (param, raw) in open.into_iter().zip(input.positional) {
        bound.insert(param.name.clone(), param.ty.coerce_str(&param.name, &raw)?);
        supplied.insert(param.name.clone());
    }

    // Keyword bag entries are merged last
    let mut extra = Map::new();
    for (key, value) in input.extra {
        match schema.parameter(&key) {
            Some(param) => {
                if supplied.contains(&key) {
                    return Err(OperationError::MalformedCall(format!(
                        "{} got multiple values for '{}'",
                        schema.operation, key
                    )));
                }
                bound.insert(key.clone(), param.ty.coerce_value(&key, value)?);
                supplied.insert(key);
            }
            None => {
                extra.insert(key, value);
            }
        }
    }

    for param in &schema.parameters {
        if bound.contains_key(&param.name) {
            continue;
        }
        match (&param.default, schema.kind) {
            (Some(default), _) => {
                bound.insert(param.name.clone(), default.clone());
            }
            (None, OperationKind::FreeText) => {
                bound.insert(param.name.clone(), Value::String(String::new()));
            }
            (None, OperationKind::Standard) => {
                return Err(OperationError::MalformedCall(format!(
                    "{} missing required argument '{}'",
                    schema.operation, param.name
                )));
            }
        }
    }

    Ok(Arguments::new(bound, extra))
}

//! Argument schema construction
//!
//! Turns a declared [`Signature`] into an [`ArgumentSchema`], rejecting
//! malformed declarations up front instead of at dispatch time.

use crate::error::{SchemaError, SchemaResult};
use crate::schema::docs::parse_docs;
use crate::schema::types::{
    ArgumentSchema, ExtraCarrier, OperationKind, ParamType, Parameter, Signature,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static OPERATION_NAME: OnceLock<Regex> = OnceLock::new();
static PARAMETER_NAME: OnceLock<Regex> = OnceLock::new();

/// Names the shell and the argv grammar keep for themselves
const RESERVED_OPERATIONS: &[&str] = &["help"];
const RESERVED_PARAMETERS: &[&str] = &["help", "h"];

/// Help text of the keyword bag option
pub const EXTRA_HELP: &str = "Additional options loaded from JSON";

/// Validate an operation name
pub fn validate_operation_name(name: &str) -> SchemaResult<()> {
    if name.starts_with('_') {
        return Err(SchemaError::PrivateName(name.to_string()));
    }
    let re = OPERATION_NAME.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());
    if !re.is_match(name) {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    if RESERVED_OPERATIONS.contains(&name) {
        return Err(SchemaError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Validate a parameter (or keyword bag) name
fn validate_parameter_name(name: &str) -> SchemaResult<()> {
    let re = PARAMETER_NAME.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").unwrap());
    if !re.is_match(name) {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    if RESERVED_PARAMETERS.contains(&name) {
        return Err(SchemaError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Derive the argument schema of one operation
pub fn extract_schema(sig: &Signature) -> SchemaResult<ArgumentSchema> {
    validate_operation_name(&sig.name)?;

    let docs = parse_docs(&sig.doc);
    let mut seen = HashSet::new();
    let mut seen_optional = false;
    let mut parameters = Vec::with_capacity(sig.params.len());

    for (position, decl) in sig.params.iter().enumerate() {
        validate_parameter_name(&decl.name)?;

        if !seen.insert(decl.name.as_str()) {
            return Err(SchemaError::DuplicateParameter {
                operation: sig.name.clone(),
                parameter: decl.name.clone(),
            });
        }

        match &decl.default {
            Some(default) => {
                if !decl.ty.accepts(default) {
                    return Err(SchemaError::DefaultType {
                        operation: sig.name.clone(),
                        parameter: decl.name.clone(),
                        expected: decl.ty.name(),
                    });
                }
                seen_optional = true;
            }
            None => {
                if seen_optional {
                    return Err(SchemaError::RequiredAfterOptional {
                        operation: sig.name.clone(),
                        parameter: decl.name.clone(),
                    });
                }
                if decl.ty == ParamType::Boolean {
                    return Err(SchemaError::RequiredFlag {
                        operation: sig.name.clone(),
                        parameter: decl.name.clone(),
                    });
                }
            }
        }

        parameters.push(Parameter {
            name: decl.name.clone(),
            position,
            ty: decl.ty,
            default: decl.default.clone(),
            help: docs.param(&decl.name),
        });
    }

    let extra = match &sig.extra {
        Some(name) => {
            validate_parameter_name(name)?;
            if seen.contains(name.as_str()) {
                return Err(SchemaError::DuplicateParameter {
                    operation: sig.name.clone(),
                    parameter: name.clone(),
                });
            }
            Some(ExtraCarrier {
                name: name.clone(),
                help: EXTRA_HELP.to_string(),
            })
        }
        None => None,
    };

    let kind = operation_kind(&parameters, extra.is_some());

    Ok(ArgumentSchema {
        operation: sig.name.clone(),
        summary: docs.summary,
        doc: sig.doc.trim().to_string(),
        parameters,
        extra,
        kind,
    })
}

/// Operations whose whole argument is one free-text value
fn operation_kind(parameters: &[Parameter], has_extra: bool) -> OperationKind {
    match parameters {
        [only]
            if !has_extra
                && !only.has_default()
                && matches!(only.ty, ParamType::String | ParamType::Untyped) =>
        {
            OperationKind::FreeText
        }
        _ => OperationKind::Standard,
    }
}

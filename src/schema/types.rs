//! Core schema types
//!
//! An operation is declared through a [`Signature`]; the engine derives an
//! [`ArgumentSchema`] from it once, when the operation set is bound.

use crate::error::{OperationError, OperationResult};
use crate::ui::Reporter;
use serde::{Deserialize, Serialize};

/// Values flowing from the command line or shell into operations
pub type Value = serde_json::Value;

/// The closed set of elementary types a parameter can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
    /// No declared type: the raw text is passed through
    #[default]
    Untyped,
}

impl ParamType {
    /// Human readable type name
    pub fn name(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Float => "float",
            ParamType::Boolean => "boolean",
            ParamType::Untyped => "untyped",
        }
    }

    /// Check whether a declared default fits this type. `null` fits every type.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (ParamType::Untyped, _) => true,
            (ParamType::String, Value::String(_)) => true,
            (ParamType::Integer, Value::Number(n)) => n.is_i64(),
            (ParamType::Float, Value::Number(_)) => true,
            (ParamType::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }

    /// Coerce raw text typed by the user
    pub fn coerce_str(&self, name: &str, raw: &str) -> OperationResult<Value> {
        match self {
            ParamType::String | ParamType::Untyped => Ok(Value::String(raw.to_string())),
            ParamType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| OperationError::invalid(name, e.to_string())),
            ParamType::Float => raw
                .trim()
                .parse::<f64>()
                .map(Value::from)
                .map_err(|e| OperationError::invalid(name, e.to_string())),
            ParamType::Boolean => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| OperationError::invalid(name, format!("'{}' is not a boolean", raw))),
        }
    }

    /// Coerce a structured value, e.g. one taken from a keyword blob
    pub fn coerce_value(&self, name: &str, value: Value) -> OperationResult<Value> {
        match value {
            Value::String(s) => self.coerce_str(name, &s),
            other if self.accepts(&other) => Ok(match (self, other) {
                (ParamType::Float, Value::Number(n)) => {
                    n.as_f64().map(Value::from).unwrap_or(Value::Null)
                }
                (_, v) => v,
            }),
            other => Err(OperationError::invalid(
                name,
                format!("{} is not {}", other, self.name()),
            )),
        }
    }
}

/// Parse the boolean spellings accepted on a shell line
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A declared parameter, as written by the operation author
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: ParamType,
    pub default: Option<Value>,
}

/// The explicit descriptor of an operation's interface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    /// Operation name
    pub name: String,

    /// Documentation: a summary line followed by `name - description` lines
    pub doc: String,

    /// Parameters in declared order
    pub params: Vec<ParamDecl>,

    /// Name of the open keyword bag, if the operation accepts one
    pub extra: Option<String>,
}

/// A parameter of a derived schema
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub position: usize,
    pub ty: ParamType,
    pub default: Option<Value>,
    pub help: String,
}

impl Parameter {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Boolean optional parameters become toggle flags
    pub fn is_flag(&self) -> bool {
        self.ty == ParamType::Boolean && self.has_default()
    }
}

/// The synthetic entry carrying extra keyword arguments as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraCarrier {
    pub name: String,
    pub help: String,
}

/// How the shell binds a line to an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Standard,
    /// Exactly one required text parameter; an absent value binds `""`
    FreeText,
}

/// Structural description of an operation's parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentSchema {
    pub operation: String,
    pub summary: String,
    pub doc: String,
    pub parameters: Vec<Parameter>,
    pub extra: Option<ExtraCarrier>,
    pub kind: OperationKind,
}

impl ArgumentSchema {
    /// Parameters without a default, in declared order
    pub fn required(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| !p.has_default())
    }

    /// Parameters with a default, in declared order
    pub fn optional(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(|p| p.has_default())
    }

    /// Look up a declared parameter by name
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Whether `name` is the keyword bag carrier
    pub fn is_carrier(&self, name: &str) -> bool {
        self.extra.as_ref().is_some_and(|e| e.name == name)
    }

    /// Whether a `name=value` token may use `name`
    pub fn accepts_name(&self, name: &str) -> bool {
        self.parameter(name).is_some() || self.is_carrier(name)
    }

    /// Keyword bag keys that name a declared parameter
    pub fn bag_parameters<'a>(
        &'a self,
        extra: &'a serde_json::Map<String, Value>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        extra
            .keys()
            .map(String::as_str)
            .filter(move |key| self.parameter(key).is_some())
    }

    /// Warn about keyword bag keys that set a declared parameter
    pub fn warn_bag_parameters(&self, extra: &serde_json::Map<String, Value>, reporter: &Reporter) {
        if let Some(carrier) = &self.extra {
            for key in self.bag_parameters(extra) {
                reporter.warn(format!(
                    "'{}' in {} sets the parameter '{}' of {}",
                    key, carrier.name, key, self.operation
                ));
            }
        }
    }
}

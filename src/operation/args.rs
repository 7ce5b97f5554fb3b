//! Bound arguments handed to an operation

use crate::error::{OperationError, OperationResult};
use crate::schema::Value;
use serde_json::Map;
use std::collections::BTreeMap;

/// What the dispatcher should do after an operation returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going (the shell reads the next line, a batch run returns)
    Continue,
    /// The operation asked to end the process with this status
    Exit(i32),
}

/// Arguments bound to one invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: BTreeMap<String, Value>,
    extra: Map<String, Value>,
}

impl Arguments {
    pub fn new(values: BTreeMap<String, Value>, extra: Map<String, Value>) -> Self {
        Arguments { values, extra }
    }

    /// Raw bound value of a declared parameter
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Entries merged in from the keyword bag
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// All declared parameter values
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    fn require(&self, name: &str) -> OperationResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| OperationError::MalformedCall(format!("no argument named '{}'", name)))
    }

    /// Get a text value
    pub fn get_str(&self, name: &str) -> OperationResult<&str> {
        match self.require(name)? {
            Value::String(s) => Ok(s),
            other => Err(OperationError::invalid(name, format!("{} is not text", other))),
        }
    }

    /// Get a text value that may be `null`
    pub fn get_opt_str(&self, name: &str) -> OperationResult<Option<&str>> {
        match self.require(name)? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(OperationError::invalid(name, format!("{} is not text", other))),
        }
    }

    /// Get an integer; untyped text is parsed
    pub fn get_i64(&self, name: &str) -> OperationResult<i64> {
        match self.require(name)? {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| OperationError::invalid(name, format!("{} is not an integer", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| OperationError::invalid(name, format!("'{}' is not an integer", s))),
            other => Err(OperationError::invalid(name, format!("{} is not an integer", other))),
        }
    }

    /// Get a float; untyped text is parsed
    pub fn get_f64(&self, name: &str) -> OperationResult<f64> {
        match self.require(name)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| OperationError::invalid(name, format!("{} is not a number", n))),
            Value::String(s) => s
                .trim()
                .parse()
                .map_err(|_| OperationError::invalid(name, format!("'{}' is not a number", s))),
            other => Err(OperationError::invalid(name, format!("{} is not a number", other))),
        }
    }

    /// Get a boolean
    pub fn get_bool(&self, name: &str) -> OperationResult<bool> {
        match self.require(name)? {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => crate::schema::parse_bool(s)
                .ok_or_else(|| OperationError::invalid(name, format!("'{}' is not a boolean", s))),
            other => Err(OperationError::invalid(name, format!("{} is not a boolean", other))),
        }
    }
}

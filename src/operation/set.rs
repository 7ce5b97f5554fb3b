//! Operation declaration and binding
//!
//! Operations are registered through an explicit builder. Binding an
//! [`OperationSet`] computes every argument schema once and yields a
//! read-only [`BoundSet`] that both dispatchers share.

use crate::error::{OperationResult, SchemaError, SchemaResult};
use crate::operation::args::{Arguments, Flow};
use crate::schema::{extract_schema, ArgumentSchema, ParamDecl, ParamType, Signature, Value};
use std::collections::BTreeMap;
use std::io::Write;

/// Function invoked with the owning state, bound arguments and the output stream
pub type Handler<S> = Box<dyn Fn(&mut S, &Arguments, &mut dyn Write) -> OperationResult<Flow>>;

/// Uniform invocation protocol used by both dispatch surfaces
pub trait Invokable<S> {
    /// Schema derived for this operation
    fn schema(&self) -> &ArgumentSchema;

    /// Run the operation
    fn invoke(&self, state: &mut S, args: &Arguments, out: &mut dyn Write)
        -> OperationResult<Flow>;
}

/// A declared operation
pub struct Operation<S> {
    signature: Signature,
    handler: Option<Handler<S>>,
}

impl<S> Operation<S> {
    /// Start declaring an operation
    pub fn new(name: impl Into<String>) -> Self {
        Operation {
            signature: Signature {
                name: name.into(),
                ..Default::default()
            },
            handler: None,
        }
    }

    /// Set the documentation string
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.signature.doc = doc.into();
        self
    }

    /// Add a required parameter
    pub fn arg(mut self, name: impl Into<String>, ty: ParamType) -> Self {
        self.signature.params.push(ParamDecl {
            name: name.into(),
            ty,
            default: None,
        });
        self
    }

    /// Add an optional parameter with its default
    pub fn opt(mut self, name: impl Into<String>, ty: ParamType, default: impl Into<Value>) -> Self {
        self.signature.params.push(ParamDecl {
            name: name.into(),
            ty,
            default: Some(default.into()),
        });
        self
    }

    /// Accept an open keyword bag under `name`
    pub fn extra(mut self, name: impl Into<String>) -> Self {
        self.signature.extra = Some(name.into());
        self
    }

    /// Set the function run on invocation
    pub fn handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut S, &Arguments, &mut dyn Write) -> OperationResult<Flow> + 'static,
    {
        self.handler = Some(Box::new(f));
        self
    }

    /// The declared signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// An operation whose schema has been derived
pub struct BoundOperation<S> {
    schema: ArgumentSchema,
    handler: Handler<S>,
}

impl<S> Invokable<S> for BoundOperation<S> {
    fn schema(&self) -> &ArgumentSchema {
        &self.schema
    }

    fn invoke(
        &self,
        state: &mut S,
        args: &Arguments,
        out: &mut dyn Write,
    ) -> OperationResult<Flow> {
        (self.handler)(state, args, out)
    }
}

/// Operations being declared, plus an optional default
pub struct OperationSet<S> {
    operations: Vec<Operation<S>>,
    default: Option<String>,
}

impl<S> OperationSet<S> {
    pub fn new() -> Self {
        OperationSet {
            operations: Vec::new(),
            default: None,
        }
    }

    /// Add an operation
    pub fn operation(mut self, op: Operation<S>) -> Self {
        self.operations.push(op);
        self
    }

    /// Name the operation run when argv selects none
    pub fn default_operation(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Derive every schema and freeze the set
    pub fn build(self) -> SchemaResult<BoundSet<S>> {
        let mut operations = BTreeMap::new();

        for op in self.operations {
            let schema = extract_schema(&op.signature)?;
            let handler = op
                .handler
                .ok_or_else(|| SchemaError::MissingHandler(schema.operation.clone()))?;
            if operations.contains_key(&schema.operation) {
                return Err(SchemaError::DuplicateOperation(schema.operation));
            }
            operations.insert(schema.operation.clone(), BoundOperation { schema, handler });
        }

        if let Some(default) = &self.default {
            if !operations.contains_key(default) {
                return Err(SchemaError::UnknownDefault(default.clone()));
            }
        }

        Ok(BoundSet {
            operations,
            default: self.default,
        })
    }
}

impl<S> Default for OperationSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound, read-only operation set
pub struct BoundSet<S> {
    operations: BTreeMap<String, BoundOperation<S>>,
    default: Option<String>,
}

impl<S> BoundSet<S> {
    /// Resolve an operation by exact name
    pub fn get(&self, name: &str) -> Option<&dyn Invokable<S>> {
        self.operations.get(name).map(|op| op as &dyn Invokable<S>)
    }

    /// Whether an operation with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Operation names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Schemas of all operations, sorted by name
    pub fn schemas(&self) -> impl Iterator<Item = &ArgumentSchema> {
        self.operations.values().map(|op| &op.schema)
    }

    /// The default operation, if declared
    pub fn default_operation(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

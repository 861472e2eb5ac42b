use std::collections::HashMap;
use std::sync::Arc;

use mpint::{BigIntError, BigIntValue};
use num_bigint::BigInt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    BigInt(#[from] BigIntError),
}

impl From<String> for RuntimeError {
    fn from(value: String) -> Self {
        RuntimeError::Message(value)
    }
}

impl From<&str> for RuntimeError {
    fn from(value: &str) -> Self {
        RuntimeError::Message(value.to_string())
    }
}

pub type MethodFunc = dyn Fn(&BigIntValue, Vec<Value>) -> Result<Value, RuntimeError> + Send + Sync;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    BigInt(BigIntValue),
    Handle(Handle),
    Record(Arc<HashMap<String, Value>>),
}

impl Value {
    pub fn record<I, K>(fields: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Record(Arc::new(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::BigInt(_) => "BigInt",
            Value::Handle(_) => "Handle",
            Value::Record(_) => "Record",
        }
    }
}

/// A freshly computed integer that has not yet been wrapped as a value.
///
/// Construction adopts the handle's storage as-is, without reparsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    value: BigInt,
}

impl Handle {
    pub fn new(value: BigInt) -> Self {
        Self { value }
    }

    pub fn adopt(self) -> BigIntValue {
        BigIntValue::from(self.value)
    }
}

pub struct BuiltinImpl {
    pub name: String,
    pub arity: usize,
    pub optional: usize,
    pub func: Arc<MethodFunc>,
}

impl BuiltinImpl {
    pub fn call(&self, receiver: &BigIntValue, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let min = self.arity - self.optional;
        if args.len() < min || args.len() > self.arity {
            let expected = if self.optional == 0 {
                format!("{}", self.arity)
            } else {
                format!("{min} to {}", self.arity)
            };
            return Err(RuntimeError::Message(format!(
                "{} expects {expected} arguments, got {}",
                self.name,
                args.len()
            )));
        }
        (self.func)(receiver, args)
    }
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Unit => "Unit".to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Int(value) => value.to_string(),
        Value::Float(value) => value.to_string(),
        Value::Text(value) => format!("{value:?}"),
        Value::BigInt(value) => format!("{value}n"),
        Value::Handle(handle) => format!("<handle {}>", handle.value),
        Value::Record(fields) => {
            let mut entries: Vec<_> = fields
                .iter()
                .map(|(key, value)| format!("{key}: {}", format_value(value)))
                .collect();
            entries.sort();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}

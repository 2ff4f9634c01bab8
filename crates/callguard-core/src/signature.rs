//! Callable signatures and call-site arguments.
//!
//! A [`Signature`] names a callable and lists its formal parameters in
//! declaration order. It is supplied explicitly when a callable is wrapped,
//! so parameter discovery never needs runtime reflection.
//!
//! [`CallArgs`] is one invocation's arguments, split the way a call site
//! writes them: positional values and named (keyword) values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// How call arguments are captured for conformance checking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Positional and named arguments, merged by final parameter binding.
    #[default]
    Bound,
    /// Positional arguments only; named arguments escape checking.
    PositionalOnly,
}

/// Identity and formal parameters of a callable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Callable name, used in diagnostics.
    pub name: String,
    /// Parameter names in declaration order.
    pub params: Vec<String>,
}

impl Signature {
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Signature {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of declared parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if `name` is a declared parameter.
    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p == name)
    }

    /// Pairs supplied arguments with parameter names.
    ///
    /// The result is keyed in declaration order and only contains parameters
    /// that received a value. Positional arguments bind by position; surplus
    /// positional values are not captured. In [`CaptureMode::Bound`], named
    /// arguments then fill any declared parameter not already bound; unknown
    /// names are ignored.
    pub fn bind<'a>(&self, args: &'a CallArgs, mode: CaptureMode) -> IndexMap<String, &'a Value> {
        let mut captured = IndexMap::with_capacity(self.params.len());
        for (index, param) in self.params.iter().enumerate() {
            if let Some(value) = args.positional.get(index) {
                captured.insert(param.clone(), value);
                continue;
            }
            if mode == CaptureMode::Bound {
                if let Some(value) = args.named.get(param) {
                    captured.insert(param.clone(), value);
                }
            }
        }
        captured
    }
}

/// Arguments of a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallArgs {
    /// Values supplied by position.
    pub positional: Vec<Value>,
    /// Values supplied by name, in call-site order.
    pub named: IndexMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds arguments from positional values only.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        CallArgs {
            positional: values.into_iter().map(Into::into).collect(),
            named: IndexMap::new(),
        }
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds (or replaces) a named argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Total number of supplied arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

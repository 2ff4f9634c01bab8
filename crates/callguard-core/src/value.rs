//! Runtime value representation for guarded calls.
//!
//! [`Value`] is the dynamic counterpart to the host type model. Every argument
//! passed through a guarded callable is a `Value`, and its exact runtime type
//! is reported by [`Value::type_id`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::type_id::TypeId;

/// A runtime value supplied as a call argument.
///
/// Maps to the host type model:
/// - Scalars: `None`, `Bool`, `Int`, `Float`, `Str`, `Bytes`
/// - Collections: `List`, `Tuple`, `Dict`, `Set`
/// - User classes: `Instance`
///
/// Note: `Bool` reports `TypeId::BOOL`, never `TypeId::INT`, even though
/// `bool` derives from `int` in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Entries in insertion order.
    Dict(IndexMap<String, Value>),
    /// Members in insertion order; uniqueness is the producer's concern.
    Set(Vec<Value>),
    /// An instance of a registered user class.
    Instance {
        class: TypeId,
        fields: IndexMap<String, Value>,
    },
}

impl Value {
    /// Creates a field-less instance of a user class.
    pub fn instance(class: TypeId) -> Value {
        Value::Instance {
            class,
            fields: IndexMap::new(),
        }
    }

    /// Returns the exact runtime [`TypeId`] of this value.
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::None => TypeId::NONE,
            Value::Bool(_) => TypeId::BOOL,
            Value::Int(_) => TypeId::INT,
            Value::Float(_) => TypeId::FLOAT,
            Value::Str(_) => TypeId::STR,
            Value::Bytes(_) => TypeId::BYTES,
            Value::List(_) => TypeId::LIST,
            Value::Tuple(_) => TypeId::TUPLE,
            Value::Dict(_) => TypeId::DICT,
            Value::Set(_) => TypeId::SET,
            Value::Instance { class, .. } => *class,
        }
    }

    /// Returns the built-in type name, or `instance` for user classes.
    ///
    /// Use `TypeRegistry::name_of(value.type_id())` to get a class name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Instance { .. } => "instance",
        }
    }

    /// Iterates contained values: elements of list/tuple/set, values of a
    /// dict, nothing for scalars and instances.
    pub fn elements(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Box::new(items.iter()),
            Value::Dict(entries) => Box::new(entries.values()),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_type_ids() {
        assert_eq!(Value::None.type_id(), TypeId::NONE);
        assert_eq!(Value::Bool(true).type_id(), TypeId::BOOL);
        assert_eq!(Value::Int(1).type_id(), TypeId::INT);
        assert_eq!(Value::Float(1.5).type_id(), TypeId::FLOAT);
        assert_eq!(Value::from("x").type_id(), TypeId::STR);
        assert_eq!(Value::Bytes(vec![0]).type_id(), TypeId::BYTES);
    }

    #[test]
    fn instance_reports_its_class() {
        let v = Value::instance(TypeId(42));
        assert_eq!(v.type_id(), TypeId(42));
        assert_eq!(v.type_name(), "instance");
    }

    #[test]
    fn from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i32), Value::Int(7));
        assert_eq!(Value::from(7i64), Value::Int(7));
        assert_eq!(Value::from(3.5), Value::Float(3.5));
        assert_eq!(Value::from(String::from("s")), Value::Str("s".into()));
        assert_eq!(
            Value::from(vec![Value::Int(1)]),
            Value::List(vec![Value::Int(1)])
        );
    }

    #[test]
    fn dict_elements_are_values_only() {
        let mut entries = IndexMap::new();
        entries.insert("x".to_string(), Value::Int(1));
        entries.insert("y".to_string(), Value::from("bad"));
        let dict = Value::Dict(entries);

        let collected: Vec<&Value> = dict.elements().collect();
        assert_eq!(collected, vec![&Value::Int(1), &Value::from("bad")]);
    }

    #[test]
    fn scalars_have_no_elements() {
        assert_eq!(Value::Int(3).elements().count(), 0);
        assert_eq!(Value::instance(TypeId(11)).elements().count(), 0);
    }

    #[test]
    fn serde_roundtrip() {
        let v = Value::Tuple(vec![Value::Int(1), Value::from("a"), Value::None]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

//! The host type model.
//!
//! Types form a single-inheritance tree rooted at `object`. Each type is a
//! nominal [`TypeDef`] identified by a [`TypeId`]; "instance of" means the
//! value's exact type is a descendant of (or equal to) the tested type.

use serde::{Deserialize, Serialize};

use crate::type_id::TypeId;

/// A nominal type definition in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Type name as shown in diagnostics (`int`, `str`, `Point`, ...).
    pub name: String,
    /// Parent type. `None` only for the root `object` type.
    pub base: Option<TypeId>,
    /// Sealed types refuse to act as a base for new classes.
    pub sealed: bool,
}

impl TypeDef {
    /// Creates an unsealed type deriving from `base`.
    pub fn new(name: impl Into<String>, base: Option<TypeId>) -> Self {
        TypeDef {
            name: name.into(),
            base,
            sealed: false,
        }
    }

    /// Marks this type as sealed.
    pub fn sealed(mut self) -> Self {
        self.sealed = true;
        self
    }
}

/// Built-in type definitions in `TypeId` order.
///
/// `bool` derives from `int`, matching the host language where booleans are
/// integers. The conformance predicate in callguard-check carves out an
/// explicit exception for that edge.
pub(crate) fn builtin_types() -> Vec<TypeDef> {
    let object = Some(TypeId::OBJECT);
    vec![
        TypeDef::new("object", None),
        TypeDef::new("NoneType", object).sealed(),
        TypeDef::new("bool", Some(TypeId::INT)).sealed(),
        TypeDef::new("int", object),
        TypeDef::new("float", object),
        TypeDef::new("str", object),
        TypeDef::new("bytes", object),
        TypeDef::new("list", object),
        TypeDef::new("tuple", object),
        TypeDef::new("dict", object),
        TypeDef::new("set", object),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_in_type_id_order() {
        let defs = builtin_types();
        assert_eq!(defs[TypeId::OBJECT.0 as usize].name, "object");
        assert_eq!(defs[TypeId::BOOL.0 as usize].name, "bool");
        assert_eq!(defs[TypeId::INT.0 as usize].name, "int");
        assert_eq!(defs[TypeId::SET.0 as usize].name, "set");
    }

    #[test]
    fn only_object_is_a_root() {
        let roots: Vec<_> = builtin_types()
            .into_iter()
            .filter(|d| d.base.is_none())
            .collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "object");
    }

    #[test]
    fn bool_derives_from_int_and_is_sealed() {
        let defs = builtin_types();
        let b = &defs[TypeId::BOOL.0 as usize];
        assert_eq!(b.base, Some(TypeId::INT));
        assert!(b.sealed);
    }
}

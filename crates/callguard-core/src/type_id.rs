//! TypeId and TypeRegistry for nominal typing.
//!
//! Every host type has a unique [`TypeId`] providing O(1) identity
//! comparison. The [`TypeRegistry`] manages type registration, lookup and
//! subtype queries, pre-registering the built-in hierarchy on construction.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{builtin_types, TypeDef};

/// Unique identifier for a type in the type registry.
///
/// The inner value is an index into the [`TypeRegistry`]'s type vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Pre-registered TypeId constants for built-in types.
impl TypeId {
    pub const OBJECT: TypeId = TypeId(0);
    pub const NONE: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const INT: TypeId = TypeId(3);
    pub const FLOAT: TypeId = TypeId(4);
    pub const STR: TypeId = TypeId(5);
    pub const BYTES: TypeId = TypeId(6);
    pub const LIST: TypeId = TypeId(7);
    pub const TUPLE: TypeId = TypeId(8);
    pub const DICT: TypeId = TypeId(9);
    pub const SET: TypeId = TypeId(10);
}

/// Registry of all host types, providing nominal identity via [`TypeId`].
///
/// On construction, the registry pre-registers the 11 built-in types:
/// - `TypeId(0)` = object
/// - `TypeId(1)` = NoneType
/// - `TypeId(2)` = bool (base: int)
/// - `TypeId(3)` = int
/// - `TypeId(4)` = float
/// - `TypeId(5)` = str
/// - `TypeId(6)` = bytes
/// - `TypeId(7)` = list
/// - `TypeId(8)` = tuple
/// - `TypeId(9)` = dict
/// - `TypeId(10)` = set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRegistry {
    /// Types indexed by TypeId.0
    types: Vec<TypeDef>,
    /// Name lookup
    names: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Creates a new registry with the built-in hierarchy pre-registered.
    pub fn new() -> Self {
        let types = builtin_types();
        let names = types
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), TypeId(i as u32)))
            .collect();

        TypeRegistry { types, names }
    }

    /// Registers a user class deriving from `base`.
    ///
    /// Returns [`CoreError::DuplicateTypeName`] if the name is taken,
    /// [`CoreError::TypeNotFound`] if `base` is unknown and
    /// [`CoreError::FinalBase`] if `base` is sealed (e.g. `bool`).
    pub fn register_class(&mut self, name: &str, base: TypeId) -> Result<TypeId, CoreError> {
        if self.names.contains_key(name) {
            return Err(CoreError::DuplicateTypeName {
                name: name.to_string(),
            });
        }
        let base_def = self.get(base).ok_or(CoreError::TypeNotFound { id: base })?;
        if base_def.sealed {
            return Err(CoreError::FinalBase {
                name: base_def.name.clone(),
            });
        }

        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDef::new(name, Some(base)));
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Looks up a type by its [`TypeId`].
    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.0 as usize)
    }

    /// Looks up a type's [`TypeId`] by name.
    pub fn get_by_name(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Returns the display name of a type, or `<unknown>` for foreign ids.
    pub fn name_of(&self, id: TypeId) -> &str {
        self.get(id).map(|def| def.name.as_str()).unwrap_or("<unknown>")
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: TypeId) -> bool {
        (id.0 as usize) < self.types.len()
    }

    /// Returns `true` if `sub` is `sup` or derives from it.
    ///
    /// The walk is bounded by the registry size, so a cyclic base chain in a
    /// deserialized registry terminates with `false`.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut current = Some(sub);
        for _ in 0..=self.types.len() {
            let Some(id) = current else {
                return false;
            };
            if id == sup {
                return true;
            }
            current = self.get(id).and_then(|def| def.base);
        }
        false
    }

    /// Number of registered types, built-ins included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: the built-ins are registered on construction.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_has_11_builtin_types() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.len(), 11);
        assert!(!reg.is_empty());
    }

    #[test]
    fn builtin_names_resolve_to_constants() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.get_by_name("object"), Some(TypeId::OBJECT));
        assert_eq!(reg.get_by_name("NoneType"), Some(TypeId::NONE));
        assert_eq!(reg.get_by_name("bool"), Some(TypeId::BOOL));
        assert_eq!(reg.get_by_name("int"), Some(TypeId::INT));
        assert_eq!(reg.get_by_name("float"), Some(TypeId::FLOAT));
        assert_eq!(reg.get_by_name("str"), Some(TypeId::STR));
        assert_eq!(reg.get_by_name("bytes"), Some(TypeId::BYTES));
        assert_eq!(reg.get_by_name("list"), Some(TypeId::LIST));
        assert_eq!(reg.get_by_name("tuple"), Some(TypeId::TUPLE));
        assert_eq!(reg.get_by_name("dict"), Some(TypeId::DICT));
        assert_eq!(reg.get_by_name("set"), Some(TypeId::SET));
    }

    #[test]
    fn bool_is_a_subtype_of_int_and_object() {
        let reg = TypeRegistry::new();
        assert!(reg.is_subtype(TypeId::BOOL, TypeId::INT));
        assert!(reg.is_subtype(TypeId::BOOL, TypeId::OBJECT));
        assert!(!reg.is_subtype(TypeId::INT, TypeId::BOOL));
    }

    #[test]
    fn subtype_is_reflexive() {
        let reg = TypeRegistry::new();
        assert!(reg.is_subtype(TypeId::STR, TypeId::STR));
        assert!(!reg.is_subtype(TypeId::INT, TypeId::FLOAT));
    }

    #[test]
    fn register_class_chains_to_base() {
        let mut reg = TypeRegistry::new();
        let animal = reg.register_class("Animal", TypeId::OBJECT).unwrap();
        let dog = reg.register_class("Dog", animal).unwrap();

        assert_eq!(animal, TypeId(11));
        assert_eq!(dog, TypeId(12));
        assert!(reg.is_subtype(dog, animal));
        assert!(reg.is_subtype(dog, TypeId::OBJECT));
        assert!(!reg.is_subtype(animal, dog));
        assert_eq!(reg.name_of(dog), "Dog");
    }

    #[test]
    fn duplicate_name_returns_error() {
        let mut reg = TypeRegistry::new();
        reg.register_class("Foo", TypeId::OBJECT).unwrap();

        match reg.register_class("Foo", TypeId::OBJECT) {
            Err(CoreError::DuplicateTypeName { name }) => assert_eq!(name, "Foo"),
            other => panic!("expected DuplicateTypeName error, got {other:?}"),
        }
        assert!(matches!(
            reg.register_class("int", TypeId::OBJECT),
            Err(CoreError::DuplicateTypeName { .. })
        ));
    }

    #[test]
    fn unknown_base_returns_error() {
        let mut reg = TypeRegistry::new();
        let result = reg.register_class("Orphan", TypeId(999));
        assert!(matches!(result, Err(CoreError::TypeNotFound { id: TypeId(999) })));
    }

    #[test]
    fn bool_cannot_be_subclassed() {
        let mut reg = TypeRegistry::new();
        match reg.register_class("MyBool", TypeId::BOOL) {
            Err(CoreError::FinalBase { name }) => assert_eq!(name, "bool"),
            other => panic!("expected FinalBase error, got {other:?}"),
        }
        assert_eq!(reg.get_by_name("MyBool"), None);
    }

    #[test]
    fn name_of_unknown_id_does_not_panic() {
        let reg = TypeRegistry::new();
        assert_eq!(reg.name_of(TypeId(999)), "<unknown>");
        assert!(!reg.contains(TypeId(999)));
    }

    #[test]
    fn type_id_display() {
        assert_eq!(format!("{}", TypeId(42)), "TypeId(42)");
    }

    #[test]
    fn serde_roundtrip() {
        let mut reg = TypeRegistry::new();
        reg.register_class("Test", TypeId::OBJECT).unwrap();

        let json = serde_json::to_string(&reg).unwrap();
        let back: TypeRegistry = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), reg.len());
        assert_eq!(back.get_by_name("Test"), Some(TypeId(11)));
        assert!(back.is_subtype(TypeId(11), TypeId::OBJECT));
    }

    #[test]
    fn cyclic_base_chain_terminates() {
        let json = serde_json::json!({
            "types": [
                { "name": "object", "base": null, "sealed": false },
                { "name": "A", "base": 2, "sealed": false },
                { "name": "B", "base": 1, "sealed": false },
            ],
            "names": { "object": 0, "A": 1, "B": 2 },
        });
        let reg: TypeRegistry = serde_json::from_value(json).unwrap();

        assert!(reg.is_subtype(TypeId(1), TypeId(2)));
        assert!(reg.is_subtype(TypeId(2), TypeId(1)));
        assert!(!reg.is_subtype(TypeId(1), TypeId::OBJECT));
    }
}

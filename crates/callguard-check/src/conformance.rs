//! The conformance predicate: does a value satisfy a specifier?
//!
//! Base rule: a value conforms if its runtime type is the specifier's type,
//! or derives from it, for at least one allowed type.
//!
//! One exception is kept isolated here rather than in the registry:
//! - `bool` derives from `int`, but a bool conforms only where `bool` itself
//!   is allowed. No base of `bool` (`int`, `object`) admits it.

use callguard_core::{Specifier, TypeId, TypeRegistry, Value};

/// Returns `true` if `value` conforms to `spec`.
pub fn conforms(value: &Value, spec: &Specifier, registry: &TypeRegistry) -> bool {
    type_conforms(value.type_id(), spec, registry)
}

/// Returns `true` if a value of runtime type `actual` conforms to `spec`.
pub fn type_conforms(actual: TypeId, spec: &Specifier, registry: &TypeRegistry) -> bool {
    if actual == TypeId::BOOL {
        return spec.allows(TypeId::BOOL);
    }
    spec.types()
        .iter()
        .any(|&allowed| is_instance(actual, allowed, registry))
}

/// Instance check for a single allowed type, with the bool exception.
pub fn is_instance(actual: TypeId, allowed: TypeId, registry: &TypeRegistry) -> bool {
    if actual == TypeId::BOOL {
        return allowed == TypeId::BOOL;
    }
    registry.is_subtype(actual, allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn single(ty: TypeId) -> Specifier {
        Specifier::Single(ty)
    }

    #[test]
    fn exact_type_conforms() {
        let reg = TypeRegistry::new();
        assert!(conforms(&Value::Int(1), &single(TypeId::INT), &reg));
        assert!(conforms(&Value::from("x"), &single(TypeId::STR), &reg));
        assert!(conforms(&Value::None, &single(TypeId::NONE), &reg));
    }

    #[test]
    fn unrelated_type_does_not_conform() {
        let reg = TypeRegistry::new();
        assert!(!conforms(&Value::from("x"), &single(TypeId::INT), &reg));
        // int is not a float in the host language
        assert!(!conforms(&Value::Int(1), &single(TypeId::FLOAT), &reg));
    }

    #[test]
    fn alternative_set_accepts_any_listed_type() {
        let reg = TypeRegistry::new();
        let spec = Specifier::any_of([TypeId::INT, TypeId::FLOAT]).unwrap();
        assert!(conforms(&Value::Int(3), &spec, &reg));
        assert!(conforms(&Value::Float(2.75), &spec, &reg));
        assert!(!conforms(&Value::from("3"), &spec, &reg));
    }

    #[test]
    fn bool_rejected_for_bare_int() {
        let reg = TypeRegistry::new();
        assert!(!conforms(&Value::Bool(true), &single(TypeId::INT), &reg));
        let spec = Specifier::any_of([TypeId::INT, TypeId::FLOAT]).unwrap();
        assert!(!conforms(&Value::Bool(false), &spec, &reg));
    }

    #[test]
    fn bool_accepted_when_explicit() {
        let reg = TypeRegistry::new();
        assert!(conforms(&Value::Bool(true), &single(TypeId::BOOL), &reg));
        let spec = Specifier::any_of([TypeId::INT, TypeId::BOOL]).unwrap();
        assert!(conforms(&Value::Bool(true), &spec, &reg));
    }

    #[test]
    fn object_accepts_everything_but_bool() {
        let reg = TypeRegistry::new();
        let spec = single(TypeId::OBJECT);
        assert!(conforms(&Value::List(vec![]), &spec, &reg));
        assert!(conforms(&Value::None, &spec, &reg));
        assert!(conforms(&Value::Int(0), &spec, &reg));
        assert!(!conforms(&Value::Bool(true), &spec, &reg));
    }

    #[test]
    fn wider_base_does_not_readmit_bool() {
        let reg = TypeRegistry::new();
        let spec = Specifier::any_of([TypeId::INT, TypeId::OBJECT]).unwrap();
        assert!(conforms(&Value::Int(7), &spec, &reg));
        assert!(!conforms(&Value::Bool(true), &spec, &reg));
        assert!(!is_instance(TypeId::BOOL, TypeId::OBJECT, &reg));

        let with_bool = Specifier::any_of([TypeId::OBJECT, TypeId::BOOL]).unwrap();
        assert!(conforms(&Value::Bool(false), &with_bool, &reg));
    }

    #[test]
    fn int_does_not_satisfy_bool() {
        let reg = TypeRegistry::new();
        assert!(!conforms(&Value::Int(1), &single(TypeId::BOOL), &reg));
    }

    #[test]
    fn instances_conform_to_their_bases() {
        let mut reg = TypeRegistry::new();
        let animal = reg.register_class("Animal", TypeId::OBJECT).unwrap();
        let dog = reg.register_class("Dog", animal).unwrap();
        let cat = reg.register_class("Cat", animal).unwrap();

        let rex = Value::instance(dog);
        assert!(conforms(&rex, &single(dog), &reg));
        assert!(conforms(&rex, &single(animal), &reg));
        assert!(!conforms(&rex, &single(cat), &reg));
        assert!(!conforms(&Value::instance(animal), &single(dog), &reg));
    }

    proptest! {
        #[test]
        fn bool_never_conforms_unless_listed(
            b in any::<bool>(),
            extra in prop::collection::vec(
                prop_oneof![Just(0u32), 3u32..11],
                0..4,
            ),
        ) {
            let reg = TypeRegistry::new();
            let mut types = vec![TypeId::INT];
            types.extend(extra.into_iter().map(TypeId));
            let spec = Specifier::any_of(types).unwrap();
            prop_assert!(!conforms(&Value::Bool(b), &spec, &reg));
        }

        #[test]
        fn ints_always_conform_to_int(n in any::<i64>()) {
            let reg = TypeRegistry::new();
            prop_assert!(conforms(&Value::Int(n), &Specifier::Single(TypeId::INT), &reg));
        }
    }
}

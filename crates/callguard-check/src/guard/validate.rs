//! Specifier validation, run once when a guard is built.

use callguard_core::{Specifier, SpecifierDecl, TypeId, TypeRegistry};
use indexmap::IndexMap;

use crate::diagnostics::{GuardError, SpecifierFault, SpecifierSlot};
use crate::guard::SpecifierSet;

/// Validates every declaration, positional first, failing on the first
/// rejected one.
pub fn validate_set(
    registry: &TypeRegistry,
    positional: &[SpecifierDecl],
    named: &IndexMap<String, SpecifierDecl>,
) -> Result<SpecifierSet, GuardError> {
    let positional = positional
        .iter()
        .enumerate()
        .map(|(index, decl)| {
            validate_decl(registry, decl)
                .map_err(|fault| invalid(SpecifierSlot::Positional(index), fault))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut validated = IndexMap::with_capacity(named.len());
    for (name, decl) in named {
        let spec = validate_decl(registry, decl)
            .map_err(|fault| invalid(SpecifierSlot::Named(name.clone()), fault))?;
        validated.insert(name.clone(), spec);
    }

    Ok(SpecifierSet {
        positional,
        named: validated,
    })
}

/// Validates one declaration: a type, or a non-empty set of types.
pub fn validate_decl(registry: &TypeRegistry, decl: &SpecifierDecl) -> Result<Specifier, SpecifierFault> {
    match decl {
        SpecifierDecl::Set(items) => {
            if items.is_empty() {
                return Err(SpecifierFault::EmptySet);
            }
            let types = items
                .iter()
                .map(|item| match item {
                    SpecifierDecl::Set(_) => Err(SpecifierFault::NestedSet),
                    other => resolve_type(registry, other),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Specifier::any_of(types).ok_or(SpecifierFault::EmptySet)
        }
        other => resolve_type(registry, other).map(Specifier::Single),
    }
}

fn resolve_type(registry: &TypeRegistry, decl: &SpecifierDecl) -> Result<TypeId, SpecifierFault> {
    match decl {
        SpecifierDecl::Id(id) if registry.contains(*id) => Ok(*id),
        SpecifierDecl::Id(id) => Err(SpecifierFault::UnknownTypeId(*id)),
        SpecifierDecl::Name(name) => registry
            .get_by_name(name)
            .ok_or_else(|| SpecifierFault::UnknownTypeName(name.clone())),
        SpecifierDecl::Set(_) => Err(SpecifierFault::NestedSet),
        SpecifierDecl::Other(raw) => Err(SpecifierFault::NotAType(raw.clone())),
    }
}

fn invalid(slot: SpecifierSlot, fault: SpecifierFault) -> GuardError {
    GuardError::InvalidSpecifierConfiguration { slot, fault }
}

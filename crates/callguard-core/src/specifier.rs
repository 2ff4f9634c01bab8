//! Type specifiers: declared constraints on a parameter's value.
//!
//! [`SpecifierDecl`] is the raw, unvalidated declaration as a caller (or a
//! JSON configuration) supplies it. [`Specifier`] is the validated form: a
//! single type, or a non-empty ordered set of alternatives.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::type_id::{TypeId, TypeRegistry};

/// A validated type specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specifier {
    /// The value must be an instance of this type.
    Single(TypeId),
    /// The value must be an instance of at least one of these types.
    /// Never empty, no duplicates, declaration order preserved.
    AnyOf(SmallVec<[TypeId; 4]>),
}

impl Specifier {
    /// Builds an alternative set, collapsing duplicates.
    ///
    /// Returns `None` when `types` is empty.
    pub fn any_of(types: impl IntoIterator<Item = TypeId>) -> Option<Specifier> {
        let mut set: SmallVec<[TypeId; 4]> = SmallVec::new();
        for ty in types {
            if !set.contains(&ty) {
                set.push(ty);
            }
        }
        if set.is_empty() {
            None
        } else {
            Some(Specifier::AnyOf(set))
        }
    }

    /// The allowed types, in declaration order.
    pub fn types(&self) -> &[TypeId] {
        match self {
            Specifier::Single(ty) => std::slice::from_ref(ty),
            Specifier::AnyOf(set) => set.as_slice(),
        }
    }

    /// Returns `true` if `ty` is explicitly listed (no subtyping).
    pub fn allows(&self, ty: TypeId) -> bool {
        self.types().contains(&ty)
    }

    /// Renders the specifier for diagnostics: `int` or `(int, float)`.
    pub fn render(&self, registry: &TypeRegistry) -> String {
        match self {
            Specifier::Single(ty) => registry.name_of(*ty).to_string(),
            Specifier::AnyOf(set) => {
                let mut out = String::from("(");
                for (i, ty) in set.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(registry.name_of(*ty));
                }
                if set.len() == 1 {
                    out.push(',');
                }
                out.push(')');
                out
            }
        }
    }
}

impl From<TypeId> for Specifier {
    fn from(ty: TypeId) -> Self {
        Specifier::Single(ty)
    }
}

/// An unvalidated specifier declaration.
///
/// Deserializes from JSON as a type id (`3`), a type name (`"int"`), a list
/// of those (`["int", "float"]`), or anything else, which is retained as
/// [`SpecifierDecl::Other`] so that validation can reject it with context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecifierDecl {
    Id(TypeId),
    Name(String),
    Set(Vec<SpecifierDecl>),
    Other(serde_json::Value),
}

impl SpecifierDecl {
    /// Declares an alternative set from anything convertible to a declaration.
    pub fn any_of<I, D>(items: I) -> SpecifierDecl
    where
        I: IntoIterator<Item = D>,
        D: Into<SpecifierDecl>,
    {
        SpecifierDecl::Set(items.into_iter().map(Into::into).collect())
    }
}

impl From<TypeId> for SpecifierDecl {
    fn from(ty: TypeId) -> Self {
        SpecifierDecl::Id(ty)
    }
}

impl From<&str> for SpecifierDecl {
    fn from(name: &str) -> Self {
        SpecifierDecl::Name(name.to_string())
    }
}

impl From<String> for SpecifierDecl {
    fn from(name: String) -> Self {
        SpecifierDecl::Name(name)
    }
}

impl<const N: usize> From<[TypeId; N]> for SpecifierDecl {
    fn from(types: [TypeId; N]) -> Self {
        SpecifierDecl::any_of(types)
    }
}

impl From<Vec<TypeId>> for SpecifierDecl {
    fn from(types: Vec<TypeId>) -> Self {
        SpecifierDecl::any_of(types)
    }
}

impl From<Specifier> for SpecifierDecl {
    fn from(spec: Specifier) -> Self {
        match spec {
            Specifier::Single(ty) => SpecifierDecl::Id(ty),
            Specifier::AnyOf(set) => SpecifierDecl::any_of(set),
        }
    }
}

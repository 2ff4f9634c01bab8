//! Resolution of declared specifiers onto a callable's parameters.
//!
//! Resolution runs over every declared parameter, so the specifier a
//! parameter receives never depends on which arguments a call supplied.
//! Order:
//! 1. every parameter starts unconstrained;
//! 2. name-targeted specifiers are assigned first;
//! 3. remaining unconstrained parameters take positional specifiers in
//!    declaration order until the positional sequence runs out.

use callguard_core::Specifier;
use indexmap::IndexMap;

use crate::guard::SpecifierSet;

/// The resolved specifier map for one callable. `None` means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecifiers<'g> {
    entries: IndexMap<String, Option<&'g Specifier>>,
}

impl<'g> ResolvedSpecifiers<'g> {
    /// Resolves `set` against parameter names, which must be in declaration
    /// order.
    pub fn resolve<'n, I>(set: &'g SpecifierSet, params: I) -> Self
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut entries: IndexMap<String, Option<&'g Specifier>> = params
            .into_iter()
            .map(|name| (name.to_string(), None))
            .collect();

        for (name, slot) in entries.iter_mut() {
            if let Some(spec) = set.named.get(name) {
                *slot = Some(spec);
            }
        }

        let mut positional = set.positional.iter();
        for slot in entries.values_mut().filter(|slot| slot.is_none()) {
            match positional.next() {
                Some(spec) => *slot = Some(spec),
                None => break,
            }
        }

        ResolvedSpecifiers { entries }
    }

    /// The specifier resolved for `param`, if it is known and constrained.
    pub fn get(&self, param: &str) -> Option<&'g Specifier> {
        self.entries.get(param).copied().flatten()
    }

    /// Returns `true` if `param` took part in resolution.
    pub fn contains(&self, param: &str) -> bool {
        self.entries.contains_key(param)
    }

    /// Parameters in declaration order with their resolution.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&'g Specifier>)> + '_ {
        self.entries.iter().map(|(name, spec)| (name.as_str(), *spec))
    }

    /// Only the constrained parameters, in declaration order.
    pub fn constrained(&self) -> impl Iterator<Item = (&str, &'g Specifier)> + '_ {
        self.entries
            .iter()
            .filter_map(|(name, spec)| spec.map(|s| (name.as_str(), s)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

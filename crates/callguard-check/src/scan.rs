//! Collection scan: find the first element that fails a specifier.
//!
//! Independent of the enforcement combinator. Keyed collections are scanned
//! by value; keys are never inspected.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use callguard_core::{Specifier, TypeId, TypeRegistry, Value};
use indexmap::IndexMap;

use crate::conformance::conforms;

/// Anything whose values can be scanned in a defined order.
pub trait ScanValues {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_>;
}

impl ScanValues for [Value] {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.iter())
    }
}

impl ScanValues for Vec<Value> {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.iter())
    }
}

impl<K, S> ScanValues for IndexMap<K, Value, S> {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.values())
    }
}

/// Iteration order, and therefore which offender is "first", is unspecified.
impl<K, S: BuildHasher> ScanValues for HashMap<K, Value, S> {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.values())
    }
}

impl<K> ScanValues for BTreeMap<K, Value> {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        Box::new(self.values())
    }
}

/// List, tuple and set elements; dict values. Scalars scan as empty.
impl ScanValues for Value {
    fn scan_values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        self.elements()
    }
}

/// Returns the runtime type of the first value that does not conform to
/// `spec`, or `None` if every value conforms.
pub fn find_nonconforming<C>(collection: &C, spec: &Specifier, registry: &TypeRegistry) -> Option<TypeId>
where
    C: ScanValues + ?Sized,
{
    collection
        .scan_values()
        .find(|value| !conforms(value, spec, registry))
        .map(Value::type_id)
}

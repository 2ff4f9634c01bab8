//! The enforcement combinator.
//!
//! A [`Guard`] holds a validated [`SpecifierSet`] and checks call arguments
//! against it. [`Guard::wrap`] turns it into a [`Guarded`] callable with the
//! same calling convention as the callable it wraps. Per call:
//!
//! 1. capture arguments against the callable's declared parameter names;
//! 2. resolve specifiers (name-targeted first, then positional);
//! 3. check each constrained argument, failing on the first mismatch;
//! 4. report an arity incongruity to the diagnostic sink, if any;
//! 5. delegate to the wrapped callable unchanged.
//!
//! The specifier set is read-only after [`GuardBuilder::build`], so one guard
//! can serve any number of concurrent calls.

pub mod resolve;
pub mod validate;
pub mod wrap;

use std::fmt;
use std::sync::Arc;

use callguard_core::{CallArgs, CaptureMode, Signature, Specifier, SpecifierDecl, TypeRegistry, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::conformance::conforms;
use crate::diagnostics::{ArityIncongruity, GuardError, SpecifierFault, SpecifierSlot};
use crate::sink::{DiagnosticSink, TracingSink};

pub use resolve::ResolvedSpecifiers;
pub use wrap::{callable, Callable, FnCallable, Guarded};

/// Behavioural switches for a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Which call arguments are captured for checking. Default: `Bound`.
    pub capture: CaptureMode,
    /// Whether arity incongruities are reported to the sink. Default: on.
    pub arity_notices: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            capture: CaptureMode::Bound,
            arity_notices: true,
        }
    }
}

/// Validated specifiers: positional sequence plus name-targeted overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecifierSet {
    pub(crate) positional: Vec<Specifier>,
    pub(crate) named: IndexMap<String, Specifier>,
}

impl SpecifierSet {
    pub fn positional(&self) -> &[Specifier] {
        &self.positional
    }

    pub fn named(&self) -> &IndexMap<String, Specifier> {
        &self.named
    }

    /// Total declared specifiers (positional + name-targeted).
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Declaration document accepted by [`Guard::from_json`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GuardDecl {
    positional: Vec<SpecifierDecl>,
    named: IndexMap<String, SpecifierDecl>,
    config: GuardConfig,
}

/// Argument contract for a callable.
#[derive(Clone)]
pub struct Guard {
    registry: Arc<TypeRegistry>,
    specifiers: SpecifierSet,
    config: GuardConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("specifiers", &self.specifiers)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Guard {
    /// Starts building a guard whose type names resolve against `registry`.
    pub fn builder(registry: Arc<TypeRegistry>) -> GuardBuilder {
        GuardBuilder {
            registry,
            positional: Vec::new(),
            named: IndexMap::new(),
            config: GuardConfig::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Builds a guard from a JSON declaration document:
    ///
    /// ```json
    /// { "positional": ["int", ["int", "float"]], "named": { "a": "str" },
    ///   "config": { "capture": "bound", "arity_notices": true } }
    /// ```
    ///
    /// Every key is optional. A document that does not have this shape fails
    /// with `InvalidSpecifierConfiguration` at [`SpecifierSlot::Document`].
    pub fn from_json(registry: Arc<TypeRegistry>, doc: serde_json::Value) -> Result<Guard, GuardError> {
        let decl: GuardDecl =
            serde_json::from_value(doc).map_err(|e| GuardError::InvalidSpecifierConfiguration {
                slot: SpecifierSlot::Document,
                fault: SpecifierFault::Malformed(e.to_string()),
            })?;

        let mut builder = Guard::builder(registry).config(decl.config);
        builder.positional = decl.positional;
        builder.named = decl.named;
        builder.build()
    }

    pub fn specifiers(&self) -> &SpecifierSet {
        &self.specifiers
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Resolves the specifier set against declared parameter names.
    pub fn resolve<'n, I>(&self, params: I) -> ResolvedSpecifiers<'_>
    where
        I: IntoIterator<Item = &'n str>,
    {
        ResolvedSpecifiers::resolve(&self.specifiers, params)
    }

    /// Checks one call's arguments without invoking anything.
    ///
    /// Returns the first [`GuardError::ArgumentTypeMismatch`]; on success,
    /// reports any arity incongruity to the sink.
    pub fn check(&self, signature: &Signature, args: &CallArgs) -> Result<(), GuardError> {
        let captured = signature.bind(args, self.config.capture);
        let resolved = self.resolve(signature.params.iter().map(String::as_str));

        let mut checked = 0usize;
        for (param, spec) in resolved.constrained() {
            // unsupplied parameters are left to the callee
            let Some(value) = captured.get(param).copied() else {
                continue;
            };
            checked += 1;
            if !conforms(value, spec, &self.registry) {
                let err = self.mismatch(signature, param, spec, value);
                tracing::debug!(function = %signature.name, parameter = param, "{err}");
                return Err(err);
            }
        }

        tracing::debug!(
            function = %signature.name,
            captured = captured.len(),
            checked,
            "arguments conform"
        );
        self.report_arity(signature);
        Ok(())
    }

    /// Wraps `inner` so every call is checked first.
    pub fn wrap<C: Callable>(self, inner: C) -> Guarded<C> {
        Guarded::new(self, inner)
    }

    fn mismatch(&self, signature: &Signature, param: &str, spec: &Specifier, value: &Value) -> GuardError {
        let actual_type = value.type_id();
        GuardError::ArgumentTypeMismatch {
            function: signature.name.clone(),
            parameter: param.to_string(),
            expected: spec.render(&self.registry),
            actual: self.registry.name_of(actual_type).to_string(),
            expected_types: spec.clone(),
            actual_type,
        }
    }

    fn report_arity(&self, signature: &Signature) {
        if !self.config.arity_notices {
            return;
        }
        if let Some(notice) =
            ArityIncongruity::detect(&signature.name, self.specifiers.len(), signature.arity())
        {
            self.sink.arity_incongruity(&notice);
        }
    }
}

/// Collects declarations, then validates them all in [`build`](Self::build).
pub struct GuardBuilder {
    registry: Arc<TypeRegistry>,
    positional: Vec<SpecifierDecl>,
    named: IndexMap<String, SpecifierDecl>,
    config: GuardConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl GuardBuilder {
    /// Appends a positional specifier.
    pub fn positional(mut self, decl: impl Into<SpecifierDecl>) -> Self {
        self.positional.push(decl.into());
        self
    }

    /// Adds a name-targeted specifier. A repeated name replaces the earlier one.
    pub fn named(mut self, name: impl Into<String>, decl: impl Into<SpecifierDecl>) -> Self {
        self.named.insert(name.into(), decl.into());
        self
    }

    pub fn config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn capture(mut self, capture: CaptureMode) -> Self {
        self.config.capture = capture;
        self
    }

    /// Replaces the default [`TracingSink`].
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Validates every declaration and produces the guard.
    pub fn build(self) -> Result<Guard, GuardError> {
        let specifiers = validate::validate_set(&self.registry, &self.positional, &self.named)?;
        Ok(Guard {
            registry: self.registry,
            specifiers,
            config: self.config,
            sink: self.sink,
        })
    }
}

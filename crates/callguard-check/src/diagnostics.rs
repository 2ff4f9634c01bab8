//! Guard diagnostics: fatal errors and the non-fatal arity notice.
//!
//! [`GuardError`] captures full context for every failure so callers can act
//! on the structured fields without parsing the rendered message.
//! [`ArityIncongruity`] is advisory only and travels through a
//! [`DiagnosticSink`](crate::sink::DiagnosticSink), never through `Result`.

use std::fmt;

use callguard_core::{Specifier, TypeId};
use serde::{Deserialize, Serialize};

/// Errors raised by specifier validation and call-time enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum GuardError {
    /// A declared specifier is neither a type nor a non-empty set of types.
    /// Raised while building a guard; no guard is produced.
    #[error("invalid specifier configuration at {slot}: {fault}")]
    InvalidSpecifierConfiguration {
        /// Which declaration was rejected.
        slot: SpecifierSlot,
        /// Why it was rejected.
        fault: SpecifierFault,
    },

    /// A captured argument does not conform to its resolved specifier.
    /// Raised before the wrapped callable runs.
    #[error("{expected} was enforced on parameter '{parameter}' but found {actual}")]
    ArgumentTypeMismatch {
        /// Name of the guarded callable.
        function: String,
        /// The offending parameter.
        parameter: String,
        /// Rendered expected specifier (`int`, `(int, float)`).
        expected: String,
        /// Name of the argument's runtime type.
        actual: String,
        /// The expected specifier in machine form.
        expected_types: Specifier,
        /// The argument's runtime type in machine form.
        actual_type: TypeId,
    },
}

/// Location of a specifier declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecifierSlot {
    /// Index into the positional sequence.
    Positional(usize),
    /// Key of a name-targeted entry.
    Named(String),
    /// The declaration document as a whole (JSON input).
    Document,
}

impl fmt::Display for SpecifierSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecifierSlot::Positional(index) => write!(f, "positional[{index}]"),
            SpecifierSlot::Named(name) => write!(f, "named '{name}'"),
            SpecifierSlot::Document => write!(f, "declaration document"),
        }
    }
}

/// Reason a specifier declaration was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum SpecifierFault {
    #[error("alternative set is empty")]
    EmptySet,

    #[error("'{0}' does not name a registered type")]
    UnknownTypeName(String),

    #[error("{0} is not a registered type")]
    UnknownTypeId(TypeId),

    #[error("alternative sets cannot nest")]
    NestedSet,

    #[error("{0} is not a type")]
    NotAType(serde_json::Value),

    #[error("malformed declaration: {0}")]
    Malformed(String),
}

/// Direction of an arity incongruity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArityDirection {
    /// More specifiers than parameters.
    OverConstrained,
    /// More parameters than specifiers.
    UnderConstrained,
}

/// Non-fatal notice: declared specifier count differs from the callable's
/// declared parameter count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArityIncongruity {
    /// Name of the guarded callable.
    pub function: String,
    /// Positional plus name-targeted specifier count.
    pub specifier_count: usize,
    /// Declared parameter count.
    pub parameter_count: usize,
}

impl ArityIncongruity {
    /// Returns a notice when the counts differ, `None` when they agree.
    pub fn detect(
        function: impl Into<String>,
        specifier_count: usize,
        parameter_count: usize,
    ) -> Option<Self> {
        if specifier_count == parameter_count {
            return None;
        }
        Some(ArityIncongruity {
            function: function.into(),
            specifier_count,
            parameter_count,
        })
    }

    pub fn direction(&self) -> ArityDirection {
        if self.specifier_count > self.parameter_count {
            ArityDirection::OverConstrained
        } else {
            ArityDirection::UnderConstrained
        }
    }
}

impl fmt::Display for ArityIncongruity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = if self.specifier_count == 1 { "type" } else { "types" };
        let params = if self.parameter_count == 1 {
            "parameter exists"
        } else {
            "parameters exist"
        };
        match self.direction() {
            ArityDirection::OverConstrained => write!(
                f,
                "Enforcing {} {types} while only {} {params}.",
                self.specifier_count, self.parameter_count
            ),
            ArityDirection::UnderConstrained => write!(
                f,
                "Enforcing only {} {types} while {} {params}; {}() may produce unexpected results.",
                self.specifier_count, self.parameter_count, self.function
            ),
        }
    }
}

//! Call-site argument contracts.
//!
//! - [`validate`](guard::validate): specifier validation at guard construction.
//! - [`conformance`]: the value-vs-specifier predicate, with the bool/int exception.
//! - [`guard`]: the enforcement combinator ([`Guard`], [`Guarded`]).
//! - [`scan`]: standalone collection scan.
//! - [`diagnostics`] and [`sink`]: fatal errors and non-fatal notices.

pub mod conformance;
pub mod diagnostics;
pub mod guard;
pub mod scan;
pub mod sink;

pub use conformance::{conforms, is_instance, type_conforms};
pub use diagnostics::{ArityDirection, ArityIncongruity, GuardError, SpecifierFault, SpecifierSlot};
pub use guard::{
    callable, Callable, FnCallable, Guard, GuardBuilder, GuardConfig, Guarded, ResolvedSpecifiers,
    SpecifierSet,
};
pub use scan::{find_nonconforming, ScanValues};
pub use sink::{DiagnosticSink, MemorySink, NullSink, TracingSink};

//! Callables and the guarded wrapper.

use std::marker::PhantomData;

use callguard_core::{CallArgs, Signature};

use crate::diagnostics::GuardError;
use crate::guard::Guard;

/// Something invocable with [`CallArgs`] that declares its parameters.
pub trait Callable {
    type Output;
    type Error;

    /// Name and declared parameter names, constant for the callable.
    fn signature(&self) -> &Signature;

    fn call(&self, args: &CallArgs) -> Result<Self::Output, Self::Error>;
}

/// A callable whose arguments are checked by a [`Guard`] before delegation.
///
/// Exposes the wrapped callable's own `Output` and `Error` types. Guard
/// failures enter the error type through `From<GuardError>`; errors returned
/// by the wrapped callable are passed through as-is.
#[derive(Debug, Clone)]
pub struct Guarded<C> {
    guard: Guard,
    inner: C,
}

impl<C: Callable> Guarded<C> {
    pub(crate) fn new(guard: Guard, inner: C) -> Self {
        Guarded { guard, inner }
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwraps back into the guard and the original callable.
    pub fn into_parts(self) -> (Guard, C) {
        (self.guard, self.inner)
    }
}

impl<C> Callable for Guarded<C>
where
    C: Callable,
    C::Error: From<GuardError>,
{
    type Output = C::Output;
    type Error = C::Error;

    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    fn call(&self, args: &CallArgs) -> Result<Self::Output, Self::Error> {
        self.guard.check(self.inner.signature(), args)?;
        self.inner.call(args)
    }
}

/// Closure adapter produced by [`callable`].
pub struct FnCallable<F, T, E> {
    signature: Signature,
    func: F,
    _marker: PhantomData<fn() -> Result<T, E>>,
}

impl<F, T, E> std::fmt::Debug for FnCallable<F, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCallable")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl<F: Clone, T, E> Clone for FnCallable<F, T, E> {
    fn clone(&self) -> Self {
        FnCallable {
            signature: self.signature.clone(),
            func: self.func.clone(),
            _marker: PhantomData,
        }
    }
}

/// Adapts a closure into a [`Callable`] with an explicit parameter list.
///
/// ```ignore
/// let add = callable("add", ["a", "b"], |args: &CallArgs| -> Result<Value, GuardError> {
///     Ok(args.positional[0].clone())
/// });
/// ```
pub fn callable<F, T, E, I, S>(name: impl Into<String>, params: I, func: F) -> FnCallable<F, T, E>
where
    F: Fn(&CallArgs) -> Result<T, E>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FnCallable {
        signature: Signature::new(name, params),
        func,
        _marker: PhantomData,
    }
}

impl<F, T, E> Callable for FnCallable<F, T, E>
where
    F: Fn(&CallArgs) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn call(&self, args: &CallArgs) -> Result<T, E> {
        (self.func)(args)
    }
}

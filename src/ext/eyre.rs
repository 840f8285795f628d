use core::convert::Infallible;
use std::{fmt::Display, panic::Location};

pub(crate) mod reexports {
    //! re-exports

    pub use super::CustomWrapErr as _;
    pub use color_eyre::eyre::{bail, ensure, eyre, Report as Error, Result};
}
use reexports::*;

/// Wraps errors with the caller's source location appended to the message.
pub trait CustomWrapErr<T, E> {
    fn wrap_err<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    fn wrap_err_with<C, F>(self, context: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;

    /// like google map red dot, only record the location info without any context message.
    fn dot(self) -> Result<T>;
}

fn located(context: impl Display, caller: &Location<'_>) -> String {
    format!(
        "{context} at `{}:{}:{}`",
        caller.file(),
        caller.line(),
        caller.column()
    )
}

fn dot_only(caller: &Location<'_>) -> String {
    format!(
        "at `{}:{}:{}`",
        caller.file(),
        caller.line(),
        caller.column()
    )
}

impl<T, E> CustomWrapErr<T, E> for Result<T, E>
where
    E: Display,
    Result<T, E>: color_eyre::eyre::WrapErr<T, E>,
{
    #[inline]
    #[track_caller]
    fn wrap_err<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        let caller = Location::caller();
        color_eyre::eyre::WrapErr::wrap_err(self, located(context, caller))
    }

    #[inline]
    #[track_caller]
    fn wrap_err_with<C, F>(self, context: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        let caller = Location::caller();
        color_eyre::eyre::WrapErr::wrap_err_with(self, || located(context(), caller))
    }

    #[inline]
    #[track_caller]
    fn dot(self) -> Result<T> {
        let caller = Location::caller();
        color_eyre::eyre::WrapErr::wrap_err(self, dot_only(caller))
    }
}

impl<T> CustomWrapErr<T, Infallible> for Option<T> {
    #[inline]
    #[track_caller]
    fn wrap_err<C>(self, context: C) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
    {
        let caller = Location::caller();
        self.ok_or_else(|| eyre!(located(context, caller)))
    }

    #[inline]
    #[track_caller]
    fn wrap_err_with<C, F>(self, context: F) -> Result<T, Error>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        let caller = Location::caller();
        self.ok_or_else(|| eyre!(located(context(), caller)))
    }

    #[inline]
    #[track_caller]
    fn dot(self) -> Result<T> {
        let caller = Location::caller();
        self.ok_or_else(|| eyre!(dot_only(caller)))
    }
}

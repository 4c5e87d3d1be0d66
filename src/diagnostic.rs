use core::panic::Location;

use crate::Error;

pub(crate) const TARGET: &str = "managed_vec";

/// Logs `error` as the outcome of `operation` called at `location`.
///
/// Double initialization leaks nothing so it is only a warning.
#[cold]
#[inline(never)]
pub(crate) fn report(operation: &'static str, error: Error, location: &'static Location<'static>) -> Error {
    if let Error::AlreadyInitialized = error {
        log::warn!(target: TARGET, "{operation}: {error} at {location}");
    } else {
        log::error!(target: TARGET, "{operation}: {error} at {location}");
    }

    error
}

/// Reports the error of `result`, if any, at the location of the outermost `#[track_caller]` caller.
#[inline(always)]
#[track_caller]
pub(crate) fn diagnose<T>(operation: &'static str, result: Result<T, Error>) -> Result<T, Error> {
    match result {
        Ok(value) => Ok(value),
        Err(error) => Err(report(operation, error, Location::caller())),
    }
}

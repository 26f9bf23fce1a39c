// SPDX-License-Identifier: Unlicense

//! Uniform structure for errors and results.

/// Specified errors.
#[derive(Debug)]
pub enum Error {
    /// Virtual address beyond the end of the virtual address space
    AddressOutOfBounds,
    /// No frame could be reclaimed for a missing mapping
    OutOfFrames,
    /// Function failed because required initialisation not performed
    UnInitialised,
}

/// Default error type for paging functions.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_error() {
        fn fn_ok() -> Result<f64> {
            Ok(1.0)
        }

        fn fn_error() -> Result<f64> {
            Err(Error::OutOfFrames)
        }

        fn fn_qmark() -> Result<f64> {
            let result = fn_error()?;
            Ok(result)
        }

        assert_ok_eq!(fn_ok(), 1.0);
        assert_err!(fn_error());
        assert_err!(fn_qmark());
    }
}

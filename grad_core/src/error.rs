//! Error type for the engine.

use thiserror::Error;

/// Errors raised by the operation catalog.
///
/// The only validated precondition is the power exponent; every other
/// numeric edge case (division by zero, negative base to a fractional power)
/// propagates as an infinity or NaN value instead of an error.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GradError {
    /// `powf` called with a NaN or infinite exponent. Rejected before any
    /// node is constructed.
    #[error("invalid exponent {0}: powf requires a finite numeric constant")]
    InvalidExponent(f64),
}

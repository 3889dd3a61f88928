use thiserror::Error;

use super::BoundsError;

/// Errors that can occur during a damped step search.
///
/// `E` is the error type of the caller's residual function.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error<E> {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("invalid bounds: {0}")]
    InvalidBounds(#[from] BoundsError),

    #[error("start point is not finite: {value}")]
    NonFiniteStart { value: f64 },

    #[error("residual evaluation failed at x = {x}")]
    Evaluation {
        x: f64,
        #[source]
        source: E,
    },

    #[error("non-finite residual {residual} at x = {x}")]
    NonFiniteResidual { x: f64, residual: f64 },

    #[error("no successful evaluations")]
    NoSuccessfulEvaluation,
}

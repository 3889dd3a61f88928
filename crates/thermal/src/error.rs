use isola_solve::damped;
use thiserror::Error;

use crate::{RangeWarning, ThermalProfile};

/// Errors raised by the thermal models, the steady-state solver, and the
/// analyses built on it.
///
/// Every variant names the offending parameter so a caller can report it;
/// no physical value is ever substituted silently.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThermalError {
    /// A conductivity model tag or its coefficients are not recognized.
    #[error("invalid conductivity model `{tag}`: {reason}")]
    InvalidModel { tag: String, reason: String },

    /// k(T) evaluated to a non-positive or non-finite value.
    #[error(
        "invalid conductivity {value} W/(m·K) for `{material}` (layer index {layer}) at a mean temperature of {mean_temperature} °C"
    )]
    InvalidConductivity {
        layer: usize,
        material: String,
        mean_temperature: f64,
        value: f64,
    },

    /// A thickness, radius, or diameter is not strictly positive and finite.
    #[error("invalid geometry: `{parameter}` must be positive and finite (got {value} m)")]
    InvalidGeometry { parameter: &'static str, value: f64 },

    /// Temperatures, emissivity, humidity, or wind speed are inconsistent
    /// with the requested calculation.
    #[error("invalid boundary condition `{parameter}`: {reason}")]
    InvalidBoundaryCondition {
        parameter: &'static str,
        reason: &'static str,
    },

    /// The iteration budget ran out.
    ///
    /// Carries the best-effort profile so callers can decide how to recover.
    #[error(
        "steady state did not converge after {iterations} iterations (residual {residual} W/m²)"
    )]
    DidNotConverge {
        iterations: usize,
        residual: f64,
        profile: Box<ThermalProfile>,
    },

    /// k(T) was evaluated outside the declared valid range under the strict
    /// range policy.
    #[error("{0}")]
    OutsideValidRange(RangeWarning),

    /// The search produced a non-finite residual.
    #[error("non-finite residual {residual} at a surface temperature of {surface_temperature} °C")]
    NonFiniteResidual {
        surface_temperature: f64,
        residual: f64,
    },

    /// An analysis input (schedule, fuel, extent, scan range) is invalid.
    #[error("invalid input `{parameter}`: {reason}")]
    InvalidInput {
        parameter: &'static str,
        reason: &'static str,
    },

    /// Solver or scan configuration is invalid.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
}

impl From<damped::Error<ThermalError>> for ThermalError {
    fn from(err: damped::Error<ThermalError>) -> Self {
        match err {
            damped::Error::Evaluation { source, .. } => source,
            damped::Error::NonFiniteResidual { x, residual } => Self::NonFiniteResidual {
                surface_temperature: x,
                residual,
            },
            damped::Error::InvalidConfig { reason } => Self::InvalidConfig { reason },
            damped::Error::NonFiniteStart { .. } | damped::Error::InvalidBounds(_) => {
                Self::InvalidBoundaryCondition {
                    parameter: "temperatures",
                    reason: "process and ambient temperatures must be finite and distinct",
                }
            }
            _ => Self::InvalidConfig {
                reason: "search finished without a successful evaluation",
            },
        }
    }
}

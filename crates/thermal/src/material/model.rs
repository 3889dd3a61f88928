use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ThermalError;

/// Functional form of a material's thermal conductivity, k(T).
///
/// Coefficients are in W/(m·K) with `T` the layer mean temperature in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ConductivityModel {
    /// `k = k0`
    Constant { k0: f64 },
    /// `k = k0 + k1·T`
    Linear { k0: f64, k1: f64 },
    /// `k = k0 + k1·T + k2·T² + k3·T³ + k4·T⁴`
    Polynomial { coefficients: [f64; 5] },
    /// `k = a·exp(b·T)`
    Exponential { a: f64, b: f64 },
}

impl ConductivityModel {
    /// Builds a model from a textual tag and its coefficients.
    ///
    /// Tags are `constant` (k0), `linear` (k0, k1), `polynomial` (k0 and up to
    /// four further coefficients, missing ones are zero) and `exponential`
    /// (a, b). Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ThermalError::InvalidModel`] for an unknown tag, a wrong
    /// number of coefficients, or a non-finite coefficient.
    pub fn from_tag(tag: &str, coefficients: &[f64]) -> Result<Self, ThermalError> {
        let invalid = |reason: String| ThermalError::InvalidModel {
            tag: tag.to_string(),
            reason,
        };

        if let Some(c) = coefficients.iter().find(|c| !c.is_finite()) {
            return Err(invalid(format!("coefficient {c} is not finite")));
        }

        let require_count = |count: usize| {
            if coefficients.len() == count {
                Ok(())
            } else {
                Err(invalid(format!(
                    "expected {count} coefficient(s), got {}",
                    coefficients.len()
                )))
            }
        };

        match tag.trim().to_ascii_lowercase().as_str() {
            "constant" => {
                require_count(1)?;
                Ok(Self::Constant { k0: coefficients[0] })
            }
            "linear" => {
                require_count(2)?;
                Ok(Self::Linear {
                    k0: coefficients[0],
                    k1: coefficients[1],
                })
            }
            "polynomial" => {
                if coefficients.is_empty() || coefficients.len() > 5 {
                    return Err(invalid(format!(
                        "expected 1 to 5 coefficients, got {}",
                        coefficients.len()
                    )));
                }
                let mut padded = [0.0; 5];
                padded[..coefficients.len()].copy_from_slice(coefficients);
                Ok(Self::Polynomial {
                    coefficients: padded,
                })
            }
            "exponential" => {
                require_count(2)?;
                Ok(Self::Exponential {
                    a: coefficients[0],
                    b: coefficients[1],
                })
            }
            _ => Err(invalid("unknown model".to_string())),
        }
    }

    /// Returns the tag this model is built from.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Linear { .. } => "linear",
            Self::Polynomial { .. } => "polynomial",
            Self::Exponential { .. } => "exponential",
        }
    }

    /// Evaluates k at a mean temperature in °C, without validation.
    #[must_use]
    pub fn evaluate(&self, mean_temperature: f64) -> f64 {
        let t = mean_temperature;
        match *self {
            Self::Constant { k0 } => k0,
            Self::Linear { k0, k1 } => k0 + k1 * t,
            Self::Polynomial { coefficients } => {
                coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
            }
            Self::Exponential { a, b } => a * (b * t).exp(),
        }
    }
}

impl fmt::Display for ConductivityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { k0 } => write!(f, "k(T) = {k0}"),
            Self::Linear { k0, k1 } => write!(f, "k(T) = {k0} + {k1}·T"),
            Self::Polynomial { coefficients: [k0, k1, k2, k3, k4] } => write!(
                f,
                "k(T) = {k0} + {k1}·T + {k2}·T² + {k3}·T³ + {k4}·T⁴"
            ),
            Self::Exponential { a, b } => write!(f, "k(T) = {a}·exp({b}·T)"),
        }
    }
}

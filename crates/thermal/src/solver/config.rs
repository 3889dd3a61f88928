use isola_solve::damped;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};

use crate::ConvectionConfig;

/// How to treat a conductivity evaluated outside its material's valid range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangePolicy {
    /// Attach a [`RangeWarning`](crate::RangeWarning) to the profile.
    #[default]
    Warn,
    /// Fail with [`ThermalError::OutsideValidRange`](crate::ThermalError::OutsideValidRange).
    Strict,
}

/// Configuration for the steady-state solver.
///
/// The defaults carry the contractual search settings: a 0.5 W/m² residual
/// tolerance, 1000 evaluations, a 50 K initial step halved on every sign
/// change down to 0.001 K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Outer-face search, in °C and W/m².
    pub search: damped::Config,
    pub convection: ConvectionConfig,
    pub range_policy: RangePolicy,
    /// Offset of the first outer-face guess from ambient, toward the process.
    ///
    /// Capped at half the process-to-ambient difference.
    pub initial_offset: TemperatureInterval,
    /// Largest interior temperature change, in K, at which the layer
    /// fixed point is considered settled.
    pub profile_tol: f64,
    /// Pass limit for the layer fixed point.
    pub profile_max_iters: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            search: damped::Config::default(),
            convection: ConvectionConfig::default(),
            range_policy: RangePolicy::default(),
            initial_offset: TemperatureInterval::new::<kelvin>(10.0),
            profile_tol: 1e-9,
            profile_max_iters: 200,
        }
    }
}

impl SolverConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns the reason for the first invalid setting.
    pub fn validate(&self) -> Result<(), &'static str> {
        self.search.validate()?;
        self.convection.validate()?;

        let offset = self.initial_offset.get::<kelvin>();
        if !offset.is_finite() || offset < 0.0 {
            return Err("initial_offset must be non-negative and finite");
        }
        if !self.profile_tol.is_finite() || self.profile_tol <= 0.0 {
            return Err("profile_tol must be positive and finite");
        }
        if self.profile_max_iters == 0 {
            return Err("profile_max_iters must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.max_iters, 1000);
        assert_eq!(config.range_policy, RangePolicy::Warn);
    }

    #[test]
    fn rejects_bad_settings() {
        let base = SolverConfig::default();

        let negative_offset = SolverConfig {
            initial_offset: TemperatureInterval::new::<kelvin>(-1.0),
            ..base
        };
        assert!(negative_offset.validate().is_err());

        let no_passes = SolverConfig {
            profile_max_iters: 0,
            ..base
        };
        assert!(no_passes.validate().is_err());

        let bad_search = SolverConfig {
            search: damped::Config {
                max_iters: 0,
                ..damped::Config::default()
            },
            ..base
        };
        assert!(bad_search.validate().is_err());
    }
}

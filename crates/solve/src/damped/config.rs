/// Configuration for the damped step search.
///
/// The defaults are the contract used by the steady-state thermal solver:
/// a residual tolerance of 0.5 (W/m² in that context), at most 1000
/// evaluations, a 50-unit opening step, and a 0.001-unit step floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of residual evaluations.
    pub max_iters: usize,
    /// The search converges once `|residual| < residual_tol`.
    pub residual_tol: f64,
    /// Step taken after the first evaluation.
    pub initial_step: f64,
    /// Halving never takes the step below this size.
    pub min_step: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            residual_tol: 0.5,
            initial_step: 50.0,
            min_step: 0.001,
        }
    }
}

impl Config {
    /// Validates the iteration budget, tolerance, and step sizes.
    ///
    /// # Errors
    ///
    /// Returns a static reason if any field is out of range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iters == 0 {
            return Err("max_iters must be at least 1");
        }
        if !self.residual_tol.is_finite() || self.residual_tol <= 0.0 {
            return Err("residual_tol must be finite and positive");
        }
        if !self.initial_step.is_finite() || self.initial_step <= 0.0 {
            return Err("initial_step must be finite and positive");
        }
        if !self.min_step.is_finite() || self.min_step <= 0.0 {
            return Err("min_step must be finite and positive");
        }
        if self.min_step > self.initial_step {
            return Err("min_step must not exceed initial_step");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_fields() {
        let cases = [
            Config {
                max_iters: 0,
                ..Config::default()
            },
            Config {
                residual_tol: f64::NAN,
                ..Config::default()
            },
            Config {
                residual_tol: 0.0,
                ..Config::default()
            },
            Config {
                initial_step: 0.0,
                ..Config::default()
            },
            Config {
                min_step: -1.0,
                ..Config::default()
            },
            Config {
                min_step: 100.0,
                ..Config::default()
            },
        ];

        for config in cases {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }
}

//! Dew point and the thinnest insulation that keeps a cold surface dry.
//!
//! The thickness search is a linear scan: each candidate thickness of a
//! single material is solved independently and the first one whose outer
//! face is at or above the dew point wins. This relies on the outer face
//! warming monotonically with thickness on a cold process. That holds for
//! the correlations used here over the usual range of conditions, but it is
//! an assumption, not something the scan checks.

use isola_solve::Observer;
use tracing::debug;
use uom::si::{
    f64::{Length, Ratio, ThermodynamicTemperature},
    length::{meter, millimeter},
    ratio::ratio,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    BoundaryCondition, Insulation, Layer, Material, SolverConfig, ThermalError, ThermalProfile,
    solver, units::celsius,
};

const MAGNUS_A: f64 = 17.27;
const MAGNUS_B: f64 = 237.7;

/// Dew point of moist air by the Magnus approximation.
///
/// # Errors
///
/// Returns [`ThermalError::InvalidBoundaryCondition`] unless the humidity
/// lies in `(0, 1]` and the temperature is finite.
pub fn dew_point(
    ambient_temperature: ThermodynamicTemperature,
    relative_humidity: Ratio,
) -> Result<ThermodynamicTemperature, ThermalError> {
    let ta = ambient_temperature.get::<degree_celsius>();
    let rh = relative_humidity.get::<ratio>();
    if !ta.is_finite() {
        return Err(ThermalError::InvalidBoundaryCondition {
            parameter: "ambient_temperature",
            reason: "must be finite",
        });
    }
    if !(rh > 0.0 && rh <= 1.0) {
        return Err(ThermalError::InvalidBoundaryCondition {
            parameter: "relative_humidity",
            reason: "must lie in (0, 100] %",
        });
    }

    let alpha = MAGNUS_A * ta / (MAGNUS_B + ta) + rh.ln();
    Ok(celsius(MAGNUS_B * alpha / (MAGNUS_A - alpha)))
}

/// Range of candidate thicknesses, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    pub min: Length,
    pub max: Length,
    pub step: Length,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min: Length::new::<millimeter>(1.0),
            max: Length::new::<millimeter>(500.0),
            step: Length::new::<millimeter>(1.0),
        }
    }
}

impl ScanConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a reason if a length is not positive and finite or the range
    /// is inverted.
    pub fn validate(&self) -> Result<(), &'static str> {
        let [min, max, step] = [self.min, self.max, self.step].map(|l| l.get::<meter>());
        if ![min, max, step].iter().all(|l| l.is_finite() && *l > 0.0) {
            return Err("scan lengths must be positive and finite");
        }
        if min > max {
            return Err("scan minimum must not exceed its maximum");
        }
        Ok(())
    }

    /// Candidate thicknesses in meters, from `min` upward.
    fn candidates(&self) -> impl Iterator<Item = f64> {
        let min = self.min.get::<meter>();
        let max = self.max.get::<meter>();
        let step = self.step.get::<meter>();
        // Tolerate rounding in the span so `max` itself is tried.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = ((max - min) / step + 1e-9).floor() as usize + 1;
        (0..count).map(move |i| min + step * i as f64)
    }
}

/// One candidate thickness evaluated by the scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanEvent {
    /// Candidate number, starting at 1.
    pub candidate: usize,
    pub thickness: Length,
    /// Outer-face temperature, if the solver converged.
    pub surface_temperature: Option<ThermodynamicTemperature>,
    pub dew_point: ThermodynamicTemperature,
}

/// Control actions supported by the thickness scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    /// Stop after the current candidate.
    Stop,
}

/// How the thickness scan ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The thinnest candidate whose outer face stays at or above the dew point.
    Found {
        thickness: Length,
        profile: ThermalProfile,
    },
    /// No candidate in the scan range is thick enough.
    Exhausted,
    /// An observer stopped the scan.
    Stopped { last_thickness: Length },
}

/// Result of the condensation analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensationReport {
    pub dew_point: ThermodynamicTemperature,
    pub outcome: ScanOutcome,
}

impl CondensationReport {
    /// The minimum safe thickness, if one was found.
    #[must_use]
    pub fn thickness(&self) -> Option<Length> {
        match self.outcome {
            ScanOutcome::Found { thickness, .. } => Some(thickness),
            ScanOutcome::Exhausted | ScanOutcome::Stopped { .. } => None,
        }
    }
}

/// Finds the thinnest single layer of `material` that keeps the outer face
/// of a cold process at or above the ambient dew point.
///
/// # Errors
///
/// Returns [`ThermalError::InvalidBoundaryCondition`] unless the process is
/// colder than ambient and a relative humidity is given, and propagates any
/// solver error other than non-convergence. Candidates that do not converge
/// are treated as unsafe.
pub fn minimum_thickness(
    material: &Material,
    boundary: &BoundaryCondition,
    scan: &ScanConfig,
    config: &SolverConfig,
) -> Result<CondensationReport, ThermalError> {
    minimum_thickness_observed(material, boundary, scan, config, ())
}

/// As [`minimum_thickness`], reporting every candidate to `observer`.
///
/// # Errors
///
/// See [`minimum_thickness`].
pub fn minimum_thickness_observed<Obs>(
    material: &Material,
    boundary: &BoundaryCondition,
    scan: &ScanConfig,
    config: &SolverConfig,
    mut observer: Obs,
) -> Result<CondensationReport, ThermalError>
where
    Obs: Observer<ScanEvent, ScanAction>,
{
    scan.validate()
        .map_err(|reason| ThermalError::InvalidConfig { reason })?;
    boundary.require_cold()?;
    let humidity = boundary
        .relative_humidity
        .ok_or(ThermalError::InvalidBoundaryCondition {
            parameter: "relative_humidity",
            reason: "required for the condensation analysis",
        })?;
    let dew = dew_point(boundary.ambient_temperature, humidity)?;
    let dew_c = dew.get::<degree_celsius>();

    for (index, meters) in scan.candidates().enumerate() {
        let thickness = Length::new::<meter>(meters);
        let insulation = Insulation::single(Layer::new(thickness, material.clone())?);

        let profile = match solver::solve(&insulation, boundary, config) {
            Ok(profile) => Some(profile),
            Err(ThermalError::DidNotConverge { residual, .. }) => {
                debug!(thickness = meters, residual, "candidate did not converge");
                None
            }
            Err(err) => return Err(err),
        };

        let surface = profile.as_ref().map(ThermalProfile::outer_face);
        let action = observer.observe(&ScanEvent {
            candidate: index + 1,
            thickness,
            surface_temperature: surface,
            dew_point: dew,
        });

        if let Some(profile) = profile {
            if profile.outer_face().get::<degree_celsius>() >= dew_c {
                debug!(
                    thickness = meters,
                    dew_point = dew_c,
                    surface_temperature = profile.outer_face().get::<degree_celsius>(),
                    "found minimum thickness against condensation"
                );
                return Ok(CondensationReport {
                    dew_point: dew,
                    outcome: ScanOutcome::Found { thickness, profile },
                });
            }
        }

        if action == Some(ScanAction::Stop) {
            debug!(thickness = meters, "thickness scan stopped by observer");
            return Ok(CondensationReport {
                dew_point: dew,
                outcome: ScanOutcome::Stopped {
                    last_thickness: thickness,
                },
            });
        }
    }

    debug!(dew_point = dew_c, "no thickness in range avoids condensation");
    Ok(CondensationReport {
        dew_point: dew,
        outcome: ScanOutcome::Exhausted,
    })
}

//! Steady-state temperature profile through multi-layer insulation.
//!
//! The only unknown the search sees is the outer-face temperature `Ts`. For
//! each trial `Ts` the layer stack is solved with both faces fixed, which
//! gives the conducted flux and every interior temperature, and the residual
//!
//! ```text
//! e(Ts) = q_conducted(Ts) − q_dissipated(Ts)
//! ```
//!
//! is handed to the damped step search. A positive residual means more heat
//! arrives at the outer face than leaves it, so the face must run hotter.
//!
//! The same residual works for cold service, where both fluxes are negative.

mod config;
mod stack;

pub use config::{RangePolicy, SolverConfig};

use isola_solve::{
    Observer,
    damped::{self, Action, Event, Status},
};
use tracing::{debug, warn};
use uom::si::{
    f64::{TemperatureInterval, ThermalConductivity, ThermodynamicTemperature},
    length::meter,
    temperature_interval::kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use crate::{
    BoundaryCondition, Geometry, Insulation, LayerState, ProfileStatus, RangeWarning,
    ThermalError, ThermalProfile,
    loss::Ambient,
    units::{HeatFlux, celsius, heat_flux, linear_heat_rate},
};

use stack::{Conduction, Stack};

/// Progress of the outer-face search, emitted once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveEvent {
    pub iteration: usize,
    pub surface_temperature: ThermodynamicTemperature,
    pub residual: HeatFlux,
    /// Step the search will take from this point before any halving.
    pub step: TemperatureInterval,
}

/// Solves for the steady-state profile.
///
/// # Errors
///
/// Returns [`ThermalError::DidNotConverge`] with the best profile found if
/// the iteration budget runs out, and fails fast on invalid inputs or an
/// invalid conductivity in any layer. Under [`RangePolicy::Strict`] a
/// conductivity extrapolated beyond its valid range is an error.
pub fn solve(
    insulation: &Insulation,
    boundary: &BoundaryCondition,
    config: &SolverConfig,
) -> Result<ThermalProfile, ThermalError> {
    solve_observed(insulation, boundary, config, ())
}

/// Solves for the steady-state profile, reporting each search evaluation.
///
/// Returning [`Action::StopEarly`] from the observer ends the search; the
/// best profile so far is returned with [`ProfileStatus::NotConverged`].
///
/// # Errors
///
/// See [`solve`].
pub fn solve_observed<Obs>(
    insulation: &Insulation,
    boundary: &BoundaryCondition,
    config: &SolverConfig,
    mut observer: Obs,
) -> Result<ThermalProfile, ThermalError>
where
    Obs: Observer<SolveEvent, Action>,
{
    config
        .validate()
        .map_err(|reason| ThermalError::InvalidConfig { reason })?;
    boundary.service()?;

    let process = boundary.process_temperature.get::<degree_celsius>();
    let ambient = Ambient::of(boundary);
    let total_thickness = insulation.total_thickness().get::<meter>();
    let surface = boundary
        .geometry
        .exposed_surface(total_thickness, config.convection.plane_length);
    let stack = Stack::new(insulation, &boundary.geometry);

    let residual = |outer: f64| -> Result<(f64, Conduction), ThermalError> {
        let conduction = stack.conduct(process, outer, config.profile_tol, config.profile_max_iters)?;
        let dissipated = ambient.loss(outer, surface, &config.convection);
        Ok((conduction.flux - dissipated, conduction))
    };

    let delta = process - ambient.temperature;
    let offset = config.initial_offset.get::<kelvin>().min(delta.abs() / 2.0);
    let start = ambient.temperature + offset.copysign(delta);

    let adapter = |event: &Event<'_, Conduction>| {
        observer.observe(&SolveEvent {
            iteration: event.iter,
            surface_temperature: celsius(event.eval.x),
            residual: heat_flux(event.eval.residual),
            step: TemperatureInterval::new::<kelvin>(event.step),
        })
    };

    let solution = damped::search(
        residual,
        start,
        [ambient.temperature, process],
        &config.search,
        adapter,
    )?;

    let passes = solution.output.passes;
    let status = match solution.status {
        Status::Converged => ProfileStatus::Converged,
        Status::MaxIters | Status::StoppedByObserver => ProfileStatus::NotConverged,
    };
    let profile = build_profile(
        insulation,
        boundary,
        solution.output,
        solution.residual,
        solution.iters,
        status,
    );

    if solution.status == Status::MaxIters {
        warn!(
            iterations = solution.iters,
            residual = solution.residual,
            surface_temperature = solution.x,
            "steady state did not converge"
        );
        return Err(ThermalError::DidNotConverge {
            iterations: solution.iters,
            residual: solution.residual,
            profile: Box::new(profile),
        });
    }

    for warning in &profile.warnings {
        warn!(
            layer = warning.layer,
            material = %warning.material,
            mean_temperature = warning.mean_temperature,
            "{warning}"
        );
    }
    if config.range_policy == RangePolicy::Strict {
        if let Some(warning) = profile.warnings.first() {
            return Err(ThermalError::OutsideValidRange(warning.clone()));
        }
    }

    debug!(
        iterations = profile.iterations,
        layer_passes = passes,
        surface_temperature = solution.x,
        heat_flux = profile.heat_flux.value,
        converged = profile.is_converged(),
        "solved steady-state profile"
    );
    Ok(profile)
}

fn build_profile(
    insulation: &Insulation,
    boundary: &BoundaryCondition,
    conduction: Conduction,
    residual: f64,
    iterations: usize,
    status: ProfileStatus,
) -> ThermalProfile {
    let temperatures = &conduction.temperatures;
    let mut layers = Vec::with_capacity(insulation.layers().len());
    let mut warnings = Vec::new();

    for (i, (layer, k)) in insulation
        .layers()
        .iter()
        .zip(&conduction.conductivities)
        .enumerate()
    {
        let mean = (temperatures[i] + temperatures[i + 1]) / 2.0;
        let material = layer.material();
        if let Some(range) = material.valid_range() {
            if !range.contains(mean) {
                warnings.push(RangeWarning {
                    layer: i,
                    material: material.name().to_string(),
                    mean_temperature: mean,
                    range,
                });
            }
        }
        layers.push(LayerState {
            material: material.name().to_string(),
            thickness: layer.thickness(),
            mean_temperature: celsius(mean),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(*k),
        });
    }

    let per_length = match boundary.geometry {
        Geometry::Plane => None,
        Geometry::Cylinder { .. } => Some(linear_heat_rate(conduction.rate)),
    };

    ThermalProfile {
        interface_temperatures: temperatures.iter().copied().map(celsius).collect(),
        layers,
        heat_flux: heat_flux(conduction.flux),
        linear_heat_rate: per_length,
        residual: heat_flux(residual),
        iterations,
        status,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Length, length::millimeter};

    use crate::{
        ConductivityModel, Layer, Material, TemperatureRange,
        convection::{ConvectionConfig, PlaneLength, Surface},
        surface_heat_loss,
    };

    fn millimeters(value: f64) -> Length {
        Length::new::<millimeter>(value)
    }

    fn wall(mm: f64, k: f64) -> Insulation {
        Insulation::single(
            Layer::new(
                millimeters(mm),
                Material::new("wool", ConductivityModel::Constant { k0: k }),
            )
            .expect("valid layer"),
        )
    }

    #[test]
    fn residual_is_within_tolerance() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let profile = solve(&wall(51.0, 0.035), &boundary, &SolverConfig::default())
            .expect("converges");

        assert!(profile.is_converged());
        assert!(profile.residual.value.abs() < 0.5);
        assert_eq!(profile.interface_temperatures.len(), 2);
    }

    #[test]
    fn plane_length_can_follow_the_insulation() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let config = SolverConfig {
            convection: ConvectionConfig {
                plane_length: PlaneLength::InsulationThickness,
                ..ConvectionConfig::default()
            },
            ..SolverConfig::default()
        };

        let tied = solve(&wall(51.0, 0.035), &boundary, &config).expect("converges");
        let large = solve(&wall(51.0, 0.035), &boundary, &SolverConfig::default())
            .expect("converges");

        let plate = Surface::Plane {
            length: millimeters(51.0),
        };
        let dissipated = surface_heat_loss(tied.outer_face(), &boundary, plate, &config.convection)
            .expect("valid conditions");
        assert!((tied.heat_flux.value - dissipated.value).abs() < 0.5);
        // The short plate sheds heat more easily, so its face runs cooler.
        assert!(tied.outer_face() < large.outer_face());
    }

    #[test]
    fn observer_sees_iterations_and_can_stop() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let mut seen = Vec::new();
        let observer = |event: &SolveEvent| {
            seen.push(event.iteration);
            (event.iteration == 2).then_some(Action::StopEarly)
        };

        let profile = solve_observed(&wall(51.0, 0.035), &boundary, &SolverConfig::default(), observer)
            .expect("stops cleanly");

        assert_eq!(seen, vec![1, 2]);
        assert_eq!(profile.status, ProfileStatus::NotConverged);
        assert_eq!(profile.iterations, 2);
    }

    #[test]
    fn first_guess_is_offset_from_ambient() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let mut first = None;
        let observer = |event: &SolveEvent| -> Option<Action> {
            first.get_or_insert(event.surface_temperature.get::<degree_celsius>());
            None
        };

        solve_observed(&wall(51.0, 0.035), &boundary, &SolverConfig::default(), observer)
            .expect("converges");

        assert_relative_eq!(first.expect("observed"), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn exhausted_budget_reports_best_profile() {
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));
        let mut config = SolverConfig::default();
        config.search.max_iters = 2;

        let err = solve(&wall(51.0, 0.035), &boundary, &config).unwrap_err();

        match err {
            ThermalError::DidNotConverge {
                iterations,
                profile,
                ..
            } => {
                assert_eq!(iterations, 2);
                assert_eq!(profile.status, ProfileStatus::NotConverged);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn extrapolation_warns_or_fails() {
        let material = Material::new("foam", ConductivityModel::Constant { k0: 0.03 })
            .with_valid_range(TemperatureRange::new(-50.0, 100.0).expect("valid"));
        let insulation =
            Insulation::single(Layer::new(millimeters(50.0), material).expect("valid layer"));
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));

        let profile = solve(&insulation, &boundary, &SolverConfig::default()).expect("warns");
        assert_eq!(profile.warnings.len(), 1);
        assert_eq!(profile.warnings[0].layer, 0);

        let strict = SolverConfig {
            range_policy: RangePolicy::Strict,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve(&insulation, &boundary, &strict),
            Err(ThermalError::OutsideValidRange(_))
        ));
    }

    #[test]
    fn invalid_conductivity_fails_fast() {
        let material = Material::new("bad", ConductivityModel::Linear { k0: 0.02, k1: -2e-4 });
        let insulation =
            Insulation::single(Layer::new(millimeters(50.0), material).expect("valid layer"));
        let boundary = BoundaryCondition::new(celsius(250.0), celsius(30.0));

        assert!(matches!(
            solve(&insulation, &boundary, &SolverConfig::default()),
            Err(ThermalError::InvalidConductivity { layer: 0, .. })
        ));
    }
}
